//! The "Insert" command: fetch, render, and write into the host editor.

use chrono::NaiveDate;

use crate::editor::{Editor, Notifier};
use crate::render::{render_on, select};
use crate::settings::PluginDataStore;
use crate::state::{MonthDay, Session};

/// Notice raised when the provider needs a token that is not configured.
pub const MISSING_TOKEN_NOTICE: &str =
    "On this day: this feed needs an access token. Add one in the settings first.";

/// Notice raised when there is nothing to insert.
pub const NOTHING_TO_INSERT_NOTICE: &str =
    "On this day: no events to insert. The feed may be unavailable or the item template empty.";

/// Result of one insertion attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Text was written into the document.
    Inserted {
        /// Whether a selection was replaced (otherwise inserted at the cursor).
        replaced_selection: bool,
        /// Number of bytes inserted.
        bytes: usize,
    },
    /// Skipped before fetching: the provider requires a token.
    MissingCredential,
    /// Rendering produced no text.
    NothingToInsert,
}

/// What: Produce the text an insertion would write, without touching an editor.
///
/// Inputs:
/// - `session`: Session context; its cache may be refreshed.
/// - `include_title`: Whether the title segment is rendered.
/// - `today`: Date used for the request and the `{{date}}` token.
///
/// Output:
/// - `Ok(text)` with non-empty text, or `Err(outcome)` describing why there is none.
///
/// Details:
/// - With a missing credential no request is made.
/// - Events come from the session cache when it already holds today's response.
pub async fn prepare_text<S: PluginDataStore>(
    session: &mut Session<S>,
    include_title: bool,
    today: NaiveDate,
) -> Result<String, InsertOutcome> {
    if session.settings().missing_credential() {
        tracing::warn!(
            provider = session.settings().feed_provider.as_config_key(),
            "insert skipped: access token missing"
        );
        return Err(InsertOutcome::MissingCredential);
    }
    let date = MonthDay::from_date(today);
    let events = session.events_for(date).await.to_vec();
    let s = session.settings();
    let count = usize::from(s.amount_of_events);
    let picked = select(
        &events,
        count,
        s.selection_mode,
        &s.enabled_categories,
        &mut rand::rng(),
    );
    let title_template = if include_title {
        s.title_template.as_str()
    } else {
        ""
    };
    let text = render_on(
        &picked,
        count,
        title_template,
        &s.item_template,
        &s.title_date_format,
        today,
    );
    if text.is_empty() {
        tracing::info!(events = events.len(), "nothing to insert");
        return Err(InsertOutcome::NothingToInsert);
    }
    Ok(text)
}

/// What: Insert today's events into `editor`.
///
/// Inputs:
/// - `session`: Session context.
/// - `editor`: Host document.
/// - `notifier`: Host notice surface.
/// - `include_title`: `false` for "Insert (without title)".
///
/// Output:
/// - What happened; failures have already been shown through `notifier`.
pub async fn insert<S: PluginDataStore>(
    session: &mut Session<S>,
    editor: &mut dyn Editor,
    notifier: &mut dyn Notifier,
    include_title: bool,
) -> InsertOutcome {
    insert_on(
        session,
        editor,
        notifier,
        include_title,
        chrono::Local::now().date_naive(),
    )
    .await
}

/// What: [`insert`] for an explicit date.
///
/// Inputs:
/// - Same as [`insert`], plus `today`.
///
/// Output:
/// - What happened.
///
/// Details:
/// - An active selection is replaced; otherwise the text goes in at the cursor without adding
///   a line break.
/// - No document change happens unless text was rendered.
pub async fn insert_on<S: PluginDataStore>(
    session: &mut Session<S>,
    editor: &mut dyn Editor,
    notifier: &mut dyn Notifier,
    include_title: bool,
    today: NaiveDate,
) -> InsertOutcome {
    let text = match prepare_text(session, include_title, today).await {
        Ok(text) => text,
        Err(outcome) => {
            let message = match outcome {
                InsertOutcome::MissingCredential => MISSING_TOKEN_NOTICE,
                _ => NOTHING_TO_INSERT_NOTICE,
            };
            notifier.notice(message);
            return outcome;
        }
    };
    let replaced_selection = editor.has_selection();
    if replaced_selection {
        editor.replace_selection(&text);
    } else {
        editor.insert_at_cursor(&text);
    }
    tracing::info!(
        bytes = text.len(),
        replaced_selection,
        include_title,
        "inserted events"
    );
    InsertOutcome::Inserted {
        replaced_selection,
        bytes: text.len(),
    }
}

impl<S: PluginDataStore> Session<S> {
    /// Insert today's events into `editor`; see [`insert`].
    pub async fn insert(
        &mut self,
        editor: &mut dyn Editor,
        notifier: &mut dyn Notifier,
        include_title: bool,
    ) -> InsertOutcome {
        insert(self, editor, notifier, include_title).await
    }
}
