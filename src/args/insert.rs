//! `insert` and `preview` commands.

use onthisday::editor::{Document, Notifier};
use onthisday::insert::{
    InsertOutcome, MISSING_TOKEN_NOTICE, NOTHING_TO_INSERT_NOTICE, prepare_text,
};
use onthisday::settings::JsonFileStore;
use onthisday::state::{ResponseCache, Session};

use super::definition::{InsertArgs, Result};
use super::utils::StderrNotifier;

/// What: Insert today's events into a file.
///
/// Inputs:
/// - `session`: Loaded session.
/// - `args`: Target file, cursor or selection, title flag.
///
/// Output:
/// - `Ok(())` whether or not text was inserted; notices explain skipped inserts.
///
/// # Errors
/// - Reading or writing the target file.
///
/// Details:
/// - Without `--at`/`--replace` the text is appended at the end of the file.
/// - The file is only rewritten when text was inserted.
pub async fn handle_insert(session: &mut Session<JsonFileStore>, args: &InsertArgs) -> Result<()> {
    let mut doc = Document::load(&args.file)?;
    match (args.at, args.replace) {
        (_, Some((from, to))) => doc.select(from, to),
        (Some(at), None) => doc.set_cursor(at),
        (None, None) => doc.move_to_end(),
    }
    let mut notifier = StderrNotifier;
    let outcome = session.insert(&mut doc, &mut notifier, !args.no_title).await;
    if let InsertOutcome::Inserted { bytes, .. } = outcome {
        doc.save(&args.file)?;
        tracing::info!(file = %args.file.display(), bytes, "document saved");
    }
    Ok(())
}

/// What: Print the text an insert would produce.
///
/// Inputs:
/// - `session`: Loaded session.
/// - `no_title`: Leave out the title segment.
/// - `verbose`: On an empty result, also print what the single fetch returned.
///
/// Output:
/// - `Ok(())`; a notice is printed instead of text when there is nothing to show.
pub async fn handle_preview(
    session: &mut Session<JsonFileStore>,
    no_title: bool,
    verbose: bool,
) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    match prepare_text(session, !no_title, today).await {
        Ok(text) => print!("{text}"),
        Err(InsertOutcome::MissingCredential) => StderrNotifier.notice(MISSING_TOKEN_NOTICE),
        Err(_) => {
            StderrNotifier.notice(NOTHING_TO_INSERT_NOTICE);
            if verbose {
                eprintln!("{}", feed_diagnostic(session.cache()));
            }
        }
    }
    Ok(())
}

/// One-line summary of the cached feed response for `--verbose` output.
fn feed_diagnostic(cache: &ResponseCache) -> String {
    match cache.last_error() {
        Some(e) => format!("feed error: {e}"),
        None => format!("feed returned {} event(s)", cache.events().len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_of_empty_cache_counts_events() {
        assert_eq!(
            feed_diagnostic(&ResponseCache::default()),
            "feed returned 0 event(s)"
        );
    }
}
