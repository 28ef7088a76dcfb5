//! Command-line argument definition and dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use onthisday::editor::Position;

use super::utils::{parse_position, parse_span};

/// Result type for command handlers.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// onthisday - insert historical "on this day" events into your notes
#[derive(Parser, Debug)]
#[command(name = "onthisday")]
#[command(version)]
#[command(about = "Insert historical \"on this day\" events into a text file", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding data.json (default: $XDG_CONFIG_HOME/onthisday)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert today's events into a file
    Insert(InsertArgs),
    /// Print the text an insert would produce
    Preview {
        /// Leave out the title segment
        #[arg(long)]
        no_title: bool,
    },
    /// Show or change settings
    Settings {
        /// Settings action
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Arguments of `insert`.
#[derive(clap::Args, Debug)]
pub struct InsertArgs {
    /// File to edit (created when missing)
    pub file: PathBuf,

    /// Insert without the title segment
    #[arg(long)]
    pub no_title: bool,

    /// Cursor position as LINE:COL, 1-based (default: end of file)
    #[arg(long, value_parser = parse_position)]
    pub at: Option<Position>,

    /// Replace a selection given as LINE:COL-LINE:COL, 1-based
    #[arg(long, value_parser = parse_span, conflicts_with = "at")]
    pub replace: Option<(Position, Position)>,
}

/// Settings surface actions.
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the current settings (token redacted)
    Show,
    /// Number of events to insert (clamped to 1-10)
    SetAmount {
        /// New amount
        value: String,
    },
    /// Title template; `{{date}}` is the formatted date, `\n` is a newline
    SetTitle {
        /// New template
        template: String,
    },
    /// Item template; `{{description}}`, `{{year}}`, `{{category}}`, `{{if year}}...{{endif}}`
    SetItem {
        /// New template
        template: String,
    },
    /// Title date format (Moment-style like `MMMM Do`, or strftime like `%B %-d`)
    SetDateFormat {
        /// New pattern
        format: String,
    },
    /// Access token; prompted without echo when omitted
    SetToken {
        /// Token value (empty string clears it)
        token: Option<String>,
    },
    /// Feed provider: wikimedia, byabbe, onthisday
    SetProvider {
        /// Provider key
        provider: String,
    },
    /// Base URL override; empty restores the provider default
    SetBaseUrl {
        /// URL
        url: String,
    },
    /// Selection mode: first or random
    SetMode {
        /// Mode key
        mode: String,
    },
    /// Categories used by random selection (none = all)
    SetCategories {
        /// Category names
        categories: Vec<String>,
    },
    /// Reset every setting to its default
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// What: Run the selected command.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(())` on success.
///
/// # Errors
/// - Document I/O failures and invalid setting values.
pub async fn run(args: Args) -> Result<()> {
    let config_dir = onthisday::settings::config_dir(args.config_dir.as_deref());
    let store = onthisday::settings::JsonFileStore::new(onthisday::settings::data_path(&config_dir));
    tracing::debug!(path = %store.path().display(), "using plugin data file");
    let mut session = onthisday::state::Session::load(store);

    match args.command {
        Command::Insert(insert_args) => {
            super::insert::handle_insert(&mut session, &insert_args).await
        }
        Command::Preview { no_title } => {
            super::insert::handle_preview(&mut session, no_title, args.verbose).await
        }
        Command::Settings { action } => super::settings::handle_settings(&mut session, action),
    }
}
