//! onthisday binary entrypoint: argument parsing, logging, command dispatch.

mod args;

use std::fmt;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;

struct OnThisDayTimer;

impl tracing_subscriber::fmt::time::FormatTime for OnThisDayTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the log filter; `RUST_LOG` wins over the command-line level.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// What: Initialize tracing into `$XDG_STATE_HOME/onthisday/logs/onthisday.log`.
///
/// Inputs:
/// - `level`: Default filter directive.
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = onthisday::settings::logs_dir();
    log_path.push("onthisday.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(OnThisDayTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(OnThisDayTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "onthisday starting");
    let code = match args::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    };
    tracing::info!("onthisday exited");
    code
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes a non-empty timestamp without panicking
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives some content
    #[test]
    fn timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let _ = super::OnThisDayTimer.format_time(&mut writer);
        assert!(buf.contains("-T "));
    }

    /// What: Argument definition is internally consistent.
    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        super::args::Args::command().debug_assert();
    }

    /// What: Verbose forces debug logging.
    #[test]
    fn verbose_overrides_log_level() {
        use clap::Parser;
        let args = super::args::Args::parse_from(["onthisday", "--verbose", "preview"]);
        assert_eq!(super::args::determine_log_level(&args), "debug");
        let args = super::args::Args::parse_from(["onthisday", "settings", "show", "--log-level", "warn"]);
        assert_eq!(super::args::determine_log_level(&args), "warn");
    }
}
