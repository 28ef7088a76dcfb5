//! Config, data, and log locations.

use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the XDG base directories.
const APP_DIR: &str = "onthisday";

/// File name of the persisted plugin data object.
pub const DATA_FILE: &str = "data.json";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    resolve_base_dir(
        env::var(var).ok().as_deref(),
        env::var("HOME").ok().as_deref(),
        home_default,
    )
}

/// What: Pure part of [`xdg_base_dir`], kept separate so it can be tested without touching the
/// process environment.
///
/// Inputs:
/// - `xdg`: Value of the XDG variable, if set.
/// - `home`: Value of `$HOME`, if set.
/// - `home_default`: Segments appended to `home` when `xdg` is unset or blank.
///
/// Output:
/// - Base directory; falls back to `.` when neither variable is usable.
fn resolve_base_dir(xdg: Option<&str>, home: Option<&str>, home_default: &[&str]) -> PathBuf {
    if let Some(p) = xdg
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let mut base = PathBuf::from(home.unwrap_or("."));
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// What: Directory holding `data.json`.
///
/// Inputs:
/// - `override_dir`: Value of `--config-dir`, which wins when present.
///
/// Output:
/// - `--config-dir`, else `$XDG_CONFIG_HOME/onthisday`, else `$HOME/.config/onthisday`.
///
/// Details:
/// - The directory is not created here; [`super::JsonFileStore`] creates it on first save.
#[must_use]
pub fn config_dir(override_dir: Option<&Path>) -> PathBuf {
    override_dir.map_or_else(
        || xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR),
        Path::to_path_buf,
    )
}

/// Full path of the persisted settings object inside `config_dir`.
#[must_use]
pub fn data_path(config_dir: &Path) -> PathBuf {
    config_dir.join(DATA_FILE)
}

/// Logs directory: `$XDG_STATE_HOME/onthisday/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = xdg_base_dir("XDG_STATE_HOME", &[".local", "state"])
        .join(APP_DIR)
        .join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
