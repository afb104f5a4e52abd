use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, warn};

use super::preferences::{DATABASE_PATH_KEY, PreferenceStore};

/// Clean up a user-entered database location.
///
/// Trims whitespace and one pair of matching surrounding quotes (as left by
/// "Copy as path" in file managers), then expands a leading `~` to the home
/// directory. Returns `None` when nothing remains.
pub fn normalize_location(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(*quote)
                .and_then(|rest| rest.strip_suffix(*quote))
        })
        .unwrap_or(trimmed)
        .trim();

    if unquoted.is_empty() { None } else { Some(expand_home(unquoted)) }
}

/// `~` and `~/rest` resolve against the home directory; `~user` is left alone
fn expand_home(location: &str) -> String {
    let Some(rest) = location.strip_prefix('~') else {
        return location.to_string();
    };
    let rest = if rest.is_empty() {
        rest
    } else if let Some(stripped) = rest.strip_prefix(['/', std::path::MAIN_SEPARATOR]) {
        stripped
    } else {
        return location.to_string();
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home.to_string_lossy().into_owned(),
        Some(home) => home.join(rest).to_string_lossy().into_owned(),
        None => location.to_string(),
    }
}

/// Where a stock VS Code install keeps its global state database
///
/// - Linux: `~/.config/Code/User/globalStorage/state.vscdb`
/// - macOS: `~/Library/Application Support/Code/User/globalStorage/state.vscdb`
/// - Windows: `%APPDATA%\Code\User\globalStorage\state.vscdb`
pub fn default_database_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("Code").join("User").join("globalStorage").join("state.vscdb"))
}

/// Pick the database location to use.
///
/// Order: explicit override, persisted preference, platform default (only
/// if that file exists). `None` means the launcher is not configured yet.
pub fn resolve_location(
    explicit: Option<&str>,
    preferences: &dyn PreferenceStore,
) -> Result<Option<PathBuf>> {
    if let Some(location) = explicit.and_then(normalize_location) {
        debug!(location = %location, "Using database location from command line");
        return Ok(Some(PathBuf::from(location)));
    }

    match preferences.get(DATABASE_PATH_KEY) {
        Ok(Some(stored)) => {
            if let Some(location) = normalize_location(&stored) {
                return Ok(Some(PathBuf::from(location)));
            }
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Ignoring unreadable preferences"),
    }

    Ok(default_database_path().filter(|path| path.is_file()))
}
