//! Path utilities for configuration values and the data directory.
//!
//! Handles tilde expansion for user-supplied paths and locates the directory
//! where trace files are written.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GAME_LIBRARY_DATA_DIR";

/// Returns the data directory for trace output.
///
/// Resolution order:
/// 1. `configured`, tilde-expanded
/// 2. The `GAME_LIBRARY_DATA_DIR` environment variable
/// 3. `~/.local/share/game-library`
/// 4. `.game-library` in the working directory when `HOME` is unset
#[must_use]
pub fn get_data_dir(configured: Option<&str>) -> PathBuf {
    if let Some(dir) = configured.filter(|dir| !dir.trim().is_empty()) {
        return expand_tilde(dir.trim());
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    home_dir().map_or_else(
        || PathBuf::from(".game-library"),
        |home| home.join(".local").join("share").join("game-library"),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use game_library::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/srv/catalog.json"), PathBuf::from("/srv/catalog.json"));
/// assert_eq!(expand_tilde("data/catalog.json"), PathBuf::from("data/catalog.json"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = home_dir() else {
        return PathBuf::from(path);
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").filter(|home| !home.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dir_wins() {
        assert_eq!(get_data_dir(Some("/tmp/traces")), PathBuf::from("/tmp/traces"));
    }

    #[test]
    fn blank_configured_dir_is_ignored() {
        assert_ne!(get_data_dir(Some("  ")), PathBuf::from(""));
    }

    #[test]
    fn tilde_expands_against_home() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/games/catalog.json"), home.join("games/catalog.json"));
        assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
    }
}
