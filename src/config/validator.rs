use std::fmt;
use std::path::Path;

use tracing::debug;

use super::location::normalize_location;
use crate::indexer::fetch_entries;

/// Outcome of checking a candidate history database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Readable state database; `entry_count` folder entries (possibly zero)
    Valid { entry_count: usize },
    /// Not usable; `reason` is a message fit to show next to the input
    Invalid { reason: String },
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verification::Valid { .. } => None,
            Verification::Invalid { reason } => Some(reason),
        }
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Valid { entry_count: 1 } => write!(f, "valid: 1 folder"),
            Verification::Valid { entry_count } => write!(f, "valid: {} folders", entry_count),
            Verification::Invalid { reason } => write!(f, "invalid: {}", reason),
        }
    }
}

/// Run the full read pipeline against `location` without touching configuration
pub fn verify(location: &Path) -> Verification {
    match fetch_entries(location) {
        Ok(entries) => Verification::Valid { entry_count: entries.len() },
        Err(e) => {
            debug!(path = %location.display(), error = %e, "Location failed verification");
            Verification::Invalid { reason: e.to_string() }
        }
    }
}

/// Normalize user input, then [`verify`] it
pub fn verify_input(raw: &str) -> Verification {
    match normalize_location(raw) {
        Some(location) => verify(Path::new(&location)),
        None => Verification::Invalid { reason: "no database location given".to_string() },
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusqlite::Connection;
    use tempfile::TempDir;

    use super::*;
    use crate::store::HISTORY_KEY;

    fn state_db(dir: &TempDir, payload: Option<&str>) -> std::path::PathBuf {
        let path = dir.path().join("state.vscdb");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)")
            .unwrap();
        if let Some(payload) = payload {
            conn.execute("INSERT INTO ItemTable (key, value) VALUES (?1, ?2)", [HISTORY_KEY, payload])
                .unwrap();
        }
        path
    }

    #[test]
    fn test_verify_valid_counts_folders() {
        let dir = TempDir::new().unwrap();
        let path = state_db(
            &dir,
            Some(r#"{"entries":[{"folderUri":"file:///a"},{"fileUri":"file:///b"}]}"#),
        );

        assert_eq!(verify(&path), Verification::Valid { entry_count: 1 });
    }

    #[test]
    fn test_verify_empty_history_is_valid() {
        let dir = TempDir::new().unwrap();
        let path = state_db(&dir, Some(r#"{"entries":[]}"#));
        assert_eq!(verify(&path), Verification::Valid { entry_count: 0 });

        let dir = TempDir::new().unwrap();
        let path = state_db(&dir, None);
        assert!(verify(&path).is_valid());
    }

    #[test]
    fn test_verify_missing_file_reports_reason() {
        let dir = TempDir::new().unwrap();
        let verification = verify(&dir.path().join("nope.vscdb"));

        let reason = verification.reason().unwrap();
        assert!(!reason.is_empty());
        assert!(reason.contains("not found"));
    }

    #[test]
    fn test_verify_malformed_payload_reports_reason() {
        let dir = TempDir::new().unwrap();
        let path = state_db(&dir, Some(r#"{"recent":[]}"#));

        let verification = verify(&path);
        assert!(!verification.is_valid());
        assert!(verification.reason().unwrap().contains("malformed"));
    }

    #[test]
    fn test_verify_does_not_write_to_database() {
        let dir = TempDir::new().unwrap();
        let path = state_db(&dir, Some(r#"{"entries":[]}"#));
        let before = fs::read(&path).unwrap();

        verify(&path);

        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_verify_input_normalizes() {
        let dir = TempDir::new().unwrap();
        let path = state_db(&dir, Some(r#"{"entries":[]}"#));
        let quoted = format!("  \"{}\"  ", path.display());

        assert!(verify_input(&quoted).is_valid());
    }

    #[test]
    fn test_verify_input_blank() {
        let verification = verify_input("   ");
        assert_eq!(verification.reason(), Some("no database location given"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Verification::Valid { entry_count: 3 }.to_string(), "valid: 3 folders");
        assert_eq!(Verification::Valid { entry_count: 1 }.to_string(), "valid: 1 folder");
        assert_eq!(
            Verification::Invalid { reason: "boom".to_string() }.to_string(),
            "invalid: boom"
        );
    }
}
