//! Session state shared by the CLI and the TUI.
//!
//! A [`Session`] owns the configured history location, the classified entry
//! set and the search index built over it. Entries are replaced wholesale on
//! every refresh, never edited in place.
//!
//! # Refresh ordering
//!
//! Reads may run on another thread. Each refresh takes a [`RefreshTicket`]
//! stamped with a generation number; completing with a ticket older than the
//! latest one issued is a no-op, so a slow read of an old location can never
//! overwrite the entries of a newer one.
//!
//! # Error Handling Strategy
//!
//! Read failures are soft: the entry set becomes empty, the status records
//! the reason and the failure is logged. Only preference persistence returns
//! an error to the caller.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::{DATABASE_PATH_KEY, PreferenceStore, Verification, normalize_location, verify};
use crate::indexer::fetch_entries;
use crate::models::ClassifiedEntry;
use crate::search::{SearchHit, SearchIndex};
use crate::store::ReadError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No history location is known yet
    NotConfigured,
    /// A read of the current location is in flight
    Loading,
    Ready,
    /// Last read failed; the entry set is empty
    Failed(String),
}

/// Permission to complete one refresh of a specific location
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    generation: u64,
    location: PathBuf,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Perform the read this ticket stands for (safe to call off-thread)
    pub fn fetch(&self) -> Result<Vec<ClassifiedEntry>, ReadError> {
        fetch_entries(&self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { entry_count: usize },
    /// A newer refresh was started after this ticket; nothing changed
    Stale,
    Failed { reason: String },
}

#[derive(Debug)]
pub struct Session {
    location: Option<PathBuf>,
    index: SearchIndex,
    generation: u64,
    status: SessionStatus,
}

impl Session {
    pub fn new(location: Option<PathBuf>) -> Self {
        let status = match location {
            Some(_) => SessionStatus::Loading,
            None => SessionStatus::NotConfigured,
        };
        Self { location, index: SearchIndex::default(), generation: 0, status }
    }

    /// Create a session and read `location` synchronously
    pub fn load(location: Option<PathBuf>) -> Self {
        let mut session = Self::new(location);
        session.reload();
        session
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn entries(&self) -> &[ClassifiedEntry] {
        self.index.entries()
    }

    pub fn filter(&self, query: &str) -> Vec<&ClassifiedEntry> {
        self.index.filter(query)
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.index.search(query)
    }

    /// Start a refresh of the current location.
    ///
    /// Returns `None` when no location is configured. Any ticket issued
    /// earlier becomes stale.
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        let location = self.location.clone()?;
        self.generation += 1;
        self.status = SessionStatus::Loading;
        debug!(generation = self.generation, path = %location.display(), "Refresh started");
        Some(RefreshTicket { generation: self.generation, location })
    }

    /// Apply the result of the read behind `ticket`
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<ClassifiedEntry>, ReadError>,
    ) -> RefreshOutcome {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale refresh result"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(entries) => {
                let entry_count = entries.len();
                self.index = SearchIndex::build(entries);
                self.status = SessionStatus::Ready;
                info!(entry_count, path = %ticket.location.display(), "Entries loaded");
                RefreshOutcome::Applied { entry_count }
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(path = %ticket.location.display(), error = %reason, "Failed to load entries");
                self.index = SearchIndex::default();
                self.status = SessionStatus::Failed(reason.clone());
                RefreshOutcome::Failed { reason }
            }
        }
    }

    /// Refresh synchronously on the calling thread
    pub fn reload(&mut self) -> Option<RefreshOutcome> {
        let ticket = self.begin_refresh()?;
        let result = ticket.fetch();
        Some(self.complete_refresh(ticket, result))
    }

    /// Verify `raw` as a new location and adopt it if valid.
    ///
    /// On `Valid` the location is persisted, then becomes current, and any
    /// in-flight refresh is invalidated. The caller starts the follow-up
    /// read. On `Invalid` nothing changes.
    pub fn apply_location(
        &mut self,
        raw: &str,
        preferences: &mut dyn PreferenceStore,
    ) -> Result<Verification> {
        let Some(normalized) = normalize_location(raw) else {
            return Ok(Verification::Invalid {
                reason: "no database location given".to_string(),
            });
        };

        let location = PathBuf::from(normalized);
        let verification = verify(&location);
        if !verification.is_valid() {
            return Ok(verification);
        }

        preferences.set(DATABASE_PATH_KEY, &location.to_string_lossy())?;
        info!(path = %location.display(), "Database location updated");

        self.location = Some(location);
        self.generation += 1;
        self.status = SessionStatus::Loading;
        Ok(verification)
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use super::*;
    use crate::config::MemoryPreferenceStore;
    use crate::store::HISTORY_KEY;

    fn state_db(dir: &TempDir, name: &str, payload: &str) -> PathBuf {
        let path = dir.path().join(name);
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)")
            .unwrap();
        conn.execute("INSERT INTO ItemTable (key, value) VALUES (?1, ?2)", [HISTORY_KEY, payload])
            .unwrap();
        path
    }

    fn two_folders() -> &'static str {
        r#"{"entries":[{"folderUri":"file:///home/me/alpha"},{"folderUri":"file:///home/me/beta"}]}"#
    }

    #[test]
    fn test_new_without_location() {
        let mut session = Session::new(None);
        assert_eq!(session.status(), &SessionStatus::NotConfigured);
        assert!(session.begin_refresh().is_none());
        assert!(session.reload().is_none());
        assert!(session.entries().is_empty());
    }

    #[test]
    fn test_load_reads_entries() {
        let dir = TempDir::new().unwrap();
        let path = state_db(&dir, "state.vscdb", two_folders());

        let session = Session::load(Some(path));

        assert_eq!(session.status(), &SessionStatus::Ready);
        let names: Vec<&str> = session.entries().iter().map(|e| e.folder_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(session.filter("bta").len(), 1);
    }

    #[test]
    fn test_load_failure_is_soft() {
        let dir = TempDir::new().unwrap();
        let session = Session::load(Some(dir.path().join("missing.vscdb")));

        assert!(session.entries().is_empty());
        match session.status() {
            SessionStatus::Failed(reason) => assert!(reason.contains("not found")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = state_db(&dir, "state.vscdb", two_folders());
        let mut session = Session::new(Some(path));

        let old = session.begin_refresh().unwrap();
        let new = session.begin_refresh().unwrap();
        assert!(new.generation() > old.generation());

        let new_result = new.fetch();
        assert_eq!(
            session.complete_refresh(new, new_result),
            RefreshOutcome::Applied { entry_count: 2 }
        );

        // Old read finishing late must not clobber the newer entries
        assert_eq!(session.complete_refresh(old, Ok(Vec::new())), RefreshOutcome::Stale);
        assert_eq!(session.entries().len(), 2);
    }

    #[test]
    fn test_complete_refresh_failure_clears_entries() {
        let dir = TempDir::new().unwrap();
        let path = state_db(&dir, "state.vscdb", two_folders());
        let mut session = Session::load(Some(path));
        assert_eq!(session.entries().len(), 2);

        let ticket = session.begin_refresh().unwrap();
        let outcome = session.complete_refresh(
            ticket,
            Err(ReadError::MalformedPayload { reason: "bad".to_string() }),
        );

        assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
        assert!(session.entries().is_empty());
    }

    #[test]
    fn test_apply_location_valid_persists_then_invalidates() {
        let dir = TempDir::new().unwrap();
        let first = state_db(&dir, "first.vscdb", two_folders());
        let second = state_db(&dir, "second.vscdb", r#"{"entries":[{"folderUri":"file:///x/gamma"}]}"#);
        let mut prefs = MemoryPreferenceStore::default();
        let mut session = Session::new(Some(first));

        let in_flight = session.begin_refresh().unwrap();
        let raw = format!("'{}'", second.display());
        let verification = session.apply_location(&raw, &mut prefs).unwrap();

        assert_eq!(verification, Verification::Valid { entry_count: 1 });
        assert_eq!(session.location(), Some(second.as_path()));
        assert_eq!(
            prefs.get(DATABASE_PATH_KEY).unwrap().as_deref(),
            Some(second.to_string_lossy().as_ref())
        );

        let late = in_flight.fetch();
        assert_eq!(session.complete_refresh(in_flight, late), RefreshOutcome::Stale);

        assert_eq!(session.reload(), Some(RefreshOutcome::Applied { entry_count: 1 }));
        assert_eq!(session.entries()[0].folder_name, "gamma");
    }

    #[test]
    fn test_apply_location_invalid_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let good = state_db(&dir, "state.vscdb", two_folders());
        let mut prefs = MemoryPreferenceStore::default();
        let mut session = Session::load(Some(good.clone()));

        let verification =
            session.apply_location(&dir.path().join("nope.vscdb").to_string_lossy(), &mut prefs).unwrap();

        assert!(!verification.is_valid());
        assert_eq!(session.location(), Some(good.as_path()));
        assert_eq!(session.entries().len(), 2);
        assert!(prefs.get(DATABASE_PATH_KEY).unwrap().is_none());
    }

    #[test]
    fn test_apply_location_blank_input() {
        let mut prefs = MemoryPreferenceStore::default();
        let mut session = Session::new(None);

        let verification = session.apply_location("  \"\" ", &mut prefs).unwrap();

        assert_eq!(verification.reason(), Some("no database location given"));
        assert_eq!(session.status(), &SessionStatus::NotConfigured);
    }
}
