use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode, OpenFlags, OptionalExtension};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::RawDocument;
use crate::parsers::parse_history_payload;

/// Key-value table the editor keeps its global state in
pub const HISTORY_TABLE: &str = "ItemTable";
/// Row holding the recently-opened list
pub const HISTORY_KEY: &str = "history.recentlyOpenedPathsList";

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("database file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("cannot read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("{} is not an editor state database: {reason}", .path.display())]
    NotADatabase { path: PathBuf, reason: String },
    #[error("history payload is malformed: {reason}")]
    MalformedPayload { reason: String },
}

/// Raw cell contents of the history row
enum StoredValue {
    Missing,
    Bytes(Vec<u8>),
    WrongType(&'static str),
}

/// Read and decode the recently-opened list from the state database at `location`.
///
/// A database without the history row yields an empty document: an editor
/// that has never opened a folder is a valid configuration.
///
/// # Errors
///
/// - [`ReadError::NotFound`] / [`ReadError::Unreadable`] when the file cannot be opened
/// - [`ReadError::NotADatabase`] when it is not SQLite or lacks the state table
/// - [`ReadError::MalformedPayload`] when the stored value is not the expected JSON
pub fn read_history(location: &Path) -> Result<RawDocument, ReadError> {
    match read_history_value(location)? {
        Some(payload) => parse_history_payload(&payload),
        None => {
            debug!(path = %location.display(), "No recently-opened list in database");
            Ok(RawDocument::default())
        }
    }
}

/// Fetch the raw history value as text, or `None` when the row is absent.
///
/// The connection is opened read-only and closed before this returns,
/// whatever the outcome.
pub fn read_history_value(location: &Path) -> Result<Option<String>, ReadError> {
    ensure_readable(location)?;

    let conn = Connection::open_with_flags(
        location,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| map_sqlite_error(location, e))?;

    let result = query_history_value(&conn, location);

    if let Err((_, e)) = conn.close() {
        warn!(path = %location.display(), error = %e, "Failed to close state database");
    }

    result
}

fn ensure_readable(path: &Path) -> Result<(), ReadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound { path: path.to_path_buf() },
        _ => ReadError::Unreadable { path: path.to_path_buf(), reason: e.to_string() },
    })?;

    let metadata = file
        .metadata()
        .map_err(|e| ReadError::Unreadable { path: path.to_path_buf(), reason: e.to_string() })?;
    if metadata.is_dir() {
        return Err(ReadError::Unreadable {
            path: path.to_path_buf(),
            reason: "is a directory".to_string(),
        });
    }

    Ok(())
}

fn query_history_value(conn: &Connection, location: &Path) -> Result<Option<String>, ReadError> {
    let sql = format!("SELECT value FROM {} WHERE key = ?1", HISTORY_TABLE);

    let stored = conn
        .query_row(&sql, [HISTORY_KEY], |row| {
            Ok(match row.get_ref(0)? {
                ValueRef::Null => StoredValue::Missing,
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => StoredValue::Bytes(bytes.to_vec()),
                ValueRef::Integer(_) => StoredValue::WrongType("integer"),
                ValueRef::Real(_) => StoredValue::WrongType("real"),
            })
        })
        .optional()
        .map_err(|e| map_sqlite_error(location, e))?;

    match stored {
        None | Some(StoredValue::Missing) => Ok(None),
        Some(StoredValue::Bytes(bytes)) => String::from_utf8(bytes).map(Some).map_err(|e| {
            ReadError::MalformedPayload { reason: format!("value is not UTF-8 text: {}", e) }
        }),
        Some(StoredValue::WrongType(kind)) => Err(ReadError::MalformedPayload {
            reason: format!("value is stored as {} instead of text", kind),
        }),
    }
}

fn map_sqlite_error(path: &Path, err: rusqlite::Error) -> ReadError {
    let reason = err.to_string();
    match err.sqlite_error_code() {
        Some(
            ErrorCode::CannotOpen
            | ErrorCode::PermissionDenied
            | ErrorCode::SystemIoFailure
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked,
        ) => ReadError::Unreadable { path: path.to_path_buf(), reason },
        _ => ReadError::NotADatabase { path: path.to_path_buf(), reason },
    }
}
