//! Read-only access to the editor's `state.vscdb` SQLite database.
//!
//! Each read opens its own connection with `SQLITE_OPEN_READ_ONLY`, looks up a
//! single row and closes the connection again, so the file can be reopened
//! immediately by the next validation or refresh.

pub mod reader;

pub use reader::{HISTORY_KEY, HISTORY_TABLE, ReadError, read_history, read_history_value};
