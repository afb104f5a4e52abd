//! Data models for the editor's workspace history.
//!
//! - [`RawDocument`] / [`EntryDescriptor`] - the recently-opened list as stored
//! - [`ClassifiedEntry`] - a folder entry with derived name and connection flags
//! - [`ConnectionKind`] - display grouping of the connection flags
//!
//! Raw models use serde with the custom deserializers in
//! `parsers::deserializers`.

pub mod entry;
pub mod history;

pub use entry::{ClassifiedEntry, ConnectionKind};
pub use history::{EntryDescriptor, RawDocument, WorkspaceIdentity};
