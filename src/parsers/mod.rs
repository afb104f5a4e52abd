//! Parsers for the editor's recently-opened payload
//!
//! # Error Handling Strategy
//!
//! - **Document-level failures**: a payload that is not JSON, or has no `entries`
//!   array, is rejected as `ReadError::MalformedPayload`. There is nothing useful
//!   to show from such a document.
//!
//! - **Entry-level failures**: an individual entry with the wrong shape is logged
//!   and skipped so one odd entry never hides the rest of the history.
//!
//! Classification (which entries are folders) happens later, in `indexer`.

pub mod deserializers;
pub mod history;

pub use history::parse_history_payload;
