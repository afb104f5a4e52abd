//! Entry resolution for the editor's workspace history
//!
//! - **classifier**: pure transformation from stored descriptors to
//!   [`ClassifiedEntry`](crate::models::ClassifiedEntry) records (folder name,
//!   connection flags). Never fails: non-folder entries are filtered out and
//!   undecodable URIs keep an empty name.
//!
//! - **builder**: composes the store reader and the classifier, logging a
//!   summary of what was kept.

pub mod builder;
pub mod classifier;

pub use builder::fetch_entries;
pub use classifier::{classify, classify_entry, folder_name_from_uri};
