//! Recent Workspaces - search and reopen recently used VS Code folders
//!
//! Reads the editor's recently-opened list from its global state database
//! (`state.vscdb`), keeps folder entries, tags remote connections (Dev
//! Container, WSL, SSH) and lets you fuzzy-search and launch them.
//!
//! - Reading the SQLite state database read-only
//! - Classifying entries and deriving display names from folder URIs
//! - Typo-tolerant fuzzy search over folder names
//! - Verifying and persisting the database location
//! - Launching the editor on a folder
//!
//! # Example
//!
//! ```no_run
//! use recent_workspaces::{SearchIndex, fetch_entries};
//! use std::path::Path;
//!
//! let entries = fetch_entries(Path::new("/home/alice/.config/Code/User/globalStorage/state.vscdb"))?;
//! let index = SearchIndex::build(entries);
//! for entry in index.filter("porj") {
//!     println!("{} {}", entry.folder_name, entry.folder_uri);
//! }
//! # Ok::<(), recent_workspaces::ReadError>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod indexer;
pub mod launch;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod search;
pub mod session;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use config::{Verification, verify};
pub use indexer::{classify, fetch_entries};
pub use launch::{LaunchError, Launcher, open_external_link};
pub use models::{ClassifiedEntry, ConnectionKind, RawDocument};
pub use search::SearchIndex;
pub use session::Session;
pub use store::{ReadError, read_history};
