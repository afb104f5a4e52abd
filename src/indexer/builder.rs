//! Entry set builder for the editor's workspace history.
//!
//! # Error Handling Strategy
//!
//! - **Store-level errors**: a missing, unreadable or foreign database file is
//!   returned as a [`ReadError`]; the caller decides whether to surface it
//!   (validation) or fall back to an empty list (startup).
//! - **Entry-level problems**: malformed or non-folder entries are dropped and
//!   counted in the summary log line.

use std::path::Path;

use tracing::{debug, info};

use crate::indexer::classifier::classify;
use crate::models::ClassifiedEntry;
use crate::store::{ReadError, read_history};

/// Read the history at `location` and classify its folder entries
///
/// A database without a recently-opened list yields an empty vector.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use recent_workspaces::fetch_entries;
///
/// let entries = fetch_entries(Path::new("/home/alice/.config/Code/User/globalStorage/state.vscdb"))?;
/// for entry in &entries {
///     println!("{} ({})", entry.display_name(), entry.kind());
/// }
/// # Ok::<(), recent_workspaces::store::ReadError>(())
/// ```
pub fn fetch_entries(location: &Path) -> Result<Vec<ClassifiedEntry>, ReadError> {
    let document = read_history(location)?;
    let total = document.entries.len();

    let entries = classify(&document);

    let unnamed = entries.iter().filter(|e| e.folder_name.is_empty()).count();
    if unnamed > 0 {
        debug!(unnamed, "Some folder URIs could not be decoded to a name");
    }

    info!(
        path = %location.display(),
        folders = entries.len(),
        dropped = total - entries.len(),
        "Loaded workspace history"
    );

    Ok(entries)
}
