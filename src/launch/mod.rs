//! One-way commands to the outside world: opening a folder in the editor and
//! opening a web link.
//!
//! Launches report only whether the process could be started. The editor's
//! own success or failure is never observed.

pub mod editor;
pub mod link;

pub use editor::{DEFAULT_EDITOR, LaunchError, Launcher, ProcessSpawner, SystemSpawner};
pub use link::{open_external_link, parse_external_link};
