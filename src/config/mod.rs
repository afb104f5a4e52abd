//! Configuration: where the history database lives and whether it is usable.
//!
//! The only persisted setting is the database location. It is normalized on
//! the way in, verified with [`verify`] and written to the preference store
//! only once verification succeeds.

pub mod location;
pub mod preferences;
pub mod validator;

pub use location::{default_database_path, normalize_location, resolve_location};
pub use preferences::{
    DATABASE_PATH_KEY, JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
pub use validator::{Verification, verify, verify_input};
