//! Fuzzy search over folder names.
//!
//! Matching is approximate substring search: a query matches a folder name
//! when some part of the name is within a small edit distance of the query,
//! normalized by query length. The threshold is fixed at
//! [`DEFAULT_THRESHOLD`].

pub mod index;
pub mod scoring;

pub use index::{SearchHit, SearchIndex};
pub use scoring::{DEFAULT_THRESHOLD, match_score};
