//! File-backed persistence for storylets.
//!
//! A [`StoryletStore`] maps a directory of `.jsonc` records onto an
//! in-memory collection with id lookup, category and tag queries, and
//! fuzzy id suggestions. Loading is forgiving: bad records are skipped
//! and reported as [`LoadIssue`]s while the rest of the directory loads.

/// Error types used throughout the crate.
pub mod error;
/// Load issue reporting and rendering.
pub mod report;
/// The storylet store itself.
pub mod store;

/// Re-export error types.
pub use error::{StoreError, StoreResult};
/// Re-export report types.
pub use report::{LoadIssue, Severity};
/// Re-export store types.
pub use store::{LoadResult, StoryletStore};
