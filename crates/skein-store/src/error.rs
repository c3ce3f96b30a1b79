//! Error types for store operations.

use skein_core::ValidationReport;

/// Convenience alias for results in the store crate.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while reading or writing the storylet directory.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A storylet failed validation and was refused before hitting disk.
    #[error("cannot save invalid storylet '{id}': {report}")]
    InvalidStorylet {
        /// Id of the rejected storylet.
        id: String,
        /// The collected validation failures.
        report: ValidationReport,
    },

    /// The underlying filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
