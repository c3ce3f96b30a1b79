//! Error types for core operations.

/// Convenience alias for results in the core crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by core character and storylet operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A name did not match any known core attribute.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// A name did not match any known archetype.
    #[error("unknown archetype: {0}")]
    UnknownArchetype(String),

    /// A character was built without a name.
    #[error("character must have a name")]
    MissingName,

    /// A character was built without choosing an archetype.
    #[error("character must have an archetype")]
    MissingArchetype,
}
