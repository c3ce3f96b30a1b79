//! Error types for decoding storylet records.

/// Convenience alias for results in the codec crate.
pub type CodecResult<T> = Result<T, DecodeError>;

/// Errors raised while decoding a serialized storylet record.
///
/// Any decode error rejects the whole record; the codec never returns a
/// partially constructed storylet.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The source was not parseable as JSON after relaxed cleanup.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// A value that must be a JSON object was something else.
    #[error("{node} must be a json object")]
    NotAnObject {
        /// The kind of node that was malformed.
        node: &'static str,
    },

    /// A prerequisite node carried a discriminator outside the vocabulary.
    #[error("unknown prerequisite type: {0}")]
    UnknownPrerequisiteType(String),

    /// An effect node carried a discriminator outside the vocabulary.
    #[error("unknown effect type: {0}")]
    UnknownEffectType(String),

    /// A node lacked a property its discriminator requires.
    #[error("{node} is missing required property '{property}'")]
    MissingProperty {
        /// The kind of node missing the property.
        node: &'static str,
        /// The property that was absent.
        property: &'static str,
    },

    /// A property was present but held the wrong kind of value.
    #[error("{node} property '{property}' must be {expected}")]
    InvalidProperty {
        /// The kind of node carrying the property.
        node: &'static str,
        /// The offending property.
        property: &'static str,
        /// What the decoder expected to find.
        expected: &'static str,
    },

    /// An attribute name did not match any core attribute.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
}
