//! Codec for the Skein storylet record format.
//!
//! Records are stored as JSONC, which is JSON plus `//` and `/* */`
//! comments and trailing commas, so content authors can annotate files
//! by hand. Each
//! prerequisite and effect is a `{ type, properties }` node whose `type`
//! discriminator selects the variant; compound nodes nest further node
//! lists, to unbounded depth.
//!
//! [`decode_storylet`] turns source text into a [`skein_core::Storylet`],
//! rejecting the whole record on the first malformed node.
//! [`encode_storylet`] writes the canonical form back out.

/// Decoding records into storylets.
pub mod decode;
/// Encoding storylets back to record text.
pub mod encode;
/// Decode error types.
pub mod error;
/// Cleanup of comments and trailing commas ahead of JSON parsing.
pub mod relaxed;

/// Re-export the decode entry point.
pub use decode::decode_storylet;
/// Re-export the encode entry point.
pub use encode::encode_storylet;
/// Re-export error types.
pub use error::{CodecResult, DecodeError};
