//! Core types for Skein: character state, prerequisite and effect trees,
//! and the storylet model.
//!
//! This crate defines the rule engine that storylet content runs on. It is
//! independent of any storage format: a [`Storylet`] can be constructed
//! programmatically or decoded from JSONC with the codec crate.

/// Character archetypes and the character builder.
pub mod archetype;
/// Character state: attributes, qualities, and play history.
pub mod character;
/// Effect trees applying state changes to characters.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// Prerequisite trees gating storylets and options.
pub mod prerequisite;
/// Storylet and option records with availability queries.
pub mod storylet;
/// Structural validation for storylet records.
pub mod validate;

/// Re-export archetype types.
pub use archetype::{Archetype, CharacterBuilder};
/// Re-export character types.
pub use character::{Attribute, AttributeSet, CharacterState};
/// Re-export effect types.
pub use effect::{apply_all, Effect};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export prerequisite types.
pub use prerequisite::{all_met, CompoundLogic, Prerequisite};
/// Re-export storylet types.
pub use storylet::{Storylet, StoryletOption};
/// Re-export validation types.
pub use validate::{validate_storylet, ValidationReport};
