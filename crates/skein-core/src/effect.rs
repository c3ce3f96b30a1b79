//! Effect trees: the state changes a storylet or option applies.
//!
//! Effects are the write-side counterpart of prerequisites. Attribute
//! effects clamp to the 0-100 scale, quality effects are unbounded, and
//! unlock effects stamp a storylet into the play history so later
//! storylets can gate on it.

use crate::character::{Attribute, CharacterState};

/// A state change applied to a character.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Shift a core attribute by a signed delta, clamped to the scale.
    Attribute {
        /// The attribute to change.
        attribute: Attribute,
        /// Signed change, applied with clamping.
        delta: i32,
    },
    /// Shift a named quality by a signed delta. Qualities are unbounded
    /// and spring into existence on first write.
    Quality {
        /// The quality to change.
        quality_id: String,
        /// Signed change, applied without clamping.
        delta: i32,
    },
    /// Mark a storylet as played so later storylets can require it.
    /// Applying twice is the same as applying once.
    UnlockStorylet {
        /// The storylet id to stamp into the play history.
        storylet_id: String,
    },
    /// A group of child effects applied in declaration order.
    Compound {
        /// Child effects. An empty group changes nothing.
        children: Vec<Effect>,
    },
}

impl Effect {
    /// Apply this effect to a character.
    pub fn apply(&self, character: &mut CharacterState) {
        match self {
            Effect::Attribute { attribute, delta } => {
                character.modify_attribute(*attribute, *delta);
            }
            Effect::Quality { quality_id, delta } => {
                character.modify_quality(quality_id, *delta);
            }
            Effect::UnlockStorylet { storylet_id } => {
                character.mark_played(storylet_id);
            }
            Effect::Compound { children } => {
                for child in children {
                    child.apply(character);
                }
            }
        }
    }

    /// A short human-readable description of this effect.
    pub fn display_text(&self) -> String {
        match self {
            Effect::Attribute { attribute, delta } => {
                format!("{} {}", attribute.name(), signed(*delta))
            }
            Effect::Quality { quality_id, delta } => {
                format!("{quality_id} {}", signed(*delta))
            }
            Effect::UnlockStorylet { storylet_id } => format!("Unlocks: {storylet_id}"),
            Effect::Compound { children } => {
                if children.is_empty() {
                    return "No effects".to_string();
                }
                let parts: Vec<String> = children.iter().map(Effect::display_text).collect();
                parts.join(", ")
            }
        }
    }
}

fn signed(delta: i32) -> String {
    if delta >= 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

/// Apply every effect in a slice, in order.
pub fn apply_all(effects: &[Effect], character: &mut CharacterState) {
    for effect in effects {
        effect.apply(character);
    }
}
