//! Prerequisite trees: the conditions gating storylets and options.
//!
//! A prerequisite is a small expression tree evaluated against a
//! [`CharacterState`]. Leaves test attributes, qualities, or play history;
//! compound nodes combine children with AND or OR logic.

use crate::character::{Attribute, CharacterState};

/// How a compound prerequisite combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompoundLogic {
    /// Every child must hold.
    #[default]
    And,
    /// At least one child must hold.
    Or,
}

/// A condition a character must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Prerequisite {
    /// A core attribute must sit inside an inclusive range.
    Attribute {
        /// The attribute under test.
        attribute: Attribute,
        /// Inclusive lower bound, unbounded when absent.
        min: Option<i32>,
        /// Inclusive upper bound, unbounded when absent.
        max: Option<i32>,
    },
    /// A named quality must sit inside an inclusive range.
    Quality {
        /// The quality under test. Unset qualities read as zero.
        quality_id: String,
        /// Inclusive lower bound, unbounded when absent.
        min: Option<i32>,
        /// Inclusive upper bound, unbounded when absent.
        max: Option<i32>,
    },
    /// The character's play history must include, or exclude, a storylet.
    StoryletPlayed {
        /// The storylet whose history is tested.
        storylet_id: String,
        /// When true the storylet must have been played, when false it
        /// must not have been.
        must_have_played: bool,
    },
    /// A group of child prerequisites combined with one logic.
    Compound {
        /// How the children are combined.
        logic: CompoundLogic,
        /// Child conditions. An empty group is trivially satisfied.
        children: Vec<Prerequisite>,
    },
}

impl Prerequisite {
    /// Evaluate this prerequisite against a character.
    pub fn is_met(&self, character: &CharacterState) -> bool {
        match self {
            Prerequisite::Attribute {
                attribute,
                min,
                max,
            } => within_bounds(character.attribute(*attribute), *min, *max),
            Prerequisite::Quality {
                quality_id,
                min,
                max,
            } => within_bounds(character.quality(quality_id), *min, *max),
            Prerequisite::StoryletPlayed {
                storylet_id,
                must_have_played,
            } => character.has_played(storylet_id) == *must_have_played,
            Prerequisite::Compound { logic, children } => {
                if children.is_empty() {
                    return true;
                }
                match logic {
                    CompoundLogic::And => children.iter().all(|child| child.is_met(character)),
                    CompoundLogic::Or => children.iter().any(|child| child.is_met(character)),
                }
            }
        }
    }

    /// A short human-readable description of this condition.
    pub fn display_text(&self) -> String {
        match self {
            Prerequisite::Attribute {
                attribute,
                min,
                max,
            } => bounds_text(attribute.name(), *min, *max),
            Prerequisite::Quality {
                quality_id,
                min,
                max,
            } => bounds_text(quality_id, *min, *max),
            Prerequisite::StoryletPlayed {
                storylet_id,
                must_have_played,
            } => {
                if *must_have_played {
                    format!("Requires: {storylet_id} played")
                } else {
                    format!("Requires: {storylet_id} not played")
                }
            }
            Prerequisite::Compound { logic, children } => {
                if children.is_empty() {
                    return "No requirements".to_string();
                }
                let separator = match logic {
                    CompoundLogic::And => " AND ",
                    CompoundLogic::Or => " OR ",
                };
                let parts: Vec<String> =
                    children.iter().map(Prerequisite::display_text).collect();
                format!("({})", parts.join(separator))
            }
        }
    }
}

fn within_bounds(value: i32, min: Option<i32>, max: Option<i32>) -> bool {
    if min.is_some_and(|min| value < min) {
        return false;
    }
    if max.is_some_and(|max| value > max) {
        return false;
    }
    true
}

fn bounds_text(name: &str, min: Option<i32>, max: Option<i32>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{name} between {min}-{max}"),
        (Some(min), None) => format!("{name} \u{2265} {min}"),
        (None, Some(max)) => format!("{name} \u{2264} {max}"),
        (None, None) => format!("{name} (any value)"),
    }
}

/// Whether a character satisfies every prerequisite in a slice.
///
/// An empty slice is trivially satisfied.
pub fn all_met(prerequisites: &[Prerequisite], character: &CharacterState) -> bool {
    prerequisites
        .iter()
        .all(|prerequisite| prerequisite.is_met(character))
}
