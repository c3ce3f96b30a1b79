//! Character state: core attributes, named qualities, and play history.
//!
//! Attributes are the fixed psychological axes every character has. They
//! live on a bounded 0-100 scale and start at the midpoint. Qualities are
//! open-ended named counters created on first write, unbounded in either
//! direction. The play history records which storylets a character has
//! already seen.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::error::CoreError;

/// Lower bound of the attribute scale.
pub const ATTRIBUTE_MIN: i32 = 0;

/// Upper bound of the attribute scale.
pub const ATTRIBUTE_MAX: i32 = 100;

/// Starting value for every attribute.
pub const ATTRIBUTE_DEFAULT: i32 = 50;

/// A core attribute of a character.
///
/// Each attribute is a bipolar scale: the healthy quality sits in the
/// middle, with a deficiency at the low end and an excess at the high end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Confidence in one's own worth. Low is inadequacy, high tips into arrogance.
    SelfAssurance,
    /// Care for others. Low is indifference, high tips into self-erasure.
    Compassion,
    /// Appetite for achievement. Low is aimlessness, high tips into ruthlessness.
    Ambition,
    /// Will to act. Low is lethargy, high tips into burnout.
    Drive,
    /// Clarity of judgement. Low is credulity, high tips into paralysing doubt.
    Discernment,
    /// Willingness to face risk. Low is timidity, high tips into recklessness.
    Bravery,
}

impl Attribute {
    /// Every attribute, in canonical order.
    pub const ALL: [Attribute; 6] = [
        Attribute::SelfAssurance,
        Attribute::Compassion,
        Attribute::Ambition,
        Attribute::Drive,
        Attribute::Discernment,
        Attribute::Bravery,
    ];

    /// The canonical name of this attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::SelfAssurance => "SelfAssurance",
            Attribute::Compassion => "Compassion",
            Attribute::Ambition => "Ambition",
            Attribute::Drive => "Drive",
            Attribute::Discernment => "Discernment",
            Attribute::Bravery => "Bravery",
        }
    }

    /// Parse an attribute name, ignoring case and common separators.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let name = input.trim().to_lowercase();
        match name.as_str() {
            "selfassurance" | "self-assurance" | "self_assurance" => Ok(Attribute::SelfAssurance),
            "compassion" => Ok(Attribute::Compassion),
            "ambition" => Ok(Attribute::Ambition),
            "drive" => Ok(Attribute::Drive),
            "discernment" => Ok(Attribute::Discernment),
            "bravery" => Ok(Attribute::Bravery),
            _ => Err(CoreError::UnknownAttribute(input.trim().to_string())),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The full set of attribute values for one character.
///
/// Writes clamp to the 0-100 scale. Reads of an attribute that has never
/// been written return the default midpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    values: BTreeMap<Attribute, i32>,
}

impl AttributeSet {
    /// Create a set with every attribute at the default value.
    pub fn new() -> Self {
        let values = Attribute::ALL
            .iter()
            .map(|attribute| (*attribute, ATTRIBUTE_DEFAULT))
            .collect();
        Self { values }
    }

    /// The current value of an attribute.
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.values
            .get(&attribute)
            .copied()
            .unwrap_or(ATTRIBUTE_DEFAULT)
    }

    /// Set an attribute, clamping to the valid scale.
    pub fn set(&mut self, attribute: Attribute, value: i32) {
        self.values
            .insert(attribute, value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX));
    }

    /// Shift an attribute by a signed delta, clamping to the valid scale.
    pub fn modify(&mut self, attribute: Attribute, delta: i32) {
        let current = self.get(attribute);
        self.set(attribute, current.saturating_add(delta));
    }

    /// Iterate over all attributes and their values in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL
            .iter()
            .map(|attribute| (*attribute, self.get(*attribute)))
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A character moving through the story.
///
/// Serializes to a plain snapshot so sessions can be saved and restored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterState {
    /// Display name of the character.
    pub name: String,
    /// The archetype chosen at creation, if any.
    pub archetype: Option<Archetype>,
    /// Core attribute values.
    pub attributes: AttributeSet,
    /// Named qualities, created on first write.
    pub qualities: BTreeMap<String, i32>,
    /// Ids of storylets this character has already played.
    pub played: BTreeSet<String>,
}

impl CharacterState {
    /// Create a fresh character with default attributes and no history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The current value of a core attribute.
    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes.get(attribute)
    }

    /// Set a core attribute, clamping to the valid scale.
    pub fn set_attribute(&mut self, attribute: Attribute, value: i32) {
        self.attributes.set(attribute, value);
    }

    /// Shift a core attribute by a signed delta, clamping to the valid scale.
    pub fn modify_attribute(&mut self, attribute: Attribute, delta: i32) {
        self.attributes.modify(attribute, delta);
    }

    /// The current value of a named quality. Unset qualities read as zero.
    pub fn quality(&self, quality_id: &str) -> i32 {
        self.qualities.get(quality_id).copied().unwrap_or(0)
    }

    /// Set a named quality to an exact value.
    pub fn set_quality(&mut self, quality_id: impl Into<String>, value: i32) {
        self.qualities.insert(quality_id.into(), value);
    }

    /// Shift a named quality by a signed delta. Qualities are unbounded.
    pub fn modify_quality(&mut self, quality_id: &str, delta: i32) {
        let current = self.quality(quality_id);
        self.qualities
            .insert(quality_id.to_string(), current.saturating_add(delta));
    }

    /// Whether this character has already played the given storylet.
    pub fn has_played(&self, storylet_id: &str) -> bool {
        self.played.contains(storylet_id)
    }

    /// Record that a storylet has been played. Replays are absorbed.
    pub fn mark_played(&mut self, storylet_id: &str) {
        self.played.insert(storylet_id.to_string());
    }
}
