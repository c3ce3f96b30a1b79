//! Storylets: self-contained narrative units gated by prerequisites.
//!
//! The model follows quality-based narrative design: content is a pool of
//! storylets, each carrying the conditions under which it may surface and
//! the state changes it applies. Storylets with options present a choice;
//! storylets without options simply play through.

use crate::character::CharacterState;
use crate::effect::Effect;
use crate::prerequisite::{all_met, Prerequisite};

/// Default display priority for storylets and options.
pub const DEFAULT_PRIORITY: i32 = 10;

/// A choice offered within a storylet.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryletOption {
    /// Identifier, unique within the owning storylet.
    pub id: String,
    /// Text shown for the choice.
    pub text: String,
    /// Longer description of what choosing this means.
    pub description: String,
    /// Narrative outcome shown after the choice is taken.
    pub result_text: String,
    /// Conditions gating this option.
    pub prerequisites: Vec<Prerequisite>,
    /// State changes applied when this option is chosen.
    pub effects: Vec<Effect>,
    /// Display priority, higher sorts first.
    pub priority: i32,
    /// Free-form tags.
    pub tags: Vec<String>,
}

impl StoryletOption {
    /// Create an option with the given id and choice text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the longer description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the outcome text.
    pub fn with_result_text(mut self, result_text: impl Into<String>) -> Self {
        self.result_text = result_text.into();
        self
    }

    /// Set the display priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add a prerequisite.
    pub fn with_prerequisite(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether a character satisfies every prerequisite of this option.
    pub fn is_available(&self, character: &CharacterState) -> bool {
        all_met(&self.prerequisites, character)
    }
}

impl Default for StoryletOption {
    fn default() -> Self {
        Self {
            id: String::new(),
            text: String::new(),
            description: String::new(),
            result_text: String::new(),
            prerequisites: Vec::new(),
            effects: Vec::new(),
            priority: DEFAULT_PRIORITY,
            tags: Vec::new(),
        }
    }
}

/// A narrative content unit with prerequisites, effects, and choices.
#[derive(Debug, Clone, PartialEq)]
pub struct Storylet {
    /// Unique identifier.
    pub id: String,
    /// Short title shown in lists.
    pub title: String,
    /// Brief description shown before selection.
    pub description: String,
    /// Full narrative content shown when the storylet plays.
    pub content: String,
    /// Conditions gating this storylet.
    pub prerequisites: Vec<Prerequisite>,
    /// State changes applied when the storylet plays.
    pub effects: Vec<Effect>,
    /// Display priority, higher surfaces first.
    pub priority: i32,
    /// Category for grouping.
    pub category: String,
    /// Free-form tags for filtering.
    pub tags: Vec<String>,
    /// Choices offered by this storylet, possibly none.
    pub options: Vec<StoryletOption>,
}

impl Storylet {
    /// Create a storylet with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the brief description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the narrative content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the display priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add a prerequisite.
    pub fn with_prerequisite(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an option.
    pub fn with_option(mut self, option: StoryletOption) -> Self {
        self.options.push(option);
        self
    }

    /// Whether this storylet offers any choices at all.
    pub fn has_choices(&self) -> bool {
        !self.options.is_empty()
    }

    /// Whether a character satisfies every prerequisite of this storylet.
    pub fn prerequisites_met(&self, character: &CharacterState) -> bool {
        all_met(&self.prerequisites, character)
    }

    /// The options currently open to a character, highest priority first.
    ///
    /// Options with equal priority keep their declaration order.
    pub fn available_options(&self, character: &CharacterState) -> Vec<&StoryletOption> {
        let mut available: Vec<&StoryletOption> = self
            .options
            .iter()
            .filter(|option| option.is_available(character))
            .collect();
        available.sort_by(|a, b| b.priority.cmp(&a.priority));
        available
    }

    /// Display descriptions of every prerequisite, in declaration order.
    pub fn prerequisite_texts(&self) -> Vec<String> {
        self.prerequisites
            .iter()
            .map(Prerequisite::display_text)
            .collect()
    }

    /// The id of the storylet this one continues from, if any.
    ///
    /// Walks the prerequisite tree depth-first and returns the first
    /// positively-required played storylet.
    pub fn previous_storylet_id(&self) -> Option<&str> {
        fn find(prerequisites: &[Prerequisite]) -> Option<&str> {
            for prerequisite in prerequisites {
                match prerequisite {
                    Prerequisite::StoryletPlayed {
                        storylet_id,
                        must_have_played: true,
                    } => return Some(storylet_id),
                    Prerequisite::Compound { children, .. } => {
                        if let Some(id) = find(children) {
                            return Some(id);
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        find(&self.prerequisites)
    }
}

impl Default for Storylet {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            content: String::new(),
            prerequisites: Vec::new(),
            effects: Vec::new(),
            priority: DEFAULT_PRIORITY,
            category: String::new(),
            tags: Vec::new(),
            options: Vec::new(),
        }
    }
}
