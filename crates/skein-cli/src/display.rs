//! Console rendering for the interactive session.

use std::io::{self, Write};

use skein_core::{CharacterState, Storylet, StoryletOption};

/// Width the session wraps and rules to.
const TEXT_WIDTH: usize = 78;

/// Print the title banner and welcome line.
pub fn show_welcome<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "╔{}╗", "═".repeat(TEXT_WIDTH))?;
    writeln!(out, "║{:^78}║", "SKEIN")?;
    writeln!(out, "║{:^78}║", "A Quality-Based Narrative Experience")?;
    writeln!(out, "╚{}╝", "═".repeat(TEXT_WIDTH))?;
    writeln!(out)?;
    writeln!(
        out,
        "Welcome to Skein, where your choices shape your character's journey."
    )?;
    writeln!(out)
}

/// Print the character sheet: attributes, then any qualities the
/// character has picked up.
pub fn show_character<W: Write>(out: &mut W, character: &CharacterState) -> io::Result<()> {
    use skein_core::Attribute::*;

    writeln!(out)?;
    writeln!(out, "┌─ Your Character")?;
    writeln!(out, "│")?;
    if let Some(archetype) = character.archetype {
        writeln!(out, "│  {}, {}", character.name, archetype.name())?;
        writeln!(out, "│")?;
    }
    writeln!(out, "│  Core Attributes:")?;
    writeln!(
        out,
        "│    Self-Assurance: {:>3}  |  Compassion:  {:>3}",
        character.attribute(SelfAssurance),
        character.attribute(Compassion)
    )?;
    writeln!(
        out,
        "│    Ambition:       {:>3}  |  Drive:       {:>3}",
        character.attribute(Ambition),
        character.attribute(Drive)
    )?;
    writeln!(
        out,
        "│    Discernment:    {:>3}  |  Bravery:     {:>3}",
        character.attribute(Discernment),
        character.attribute(Bravery)
    )?;

    if !character.qualities.is_empty() {
        writeln!(out, "│")?;
        writeln!(out, "│  Qualities:")?;
        for (quality_id, value) in &character.qualities {
            writeln!(out, "│    {}: {value}", format_quality_name(quality_id))?;
        }
    }

    writeln!(out, "└{}", "─".repeat(70))?;
    writeln!(out)
}

/// Print a storylet's title banner and wrapped content.
pub fn show_storylet<W: Write>(out: &mut W, storylet: &Storylet) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "═".repeat(TEXT_WIDTH))?;
    writeln!(out, "  {}", storylet.title)?;
    writeln!(out, "{}", "═".repeat(TEXT_WIDTH))?;
    writeln!(out)?;
    for line in wrap_text(&storylet.content, TEXT_WIDTH) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}

/// Print the numbered choice menu for a storylet's available options.
pub fn show_options<W: Write>(out: &mut W, options: &[&StoryletOption]) -> io::Result<()> {
    writeln!(out, "What do you do?")?;
    writeln!(out)?;
    for (index, option) in options.iter().enumerate() {
        writeln!(out, "  [{}] {}", index + 1, option.text)?;
        if !option.description.is_empty() {
            writeln!(out, "      {}", option.description)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Print the outcome text of a chosen option between rules.
pub fn show_option_result<W: Write>(out: &mut W, option: &StoryletOption) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "─".repeat(TEXT_WIDTH))?;
    for line in wrap_text(&option.result_text, TEXT_WIDTH) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", "─".repeat(TEXT_WIDTH))?;
    writeln!(out)
}

/// Print the end-of-content notice.
pub fn show_no_storylets<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "There are no storylets available at this time.")?;
    writeln!(out, "Your journey has reached its current end.")?;
    writeln!(out)
}

/// Print a horizontal rule.
pub fn show_separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "─".repeat(TEXT_WIDTH))?;
    writeln!(out)
}

/// Print a free-standing message with blank lines around it.
pub fn show_message<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{message}")?;
    writeln!(out)
}

/// Greedily wrap text on spaces to fit within `width` columns.
///
/// A word longer than the width gets a line of its own and overflows it.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.len() <= width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        if !current.is_empty() && current.len() + word.len() + 1 > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Turn a snake_case quality id into a Title Case display name.
pub fn format_quality_name(quality_id: &str) -> String {
    quality_id
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
