use std::path::Path;

use colored::Colorize;

use crate::display::wrap_text;

pub fn run(dir: &Path, id: &str) -> Result<(), String> {
    let store = super::load_store(dir)?.store;

    let Some(storylet) = store.get(id) else {
        let suggestions = store.suggest(id, 3);
        let mut message = format!("storylet not found: \"{id}\"");
        if !suggestions.is_empty() {
            message.push_str(&format!(" (did you mean {}?)", suggestions.join(", ")));
        }
        return Err(message);
    };

    // Header
    println!("  {} [{}]", storylet.title.bold(), storylet.id.dimmed());
    println!();

    // Description and full content
    if !storylet.description.is_empty() {
        for line in storylet.description.lines() {
            println!("  {}", line.trim());
        }
        println!();
    }
    if !storylet.content.is_empty() {
        for line in wrap_text(&storylet.content, 76) {
            println!("  {line}");
        }
        println!();
    }

    if !storylet.category.is_empty() {
        println!("  category:  {}", storylet.category);
    }
    println!("  priority:  {}", storylet.priority);
    if let Some(previous_id) = storylet.previous_storylet_id() {
        match store.get(previous_id) {
            Some(previous) => {
                println!("  continues: {} (\"{}\")", previous.id, previous.title);
            }
            None => println!("  continues: {previous_id}"),
        }
    }

    let requirements = storylet.prerequisite_texts();
    if !requirements.is_empty() {
        println!();
        println!("  {}", "Unlock conditions:".dimmed());
        for requirement in requirements {
            println!("    {requirement}");
        }
    }

    if !storylet.effects.is_empty() {
        println!();
        println!("  {}", "Effects:".dimmed());
        for effect in &storylet.effects {
            println!("    {}", effect.display_text());
        }
    }

    if !storylet.options.is_empty() {
        println!();
        println!("  {}", "Options:".dimmed());
        for option in &storylet.options {
            println!("    [{}] {}", option.id, option.text);
            for prerequisite in &option.prerequisites {
                println!("        requires {}", prerequisite.display_text());
            }
            for effect in &option.effects {
                println!("        {}", effect.display_text());
            }
        }
    }

    if !storylet.tags.is_empty() {
        println!();
        println!("  tags: {}", storylet.tags.join(", "));
    }

    Ok(())
}
