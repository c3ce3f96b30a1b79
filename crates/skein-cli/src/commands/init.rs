use std::fs;
use std::path::Path;

const OPENING_RECORD: &str = r#"{
    // Storylets are plain JSONC records: comments and trailing commas are fine.
    "id": "a_new_beginning",
    "title": "A New Beginning",
    "description": "The first morning in an unfamiliar town.",
    "content": "You wake before dawn in a room you rented sight unseen. Down in the street, shutters clatter open one by one. Whatever you came here to become, it starts today.",
    "category": "main_story",
    "priority": 20,
    "effects": [
        { "type": "QualityEffect", "properties": { "qualityId": "main_story_progress", "delta": 5 } },
    ],
    "options": [
        {
            "id": "walk_the_streets",
            "text": "Walk the streets until they feel familiar",
            "description": "Learn the town before it learns you.",
            "resultText": "By midday you can find the well, the gate, and the baker without asking. Small victories, but yours.",
            "effects": [
                { "type": "QualityEffect", "properties": { "qualityId": "social_capital", "delta": 5 } },
            ],
        },
        {
            "id": "rest_first",
            "text": "Rest and gather your strength",
            "resultText": "Sleep takes you quickly. You wake calmer, and a little braver.",
            "effects": [
                { "type": "AttributeEffect", "properties": { "attributeName": "Bravery", "delta": 5 } },
            ],
        },
    ],
}
"#;

const MARKET_RECORD: &str = r#"{
    "id": "the_market_square",
    "title": "The Market Square",
    "description": "Stalls, shouting, and a pocket of quiet at the fountain.",
    "content": "The market swallows you whole. A trader waves you over, convinced you are someone worth knowing.",
    "category": "town",
    // Only reachable once the opening has been played.
    "prerequisites": [
        {
            "type": "StoryletPlayedRequirement",
            "properties": { "storyletId": "a_new_beginning", "mustHavePlayed": true },
        },
    ],
    "options": [
        {
            "id": "haggle",
            "text": "Haggle over something you do not need",
            "resultText": "You lose the argument and a few coins, but win the trader's respect.",
            "priority": 15,
            "prerequisites": [
                { "type": "AttributeRequirement", "properties": { "attributeName": "SelfAssurance", "minValue": 45 } },
            ],
            "effects": [
                { "type": "QualityEffect", "properties": { "qualityId": "social_capital", "delta": 10 } },
            ],
        },
        {
            "id": "watch_the_crowd",
            "text": "Watch the crowd from the fountain",
            "resultText": "You learn more from an hour of watching than a day of talking.",
            "effects": [
                { "type": "AttributeEffect", "properties": { "attributeName": "Discernment", "delta": 5 } },
            ],
        },
    ],
}
"#;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;

    fs::write(dir.join("a_new_beginning.jsonc"), OPENING_RECORD)
        .map_err(|e| format!("cannot write a_new_beginning.jsonc: {e}"))?;
    fs::write(dir.join("the_market_square.jsonc"), MARKET_RECORD)
        .map_err(|e| format!("cannot write the_market_square.jsonc: {e}"))?;

    println!("Created story '{name}' in {name}/");
    println!("  a_new_beginning.jsonc   — the opening storylet");
    println!("  the_market_square.jsonc — a follow-up gated on the opening");
    println!();
    println!("Get started:");
    println!("  cd {name}");
    println!("  skein check            # Validate the storylet records");
    println!("  skein list             # List all storylets");
    println!("  skein play             # Start playing");

    Ok(())
}
