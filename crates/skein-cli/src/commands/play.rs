//! The interactive session: surface storylets, take choices, apply effects.

use std::cmp;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use skein_core::{apply_all, Archetype, CharacterBuilder, CharacterState, Storylet};

use crate::display;

pub fn run(
    dir: &Path,
    name: &str,
    archetype: Option<&str>,
    seed: u64,
    load: Option<&Path>,
    save: Option<&Path>,
) -> Result<(), String> {
    let result = super::load_store(dir)?;
    if result.store.is_empty() {
        return Err(format!("no storylets found in '{}'", dir.display()));
    }

    let mut character = match load {
        Some(path) => read_snapshot(path)?,
        None => create_character(name, archetype, seed)?,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    session(result.store.all(), &mut character, &mut input, &mut out)
        .map_err(|e| e.to_string())?;

    if let Some(path) = save {
        write_snapshot(path, &character)?;
        writeln!(out, "Session saved to {}", path.display()).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<CharacterState, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("cannot read session file '{}': {e}", path.display()))?;
    serde_json::from_str(&source)
        .map_err(|e| format!("invalid session file '{}': {e}", path.display()))
}

fn write_snapshot(path: &Path, character: &CharacterState) -> Result<(), String> {
    let snapshot = serde_json::to_string_pretty(character)
        .map_err(|e| format!("cannot serialize session: {e}"))?;
    fs::write(path, format!("{snapshot}\n"))
        .map_err(|e| format!("cannot write session file '{}': {e}", path.display()))
}

/// Build the character the session plays.
///
/// Without an archetype this is the classic starting character: balanced
/// attributes and a little social standing to spend. With one, the
/// builder applies the archetype's modifiers and the session gains a win
/// condition to play toward.
fn create_character(
    name: &str,
    archetype: Option<&str>,
    seed: u64,
) -> Result<CharacterState, String> {
    let mut character = match archetype {
        None => CharacterState::new(name),
        Some(choice) => {
            let builder = CharacterBuilder::new().with_name(name);
            let builder = if choice.eq_ignore_ascii_case("random") {
                let mut rng = StdRng::seed_from_u64(seed);
                builder.with_random_archetype(&mut rng)
            } else {
                builder.with_archetype(Archetype::parse(choice).map_err(|e| e.to_string())?)
            };
            builder.build().map_err(|e| e.to_string())?
        }
    };
    character.set_quality("social_capital", 5);
    Ok(character)
}

fn session<R: BufRead, W: Write>(
    storylets: &[Storylet],
    character: &mut CharacterState,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    display::show_welcome(out)?;
    display::show_character(out, character)?;
    play_loop(storylets, character, input, out)?;
    display::show_message(out, "Thank you for playing Skein!")
}

fn play_loop<R: BufRead, W: Write>(
    storylets: &[Storylet],
    character: &mut CharacterState,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        let Some(storylet) = next_storylet(storylets, character) else {
            display::show_no_storylets(out)?;
            return Ok(());
        };

        display::show_storylet(out, storylet)?;
        apply_all(&storylet.effects, character);

        if storylet.has_choices() {
            let options = storylet.available_options(character);
            if options.is_empty() {
                display::show_message(out, "No available options at this time.")?;
                character.mark_played(&storylet.id);
                continue;
            }

            display::show_options(out, &options)?;
            let Some(choice) = prompt_choice(input, out, 1, options.len())? else {
                character.mark_played(&storylet.id);
                return Ok(());
            };
            let option = options[choice - 1];
            display::show_option_result(out, option)?;
            apply_all(&option.effects, character);
        }

        character.mark_played(&storylet.id);
        display::show_separator(out)?;
        display::show_character(out, character)?;

        if let Some(archetype) = character.archetype {
            if archetype.win_condition().is_met(character) {
                writeln!(
                    out,
                    "{} has fulfilled the path of {}.",
                    character.name,
                    archetype.name()
                )?;
                writeln!(out, "Your story is complete.")?;
                writeln!(out)?;
                return Ok(());
            }
        }

        if !prompt_yes_no(input, out, "Continue your journey?")? {
            return Ok(());
        }
        writeln!(out)?;
    }
}

/// The next storylet to surface: unplayed, prerequisites met, highest
/// priority. Ties keep load order.
fn next_storylet<'a>(storylets: &'a [Storylet], character: &CharacterState) -> Option<&'a Storylet> {
    storylets
        .iter()
        .filter(|storylet| {
            !character.has_played(&storylet.id) && storylet.prerequisites_met(character)
        })
        .min_by_key(|storylet| cmp::Reverse(storylet.priority))
}

/// Ask for a number between `min` and `max` until one arrives.
/// Returns `None` when the input stream ends first.
fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    min: usize,
    max: usize,
) -> io::Result<Option<usize>> {
    loop {
        write!(out, "Your choice: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.trim().parse::<usize>() {
            Ok(choice) if (min..=max).contains(&choice) => return Ok(Some(choice)),
            _ => writeln!(
                out,
                "Invalid choice. Please enter a number between {min} and {max}."
            )?,
        }
    }
}

/// Ask a yes/no question until the answer is clear. The end of the input
/// stream reads as no.
fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<bool> {
    loop {
        write!(out, "{question} (y/n): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(out, "Invalid input. Please enter 'y' or 'n'.")?,
        }
    }
}
