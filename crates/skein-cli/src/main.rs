//! CLI frontend for the Skein storylet engine.

mod commands;
mod display;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "skein",
    about = "Skein: a storylet engine for quality-based narratives",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new story directory with sample storylets
    Init {
        /// Name of the story directory to create
        name: String,
    },

    /// Load every storylet record and report problems
    Check {
        /// Directory containing .jsonc storylet records
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// List storylets in the directory
    List {
        /// Filter by category
        category: Option<String>,

        /// Filter by tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Directory containing .jsonc storylet records
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show detailed information about a storylet
    Show {
        /// Storylet id
        id: String,

        /// Directory containing .jsonc storylet records
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Add a new storylet record to the directory
    New {
        /// Storylet id (also names the record file)
        id: String,

        /// Storylet title
        title: String,

        /// Category for the new storylet
        #[arg(short, long)]
        category: Option<String>,

        /// Directory containing .jsonc storylet records
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Play through the storylets interactively
    Play {
        /// Character name
        #[arg(short, long, default_value = "Wanderer")]
        name: String,

        /// Archetype to play: reformer, helper, achiever, or random
        #[arg(short, long)]
        archetype: Option<String>,

        /// RNG seed used when the archetype is random
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Restore a saved session instead of creating a character
        #[arg(long, value_name = "FILE")]
        load: Option<PathBuf>,

        /// Write the session to FILE when the run ends
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        /// Directory containing .jsonc storylet records
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::List { category, tag, dir } => {
            commands::list::run(&dir, category.as_deref(), tag.as_deref())
        }
        Commands::Show { id, dir } => commands::show::run(&dir, &id),
        Commands::New {
            id,
            title,
            category,
            dir,
        } => commands::new::run(&dir, &id, &title, category.as_deref()),
        Commands::Play {
            name,
            archetype,
            seed,
            load,
            save,
            dir,
        } => commands::play::run(
            &dir,
            &name,
            archetype.as_deref(),
            seed,
            load.as_deref(),
            save.as_deref(),
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
