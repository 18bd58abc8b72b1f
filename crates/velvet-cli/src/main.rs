//! CLI frontend for the Velvet Room persona game.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "velvet",
    about = "The Velvet Room — summon, release, and fuse personas",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and seed a new game database
    Init {
        /// Database file to create
        #[arg(short, long, default_value = "velvet.db")]
        db: PathBuf,

        /// JSON catalog to seed instead of the built-in one
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Enter the Velvet Room: the interactive menu for one player
    Play {
        /// Player name (the profile is created on first visit)
        name: String,

        /// Database file
        #[arg(short, long, default_value = "velvet.db")]
        db: PathBuf,

        /// RNG seed for reproducible draws
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Show a player's current stock
    Stock {
        /// Player name
        name: String,

        /// Database file
        #[arg(short, long, default_value = "velvet.db")]
        db: PathBuf,
    },

    /// List all arcanas, or the personas of one arcana
    Arcanas {
        /// Show the personas of this arcana id instead
        #[arg(short, long)]
        personas: Option<i64>,

        /// Database file
        #[arg(short, long, default_value = "velvet.db")]
        db: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { db, catalog } => commands::init::run(&db, catalog.as_deref()),
        Commands::Play { name, db, seed } => commands::play::run(&db, &name, seed),
        Commands::Stock { name, db } => commands::stock::run(&db, &name),
        Commands::Arcanas { personas, db } => commands::arcanas::run(&db, personas),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
