//! Command-line interface for word_hunt.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use word_hunt::{DEFAULT_BASE_URL, Difficulty, Slot};

/// Word Hunt - find words in a seeded letter grid before time runs out
#[derive(Parser, Debug)]
#[command(name = "word_hunt")]
#[command(about = "Timed letter-grid word hunt with shared results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new game id
    New {
        /// Two-party game: also print the share link
        #[arg(long)]
        multi: bool,

        /// Base URL of share links
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Print the board dealt for a game id
    Board {
        /// Game id (board seed)
        #[arg(short, long)]
        game_id: String,

        /// Board size tier (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },

    /// Play in text mode: each stdin line is a path of cell indices
    Play {
        /// Game id (board seed)
        #[arg(short, long)]
        game_id: String,

        /// Board size tier (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Newline-separated word list
        #[arg(short, long)]
        words: Option<PathBuf>,

        /// Two-party game: report or wait for the opponent's result
        #[arg(long)]
        multi: bool,

        /// Display name stored with the result
        #[arg(long)]
        name: Option<String>,
    },

    /// Print the stored record for a game
    Show {
        /// Game id
        #[arg(short, long)]
        game_id: String,
    },

    /// Wait until the opponent's result appears
    Wait {
        /// Game id
        #[arg(short, long)]
        game_id: String,

        /// Slot your own result was saved to (player, opponent)
        #[arg(short, long)]
        slot: Slot,
    },

    /// Drop stored games older than the retention window
    Sweep,
}
