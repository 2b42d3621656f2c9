//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bgg-notes")]
#[command(about = "Turn BoardGameGeek entries into Obsidian notes", long_about = None)]
pub(crate) struct Cli {
    /// Vault directory notes are written into (defaults to $BGG_NOTES_VAULT, then the current directory)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Search BoardGameGeek and list matching games
    Search {
        /// Game name to search for
        query: String,
    },

    /// Search, pick a game and write its note into the vault
    Add {
        /// Game name to search for
        query: String,

        /// Pick the Nth result (1-based) instead of prompting
        #[arg(short, long)]
        pick: Option<usize>,

        /// Translate description and comments (overrides the settings file)
        #[arg(short, long)]
        translate: bool,

        /// Print the note instead of writing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
