//! bgg-notes CLI
//!
//! Command-line interface for turning BoardGameGeek entries into Obsidian
//! notes.

mod cli_types;
mod commands;
mod error;
mod logger;
mod spinner;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::add::{AddOptions, run_add};
use commands::config::{run_config_init, run_config_path, run_config_show};
use commands::search::run_search;
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(2);
    }

    // Spinner lines would interleave with debug output
    let hide_spinner = cli.quiet || cli.verbose;

    let result = match cli.command {
        Commands::Search { query } => run_search(&query, hide_spinner),
        Commands::Add {
            query,
            pick,
            translate,
            dry_run,
        } => run_add(AddOptions {
            query,
            pick,
            translate,
            dry_run,
            vault: cli.vault,
            hide_spinner,
        }),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
            ConfigAction::Init { force } => run_config_init(force),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        log::logger().flush();
        std::process::exit(1);
    }
}
