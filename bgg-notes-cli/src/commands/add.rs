use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bgg_notes_frontend::NoteStore;
use bgg_notes_lib::{
    BggClient, FsNoteStore, HttpTranslator, MemoryNoteStore, SavedNote, SearchSession,
    WriteStatus, load_settings, resolve_vault_path,
};

use crate::CliError;
use crate::commands::runtime;
use crate::commands::search::print_results;
use crate::spinner;

pub(crate) struct AddOptions {
    pub query: String,
    pub pick: Option<usize>,
    pub translate: bool,
    pub dry_run: bool,
    pub vault: Option<PathBuf>,
    pub hide_spinner: bool,
}

/// Search, pick one result and write (or print) its note.
pub(crate) fn run_add(opts: AddOptions) -> Result<(), CliError> {
    let mut settings = load_settings()?;
    if opts.translate {
        settings.enable_translation = true;
    }

    let catalog = BggClient::from_settings(&settings)?;
    let translator = if settings.enable_translation {
        Some(HttpTranslator::from_settings(&settings)?)
    } else {
        None
    };

    let rt = runtime()?;

    if opts.dry_run {
        let mut session = SearchSession::new(settings, catalog, translator, MemoryNoteStore::new());
        if let Some(saved) = rt.block_on(search_and_pick(&mut session, &opts))? {
            log::info!(
                "Would write {}",
                saved.note.path.if_supports_color(Stdout, |t| t.cyan()),
            );
            log::info!("");
            print!("{}", saved.note.content);
            std::io::stdout().flush()?;
        }
        return Ok(());
    }

    let vault = resolve_vault_path(opts.vault.clone());
    log::debug!("Vault: {}", vault.display());
    let mut session =
        SearchSession::new(settings, catalog, translator, FsNoteStore::new(vault.clone()));
    if let Some(saved) = rt.block_on(search_and_pick(&mut session, &opts))? {
        report_saved(&vault, &saved);
    }
    Ok(())
}

async fn search_and_pick<S: NoteStore>(
    session: &mut SearchSession<BggClient, HttpTranslator, S>,
    opts: &AddOptions,
) -> Result<Option<SavedNote>, CliError> {
    let results = spinner::while_waiting(
        opts.hide_spinner,
        format!("Searching for '{}'...", opts.query),
        session.submit_query(&opts.query),
    )
    .await?;
    print_results(&opts.query, results);
    if results.is_empty() {
        return Ok(None);
    }
    let count = results.len();

    let index = match opts.pick {
        Some(pick) => pick_index(pick, count)?,
        None => {
            log::info!("");
            match prompt_pick(count)? {
                Some(index) => index,
                None => {
                    session.cancel();
                    log::info!("Cancelled");
                    return Ok(None);
                }
            }
        }
    };

    let label = session.results()[index].label();
    let saved = spinner::while_waiting(
        opts.hide_spinner,
        format!("Fetching {}...", label),
        session.select_index(index),
    )
    .await?;
    Ok(Some(saved))
}

/// Turn a 1-based pick into an index into `count` results.
fn pick_index(pick: usize, count: usize) -> Result<usize, CliError> {
    if (1..=count).contains(&pick) {
        Ok(pick - 1)
    } else {
        Err(CliError::invalid_selection(format!(
            "{} (expected 1-{})",
            pick, count
        )))
    }
}

/// Parse a typed answer. Empty input or `q` cancels.
fn parse_answer(input: &str, count: usize) -> Result<Option<usize>, CliError> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    let pick: usize = input
        .parse()
        .map_err(|_| CliError::invalid_selection(format!("'{}' is not a number", input)))?;
    pick_index(pick, count).map(Some)
}

/// Ask on stdin until the answer is usable. EOF cancels.
fn prompt_pick(count: usize) -> Result<Option<usize>, CliError> {
    loop {
        print!("Pick a game [1-{}] (Enter to cancel): ", count);
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        match parse_answer(&input, count) {
            Ok(answer) => return Ok(answer),
            Err(e) => log::warn!("{}", e),
        }
    }
}

fn report_saved(vault: &Path, saved: &SavedNote) {
    let path = vault.join(&saved.note.path);
    match saved.status {
        WriteStatus::Created | WriteStatus::Updated => {
            let verb = if saved.status == WriteStatus::Created {
                "Created"
            } else {
                "Updated"
            };
            log::info!(
                "{} {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                verb,
                path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        WriteStatus::Unchanged => {
            log::info!(
                "{} {} {}",
                "-".if_supports_color(Stdout, |t| t.dimmed()),
                path.display().if_supports_color(Stdout, |t| t.cyan()),
                "(already up to date)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}
