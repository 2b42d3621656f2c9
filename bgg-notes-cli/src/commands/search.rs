use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bgg_notes_lib::{
    BggClient, HttpTranslator, MemoryNoteStore, SearchResult, SearchSession, load_settings,
};

use crate::CliError;
use crate::commands::runtime;
use crate::spinner;

/// Search the catalog and list the hits.
pub(crate) fn run_search(query: &str, hide_spinner: bool) -> Result<(), CliError> {
    let settings = load_settings()?;
    let catalog = BggClient::from_settings(&settings)?;

    // Nothing is stored from a plain search
    let mut session: SearchSession<_, HttpTranslator, _> =
        SearchSession::new(settings, catalog, None, MemoryNoteStore::new());

    let rt = runtime()?;
    rt.block_on(async {
        let results = spinner::while_waiting(
            hide_spinner,
            format!("Searching for '{}'...", query),
            session.submit_query(query),
        )
        .await?;
        print_results(query, results);
        Ok::<(), CliError>(())
    })
}

/// Numbered result list, 1-based to match `add --pick`.
pub(crate) fn print_results(query: &str, results: &[SearchResult]) {
    if results.is_empty() {
        log::info!(
            "No games found for '{}'",
            query.if_supports_color(Stdout, |t| t.bold()),
        );
        return;
    }

    log::info!(
        "{} result{} for '{}':",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        query.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    for (i, result) in results.iter().enumerate() {
        log::info!(
            "  {:>2}. {} {} {}",
            i + 1,
            result.name.if_supports_color(Stdout, |t| t.bold()),
            format!("({})", result.year_published).if_supports_color(Stdout, |t| t.cyan()),
            format!("#{}", result.id).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
