//! Search -> select -> render -> store, one step at a time.
//!
//! A [`SearchSession`] owns the per-session state (last query, last results,
//! pending selection) and walks this state machine:
//!
//! ```text
//! Idle -> Searching -> ResultsShown -> DetailLoading -> Rendered -> Idle
//! ```
//!
//! Every failure returns the session to `Idle` with no results kept and
//! nothing written. Dropping an in-flight `submit_query`/`select` future has
//! the same effect, so callers can abandon a session at any await point.

use std::fmt;

use bgg_notes_catalog::{
    Catalog, CatalogError, TextTranslator, XmlElement, normalize, translate_record,
};
use bgg_notes_core::{SearchResult, Settings};
use bgg_notes_frontend::{NoteStore, ObsidianNote, RenderedNote};

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
    ResultsShown,
    DetailLoading,
    Rendered,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Searching => write!(f, "searching"),
            Self::ResultsShown => write!(f, "showing results"),
            Self::DetailLoading => write!(f, "loading details"),
            Self::Rendered => write!(f, "rendered"),
        }
    }
}

/// What happened to the note file on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Created,
    Updated,
    /// Existing note already had identical content; nothing was written.
    Unchanged,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Result of a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedNote {
    pub note: RenderedNote,
    pub status: WriteStatus,
}

/// Sets a state on entry and puts the session back to `Idle` when dropped,
/// unless [`finish`](StateGuard::finish) picked a different final state.
struct StateGuard<'a> {
    state: &'a mut SessionState,
    armed: bool,
}

impl<'a> StateGuard<'a> {
    fn enter(state: &'a mut SessionState, next: SessionState) -> Self {
        log::debug!("session: {} -> {}", state, next);
        *state = next;
        Self { state, armed: true }
    }

    fn advance(&mut self, next: SessionState) {
        log::debug!("session: {} -> {}", self.state, next);
        *self.state = next;
    }

    fn finish(mut self, next: SessionState) {
        log::debug!("session: {} -> {}", self.state, next);
        *self.state = next;
        self.armed = false;
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("session: {} -> idle (aborted)", self.state);
            *self.state = SessionState::Idle;
        }
    }
}

/// One interactive lookup session.
///
/// Generic over its collaborators so tests (and dry runs) can swap in
/// in-memory implementations.
pub struct SearchSession<C, T, S> {
    settings: Settings,
    catalog: C,
    translator: Option<T>,
    store: S,
    renderer: ObsidianNote,
    state: SessionState,
    last_query: Option<String>,
    results: Vec<SearchResult>,
    pending: Option<String>,
}

impl<C, T, S> SearchSession<C, T, S>
where
    C: Catalog,
    T: TextTranslator,
    S: NoteStore,
{
    /// `translator` is only used when `settings.enable_translation` is set.
    pub fn new(settings: Settings, catalog: C, translator: Option<T>, store: S) -> Self {
        let renderer = ObsidianNote::from_settings(&settings);
        Self {
            settings,
            catalog,
            translator,
            store,
            renderer,
            state: SessionState::Idle,
            last_query: None,
            results: Vec::new(),
            pending: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Results of the last successful search, while they are being shown.
    pub fn results(&self) -> &[SearchResult] {
        match self.state {
            SessionState::ResultsShown => &self.results,
            _ => &[],
        }
    }

    /// Id currently being loaded, if a selection is in progress.
    pub fn pending_selection(&self) -> Option<&str> {
        match self.state {
            SessionState::DetailLoading | SessionState::Rendered => self.pending.as_deref(),
            _ => None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Search the catalog. Allowed when idle, or when results are shown (the
    /// new query replaces them). An empty result list is a normal outcome.
    pub async fn submit_query(&mut self, query: &str) -> Result<&[SearchResult], SessionError> {
        match self.state {
            SessionState::Idle | SessionState::ResultsShown => {}
            state => {
                return Err(SessionError::InvalidState {
                    action: "search",
                    state,
                });
            }
        }

        self.results.clear();
        self.pending = None;
        self.last_query = None;

        let guard = StateGuard::enter(&mut self.state, SessionState::Searching);
        let results = self
            .catalog
            .search(query, self.settings.result_cap)
            .await
            .inspect_err(|e| log::debug!("search for '{}' failed: {}", query, e))?;

        guard.finish(SessionState::ResultsShown);
        log::debug!("'{}' matched {} games", query, results.len());
        self.last_query = Some(query.to_string());
        self.results = results;
        Ok(&self.results)
    }

    /// Select one of the shown results: fetch, normalize, translate (when
    /// enabled), render and store its note.
    pub async fn select(&mut self, id: &str) -> Result<SavedNote, SessionError> {
        if self.state != SessionState::ResultsShown {
            return Err(SessionError::InvalidState {
                action: "select a result",
                state: self.state,
            });
        }
        if !self.results.iter().any(|r| r.id == id) {
            return Err(SessionError::UnknownSelection(id.to_string()));
        }

        self.pending = Some(id.to_string());
        let mut guard = StateGuard::enter(&mut self.state, SessionState::DetailLoading);

        let rendered = render_detail(
            &self.settings,
            &self.catalog,
            self.translator.as_ref(),
            &self.renderer,
            id,
        )
        .await;

        let outcome = match rendered {
            Ok(note) => {
                guard.advance(SessionState::Rendered);
                persist(&self.store, note)
            }
            Err(e) => Err(e),
        };

        guard.finish(SessionState::Idle);
        self.results.clear();
        self.pending = None;
        outcome
    }

    /// Select by position in the current results (0-based).
    pub async fn select_index(&mut self, index: usize) -> Result<SavedNote, SessionError> {
        let id = self
            .results
            .get(index)
            .map(|r| r.id.clone())
            .ok_or_else(|| {
                SessionError::UnknownSelection(format!("#{}", index.saturating_add(1)))
            })?;
        self.select(&id).await
    }

    /// Abandon whatever the session was doing and return to `Idle`.
    pub fn cancel(&mut self) {
        if self.state != SessionState::Idle {
            log::debug!("session: {} -> idle (cancelled)", self.state);
        }
        self.state = SessionState::Idle;
        self.results.clear();
        self.pending = None;
    }
}

/// Fetch and turn one game into its finished note.
///
/// Escaping runs after translation so the translator never sees the escapes.
async fn render_detail<C: Catalog, T: TextTranslator>(
    settings: &Settings,
    catalog: &C,
    translator: Option<&T>,
    renderer: &ObsidianNote,
    id: &str,
) -> Result<RenderedNote, SessionError> {
    let item: XmlElement = catalog.fetch_detail(id).await?;
    let mut record = normalize(&item)?;

    if settings.enable_translation {
        let translator = translator.ok_or_else(|| {
            CatalogError::translation("translation is enabled but no translator is configured")
        })?;
        record = translate_record(
            translator,
            record,
            settings.translation_mode,
            settings.translation_concurrency,
        )
        .await?;
    }

    let record = record.escape_markdown();
    Ok(renderer.render(&record, id))
}

fn persist<S: NoteStore>(store: &S, note: RenderedNote) -> Result<SavedNote, SessionError> {
    // An unreadable old note is overwritten like any other stale one
    let status = match store.read(&note.path) {
        Ok(Some(existing)) if existing == note.content => WriteStatus::Unchanged,
        Ok(Some(_)) => WriteStatus::Updated,
        Ok(None) => WriteStatus::Created,
        Err(e) => {
            log::warn!("Could not read existing {}: {}; overwriting it", note.path, e);
            WriteStatus::Updated
        }
    };

    if status != WriteStatus::Unchanged {
        store.write(&note.path, &note.content)?;
    }
    log::debug!("{} ({})", note.path, status);

    Ok(SavedNote { note, status })
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
