//! Session orchestration and settings for bgg-notes.
//!
//! Frontends (the CLI today) drive a [`SearchSession`]: submit a query, pick
//! one of the results, and get back the note that was written.

pub mod error;
pub mod session;
pub mod settings;

pub use error::{SessionError, SettingsError};
pub use session::{SavedNote, SearchSession, SessionState, WriteStatus};
pub use settings::{
    load_settings, load_settings_from, resolve_vault_path, save_settings, save_settings_to,
    settings_path,
};

pub use bgg_notes_catalog::{BggClient, HttpTranslator};
pub use bgg_notes_core::{GameRecord, SearchResult, Settings};
pub use bgg_notes_frontend::{FsNoteStore, MemoryNoteStore, RenderedNote};
