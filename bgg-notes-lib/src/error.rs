use thiserror::Error;

use bgg_notes_catalog::{CatalogError, ErrorKind};
use bgg_notes_frontend::FrontendError;

use crate::session::SessionState;

/// Errors that can occur while driving a search session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Catalog lookup, response parsing or translation failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The rendered note could not be stored
    #[error("Could not store note: {0}")]
    Store(#[from] FrontendError),

    /// Operation called in a state that does not allow it
    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    /// Selected id was not among the current search results
    #[error("'{0}' is not one of the current search results")]
    UnknownSelection(String),
}

impl SessionError {
    /// Category of the underlying catalog failure, if this is one.
    pub fn catalog_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Catalog(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Errors that can occur while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
