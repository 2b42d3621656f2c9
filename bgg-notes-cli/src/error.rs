use thiserror::Error;

use bgg_notes_catalog::CatalogError;
use bgg_notes_lib::{SessionError, SettingsError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be read or written
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// Catalog or translation client could not be set up
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Search, selection or note storage failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Runtime creation or logger setup failed
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// The user gave a selection we cannot use
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }
}
