pub(crate) mod add;
pub(crate) mod config;
pub(crate) mod search;

use crate::CliError;

/// Build the runtime network commands run on.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}
