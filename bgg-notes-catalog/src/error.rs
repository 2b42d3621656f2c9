use std::time::Duration;

/// Broad category of a [`CatalogError`], used by callers that only care
/// about which stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, timeout, non-success status or unparsable body.
    Remote,
    /// The response parsed but a required element was missing.
    MalformedResponse,
    /// A translation call failed.
    Translation,
}

/// Errors that can occur while talking to the catalog or translation service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("XML parsing error: {0}")]
    Xml(String),

    #[error("Malformed response: missing {0}")]
    MalformedResponse(String),

    #[error("Translation failed: {0}")]
    Translation(String),
}

impl CatalogError {
    pub fn xml(msg: impl Into<String>) -> Self {
        Self::Xml(msg.into())
    }

    pub fn malformed(field: impl Into<String>) -> Self {
        Self::MalformedResponse(field.into())
    }

    pub fn translation(msg: impl Into<String>) -> Self {
        Self::Translation(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::Timeout(_) | Self::ServerError { .. } | Self::Xml(_) => {
                ErrorKind::Remote
            }
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Translation(_) => ErrorKind::Translation,
        }
    }

    /// Map a reqwest failure, turning timeouts into [`CatalogError::Timeout`].
    pub(crate) fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Http(err)
        }
    }
}

impl From<quick_xml::Error> for CatalogError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for CatalogError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.to_string())
    }
}
