use reqwest::StatusCode;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use bgg_notes_core::{SearchResult, Settings, UNKNOWN_YEAR};

use crate::error::CatalogError;
use crate::xml::{XmlElement, parse_document};

/// BoardGameGeek asks API clients to keep a gap between requests.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

/// The two lookups the note pipeline needs from a game catalog.
///
/// Implemented by [`BggClient`] for the live API and by in-memory fakes in
/// tests.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Search by name, returning at most `cap` hits in response order.
    /// An empty list means "no matches", not a failure.
    async fn search(&self, query: &str, cap: usize) -> Result<Vec<SearchResult>, CatalogError>;

    /// Fetch the detail document for one id and return its first `item`.
    async fn fetch_detail(&self, id: &str) -> Result<XmlElement, CatalogError>;
}

/// HTTP client for the BoardGameGeek XML API 2 with request spacing.
pub struct BggClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl BggClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bgg-notes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            last_request: Mutex::new(None),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        Self::new(
            settings.catalog_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// GET `{base_url}/{endpoint}` and parse the body as XML.
    async fn get_xml(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<XmlElement, CatalogError> {
        self.rate_limit().await;

        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {} {:?}", url, params);

        let resp = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| CatalogError::from_request(e, self.timeout))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CatalogError::from_request(e, self.timeout))?;

        parse_document(&check_status(status, text)?)
    }

    /// Enforce rate limiting: wait until at least MIN_REQUEST_INTERVAL has
    /// passed since the last API request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl Catalog for BggClient {
    async fn search(&self, query: &str, cap: usize) -> Result<Vec<SearchResult>, CatalogError> {
        let root = self
            .get_xml("search", &[("query", query), ("type", "boardgame")])
            .await?;
        parse_search_results(&root, cap)
    }

    async fn fetch_detail(&self, id: &str) -> Result<XmlElement, CatalogError> {
        let root = self
            .get_xml("thing", &[("id", id), ("stats", "1"), ("comments", "1")])
            .await?;
        first_item(root)
    }
}

/// Pass a success body through; anything else becomes `ServerError` carrying
/// the start of the body.
pub(crate) fn check_status(status: StatusCode, body: String) -> Result<String, CatalogError> {
    if status.is_success() {
        return Ok(body);
    }
    Err(CatalogError::ServerError {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    })
}

/// Read up to `cap` search hits from a search response, in document order.
pub fn parse_search_results(
    root: &XmlElement,
    cap: usize,
) -> Result<Vec<SearchResult>, CatalogError> {
    root.find_all("item")
        .into_iter()
        .take(cap)
        .map(|item| {
            let id = item
                .attr("id")
                .ok_or_else(|| CatalogError::malformed("item id"))?;
            let name = item
                .find("name")
                .and_then(|n| n.attr("value"))
                .ok_or_else(|| CatalogError::malformed(format!("name of item {id}")))?;
            let year_published = item
                .find("yearpublished")
                .and_then(|y| y.attr("value"))
                .unwrap_or(UNKNOWN_YEAR);

            Ok(SearchResult {
                id: id.to_string(),
                name: name.to_string(),
                year_published: year_published.to_string(),
            })
        })
        .collect()
}

/// Take ownership of the first `item` element of a detail response.
pub fn first_item(root: XmlElement) -> Result<XmlElement, CatalogError> {
    if root.name == "item" {
        return Ok(root);
    }
    root.find("item")
        .cloned()
        .ok_or_else(|| CatalogError::malformed("item"))
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
