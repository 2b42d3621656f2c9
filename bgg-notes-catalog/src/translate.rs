//! Optional translation pass over a record's free text.

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::time::Duration;

use bgg_notes_core::{GameRecord, Settings, TranslationMode};

use crate::error::CatalogError;
use crate::types::{TranslateRequest, TranslateResponse};

/// Something that can translate a piece of text into a fixed target language.
#[allow(async_fn_in_trait)]
pub trait TextTranslator {
    async fn translate_text(&self, text: &str) -> Result<String, CatalogError>;
}

/// Client for a Google-style `translate/v2` endpoint.
pub struct HttpTranslator {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    target: String,
    timeout: Duration,
}

impl HttpTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        target: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::translation(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            target: target.into(),
            timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| CatalogError::translation("no translation API key configured"))?;

        Self::new(
            settings.translation_endpoint.clone(),
            api_key,
            settings.translation_language.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }
}

impl TextTranslator for HttpTranslator {
    async fn translate_text(&self, text: &str) -> Result<String, CatalogError> {
        let body = TranslateRequest {
            q: text,
            target: &self.target,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        check_translation_status(resp.status())?;
        let parsed: TranslateResponse = resp.json().await.map_err(|e| self.request_error(e))?;
        first_translation(parsed)
    }
}

fn check_translation_status(status: reqwest::StatusCode) -> Result<(), CatalogError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(CatalogError::translation(format!(
            "HTTP {} from translation endpoint",
            status.as_u16()
        )))
    }
}

fn first_translation(resp: TranslateResponse) -> Result<String, CatalogError> {
    resp.first_text()
        .ok_or_else(|| CatalogError::translation("response contained no translations"))
}

impl HttpTranslator {
    fn request_error(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::translation(format!("timed out after {:?}", self.timeout))
        } else {
            CatalogError::translation(err.to_string())
        }
    }
}

/// Translate the description and every comment of `record`.
///
/// Comments are sent in source order with at most `concurrency` requests in
/// flight; results are collected in the same order, so comment N keeps its
/// rating. Any failure aborts the whole record.
pub async fn translate_record<T: TextTranslator>(
    translator: &T,
    mut record: GameRecord,
    mode: TranslationMode,
    concurrency: usize,
) -> Result<GameRecord, CatalogError> {
    let description = translate_field(translator, &record.description).await?;
    record.description = merge(&record.description, description, mode);

    let translated: Vec<String> = stream::iter(
        record
            .comments
            .iter()
            .map(|c| translate_field(translator, &c.value)),
    )
    .buffered(concurrency.max(1))
    .try_collect()
    .await?;

    for (comment, text) in record.comments.iter_mut().zip(translated) {
        comment.value = merge(&comment.value, text, mode);
    }

    log::debug!(
        "Translated description and {} comments for '{}'",
        record.comments.len(),
        record.title
    );

    Ok(record)
}

/// Blank text is passed through without a request.
async fn translate_field<T: TextTranslator>(
    translator: &T,
    text: &str,
) -> Result<String, CatalogError> {
    if text.trim().is_empty() {
        return Ok(text.to_string());
    }
    translator.translate_text(text).await
}

fn merge(original: &str, translated: String, mode: TranslationMode) -> String {
    match mode {
        TranslationMode::Replace => translated,
        TranslationMode::Append if translated.trim().is_empty() => original.to_string(),
        TranslationMode::Append => {
            let quoted: Vec<String> = translated.lines().map(|l| format!("> {l}")).collect();
            format!("{original}\n{}", quoted.join("\n"))
        }
    }
}

#[cfg(test)]
#[path = "tests/translate_tests.rs"]
mod tests;
