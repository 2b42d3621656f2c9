//! User-facing settings.
//!
//! `Settings` is a plain value handed to the session at construction. Loading
//! it from disk and applying environment overrides lives in `bgg-notes-lib`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTE_PATH: &str = "boardgames";
pub const DEFAULT_RESULT_CAP: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CATALOG_URL: &str = "https://boardgamegeek.com/xmlapi2";
pub const DEFAULT_TRANSLATION_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2";

/// How translated text is merged into the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    /// The translation replaces the original text.
    #[default]
    Replace,
    /// The original text is kept and the translation follows it one quote
    /// level deeper.
    Append,
}

/// How designer and artist lists are written to the front matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// One `  - "name"` line per entry.
    #[default]
    Bulleted,
    /// A single `["a", "b"]` flow list line.
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder inside the vault where notes are written.
    pub note_path: String,
    /// API key for the translation service.
    pub api_key: Option<String>,
    pub enable_translation: bool,
    /// Target language code, e.g. `ja` or `de`.
    pub translation_language: String,
    /// Maximum number of search hits shown.
    pub result_cap: usize,
    pub translation_mode: TranslationMode,
    /// Translation requests allowed in flight at once. Output order is
    /// preserved regardless.
    pub translation_concurrency: usize,
    pub list_style: ListStyle,
    /// Per-request timeout for catalog and translation calls.
    pub request_timeout_secs: u64,
    pub catalog_base_url: String,
    pub translation_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            note_path: DEFAULT_NOTE_PATH.to_string(),
            api_key: None,
            enable_translation: false,
            translation_language: "en".to_string(),
            result_cap: DEFAULT_RESULT_CAP,
            translation_mode: TranslationMode::default(),
            translation_concurrency: 1,
            list_style: ListStyle::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            catalog_base_url: DEFAULT_CATALOG_URL.to_string(),
            translation_endpoint: DEFAULT_TRANSLATION_ENDPOINT.to_string(),
        }
    }
}

impl Settings {
    /// Translation runs only when it is enabled and a key is available.
    pub fn translation_active(&self) -> bool {
        self.enable_translation && self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.result_cap, 10);
        assert_eq!(settings.note_path, "boardgames");
        assert_eq!(settings.translation_mode, TranslationMode::Replace);
        assert_eq!(settings.list_style, ListStyle::Bulleted);
        assert!(!settings.translation_active());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            note_path = "Games/Board"
            enable_translation = true
            translation_language = "ja"
            translation_mode = "append"
            list_style = "inline"
            "#,
        )
        .unwrap();
        assert_eq!(settings.note_path, "Games/Board");
        assert_eq!(settings.translation_language, "ja");
        assert_eq!(settings.translation_mode, TranslationMode::Append);
        assert_eq!(settings.list_style, ListStyle::Inline);
        assert_eq!(settings.result_cap, DEFAULT_RESULT_CAP);
        assert_eq!(settings.catalog_base_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn test_translation_requires_key() {
        let mut settings = Settings {
            enable_translation: true,
            ..Default::default()
        };
        assert!(!settings.translation_active());

        settings.api_key = Some(String::new());
        assert!(!settings.translation_active());

        settings.api_key = Some("secret".to_string());
        assert!(settings.translation_active());
    }
}
