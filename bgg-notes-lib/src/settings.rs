//! Settings file and vault location.
//!
//! The settings file is always `~/.config/bgg-notes/settings.toml`. A missing
//! file means defaults; a present but invalid file is an error so typos do
//! not silently fall back.

use std::path::{Path, PathBuf};

use bgg_notes_core::Settings;

use crate::error::SettingsError;

/// Environment variable that overrides the translation API key.
pub const API_KEY_ENV: &str = "BGG_NOTES_API_KEY";
/// Environment variable naming the default vault directory.
pub const VAULT_ENV: &str = "BGG_NOTES_VAULT";

/// Canonical path to the settings file: `~/.config/bgg-notes/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("bgg-notes").join("settings.toml")
}

/// Load settings from the canonical path and apply environment overrides.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let settings = load_settings_from(&settings_path())?;
    Ok(with_api_key_override(
        settings,
        std::env::var(API_KEY_ENV).ok(),
    ))
}

/// Load settings from `path`, returning defaults when the file does not exist.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(e.into()),
    };
    Ok(toml::from_str(&contents)?)
}

/// Replace the configured API key when an override is present and non-empty.
pub fn with_api_key_override(mut settings: Settings, key: Option<String>) -> Settings {
    if let Some(key) = key.filter(|k| !k.is_empty()) {
        settings.api_key = Some(key);
    }
    settings
}

/// Write `settings` to the canonical path.
pub fn save_settings(settings: &Settings) -> Result<PathBuf, SettingsError> {
    let path = settings_path();
    save_settings_to(&path, settings)?;
    Ok(path)
}

/// Write `settings` to `path`, creating parent directories as needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(settings)?;

    // Write atomically
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Resolve the vault root using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `BGG_NOTES_VAULT` environment variable
/// 3. Current working directory
pub fn resolve_vault_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = std::env::var_os(VAULT_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(p);
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bgg_notes_core::TranslationMode;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = Settings {
            note_path: "Vault/Games".to_string(),
            api_key: Some("k".to_string()),
            enable_translation: true,
            translation_language: "ja".to_string(),
            translation_mode: TranslationMode::Append,
            result_cap: 50,
            ..Default::default()
        };

        save_settings_to(&path, &settings).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "result_cap = \"ten\"").unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_api_key_override() {
        let base = Settings {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        let kept = with_api_key_override(base.clone(), None);
        assert_eq!(kept.api_key.as_deref(), Some("from-file"));

        let kept = with_api_key_override(base.clone(), Some(String::new()));
        assert_eq!(kept.api_key.as_deref(), Some("from-file"));

        let replaced = with_api_key_override(base, Some("from-env".to_string()));
        assert_eq!(replaced.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_cli_vault_override_wins() {
        let p = PathBuf::from("/tmp/vault");
        assert_eq!(resolve_vault_path(Some(p.clone())), p);
    }
}
