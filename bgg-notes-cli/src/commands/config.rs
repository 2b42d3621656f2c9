use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bgg_notes_core::{ListStyle, TranslationMode};
use bgg_notes_lib::settings::API_KEY_ENV;
use bgg_notes_lib::{Settings, load_settings, save_settings, settings_path};

use crate::CliError;

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        let prefix: String = s.chars().take(2).collect();
        format!("{}****", prefix)
    }
}

/// Show the effective settings and where the API key came from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let settings = load_settings()?;

    log::info!(
        "{}",
        "bgg-notes Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let key_source = if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.is_empty()) {
        format!("env: {}", API_KEY_ENV)
    } else {
        "settings file".to_string()
    };
    let api_key = match settings.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => format!(
            "{} {}",
            mask_value(key),
            format!("({})", key_source).if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => "not set".if_supports_color(Stdout, |t| t.dimmed()).to_string(),
    };

    let rows: &[(&str, String)] = &[
        ("note_path", settings.note_path.clone()),
        ("result_cap", settings.result_cap.to_string()),
        ("list_style", list_style_name(settings.list_style).to_string()),
        ("enable_translation", settings.enable_translation.to_string()),
        ("translation_language", settings.translation_language.clone()),
        (
            "translation_mode",
            translation_mode_name(settings.translation_mode).to_string(),
        ),
        (
            "translation_concurrency",
            settings.translation_concurrency.to_string(),
        ),
        ("api_key", api_key),
        (
            "request_timeout_secs",
            settings.request_timeout_secs.to_string(),
        ),
        ("catalog_base_url", settings.catalog_base_url.clone()),
        ("translation_endpoint", settings.translation_endpoint.clone()),
    ];
    for (name, value) in rows {
        log::info!("  {:<24} {}", name, value);
    }
    log::info!("");

    if settings.translation_active() {
        log::info!(
            "  Translation: {}",
            "active".if_supports_color(Stdout, |t| t.green()),
        );
    } else if settings.enable_translation {
        log::warn!("Translation is enabled but no API key is set (use {})", API_KEY_ENV);
    } else {
        log::info!(
            "  Translation: {}",
            "off".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Write a default settings file.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        log::warn!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    let written = save_settings(&Settings::default())?;
    log::info!(
        "{} Wrote default settings to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        written.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

fn list_style_name(style: ListStyle) -> &'static str {
    match style {
        ListStyle::Bulleted => "bulleted",
        ListStyle::Inline => "inline",
    }
}

fn translation_mode_name(mode: TranslationMode) -> &'static str {
    match mode {
        TranslationMode::Replace => "replace",
        TranslationMode::Append => "append",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_value() {
        assert_eq!(mask_value(""), "****");
        assert_eq!(mask_value("ab"), "****");
        assert_eq!(mask_value("AIzaSyD"), "AI****");
        assert_eq!(mask_value("日本語キー"), "日本****");
    }
}
