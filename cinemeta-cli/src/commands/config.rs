use std::io::Write;

use cinemeta_scraper::config::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use cinemeta_scraper::{ApiConfig, ConfigSource, mask_secret};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Show current settings and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = cinemeta_scraper::config_path();
    let sources = cinemeta_scraper::config_sources();

    log::info!(
        "{}",
        "IMDb API Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    // load() fails without a key, so fall back per field
    let config = ApiConfig::load().ok();

    let api_key = config.as_ref().map(|c| mask_secret(&c.api_key));
    let base_url = Some(
        config
            .as_ref()
            .map(|c| c.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    );
    let timeout = config.as_ref().map(|c| format!("{}s", c.timeout.as_secs()));

    let fields: &[(&str, &ConfigSource, Option<String>)] = &[
        ("api_key", &sources.api_key, api_key),
        ("base_url", &sources.base_url, base_url),
        ("timeout", &sources.timeout, timeout),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    Ok(())
}

/// Interactively set up the API key.
pub(crate) fn run_config_setup() -> Result<(), CliError> {
    println!(
        "{}",
        "IMDb API Setup".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    let existing = ApiConfig::load().ok();

    let read_line = |prompt: &str, default: Option<&str>, required: bool| -> Result<Option<String>, CliError> {
        loop {
            if let Some(def) = default {
                print!("  {} [{}]: ", prompt, def);
            } else {
                print!("  {}: ", prompt);
            }
            std::io::stdout().flush()?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            let trimmed = input.trim().to_string();

            if trimmed.is_empty() {
                if let Some(def) = default {
                    return Ok(Some(def.to_string()));
                }
                if required {
                    println!(
                        "    {}",
                        "This field is required.".if_supports_color(Stdout, |t| t.yellow()),
                    );
                    continue;
                }
                return Ok(None);
            }
            return Ok(Some(trimmed));
        }
    };

    println!(
        "  {}",
        format!("RapidAPI key for the imdb236 API (or set ${})", API_KEY_ENV)
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    let masked = existing.as_ref().map(|c| mask_secret(&c.api_key));
    let entered = read_line("API key", masked.as_deref(), true)?;
    let api_key = match (entered, &existing, &masked) {
        // Enter on the masked default keeps the stored key
        (Some(v), Some(c), Some(m)) if &v == m => c.api_key.clone(),
        (Some(v), _, _) => v,
        (None, _, _) => return Err(CliError::config("API key is required")),
    };

    println!(
        "  {}",
        format!("Leave the base URL as-is unless you run a mirror (or set ${})", BASE_URL_ENV)
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    let current_url = existing
        .as_ref()
        .map(|c| c.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = read_line("Base URL", Some(&current_url), false)?;

    let mut config = ApiConfig::new(api_key).with_overrides(None, base_url);
    if let Some(c) = &existing {
        config = config.with_timeout(c.timeout);
    }

    let path = cinemeta_scraper::save_to_file(&config)?;
    println!();
    println!(
        "{} Saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match cinemeta_scraper::config_path() {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}
