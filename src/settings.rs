//! Legacy key=value settings persistence
//!
//! Older installs keep the client configuration as `key=value` lines
//! appended to a shared settings file. Only the `ollama*` keys are read;
//! every other line belongs to someone else and is skipped.

use crate::config::ClientConfig;
use crate::error::{AssistError, Result};
use std::io::Write;
use std::path::Path;

const KEY_ENABLED: &str = "ollamaEnabled";
const KEY_HOST: &str = "ollamaHost";
const KEY_MODEL: &str = "ollamaModel";
const KEY_TIMEOUT: &str = "ollamaTimeout";

/// Parse settings text into a client configuration
///
/// Starts from `ClientConfig::default()` and applies each recognised key.
/// Later occurrences of a key win, so appended blocks override earlier ones.
///
/// # Examples
///
/// ```
/// use ollama_assist::settings::parse_settings;
///
/// let config = parse_settings("ollamaEnabled=1\nollamaModel=mistral\n");
/// assert!(config.enabled);
/// assert_eq!(config.model, "mistral");
/// ```
pub fn parse_settings(text: &str) -> ClientConfig {
    let mut config = ClientConfig::default();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        match key {
            KEY_ENABLED => config.enabled = value == "1",
            KEY_HOST => config.host = value.to_string(),
            KEY_MODEL => config.model = value.to_string(),
            KEY_TIMEOUT => match value.trim().parse() {
                Ok(timeout) => config.timeout_ms = timeout,
                Err(_) => tracing::warn!("Invalid {} value: {}", KEY_TIMEOUT, value),
            },
            _ => {}
        }
    }

    config
}

/// Load a client configuration from a settings file
///
/// A missing file yields the default configuration.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read
pub fn load_settings(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        tracing::warn!("Settings file not found at {}, using defaults", path.display());
        return Ok(ClientConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|e| {
        AssistError::Settings(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(parse_settings(&text))
}

/// Render the settings block appended by [`save_settings`]
pub fn render_settings(config: &ClientConfig) -> String {
    format!(
        "\n# Ollama Configuration\n{}={}\n{}={}\n{}={}\n{}={}\n",
        KEY_ENABLED,
        if config.enabled { "1" } else { "0" },
        KEY_HOST,
        config.host,
        KEY_MODEL,
        config.model,
        KEY_TIMEOUT,
        config.timeout_ms
    )
}

/// Append the client configuration to a settings file
///
/// The file is created when missing. Existing content is never rewritten.
///
/// # Errors
///
/// Returns error if the file cannot be opened or written
pub fn save_settings(path: &Path, config: &ClientConfig) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(AssistError::from)?;
    file.write_all(render_settings(config).as_bytes())
        .map_err(AssistError::from)?;

    tracing::debug!("Appended Ollama settings to {}", path.display());
    Ok(())
}
