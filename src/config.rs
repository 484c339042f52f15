//! Configuration management for Ollama Assist
//!
//! This module handles loading the client configuration from a YAML file,
//! an optional legacy key=value settings file, environment variables and
//! CLI overrides, in that order.

use crate::error::{AssistError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default Ollama server host
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default model used for chat requests
pub const DEFAULT_MODEL: &str = "llama2";

/// Default request deadline in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Ollama client configuration
    #[serde(default)]
    pub ollama: ClientConfig,
}

/// Connection settings for one Ollama client
///
/// The value is immutable for the duration of an operation; the facade
/// only ever replaces it wholesale through `OllamaClient::set_config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Whether the client may touch the network at all
    #[serde(default)]
    pub enabled: bool,

    /// Ollama server host, with optional scheme and port
    #[serde(default = "default_host")]
    pub host: String,

    /// Model to use for chat requests
    #[serde(default = "default_model")]
    pub model: String,

    /// Request deadline in milliseconds; 0 disables the deadline
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Create an enabled configuration for the given host and model
    ///
    /// # Examples
    ///
    /// ```
    /// use ollama_assist::config::ClientConfig;
    ///
    /// let config = ClientConfig::enabled("http://localhost:11434", "mistral");
    /// assert!(config.enabled);
    /// assert_eq!(config.model, "mistral");
    /// ```
    pub fn enabled(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            host: host.into(),
            model: model.into(),
            ..Default::default()
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        if let Some(settings_path) = &cli.settings {
            tracing::debug!("Loading legacy settings from {}", settings_path.display());
            config.ollama = crate::settings::load_settings(settings_path)?;
        }

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AssistError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| AssistError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(enabled) = std::env::var("OLLAMA_ASSIST_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.ollama.enabled = true,
                "0" | "false" | "no" => self.ollama.enabled = false,
                _ => tracing::warn!("Invalid OLLAMA_ASSIST_ENABLED: {}", enabled),
            }
        }

        if let Ok(host) = std::env::var("OLLAMA_ASSIST_HOST") {
            tracing::debug!(host = %host, "Env override: OLLAMA_ASSIST_HOST");
            self.ollama.host = host;
        }

        if let Ok(model) = std::env::var("OLLAMA_ASSIST_MODEL") {
            tracing::debug!(model = %model, "Env override: OLLAMA_ASSIST_MODEL");
            self.ollama.model = model;
        }

        if let Ok(timeout) = std::env::var("OLLAMA_ASSIST_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse() {
                self.ollama.timeout_ms = value;
            } else {
                tracing::warn!("Invalid OLLAMA_ASSIST_TIMEOUT_MS: {}", timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
        if let Some(host) = &cli.host {
            self.ollama.host = host.clone();
        }
        if let Some(model) = &cli.model {
            self.ollama.model = model.clone();
        }
        if cli.enable {
            self.ollama.enabled = true;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the host or model is empty
    pub fn validate(&self) -> Result<()> {
        if self.ollama.host.trim().is_empty() {
            return Err(AssistError::Config("ollama.host cannot be empty".to_string()).into());
        }

        if self.ollama.model.trim().is_empty() {
            return Err(AssistError::Config("ollama.model cannot be empty".to_string()).into());
        }

        Ok(())
    }
}
