//! Error types for Ollama Assist
//!
//! This module defines the error types used throughout the crate, using
//! `thiserror` for ergonomic error handling. `ClientError` covers the
//! failure sites of a single client operation; `AssistError` covers the
//! configuration, settings and CLI layers around it.

use thiserror::Error;

/// Failure raised at one stage of a client operation
///
/// The `Display` text of each variant is exactly what the facade reports
/// through `Response::error` and `OllamaClient::last_error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The configuration has `enabled = false`
    #[error("Ollama client is disabled")]
    Disabled,

    /// The HTTP session could not be created
    #[error("Failed to initialize HTTP session: {0}")]
    OpenFailed(String),

    /// The host could not be turned into a connection target
    #[error("Failed to connect to Ollama server: {0}")]
    ConnectFailed(String),

    /// The request could not be transmitted or its body could not be read
    #[error("{stage}: {detail}")]
    SendFailed {
        /// Operation-specific description, e.g. "Failed to send chat request"
        stage: String,
        /// Underlying transport diagnostic
        detail: String,
    },

    /// The server answered with an empty body
    #[error("Empty response from server")]
    EmptyResponse,

    /// The body did not match the expected response shape
    #[error("Failed to parse response")]
    ParseFailed,
}

/// Discriminant of a [`ClientError`], without its diagnostic payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ClientError::Disabled`]
    Disabled,
    /// See [`ClientError::OpenFailed`]
    OpenFailed,
    /// See [`ClientError::ConnectFailed`]
    ConnectFailed,
    /// See [`ClientError::SendFailed`]
    SendFailed,
    /// See [`ClientError::EmptyResponse`]
    EmptyResponse,
    /// See [`ClientError::ParseFailed`]
    ParseFailed,
}

impl ClientError {
    /// Build a `SendFailed` error for the given stage
    pub fn send_failed(stage: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::SendFailed {
            stage: stage.into(),
            detail: detail.to_string(),
        }
    }

    /// Returns the kind of this error
    ///
    /// # Examples
    ///
    /// ```
    /// use ollama_assist::error::{ClientError, ErrorKind};
    ///
    /// assert_eq!(ClientError::ParseFailed.kind(), ErrorKind::ParseFailed);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Disabled => ErrorKind::Disabled,
            Self::OpenFailed(_) => ErrorKind::OpenFailed,
            Self::ConnectFailed(_) => ErrorKind::ConnectFailed,
            Self::SendFailed { .. } => ErrorKind::SendFailed,
            Self::EmptyResponse => ErrorKind::EmptyResponse,
            Self::ParseFailed => ErrorKind::ParseFailed,
        }
    }
}

/// Errors raised by the configuration, settings and CLI layers
#[derive(Error, Debug)]
pub enum AssistError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted key=value settings errors
    #[error("Settings error: {0}")]
    Settings(String),

    /// A client operation reported failure; carries its error text
    #[error("{0}")]
    Request(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Ollama Assist operations outside the client facade
///
/// Uses `anyhow::Error` so the CLI can attach context while propagating.
pub type Result<T> = anyhow::Result<T>;
