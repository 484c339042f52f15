//! Value types exchanged with the client facade
//!
//! Conversation messages go in, `Response` values come out. Neither type
//! carries any connection state.

use crate::error::{ClientError, ErrorKind};

/// Author of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Message written by the user
    User,
    /// Message produced by the model
    Assistant,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a chronologically ordered conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author of the message
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Create a user message
    ///
    /// # Examples
    ///
    /// ```
    /// use ollama_assist::client::{Message, Role};
    ///
    /// let msg = Message::user("Hello");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Outcome of a chat-style operation
///
/// Exactly one of `content` and `error` is non-empty: a successful
/// response always carries content, a failed one always carries an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Whether the server produced a usable reply
    pub success: bool,
    /// Reply text, empty on failure
    pub content: String,
    /// Failure text, empty on success
    pub error: String,
    /// HTTP status of the exchange, when one took place
    pub status_code: Option<u16>,
    /// Failure site, set only when `success` is false
    pub error_kind: Option<ErrorKind>,
}

impl Response {
    /// Build a successful response
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Build a failed response from a client error
    ///
    /// # Examples
    ///
    /// ```
    /// use ollama_assist::client::Response;
    /// use ollama_assist::error::{ClientError, ErrorKind};
    ///
    /// let response = Response::failure(&ClientError::ParseFailed);
    /// assert!(!response.success);
    /// assert!(response.content.is_empty());
    /// assert_eq!(response.error, "Failed to parse response");
    /// assert_eq!(response.error_kind, Some(ErrorKind::ParseFailed));
    /// ```
    pub fn failure(error: &ClientError) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: error.to_string(),
            status_code: None,
            error_kind: Some(error.kind()),
        }
    }

    /// Attach the HTTP status code of the exchange
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }
}

impl From<Result<String, ClientError>> for Response {
    fn from(result: Result<String, ClientError>) -> Self {
        match result {
            Ok(content) => Response::ok(content),
            Err(error) => Response::failure(&error),
        }
    }
}
