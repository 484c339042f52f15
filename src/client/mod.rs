//! Ollama client facade
//!
//! `OllamaClient` sequences connection, encoding, the HTTP exchange and
//! decoding for each public operation. Every operation opens its own
//! connection and releases it before returning; nothing is reused across
//! calls. Failures never cross this boundary as errors: they come back as
//! `false`, an empty list, or a failed [`Response`], and the message is
//! kept in [`OllamaClient::last_error`].

pub mod codec;
pub mod connection;
pub mod types;

pub use codec::{
    decode_chat_response, decode_model_names, encode_chat_request, encode_pull_request,
    MarkerScanDecoder, ResponseDecoder, StructuredDecoder,
};
pub use connection::{Connection, Endpoint, WireResponse, DEFAULT_HTTP_PORT};
pub use types::{Message, Response, Role};

use crate::config::ClientConfig;
use crate::error::{ClientError, ErrorKind};
use crate::prompts;

const TAGS_ENDPOINT: &str = "/api/tags";
const CHAT_ENDPOINT: &str = "/api/chat";
const PULL_ENDPOINT: &str = "/api/pull";

/// Lifecycle of a client as seen by its last connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientState {
    /// No connection has been attempted yet
    #[default]
    Uninitialized,
    /// The last connection attempt succeeded
    Initialized,
    /// The last connection attempt failed
    Failed,
}

/// Blocking client for a local Ollama server
///
/// # Examples
///
/// ```no_run
/// use ollama_assist::client::OllamaClient;
/// use ollama_assist::config::ClientConfig;
///
/// let mut client = OllamaClient::new(ClientConfig::enabled("http://localhost:11434", "llama2"));
/// let response = client.chat_text("Hello!");
/// if response.success {
///     println!("{}", response.content);
/// } else {
///     eprintln!("{}", response.error);
/// }
/// ```
pub struct OllamaClient {
    config: ClientConfig,
    connection: Option<Connection>,
    decoder: Box<dyn ResponseDecoder>,
    state: ClientState,
    last_error: String,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("config", &self.config)
            .field("connected", &self.connection.is_some())
            .field("decoder", &self.decoder.name())
            .field("state", &self.state)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl OllamaClient {
    /// Create a client for the given configuration
    ///
    /// No network work happens until an operation is called.
    pub fn new(config: ClientConfig) -> Self {
        tracing::info!(
            "Initialized Ollama client: host={}, model={}, enabled={}",
            config.host,
            config.model,
            config.enabled
        );

        Self {
            config,
            connection: None,
            decoder: Box::new(MarkerScanDecoder),
            state: ClientState::Uninitialized,
            last_error: String::new(),
        }
    }

    /// Replace the response decoder
    ///
    /// # Examples
    ///
    /// ```
    /// use ollama_assist::client::{OllamaClient, StructuredDecoder};
    /// use ollama_assist::config::ClientConfig;
    ///
    /// let client = OllamaClient::new(ClientConfig::default()).with_decoder(StructuredDecoder);
    /// assert_eq!(client.decoder_name(), "structured");
    /// ```
    pub fn with_decoder(mut self, decoder: impl ResponseDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Name of the active response decoder
    pub fn decoder_name(&self) -> &'static str {
        self.decoder.name()
    }

    /// Replace the configuration wholesale
    ///
    /// A connection held by [`initialize`](Self::initialize) belongs to the
    /// old configuration and is released.
    pub fn set_config(&mut self, config: ClientConfig) {
        self.cleanup();
        self.config = config;
    }

    /// Current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether the configuration allows network access
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Message of the most recent failure, empty if none occurred
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Outcome of the most recent connection attempt
    pub fn state(&self) -> ClientState {
        self.state
    }

    /// Open and hold a connection until [`cleanup`](Self::cleanup)
    ///
    /// Any previously held connection is released first. Operations do not
    /// use the held connection; this only verifies the configuration.
    pub fn initialize(&mut self) -> bool {
        self.cleanup();
        match self.open() {
            Ok(connection) => {
                self.connection = Some(connection);
                true
            }
            Err(error) => {
                self.record_failure(&error);
                false
            }
        }
    }

    /// Release the held connection, if any
    ///
    /// Safe to call repeatedly or before `initialize`.
    pub fn cleanup(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
    }

    /// Check that the server answers the model listing endpoint
    ///
    /// Any non-empty body counts as success; its shape is not checked.
    pub fn test_connection(&mut self) -> bool {
        match self.exchange(TAGS_ENDPOINT, None, "Connection test failed") {
            Ok(_) => {
                tracing::info!("Connected to Ollama at {}", self.config.host);
                true
            }
            Err(error) => {
                self.record_failure(&error);
                false
            }
        }
    }

    /// List the models installed on the server, in server order
    ///
    /// Returns an empty list on any failure, with `last_error` set.
    pub fn list_models(&mut self) -> Vec<String> {
        match self.exchange(TAGS_ENDPOINT, None, "Failed to list models") {
            Ok(wire) => {
                let models = self.decoder.decode_model_names(&wire.body);
                tracing::debug!("Fetched {} models from Ollama", models.len());
                models
            }
            Err(error) => {
                self.record_failure(&error);
                Vec::new()
            }
        }
    }

    /// Ask the server to pull a model
    ///
    /// Any non-empty body counts as success; the progress records it
    /// contains are not inspected.
    pub fn pull_model(&mut self, model_name: &str) -> bool {
        let body = encode_pull_request(model_name);
        let stage = format!("Failed to pull model: {}", model_name);
        match self.exchange(PULL_ENDPOINT, Some(&body), &stage) {
            Ok(_) => {
                tracing::info!("Pulled model {}", model_name);
                true
            }
            Err(error) => {
                self.record_failure(&error);
                false
            }
        }
    }

    /// Send a conversation and return the model's reply
    pub fn chat(&mut self, messages: &[Message]) -> Response {
        let body = encode_chat_request(&self.config.model, messages);
        let wire = match self.exchange(CHAT_ENDPOINT, Some(&body), "Failed to send chat request") {
            Ok(wire) => wire,
            Err(error) => {
                self.record_failure(&error);
                return Response::failure(&error);
            }
        };

        match self.decoder.decode_chat(&wire.body) {
            Ok(content) => Response::ok(content).with_status(wire.status),
            Err(error) => {
                self.record_failure(&error);
                Response::failure(&error).with_status(wire.status)
            }
        }
    }

    /// Send a single user message
    pub fn chat_text(&mut self, message: &str) -> Response {
        self.chat(&[Message::user(message)])
    }

    /// Ask for a review of `code`
    pub fn analyze_code(&mut self, code: &str, language: &str) -> Response {
        self.chat_text(&prompts::analyze_code_prompt(code, language))
    }

    /// Ask for improvement suggestions for `code`
    pub fn suggest_improvements(&mut self, code: &str, language: &str) -> Response {
        self.chat_text(&prompts::suggest_improvements_prompt(code, language))
    }

    /// Ask for an explanation of an error, optionally with related code
    pub fn explain_error(&mut self, error_message: &str, code: &str) -> Response {
        self.chat_text(&prompts::explain_error_prompt(error_message, code))
    }

    /// Ask for documentation comments for `code`
    pub fn generate_documentation(&mut self, code: &str, language: &str) -> Response {
        self.chat_text(&prompts::generate_documentation_prompt(code, language))
    }

    fn open(&mut self) -> Result<Connection, ClientError> {
        match Connection::open(&self.config) {
            Ok(connection) => {
                self.state = ClientState::Initialized;
                Ok(connection)
            }
            Err(error) => {
                self.state = ClientState::Failed;
                Err(error)
            }
        }
    }

    /// Run one request on a fresh connection; POST when a body is given
    ///
    /// The connection is dropped, and so released, when this returns.
    fn exchange(
        &mut self,
        path: &str,
        body: Option<&str>,
        stage: &str,
    ) -> Result<WireResponse, ClientError> {
        let connection = self.open()?;
        let wire = match body {
            Some(body) => connection.post_json(path, body, stage)?,
            None => connection.get(path, stage)?,
        };

        if !(200..300).contains(&wire.status) {
            tracing::warn!("Ollama returned status {} for {}", wire.status, path);
        }
        if wire.body.is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        Ok(wire)
    }

    fn record_failure(&mut self, error: &ClientError) {
        if error.kind() != ErrorKind::Disabled {
            tracing::warn!("Ollama request failed: {}", error);
        }
        self.last_error = error.to_string();
    }
}

impl Drop for OllamaClient {
    fn drop(&mut self) {
        self.cleanup();
    }
}
