//! Request encoding and response decoding for the Ollama wire protocol
//!
//! Requests are built by hand. Responses are decoded by scanning for
//! literal markers in the known response shapes rather than by parsing
//! JSON; the `ResponseDecoder` trait keeps that choice swappable, and
//! `StructuredDecoder` offers a serde_json based alternative.
//!
//! Known limitations of the marker scanner, kept on purpose:
//!
//! - Only `"` is escaped when encoding. Backslashes, control characters and
//!   non-ASCII text are written as-is.
//! - The chat decoder treats a `"` preceded by a single `\` as escaped, so
//!   content ending in an even run of backslashes is cut at the wrong quote.
//! - Decoded content is returned verbatim, escape sequences included.
//! - Model names are read up to the next `"` with no escape handling.

use crate::client::types::{Message, Response};
use crate::error::ClientError;
use serde::Deserialize;

const MESSAGE_MARKER: &str = "\"message\":";
const CONTENT_MARKER: &str = "\"content\":\"";
const NAME_MARKER: &str = "\"name\":";

/// Escape double quotes, and only double quotes
fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Encode a non-streaming chat request
///
/// Messages are written in the order given.
///
/// # Examples
///
/// ```
/// use ollama_assist::client::{encode_chat_request, Message};
///
/// let body = encode_chat_request("llama2", &[Message::user("say \"hi\"")]);
/// assert_eq!(
///     body,
///     r#"{"model":"llama2","messages":[{"role":"user","content":"say \"hi\""}],"stream":false}"#
/// );
/// ```
pub fn encode_chat_request(model: &str, messages: &[Message]) -> String {
    let mut json = format!("{{\"model\":\"{}\",\"messages\":[", escape_quotes(model));

    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            json.push(',');
        }
        json.push_str("{\"role\":\"");
        json.push_str(message.role.as_str());
        json.push_str("\",\"content\":\"");
        json.push_str(&escape_quotes(&message.content));
        json.push_str("\"}");
    }

    json.push_str("],\"stream\":false}");
    json
}

/// Encode a model pull request
pub fn encode_pull_request(model_name: &str) -> String {
    format!("{{\"name\":\"{}\"}}", escape_quotes(model_name))
}

/// Locate the reply content in a chat response body
///
/// Returns the raw text between `"content":"` (searched after
/// `"message":`) and the first quote not preceded by a backslash.
pub fn scan_chat_content(body: &str) -> Option<&str> {
    let message_pos = body.find(MESSAGE_MARKER)?;
    let start = message_pos + body[message_pos..].find(CONTENT_MARKER)? + CONTENT_MARKER.len();

    let bytes = body.as_bytes();
    let mut end = start + body[start..].find('"')?;
    while bytes[end - 1] == b'\\' {
        end = end + 1 + body[end + 1..].find('"')?;
    }

    Some(&body[start..end])
}

/// Collect every quoted value that follows a `"name":` marker
pub fn scan_model_names(body: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut pos = 0;

    while let Some(found) = body[pos..].find(NAME_MARKER) {
        pos += found + NAME_MARKER.len();
        let Some(start) = body[pos..].find('"').map(|i| pos + i + 1) else {
            break;
        };
        let Some(end) = body[start..].find('"').map(|i| start + i) else {
            break;
        };
        names.push(body[start..end].to_string());
        pos = end + 1;
    }

    names
}

/// Decode a chat response body with the marker scanner
///
/// # Examples
///
/// ```
/// use ollama_assist::client::decode_chat_response;
///
/// let response = decode_chat_response(r#"{"message":{"content":"hello"}}"#);
/// assert!(response.success);
/// assert_eq!(response.content, "hello");
///
/// let response = decode_chat_response(r#"{"error":"model not found"}"#);
/// assert!(!response.success);
/// assert_eq!(response.error, "Failed to parse response");
/// ```
pub fn decode_chat_response(body: &str) -> Response {
    MarkerScanDecoder.decode_chat(body).into()
}

/// Decode a model listing body with the marker scanner
///
/// Returns an empty list when the body names no models.
pub fn decode_model_names(body: &str) -> Vec<String> {
    MarkerScanDecoder.decode_model_names(body)
}

/// Strategy for turning response bodies into values
pub trait ResponseDecoder: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Extract the reply content from a `/api/chat` body
    ///
    /// # Errors
    ///
    /// Returns `ParseFailed` when the body does not have the expected shape
    /// and `EmptyResponse` when the reply content is empty
    fn decode_chat(&self, body: &str) -> Result<String, ClientError>;

    /// Extract the model names from an `/api/tags` body, in body order
    fn decode_model_names(&self, body: &str) -> Vec<String>;
}

/// Marker scanning decoder for the server's known response shapes
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerScanDecoder;

impl ResponseDecoder for MarkerScanDecoder {
    fn name(&self) -> &'static str {
        "marker-scan"
    }

    fn decode_chat(&self, body: &str) -> Result<String, ClientError> {
        match scan_chat_content(body) {
            Some("") => Err(ClientError::EmptyResponse),
            Some(content) => Ok(content.to_string()),
            None => Err(ClientError::ParseFailed),
        }
    }

    fn decode_model_names(&self, body: &str) -> Vec<String> {
        scan_model_names(body)
    }
}

/// Chat response envelope from /api/chat
#[derive(Debug, Deserialize)]
struct ChatEnvelope {
    message: Option<ChatReply>,
}

/// Reply message inside a chat response
#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: String,
}

/// Response from /api/tags
#[derive(Debug, Deserialize)]
struct TagsEnvelope {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Full JSON decoder
///
/// Accepts any valid JSON layout and unescapes string content, unlike
/// [`MarkerScanDecoder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredDecoder;

impl ResponseDecoder for StructuredDecoder {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn decode_chat(&self, body: &str) -> Result<String, ClientError> {
        let envelope: ChatEnvelope = serde_json::from_str(body).map_err(|e| {
            tracing::debug!("Chat response is not valid JSON: {}", e);
            ClientError::ParseFailed
        })?;

        match envelope.message {
            Some(reply) if reply.content.is_empty() => Err(ClientError::EmptyResponse),
            Some(reply) => Ok(reply.content),
            None => Err(ClientError::ParseFailed),
        }
    }

    fn decode_model_names(&self, body: &str) -> Vec<String> {
        match serde_json::from_str::<TagsEnvelope>(body) {
            Ok(tags) => tags.models.into_iter().map(|tag| tag.name).collect(),
            Err(e) => {
                tracing::warn!("Failed to parse model listing: {}", e);
                Vec::new()
            }
        }
    }
}
