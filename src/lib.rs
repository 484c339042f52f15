//! Ollama Assist - blocking client for a local Ollama server
//!
//! This library talks to a locally hosted Ollama server: it checks the
//! connection, lists and pulls models, sends conversations, and wraps
//! source code in code-assist prompts (analyze, suggest, explain, document).
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `client`: Connection management, wire codec and the `OllamaClient` facade
//! - `prompts`: Code-assist prompt generation
//! - `config`: Configuration loading and validation
//! - `settings`: Legacy key=value settings persistence
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and its handlers
//!
//! # Example
//!
//! ```no_run
//! use ollama_assist::{ClientConfig, OllamaClient};
//!
//! let mut client = OllamaClient::new(ClientConfig::enabled("http://localhost:11434", "llama2"));
//! if client.test_connection() {
//!     for model in client.list_models() {
//!         println!("{}", model);
//!     }
//!     let review = client.analyze_code("int main() { return 0; }", "cpp");
//!     println!("{}", review.content);
//! } else {
//!     eprintln!("{}", client.last_error());
//! }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod settings;

// Re-export commonly used types
pub use client::{ClientState, Message, OllamaClient, Response, Role};
pub use config::{ClientConfig, Config};
pub use error::{AssistError, ClientError, ErrorKind, Result};
