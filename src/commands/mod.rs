//! Command handlers for the Ollama Assist CLI
//!
//! Each handler builds a fresh `OllamaClient` from the loaded configuration,
//! runs one facade operation and prints the outcome. Client failures are
//! turned into `AssistError::Request` so `main` can report them.

pub mod models;

use crate::client::{OllamaClient, Response};
use crate::config::Config;
use crate::error::{AssistError, Result};
use crate::prompts::CodeTask;

use anyhow::Context;
use colored::Colorize;
use std::path::Path;

/// Check that the configured server answers
///
/// # Errors
///
/// Returns error if the client is disabled or the server is unreachable
pub fn test_connection(config: &Config) -> Result<()> {
    println!("Testing connection to: {}", config.ollama.host);
    println!("Using model: {}", config.ollama.model);

    let mut client = OllamaClient::new(config.ollama.clone());
    if !client.test_connection() {
        return Err(AssistError::Request(client.last_error().to_string()).into());
    }

    println!("{}", "Successfully connected to Ollama".green());
    Ok(())
}

/// Send one message and print the reply
pub fn chat(config: &Config, message: &str) -> Result<()> {
    let mut client = OllamaClient::new(config.ollama.clone());
    print_response(client.chat_text(message))
}

/// Run a code-assist task over a source file
///
/// # Errors
///
/// Returns error if the file cannot be read or the request fails
pub fn run_code_task(config: &Config, task: CodeTask, file: &Path, language: &str) -> Result<()> {
    let code = read_source(file)?;
    tracing::info!(?task, file = %file.display(), language, "Running code task");

    let mut client = OllamaClient::new(config.ollama.clone());
    let response = match task {
        CodeTask::Analyze => client.analyze_code(&code, language),
        CodeTask::Suggest => client.suggest_improvements(&code, language),
        CodeTask::Document => client.generate_documentation(&code, language),
    };
    print_response(response)
}

/// Explain an error message, optionally with the related source file
pub fn explain_error(config: &Config, error: &str, file: Option<&Path>) -> Result<()> {
    let code = match file {
        Some(path) => read_source(path)?,
        None => String::new(),
    };

    let mut client = OllamaClient::new(config.ollama.clone());
    print_response(client.explain_error(error, &code))
}

/// Append the effective client configuration to a settings file
pub fn save_settings(config: &Config, path: &Path) -> Result<()> {
    crate::settings::save_settings(path, &config.ollama)?;
    println!("Saved Ollama settings to {}", path.display());
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_response(response: Response) -> Result<()> {
    if !response.success {
        return Err(AssistError::Request(response.error).into());
    }

    println!("{}", response.content);
    Ok(())
}
