//! Model management commands
//!
//! Listing and pulling models on the configured Ollama server.

use crate::client::OllamaClient;
use crate::config::Config;
use crate::error::{AssistError, Result};
use colored::Colorize;
use prettytable::{cell, row, Table};

/// List the models installed on the server
///
/// # Arguments
///
/// * `config` - Configuration containing the client settings
/// * `json` - Print a JSON array instead of a table
///
/// # Errors
///
/// Returns error if the listing failed; an empty but successful listing
/// is not an error
pub fn list_models(config: &Config, json: bool) -> Result<()> {
    let mut client = OllamaClient::new(config.ollama.clone());
    let models = client.list_models();

    if models.is_empty() && !client.last_error().is_empty() {
        return Err(AssistError::Request(client.last_error().to_string()).into());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    if models.is_empty() {
        println!("No models available on {}", config.ollama.host);
        println!("(you may need to pull a model)");
        return Ok(());
    }

    output_models_table(&models, &config.ollama.model, &config.ollama.host);
    Ok(())
}

/// Pull a model onto the server
///
/// # Errors
///
/// Returns error if the server did not accept the request
pub fn pull_model(config: &Config, name: &str) -> Result<()> {
    let mut client = OllamaClient::new(config.ollama.clone());
    tracing::info!("Pulling model {} from {}", name, config.ollama.host);

    if !client.pull_model(name) {
        return Err(AssistError::Request(client.last_error().to_string()).into());
    }

    println!("{}", format!("Pulled model {}", name).green());
    Ok(())
}

fn output_models_table(models: &[String], active_model: &str, host: &str) {
    let mut table = Table::new();
    table.add_row(row!["Model Name", "Active"]);

    for model in models {
        let active = if model == active_model { "*" } else { "" };
        table.add_row(row![model, active]);
    }

    println!("\nAvailable models on {}:\n", host);
    table.printstd();
    println!();
}
