//! Command-line interface definition for Ollama Assist
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for connection checks, model management, chat
//! and the code-assist tasks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ollama Assist - code assistance from a local Ollama server
#[derive(Parser, Debug, Clone)]
#[command(name = "ollama-assist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Legacy key=value settings file to read the client configuration from
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Override the Ollama host (e.g. http://localhost:11434)
    #[arg(long)]
    pub host: Option<String>,

    /// Override the model used for chat
    #[arg(short, long)]
    pub model: Option<String>,

    /// Enable the client regardless of configuration
    #[arg(long)]
    pub enable: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Ollama Assist
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check that the Ollama server is reachable
    Test,

    /// List models installed on the server
    Models {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pull a model onto the server
    Pull {
        /// Model name, e.g. llama2
        name: String,
    },

    /// Send a single message and print the reply
    Chat {
        /// Message text
        message: String,
    },

    /// Review a source file
    Analyze {
        /// Source file to review
        file: PathBuf,

        /// Language tag passed to the model
        #[arg(short, long, default_value = "cpp")]
        language: String,
    },

    /// Suggest improvements for a source file
    Suggest {
        /// Source file to improve
        file: PathBuf,

        /// Language tag passed to the model
        #[arg(short, long, default_value = "cpp")]
        language: String,
    },

    /// Generate documentation for a source file
    Document {
        /// Source file to document
        file: PathBuf,

        /// Language tag passed to the model
        #[arg(short, long, default_value = "cpp")]
        language: String,
    },

    /// Explain a compiler or runtime error
    Explain {
        /// Error message text
        error: String,

        /// Source file related to the error
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Append the effective client configuration to a settings file
    SaveSettings {
        /// Settings file to append to
        path: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
