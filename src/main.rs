//! Ollama Assist - code assistance from a local Ollama server
//!
#![doc = "Ollama Assist CLI"]
#![doc = "Main entry point for the Ollama Assist command-line driver."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ollama_assist::cli::{Cli, Commands};
use ollama_assist::commands;
use ollama_assist::config::Config;
use ollama_assist::prompts::CodeTask;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Test => commands::test_connection(&config),
        Commands::Models { json } => commands::models::list_models(&config, json),
        Commands::Pull { name } => commands::models::pull_model(&config, &name),
        Commands::Chat { message } => commands::chat(&config, &message),
        Commands::Analyze { file, language } => {
            commands::run_code_task(&config, CodeTask::Analyze, &file, &language)
        }
        Commands::Suggest { file, language } => {
            commands::run_code_task(&config, CodeTask::Suggest, &file, &language)
        }
        Commands::Document { file, language } => {
            commands::run_code_task(&config, CodeTask::Document, &file, &language)
        }
        Commands::Explain { error, file } => {
            commands::explain_error(&config, &error, file.as_deref())
        }
        Commands::SaveSettings { path } => commands::save_settings(&config, &path),
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "ollama_assist=debug"
    } else {
        "ollama_assist=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
