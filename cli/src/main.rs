//! # MathBot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the MathBot CLI, a
//! terminal "mathematical assistant" that answers free-text questions by
//! matching them against an ordered table of keyword rules. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - `responder`: the rule table, extraction and arithmetic evaluation
//! - `commands`: `ask`, `chat` and `rules`
//! - `core`: configuration and error types
//! - `common`: terminal UI helpers
//!
//! ## Examples
//!
//! ```bash
//! # One question
//! mathbot ask square root of 16
//!
//! # Interactive session with debug logging of rule selection
//! mathbot -vv chat
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (ask, chat, rules)
mod common; // Terminal UI helpers
mod core; // Configuration and errors
mod responder; // Rule table and arithmetic evaluation

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "mathbot",
    about = "MathBot: a keyword-driven mathematical chat assistant",
    long_about = "Ask arithmetic questions in plain words ('add 5 and 3', 'square root of 16')\n\
                  or as expressions ('(2 + 3) * 4'), one-shot or in an interactive chat.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Read configuration from this file instead of the user/project files.
    #[arg(long, global = true, env = "MATHBOT_CONFIG")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    Rules(commands::rules::RulesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let config_path = cli.config.as_deref();
    let command_result = match cli.command {
        Commands::Ask(args) => commands::ask::handle_ask(args, config_path).await,
        Commands::Chat(args) => commands::chat::handle_chat(args, config_path).await,
        Commands::Rules(args) => commands::rules::handle_rules(args, config_path).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mathbot", "rules", "-vv", "--config", "bot.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("bot.toml")));
        assert!(matches!(cli.command, Commands::Rules(_)));
    }
}
