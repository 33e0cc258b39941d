//! # MathBot Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! This module implements `mathbot chat`, an interactive chat session with
//! the assistant on stdin/stdout. It is the presentation layer around the
//! responder and owns everything the responder deliberately does not:
//! - Ignoring blank input lines
//! - The simulated "thinking" pause before each reply
//! - Painting chat bubbles in the current light/dark theme
//! - Session commands (`/clear`, `/theme`, `/help`, `/quit`)
//!
//! ## Architecture
//!
//! `handle_chat` resolves configuration and then drives a `ChatSession`
//! line by line from an async stdin reader. `ChatSession` writes to any
//! `io::Write`, which keeps the session logic testable without a terminal.
//!
//! The session ends at end of input, on `/quit` or `/exit`, or after the
//! assistant has said goodbye.
//!
//! ## Examples
//!
//! ```bash
//! mathbot chat
//! mathbot chat --theme light --delay-ms 0
//! printf 'hi\n2 + 2\nbye\n' | mathbot chat --plain --delay-ms 0
//! ```
//!
use crate::common::ui::{self, theme::Theme};
use crate::core::config::{self, MAX_THINKING_DELAY_MS};
use crate::core::error::{MathBotError, Result};
use crate::responder::{Responder, Variant};
use anyhow::Context;
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const HELP_TEXT: &str = "Commands:\n  \
/clear  clear the chat\n  \
/theme  switch between light and dark mode\n  \
/help   show this help\n  \
/quit   leave the chat (also /exit)";

/// # Chat Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Rule table to use instead of the configured one.
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Initial colour theme instead of the configured one.
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Simulated thinking delay before each reply, in milliseconds.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Disable colours.
    #[arg(long)]
    pub plain: bool,
}

/// What the read loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlashCommand {
    Clear,
    Theme,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    Command(SlashCommand),
    UnknownCommand(&'a str),
    Message(&'a str),
}

/// Splits a raw line into a message or a session command. Only `/` followed
/// by letters is a command, so `/2` is still sent as a message.
fn classify(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Blank;
    }
    match trimmed.strip_prefix('/') {
        Some(word) if !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()) => {
            match word.to_ascii_lowercase().as_str() {
                "clear" => Input::Command(SlashCommand::Clear),
                "theme" => Input::Command(SlashCommand::Theme),
                "help" => Input::Command(SlashCommand::Help),
                "quit" | "exit" => Input::Command(SlashCommand::Quit),
                _ => Input::UnknownCommand(trimmed),
            }
        }
        _ => Input::Message(trimmed),
    }
}

/// One interactive conversation.
pub struct ChatSession {
    responder: Responder,
    speaker: String,
    theme: Theme,
    thinking_delay: Duration,
    echo_input: bool,
}

impl ChatSession {
    pub fn new(
        responder: Responder,
        speaker: String,
        theme: Theme,
        thinking_delay: Duration,
        echo_input: bool,
    ) -> Self {
        Self {
            responder,
            speaker,
            theme,
            thinking_delay,
            echo_input,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Prints the greeting banner.
    pub fn welcome(&self, out: &mut impl Write) -> Result<()> {
        writeln!(
            out,
            "{}",
            self.theme.hint(&format!(
                "Chat with {}. Type your message here... (/help for commands)",
                self.speaker
            ))
        )?;
        Ok(())
    }

    /// Handles one line of user input.
    pub async fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        match classify(line) {
            Input::Blank => Ok(Flow::Continue),
            Input::Command(command) => self.run_command(command, out),
            Input::UnknownCommand(word) => {
                writeln!(
                    out,
                    "{}",
                    self.theme
                        .hint(&format!("Unknown command '{}'. Type /help for commands.", word))
                )?;
                Ok(Flow::Continue)
            }
            Input::Message(text) => self.reply_to(text, out).await,
        }
    }

    fn run_command(&mut self, command: SlashCommand, out: &mut impl Write) -> Result<Flow> {
        debug!("Chat command: {:?}", command);
        match command {
            SlashCommand::Clear => write!(out, "{}", ui::CLEAR_SCREEN)?,
            SlashCommand::Theme => {
                self.theme = self.theme.toggled();
                writeln!(out, "{}", self.theme.hint(&format!("Switched to {} mode.", self.theme)))?;
            }
            SlashCommand::Help => writeln!(out, "{}", self.theme.hint(HELP_TEXT))?,
            SlashCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn reply_to(&mut self, text: &str, out: &mut impl Write) -> Result<Flow> {
        if self.echo_input {
            writeln!(out, "{}", self.theme.outgoing(text))?;
        }
        if !self.thinking_delay.is_zero() {
            writeln!(out, "{}", self.theme.hint(&format!("{} is thinking...", self.speaker)))?;
            out.flush()?;
            tokio::time::sleep(self.thinking_delay).await;
        }

        let reply = self.responder.resolve(text);
        for line in self.theme.incoming(&self.speaker, &reply.text) {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;

        if reply.rule == "farewell" {
            Ok(Flow::Quit)
        } else {
            Ok(Flow::Continue)
        }
    }
}

/// # Handle Chat Command (`handle_chat`)
///
/// Resolves configuration and runs the session until it ends.
///
/// ## Arguments
///
/// * `args`: The parsed `ChatArgs`; each option overrides its configured value.
/// * `config_path`: Optional explicit configuration file from `--config`.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` when the session ends normally.
/// * `Err`: If configuration is invalid or the terminal cannot be read or written.
pub async fn handle_chat(args: ChatArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);

    let cfg = config::load_config(config_path).context("Failed to load MathBot configuration")?;
    let variant = args.variant.unwrap_or(cfg.assistant.variant);
    let theme = args.theme.unwrap_or(cfg.chat.theme);
    let delay_ms = args.delay_ms.unwrap_or(cfg.chat.thinking_delay_ms);
    if delay_ms > MAX_THINKING_DELAY_MS {
        return Err(MathBotError::Config(format!(
            "--delay-ms is {} but must be at most {}.",
            delay_ms, MAX_THINKING_DELAY_MS
        ))
        .into());
    }

    ui::configure_colors(args.plain);
    let echo_input = !std::io::stdin().is_terminal();
    let mut session = ChatSession::new(
        Responder::new(variant, cfg.persona()),
        cfg.assistant.name.clone(),
        theme,
        Duration::from_millis(delay_ms),
        echo_input,
    );

    let mut stdout = std::io::stdout();
    session.welcome(&mut stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if !echo_input {
            write!(stdout, "{}", session.theme().prompt())?;
            stdout.flush().map_err(MathBotError::from)?;
        }
        let Some(line) = lines
            .next_line()
            .await
            .map_err(MathBotError::from)
            .context("Failed to read from stdin")?
        else {
            debug!("End of input; leaving chat");
            break;
        };
        if session.handle_line(&line, &mut stdout).await? == Flow::Quit {
            break;
        }
    }

    info!("Chat session ended");
    Ok(())
}
