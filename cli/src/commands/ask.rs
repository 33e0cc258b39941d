//! # MathBot Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! This module implements `mathbot ask`, a one-shot question to the
//! assistant. The words given on the command line are joined into a single
//! message, passed through the responder, and the reply is printed to
//! stdout. It is the scripting-friendly counterpart to `mathbot chat`.
//!
//! ## Examples
//!
//! ```bash
//! mathbot ask what is 2 + 2
//! # The result is: 4
//!
//! mathbot ask --explain add 5 and 3
//! # The sum is: 8
//! # Rule: add (keyword arithmetic)
//!
//! mathbot ask --json --variant baseline factorial of 5
//! ```
//!
use crate::core::config;
use crate::core::error::{MathBotError, Result};
use crate::responder::rules::Category;
use crate::responder::{Reply, Responder, Variant};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// # Ask Arguments (`AskArgs`)
///
/// Options go before the message; everything from the first message word
/// onwards is treated as text, so `mathbot ask -3 + 5` works.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Rule table to use instead of the configured one.
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Also print which rule produced the reply.
    #[arg(long)]
    pub explain: bool,

    /// Print the input, rule and reply as JSON.
    #[arg(long, conflicts_with = "explain")]
    pub json: bool,

    /// The message to send. Multiple words are joined with single spaces.
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub message: Vec<String>,
}

/// JSON shape printed by `--json`.
#[derive(Serialize, Debug)]
struct AskOutput<'a> {
    input: &'a str,
    variant: Variant,
    rule: &'static str,
    category: Option<Category>,
    reply: &'a str,
}

/// # Handle Ask Command (`handle_ask`)
///
/// Loads configuration, builds the responder and prints one reply.
///
/// ## Arguments
///
/// * `args`: The parsed `AskArgs`.
/// * `config_path`: Optional explicit configuration file from `--config`.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` once the reply is printed.
/// * `Err`: If configuration fails to load or the message is blank.
pub async fn handle_ask(args: AskArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Handling ask command with args: {:?}", args);

    let cfg = config::load_config(config_path).context("Failed to load MathBot configuration")?;
    let variant = args.variant.unwrap_or(cfg.assistant.variant);

    let joined = args.message.join(" ");
    let input = joined.trim();
    if input.is_empty() {
        return Err(MathBotError::EmptyInput.into());
    }

    let responder = Responder::new(variant, cfg.persona());
    let reply = responder.resolve(input);
    println!("{}", render(input, variant, &reply, args.json, args.explain)?);
    Ok(())
}

fn render(input: &str, variant: Variant, reply: &Reply, json: bool, explain: bool) -> Result<String> {
    if json {
        let output = AskOutput {
            input,
            variant,
            rule: reply.rule,
            category: reply.category,
            reply: &reply.text,
        };
        return serde_json::to_string_pretty(&output).context("Failed to serialize reply as JSON");
    }
    if explain {
        let category = reply
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "no rule matched".to_string());
        return Ok(format!("{}\nRule: {} ({})", reply.text, reply.rule, category));
    }
    Ok(reply.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::Persona;

    #[test]
    fn test_parses_message_words_and_flags() {
        let args = AskArgs::try_parse_from(["ask", "--explain", "add", "5", "and", "3"]).unwrap();
        assert!(args.explain);
        assert_eq!(args.message.join(" "), "add 5 and 3");
    }

    #[test]
    fn test_message_may_start_with_hyphen() {
        let args = AskArgs::try_parse_from(["ask", "-3", "+", "5"]).unwrap();
        assert_eq!(args.message, vec!["-3", "+", "5"]);
    }

    #[test]
    fn test_message_is_required() {
        assert!(AskArgs::try_parse_from(["ask"]).is_err());
    }

    #[test]
    fn test_json_and_explain_conflict() {
        assert!(AskArgs::try_parse_from(["ask", "--json", "--explain", "hi"]).is_err());
    }

    #[test]
    fn test_render_modes() {
        let bot = Responder::new(Variant::Themed, Persona::default());
        let reply = bot.resolve("add 5 and 3");

        assert_eq!(
            render("add 5 and 3", Variant::Themed, &reply, false, false).unwrap(),
            "The sum is: 8"
        );
        assert_eq!(
            render("add 5 and 3", Variant::Themed, &reply, false, true).unwrap(),
            "The sum is: 8\nRule: add (keyword arithmetic)"
        );

        let json = render("add 5 and 3", Variant::Themed, &reply, true, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rule"], "add");
        assert_eq!(value["category"], "keyword_arithmetic");
        assert_eq!(value["variant"], "themed");
        assert_eq!(value["reply"], "The sum is: 8");
    }

    #[test]
    fn test_render_fallback_explain() {
        let bot = Responder::new(Variant::Baseline, Persona::default());
        let reply = bot.resolve("purple elephants");
        let text = render("purple elephants", Variant::Baseline, &reply, false, true).unwrap();
        assert!(text.ends_with("Rule: fallback (no rule matched)"));
    }
}
