//! # MathBot Rules Command
//!
//! File: cli/src/commands/rules.rs
//!
//! ## Overview
//!
//! Implements `mathbot rules`, which prints the responder's rule table in
//! evaluation order. The first rule whose keywords appear in the input and
//! whose operands are complete decides the reply, so this listing is the
//! authoritative answer to "why did I get that reply?".
//!
//! Example output:
//!
//! ```
//! Rules for the 'baseline' variant (first match wins):
//!
//! #   | Name         | Category           | Matches
//! ----+--------------+--------------------+---------------------------------
//! 1   | creator      | identity           | who created you | who made you | ...
//! 2   | expression   | expression         | calculate | solve | [0-9+-*/()]
//! ...
//! -   | fallback     | -                  | (anything else)
//! ```
//!
use crate::core::config;
use crate::core::error::Result;
use crate::responder::rules::Rule;
use crate::responder::{Responder, Variant, FALLBACK_RULE};
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing::info;

/// # Rules Arguments (`RulesArgs`)
#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Rule table to list instead of the configured one.
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,
}

/// # Handle Rules Command (`handle_rules`)
///
/// Builds the responder for the selected variant and prints its table.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` once the table is printed, `Err` if configuration fails to load.
pub async fn handle_rules(args: RulesArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Handling rules command with args: {:?}", args);

    let cfg = config::load_config(config_path).context("Failed to load MathBot configuration")?;
    let variant = args.variant.unwrap_or(cfg.assistant.variant);
    let responder = Responder::new(variant, cfg.persona());

    println!("{}", format_rule_table(variant, responder.rules()));
    Ok(())
}

fn format_rule_table(variant: Variant, rules: &[Rule]) -> String {
    let name_width = rules
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once(FALLBACK_RULE.len()))
        .max()
        .unwrap_or(10)
        .max(10);
    let category_width = 18;

    let mut out = format!("Rules for the '{}' variant (first match wins):\n\n", variant);
    out.push_str(&format!(
        "{:<3} | {:<name_width$} | {:<category_width$} | Matches\n",
        "#", "Name", "Category"
    ));
    out.push_str(&format!(
        "{:-<3}-+-{:-<name_width$}-+-{:-<category_width$}-+-{:-<33}\n",
        "", "", "", ""
    ));
    for (i, rule) in rules.iter().enumerate() {
        out.push_str(&format!(
            "{:<3} | {:<name_width$} | {:<category_width$} | {}\n",
            i + 1,
            rule.name,
            rule.category.to_string(),
            rule.predicate
        ));
    }
    out.push_str(&format!(
        "{:<3} | {:<name_width$} | {:<category_width$} | (anything else)",
        "-", FALLBACK_RULE, "-"
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::Persona;

    #[test]
    fn test_table_lists_rules_in_order() {
        let bot = Responder::new(Variant::Baseline, Persona::default());
        let table = format_rule_table(Variant::Baseline, bot.rules());

        assert!(table.starts_with("Rules for the 'baseline' variant"));
        let creator = table.find("creator").unwrap();
        let expression = table.find("| expression ").unwrap();
        let greeting = table.find("greeting").unwrap();
        assert!(creator < expression && expression < greeting);
        assert!(table.contains("square root | sqrt"));
        assert!(table.trim_end().ends_with("(anything else)"));
        assert!(!table.contains("factorial"));
    }

    #[test]
    fn test_parses_variant_flag() {
        let args = RulesArgs::try_parse_from(["rules", "--variant", "baseline"]).unwrap();
        assert_eq!(args.variant, Some(Variant::Baseline));
        assert!(RulesArgs::try_parse_from(["rules", "--variant", "fancy"]).is_err());
    }
}
