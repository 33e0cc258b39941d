//! # MathBot Responder
//!
//! File: cli/src/responder/mod.rs
//!
//! ## Overview
//!
//! The responder is the decision-making core of MathBot. Given a line of
//! free text, it classifies the input against an ordered rule table and
//! returns either a computed result or a canned reply. It never fails: every
//! input ends in some reply, with the help text as the last resort.
//!
//! ## Architecture
//!
//! - `rules`: the ordered (predicate, handler) table, first match wins
//! - `extract`: integer and expression extraction from free text
//! - `evaluator`: tokenizer and recursive-descent arithmetic evaluator
//! - `format`: number rendering for replies
//! - `replies`: the canned texts of both variants
//!
//! A `Responder` is built once and is immutable afterwards. It holds no
//! per-call state, so the same input always produces the same reply.
//!
//! ## Examples
//!
//! ```rust
//! let bot = Responder::new(Variant::Themed, Persona::default());
//! assert_eq!(bot.respond("2 + 2"), "The result is: 4");
//! assert_eq!(bot.respond("add 5 and 3"), "The sum is: 8");
//! ```
//!
pub mod evaluator;
pub mod extract;
pub mod format;
pub mod replies;
pub mod rules;

use clap::ValueEnum;
use replies::Replies;
use rules::{Category, Context, Rule};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Name reported for replies that came from the help text.
pub const FALLBACK_RULE: &str = "fallback";

/// Which feature tier the responder runs.
///
/// `Themed` adds the reference-topic answers and factorial; `Baseline`
/// answers only the plain arithmetic and small-talk rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Themed,
    Baseline,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Themed => write!(f, "themed"),
            Variant::Baseline => write!(f, "baseline"),
        }
    }
}

/// Who the assistant claims to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub creator: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: "HarshGPT".to_string(),
            creator: "Mr. Harsh Jha".to_string(),
        }
    }
}

/// A resolved reply and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub rule: &'static str,
    pub category: Option<Category>,
    pub text: String,
}

/// Classifies free text and produces a reply.
#[derive(Debug)]
pub struct Responder {
    rules: Vec<Rule>,
    replies: Replies,
    arithmetic_rules: Vec<Rule>,
}

impl Responder {
    /// Builds the rule table for `variant` and fills the persona into the
    /// canned replies.
    pub fn new(variant: Variant, persona: Persona) -> Self {
        let rules = rules::build(variant);
        let arithmetic_rules = rules
            .iter()
            .filter(|r| r.category == Category::KeywordArithmetic)
            .copied()
            .collect();
        debug!(
            "Built {} variant responder with {} rules",
            variant,
            rules.len()
        );
        Self {
            replies: Replies::new(variant, &persona),
            rules,
            arithmetic_rules,
        }
    }

    /// The rule table in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the reply text for `input`.
    #[allow(dead_code)] // The commands use `resolve`, which also names the rule.
    pub fn respond(&self, input: &str) -> String {
        self.resolve(input).text
    }

    /// Returns the reply for `input` together with the rule that produced it.
    ///
    /// Matching is case-insensitive: the input is lowercased once and every
    /// predicate tests substrings of that lowercased text.
    pub fn resolve(&self, input: &str) -> Reply {
        let text = input.to_lowercase();
        let ctx = Context {
            text: &text,
            replies: &self.replies,
            arithmetic_rules: &self.arithmetic_rules,
        };

        for rule in &self.rules {
            trace!("Trying rule '{}'", rule.name);
            if let Some(reply) = rule.apply(&ctx) {
                debug!("Input resolved by rule '{}' ({})", rule.name, rule.category);
                return Reply {
                    rule: rule.name,
                    category: Some(rule.category),
                    text: reply,
                };
            }
        }

        debug!("No rule matched; using fallback help text");
        Reply {
            rule: FALLBACK_RULE,
            category: None,
            text: self.replies.fallback.to_string(),
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(Variant::default(), Persona::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn themed() -> Responder {
        Responder::default()
    }

    fn baseline() -> Responder {
        Responder::new(Variant::Baseline, Persona::default())
    }

    #[test]
    fn test_creator_query_wins_anywhere() {
        let bot = themed();
        for input in [
            "Who created you?",
            "hey, WHO MADE YOU",
            "tell me about your creator and 2+2",
            "who developed you",
            "so... who designed you? factorial of 5",
        ] {
            assert_eq!(bot.respond(input), "Mr. Harsh Jha created me", "input: {}", input);
        }
    }

    #[test]
    fn test_generic_expression() {
        let bot = themed();
        assert_eq!(bot.respond("2 + 2"), "The result is: 4");
        assert_eq!(bot.respond("calculate (3 + 4) * 2"), "The result is: 14");
        assert_eq!(bot.respond("what is 7 / 2?"), "The result is: 3.5");
        assert_eq!(bot.respond("1/0"), "The result is: Infinity");
        assert_eq!(bot.respond("42"), "The result is: 42");
    }

    #[test]
    fn test_malformed_expression_apologises() {
        let bot = themed();
        assert_eq!(bot.respond("2+*3"), replies::EXPRESSION_APOLOGY);
        assert_eq!(bot.respond("(2+3"), replies::EXPRESSION_APOLOGY);
        assert_eq!(bot.respond("calculate."), replies::EXPRESSION_APOLOGY);
    }

    #[test]
    fn test_calculate_without_expression_falls_through() {
        assert_eq!(themed().resolve("calculate stuff").rule, FALLBACK_RULE);
    }

    #[test]
    fn test_keyword_arithmetic() {
        let bot = themed();
        assert_eq!(bot.respond("add 5 and 3"), "The sum is: 8");
        assert_eq!(bot.respond("what is the sum of 1, 2 and 3"), "The sum is: 6");
        assert_eq!(bot.respond("multiply 4 and 5"), "The product is: 20");
        assert_eq!(bot.respond("divide 10 by 2"), "The result is: 5.00");
        assert_eq!(bot.respond("divide 10 by 0"), "Cannot divide by zero!");
        assert_eq!(bot.respond("square root of 16"), "The square root is: 4.00");
        assert_eq!(bot.respond("sqrt 2"), "The square root is: 1.41");
        assert_eq!(bot.respond("what is 2 squared"), "The result is: 4");
        assert_eq!(bot.respond("factorial of 5"), "The factorial is: 120");
        assert_eq!(
            bot.respond("factorial of 171"),
            "Number too large for factorial calculation"
        );
    }

    #[test]
    fn test_arithmetic_precedes_small_talk() {
        let bot = themed();
        assert_eq!(bot.respond("hello, add 2 and 3"), "The sum is: 5");
        assert_eq!(bot.resolve("hello, add 2 and 3").rule, "add");
    }

    #[test]
    fn test_lone_operand_with_keyword_is_evaluated() {
        let bot = themed();
        for input in ["add 5", "hi, add 5"] {
            let reply = bot.resolve(input);
            assert_eq!(reply.rule, "expression", "input: {}", input);
            assert_eq!(reply.text, "The result is: 5");
        }
        assert_eq!(bot.respond("sometimes 42"), "The result is: 42");
        assert_eq!(bot.respond("address 42"), "The result is: 42");
    }

    #[test]
    fn test_deeply_nested_input_is_rejected_without_crashing() {
        let bot = themed();
        assert_eq!(bot.respond(&"(".repeat(100_000)), replies::EXPRESSION_APOLOGY);
        let signs = format!("{}1", "-+".repeat(50_000));
        assert_eq!(bot.respond(&signs), replies::EXPRESSION_APOLOGY);
    }

    #[test]
    fn test_reference_topics_only_in_themed_variant() {
        let bot = themed();
        assert_eq!(bot.respond("how do I integrate x?"), replies::INTEGRATION_REFERENCE);
        assert_eq!(bot.respond("Derivative of sin"), replies::DIFFERENTIATION_REFERENCE);
        assert_eq!(bot.respond("log rules"), replies::LOGARITHM_REFERENCE);
        assert_eq!(bot.respond("trig please"), replies::TRIGONOMETRY_REFERENCE);

        let plain = baseline();
        assert_eq!(plain.resolve("log rules").rule, FALLBACK_RULE);
    }

    #[test]
    fn test_factorial_absent_in_baseline() {
        // Without a factorial rule the bare number is an expression.
        assert_eq!(baseline().respond("factorial of 5"), "The result is: 5");
    }

    #[test]
    fn test_small_talk() {
        let bot = themed();
        assert_eq!(bot.resolve("Hello there").rule, "greeting");
        assert_eq!(bot.resolve("how are you").rule, "status");
        assert_eq!(
            bot.respond("what is your name"),
            "I'm HarshGPT, your mathematical genius assistant!"
        );
        assert_eq!(bot.respond("bye"), "Goodbye! Remember, math is beautiful!");
        assert_eq!(
            baseline().respond("thanks a lot"),
            "You're welcome! Let me know if you need help with more calculations!"
        );
    }

    #[test]
    fn test_persona_is_configurable() {
        let bot = Responder::new(
            Variant::Baseline,
            Persona {
                name: "Abacus".into(),
                creator: "The Maths Club".into(),
            },
        );
        assert_eq!(bot.respond("who made you"), "The Maths Club created me");
        assert_eq!(
            bot.respond("your name?"),
            "I'm Abacus, your friendly chat assistant! I'm great at math!"
        );
    }

    #[test]
    fn test_fallback_for_unrecognised_and_empty_input() {
        let bot = themed();
        let reply = bot.resolve("purple elephants");
        assert_eq!(reply.rule, FALLBACK_RULE);
        assert!(reply.text.starts_with("I can help you with various mathematical topics"));
        assert_eq!(bot.resolve("").rule, FALLBACK_RULE);
        assert_eq!(bot.resolve("   ").rule, FALLBACK_RULE);
    }

    #[test]
    fn test_same_input_same_reply() {
        let bot = themed();
        for input in ["2 + 2", "add 1 and 2", "purple elephants", "((", "hi"] {
            assert_eq!(bot.resolve(input), bot.resolve(input));
        }
    }
}
