//! # Rule Table
//!
//! File: cli/src/responder/rules.rs
//!
//! ## Overview
//!
//! Each `Rule` pairs a predicate over the lowercased input with a handler
//! that produces the reply. The table built by `build` is ordered, and the
//! responder stops at the first rule whose predicate matches *and* whose
//! handler returns a reply. A handler returning `None` means its refined
//! condition failed (for example, fewer than two operands), and evaluation
//! continues with the next rule.
//!
//! ## Order
//!
//! 1. Identity (creator query)
//! 2. Reference topics (themed variant only)
//! 3. Generic expression
//! 4. Keyword arithmetic (factorial only in the themed variant)
//! 5. Small talk
//!
//! The fallback reply is not a rule; the responder produces it when the
//! table is exhausted.
//!
use super::evaluator;
use super::extract::{self, Operand};
use super::format::{format_fixed2, format_number};
use super::replies::{self, Replies};
use super::Variant;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Largest factorial argument accepted before the overflow guard kicks in.
pub const MAX_FACTORIAL: f64 = 170.0;

/// The rule groups, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Identity,
    Reference,
    Expression,
    KeywordArithmetic,
    SmallTalk,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Identity => "identity",
            Category::Reference => "reference",
            Category::Expression => "expression",
            Category::KeywordArithmetic => "keyword arithmetic",
            Category::SmallTalk => "small talk",
        };
        write!(f, "{}", label)
    }
}

/// When a rule is considered at all.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// Any of the keywords occurs as a substring.
    AnyOf(&'static [&'static str]),
    /// "calculate"/"solve", or any digit, operator or parenthesis.
    ExpressionIntent,
}

impl Predicate {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Predicate::AnyOf(keywords) => keywords.iter().any(|k| text.contains(k)),
            Predicate::ExpressionIntent => {
                text.contains("calculate")
                    || text.contains("solve")
                    || extract::has_expression_char(text)
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::AnyOf(keywords) => write!(f, "{}", keywords.join(" | ")),
            Predicate::ExpressionIntent => write!(f, "calculate | solve | [0-9+-*/()]"),
        }
    }
}

/// What a handler sees: the lowercased input plus the responder's
/// immutable reply texts.
pub struct Context<'a> {
    pub text: &'a str,
    pub replies: &'a Replies,
    /// The keyword-arithmetic rules of the active table, in order.
    pub arithmetic_rules: &'a [Rule],
}

impl Context<'_> {
    fn arithmetic_rule_answers(&self) -> Option<&'static str> {
        self.arithmetic_rules
            .iter()
            .find(|rule| rule.apply(self).is_some())
            .map(|rule| rule.name)
    }
}

type Handler = fn(&Context<'_>) -> Option<String>;

/// One entry of the ordered rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub category: Category,
    pub predicate: Predicate,
    handler: Handler,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("predicate", &self.predicate)
            .finish()
    }
}

impl Rule {
    const fn new(
        name: &'static str,
        category: Category,
        predicate: Predicate,
        handler: Handler,
    ) -> Self {
        Self {
            name,
            category,
            predicate,
            handler,
        }
    }

    /// Runs the predicate, then the handler. `None` means fall through.
    pub fn apply(&self, ctx: &Context<'_>) -> Option<String> {
        if !self.predicate.matches(ctx.text) {
            return None;
        }
        let reply = (self.handler)(ctx);
        if reply.is_none() {
            debug!("Rule '{}' matched but produced no reply; falling through", self.name);
        }
        reply
    }
}

const IDENTITY: Rule = Rule::new(
    "creator",
    Category::Identity,
    Predicate::AnyOf(&[
        "who created you",
        "who made you",
        "your creator",
        "who developed you",
        "who designed you",
    ]),
    |ctx| Some(ctx.replies.creator.clone()),
);

const REFERENCE_RULES: [Rule; 4] = [
    Rule::new(
        "integration",
        Category::Reference,
        Predicate::AnyOf(&["integrate", "integration"]),
        |_| Some(replies::INTEGRATION_REFERENCE.to_string()),
    ),
    Rule::new(
        "differentiation",
        Category::Reference,
        Predicate::AnyOf(&["differentiate", "derivative"]),
        |_| Some(replies::DIFFERENTIATION_REFERENCE.to_string()),
    ),
    Rule::new(
        "logarithm",
        Category::Reference,
        Predicate::AnyOf(&["logarithm", "log"]),
        |_| Some(replies::LOGARITHM_REFERENCE.to_string()),
    ),
    Rule::new(
        "trigonometry",
        Category::Reference,
        Predicate::AnyOf(&["trigonometry", "trig"]),
        |_| Some(replies::TRIGONOMETRY_REFERENCE.to_string()),
    ),
];

const EXPRESSION: Rule = Rule::new(
    "expression",
    Category::Expression,
    Predicate::ExpressionIntent,
    evaluate_expression,
);

const ADD: Rule = Rule::new(
    "add",
    Category::KeywordArithmetic,
    Predicate::AnyOf(&["add", "plus", "sum"]),
    add,
);
const SUBTRACT: Rule = Rule::new(
    "subtract",
    Category::KeywordArithmetic,
    Predicate::AnyOf(&["subtract", "minus"]),
    subtract,
);
const MULTIPLY: Rule = Rule::new(
    "multiply",
    Category::KeywordArithmetic,
    Predicate::AnyOf(&["multiply", "times"]),
    multiply,
);
const DIVIDE: Rule = Rule::new(
    "divide",
    Category::KeywordArithmetic,
    Predicate::AnyOf(&["divide", "divided by"]),
    divide,
);
const FACTORIAL: Rule = Rule::new(
    "factorial",
    Category::KeywordArithmetic,
    Predicate::AnyOf(&["factorial"]),
    factorial,
);
const SQUARE_ROOT: Rule = Rule::new(
    "square_root",
    Category::KeywordArithmetic,
    Predicate::AnyOf(&["square root", "sqrt"]),
    square_root,
);
const POWER: Rule = Rule::new(
    "power",
    Category::KeywordArithmetic,
    Predicate::AnyOf(&["power", "squared", "cubed"]),
    power,
);

const SMALL_TALK: [Rule; 5] = [
    Rule::new(
        "greeting",
        Category::SmallTalk,
        Predicate::AnyOf(&["hello", "hi", "hey"]),
        |ctx| Some(ctx.replies.greeting.to_string()),
    ),
    Rule::new(
        "status",
        Category::SmallTalk,
        Predicate::AnyOf(&["how are you"]),
        |ctx| Some(ctx.replies.status.to_string()),
    ),
    Rule::new(
        "name",
        Category::SmallTalk,
        Predicate::AnyOf(&["your name"]),
        |ctx| Some(ctx.replies.name.clone()),
    ),
    Rule::new(
        "farewell",
        Category::SmallTalk,
        Predicate::AnyOf(&["bye", "goodbye"]),
        |ctx| Some(ctx.replies.farewell.to_string()),
    ),
    Rule::new(
        "thanks",
        Category::SmallTalk,
        Predicate::AnyOf(&["thank"]),
        |ctx| Some(ctx.replies.thanks.to_string()),
    ),
];

/// Builds the ordered rule table for a variant.
pub fn build(variant: Variant) -> Vec<Rule> {
    let mut rules = vec![IDENTITY];
    if variant == Variant::Themed {
        rules.extend(REFERENCE_RULES);
    }
    rules.push(EXPRESSION);
    rules.extend([ADD, SUBTRACT, MULTIPLY, DIVIDE]);
    if variant == Variant::Themed {
        rules.push(FACTORIAL);
    }
    rules.extend([SQUARE_ROOT, POWER]);
    rules.extend(SMALL_TALK);
    rules
}

fn evaluate_expression(ctx: &Context<'_>) -> Option<String> {
    let candidate = extract::expression_candidate(ctx.text)?;

    // A bare number is an operand of a keyword rule ("add 5 and 3") only
    // when that rule can actually answer; otherwise it is evaluated here.
    if !extract::has_operator(candidate) {
        if let Some(rule) = ctx.arithmetic_rule_answers() {
            debug!("Bare operand '{}' deferred to rule '{}'", candidate, rule);
            return None;
        }
    }

    let sanitized = evaluator::sanitize(candidate);
    match evaluator::evaluate(&sanitized) {
        Ok(value) => Some(format!("The result is: {}", format_number(value))),
        Err(e) => {
            debug!("Could not evaluate '{}': {}", sanitized, e);
            Some(replies::EXPRESSION_APOLOGY.to_string())
        }
    }
}

/// At least two operands, or `None` to fall through.
fn binary_operands(text: &str) -> Option<Vec<Operand<'_>>> {
    let operands = extract::integers(text);
    (operands.len() >= 2).then_some(operands)
}

fn add(ctx: &Context<'_>) -> Option<String> {
    let operands = binary_operands(ctx.text)?;
    let sum = operands.iter().fold(0.0, |acc, o| acc + o.value);
    Some(format!("The sum is: {}", format_number(sum)))
}

fn subtract(ctx: &Context<'_>) -> Option<String> {
    let operands = binary_operands(ctx.text)?;
    let difference = operands[1..]
        .iter()
        .fold(operands[0].value, |acc, o| acc - o.value);
    Some(format!("The difference is: {}", format_number(difference)))
}

fn multiply(ctx: &Context<'_>) -> Option<String> {
    let operands = binary_operands(ctx.text)?;
    let product = operands[1..]
        .iter()
        .fold(operands[0].value, |acc, o| acc * o.value);
    Some(format!("The product is: {}", format_number(product)))
}

fn divide(ctx: &Context<'_>) -> Option<String> {
    let operands = binary_operands(ctx.text)?;
    // Only the literal "0" is rejected; "00" divides through to Infinity.
    if operands[1].literal == "0" {
        return Some(replies::DIVIDE_BY_ZERO.to_string());
    }
    let quotient = operands[0].value / operands[1].value;
    Some(format!("The result is: {}", format_fixed2(quotient)))
}

fn factorial(ctx: &Context<'_>) -> Option<String> {
    let n = extract::first_integer(ctx.text)?.value;
    if n > MAX_FACTORIAL {
        return Some(replies::FACTORIAL_TOO_LARGE.to_string());
    }
    // n <= 170 here, so the cast is exact.
    let result = (2..=n as u32).fold(1.0_f64, |acc, i| acc * f64::from(i));
    Some(format!("The factorial is: {}", format_number(result)))
}

fn square_root(ctx: &Context<'_>) -> Option<String> {
    let n = extract::first_integer(ctx.text)?.value;
    Some(format!("The square root is: {}", format_fixed2(n.sqrt())))
}

fn power(ctx: &Context<'_>) -> Option<String> {
    let base = extract::first_integer(ctx.text)?.value;
    let exponent = if ctx.text.contains("cubed") { 3 } else { 2 };
    Some(format!("The result is: {}", format_number(base.powi(exponent))))
}
