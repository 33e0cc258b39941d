//! Operand and expression extraction from free text.
//!
//! Only non-negative integer literals are extracted for the keyword rules;
//! the generic expression rule looks for the first run of expression
//! characters instead.

use regex::Regex;
use std::sync::LazyLock;

// Patterns are static and known-good, so a failed compile is a programming
// error rather than a runtime condition.
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid regex: integer literal"));

static EXPRESSION_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9+\-*/().]+(?:[ \t]+[0-9+\-*/().]+)*")
        .expect("Invalid regex: expression run")
});

/// An integer found in the input, keeping its literal text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operand<'a> {
    pub literal: &'a str,
    pub value: f64,
}

/// All integer literals in order of appearance.
pub fn integers(text: &str) -> Vec<Operand<'_>> {
    INTEGER
        .find_iter(text)
        .filter_map(|m| {
            let literal = m.as_str();
            // Digit runs always parse as f64; very long ones saturate to inf.
            literal.parse::<f64>().ok().map(|value| Operand { literal, value })
        })
        .collect()
}

/// The first integer literal, if any.
pub fn first_integer(text: &str) -> Option<Operand<'_>> {
    INTEGER.find(text).and_then(|m| {
        let literal = m.as_str();
        literal.parse::<f64>().ok().map(|value| Operand { literal, value })
    })
}

/// True when the text holds a digit, an operator or a parenthesis.
pub fn has_expression_char(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')'))
}

/// The first maximal run of expression characters, allowing blanks between
/// them, e.g. `"2 + 2"` in `"what is 2 + 2?"`.
pub fn expression_candidate(text: &str) -> Option<&str> {
    EXPRESSION_RUN.find(text).map(|m| m.as_str())
}

/// True when the candidate contains an operator or parenthesis rather than
/// being a bare number.
pub fn has_operator(candidate: &str) -> bool {
    candidate
        .chars()
        .any(|c| matches!(c, '+' | '-' | '*' | '/' | '(' | ')'))
}
