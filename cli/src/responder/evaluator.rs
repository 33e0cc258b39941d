//! # Arithmetic Expression Evaluator
//!
//! File: cli/src/responder/evaluator.rs
//!
//! ## Overview
//!
//! A small, closed arithmetic evaluator used by the generic expression rule.
//! It understands decimal literals, the four binary operators `+ - * /`,
//! unary signs and parentheses. Nothing else is accepted: there are no
//! variables, functions, implicit multiplication or exponent operator.
//!
//! ## Architecture
//!
//! Evaluation runs in two passes:
//! 1. `tokenize` turns the text into a flat list of positioned tokens.
//! 2. `Parser` walks the tokens by recursive descent, computing the value as
//!    it goes. Each grammar level handles one precedence tier:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Every parenthesis and every unary sign opens one nesting level. Input
//! nested deeper than `MAX_DEPTH` is rejected with `EvalError::TooDeep`
//! before the recursion can exhaust the stack.
//!
//! Division by zero is not an error here; it produces an infinite (or NaN)
//! value, which the formatter renders as `Infinity`/`NaN`.
//!
use crate::core::error::EvalError;
use std::fmt;

/// Deepest nesting of parentheses and unary signs the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Characters allowed to survive sanitization.
const EXPRESSION_CHARS: &[char] = &['+', '-', '*', '/', '(', ')', '.'];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

/// Strips every character that is not a digit or one of `+ - * / ( ) .`.
pub fn sanitize(expression: &str) -> String {
    expression
        .chars()
        .filter(|c| c.is_ascii_digit() || EXPRESSION_CHARS.contains(c))
        .collect()
}

/// Evaluates an arithmetic expression with standard operator precedence.
///
/// ## Errors
///
/// Returns an `EvalError` for empty input, characters outside the grammar,
/// malformed numbers (`1.2.3`, a lone `.`), doubled sign operators (`++`,
/// `--`), unbalanced parentheses, operators missing an operand, or nesting
/// deeper than `MAX_DEPTH`.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    let mut parser = Parser {
        tokens: &tokens,
        cursor: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some((Token::RParen, _)) => Err(EvalError::UnbalancedParens),
        Some((token, pos)) => Err(EvalError::UnexpectedToken {
            found: token.to_string(),
            pos,
        }),
    }
}

fn tokenize(expression: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let chars: Vec<char> = expression.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        if ch.is_whitespace() {
            pos += 1;
            continue;
        }
        if ch.is_ascii_digit() || ch == '.' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                pos += 1;
            }
            let literal: String = chars[start..pos].iter().collect();
            tokens.push((Token::Number(parse_number(&literal)?), start));
            continue;
        }
        // `++` and `--` are increment/decrement operators in the host
        // language the widget came from, never arithmetic.
        if (ch == '+' || ch == '-') && pos > 0 && chars[pos - 1] == ch {
            return Err(EvalError::UnexpectedToken {
                found: format!("'{}{}'", ch, ch),
                pos: pos - 1,
            });
        }
        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return Err(EvalError::UnexpectedChar { ch, pos }),
        };
        tokens.push((token, pos));
        pos += 1;
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<f64, EvalError> {
    if literal.matches('.').count() > 1 || !literal.chars().any(|c| c.is_ascii_digit()) {
        return Err(EvalError::MalformedNumber(literal.to_string()));
    }
    literal
        .parse::<f64>()
        .map_err(|_| EvalError::MalformedNumber(literal.to_string()))
}

struct Parser<'a> {
    tokens: &'a [(Token, usize)],
    cursor: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<(Token, usize)> {
        self.tokens.get(self.cursor).copied()
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.peek();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some((token, _)) = self.peek() {
            match token {
                Token::Plus => {
                    self.cursor += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.cursor += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some((token, _)) = self.peek() {
            match token {
                Token::Star => {
                    self.cursor += 1;
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.cursor += 1;
                    value /= self.unary()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        let value = match self.peek() {
            Some((Token::Minus, _)) => {
                self.cursor += 1;
                self.unary().map(|v| -v)
            }
            Some((Token::Plus, _)) => {
                self.cursor += 1;
                self.unary()
            }
            _ => self.primary(),
        };
        self.depth -= 1;
        value
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some((Token::Number(n), _)) => Ok(n),
            Some((Token::LParen, _)) => {
                let value = self.expr()?;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(value),
                    None => Err(EvalError::UnbalancedParens),
                    Some((token, pos)) => Err(EvalError::UnexpectedToken {
                        found: token.to_string(),
                        pos,
                    }),
                }
            }
            Some((token, pos)) => Err(EvalError::UnexpectedToken {
                found: token.to_string(),
                pos,
            }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}
