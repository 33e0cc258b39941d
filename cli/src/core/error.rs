//! # MathBot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout MathBot. Two families
//! of errors exist, and they never meet:
//!
//! - `MathBotError`: application-level failures surfaced by the command
//!   handlers (bad configuration, empty input to `ask`, terminal I/O).
//! - `EvalError`: failures of the arithmetic expression evaluator. These are
//!   caught by the responder and turned into a user-facing apology, so they
//!   never reach the caller of `Responder::respond`.
//!
//! ## Architecture
//!
//! - `thiserror` derives `Display`/`Error` for both enums.
//! - `Result<T>` is an alias for `anyhow::Result<T>`, used by command
//!   handlers that want to attach context with `anyhow::Context`.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type from a command handler
//! if text.is_empty() {
//!     return Err(MathBotError::EmptyInput.into());
//! }
//!
//! // Add context to I/O errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the MathBot application.
#[derive(Error, Debug)]
pub enum MathBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input cannot be empty.")]
    EmptyInput,

    #[error("Terminal I/O failed: {source}")]
    Terminal {
        #[from]
        source: std::io::Error,
    },
}

/// Failures raised while evaluating an arithmetic expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = MathBotError::Config("thinking_delay_ms too large".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: thinking_delay_ms too large"
        );

        assert_eq!(MathBotError::EmptyInput.to_string(), "Input cannot be empty.");

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        assert_eq!(
            MathBotError::from(io).to_string(),
            "Terminal I/O failed: pipe closed"
        );
    }

    #[test]
    fn test_eval_error_display() {
        let err = EvalError::UnexpectedChar { ch: 'x', pos: 3 };
        assert_eq!(err.to_string(), "unexpected character 'x' at position 3");
        assert_eq!(EvalError::UnbalancedParens.to_string(), "unbalanced parentheses");
        assert_eq!(
            EvalError::TooDeep(256).to_string(),
            "expression nested deeper than 256 levels"
        );
    }
}
