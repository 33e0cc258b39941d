//! # MathBot UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal presentation helpers for the chat session. The responder never
//! touches the terminal; everything that decides how a reply *looks* lives
//! here.
//!
//! - **`theme`**: light/dark palettes and chat-bubble painting.
//!
use std::io::IsTerminal;

pub mod theme;

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Turns colour output off when stdout is not a terminal or when the
/// caller asked for plain output. `colored` already honours `NO_COLOR`.
pub fn configure_colors(plain: bool) {
    if plain || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}
