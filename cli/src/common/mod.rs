//! # MathBot Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used by the command handlers but not part of the
//! responder itself. Currently this is the terminal UI layer only.
//!
//! - **`ui`**: colour themes and chat-bubble rendering for `mathbot chat`.
//!

/// Utilities for terminal user interface elements (themes, chat bubbles).
pub mod ui;
