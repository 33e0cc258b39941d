//! # MathBot Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the MathBot CLI so that
//! `main.rs` can route to them.
//!
//! ## Architecture
//!
//! Each command lives in its own file and defines:
//! - an `*Args` struct parsed by Clap
//! - an async `handle_*` function taking the args and the optional
//!   `--config` path
//!
//! ## Commands
//!
//! - `ask`: one-shot question, reply printed to stdout
//! - `chat`: interactive chat session
//! - `rules`: print the responder's ordered rule table
//!

/// One-shot question to the assistant (`mathbot ask`).
pub mod ask;
/// Interactive chat session (`mathbot chat`).
pub mod chat;
/// Rule table listing (`mathbot rules`).
pub mod rules;
