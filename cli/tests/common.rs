//! # MathBot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Every
//! test runs the compiled `mathbot` binary against an explicit config file
//! in a temporary directory, so a developer's own `config.toml` or a
//! `.mathbot.toml` further up the tree never changes the outcome.
//!

// Not every test crate uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// # Get MathBot Command (`mathbot_cmd`)
///
/// Returns an `assert_cmd::Command` for the compiled `mathbot` binary with
/// `MATHBOT_CONFIG` and `RUST_LOG` cleared from its environment.
///
/// ## Panics
/// Panics if the `mathbot` binary cannot be found via `Command::cargo_bin`.
pub fn mathbot_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mathbot").expect("Failed to find mathbot binary for testing");
    cmd.env_remove("MATHBOT_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Writes `contents` to `config.toml` in a fresh temporary directory and
/// returns a command already pointed at it with `--config`.
///
/// The `TempDir` must be kept alive for as long as the command runs.
pub fn mathbot_with_config(contents: &str) -> (Command, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("Failed to write test config");

    let mut cmd = mathbot_cmd();
    cmd.current_dir(dir.path()).arg("--config").arg(&path);
    (cmd, dir)
}

/// A command using the built-in defaults (themed variant, HarshGPT persona).
pub fn mathbot_default() -> (Command, TempDir) {
    mathbot_with_config("")
}
