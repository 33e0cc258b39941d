//! # MathBot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates MathBot configuration. The
//! configuration decides who the assistant says it is, which feature tier
//! (variant) the responder runs, and how the chat session is presented.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit `--config <PATH>` file (replaces the two below)
//! 2. Project-specific `.mathbot.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! The project search walks up from the current directory and stops at the
//! first directory containing `.git`.
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! [assistant]
//! name = "HarshGPT"
//! creator = "Mr. Harsh Jha"
//! variant = "themed"
//!
//! [chat]
//! thinking_delay_ms = 1000
//! theme = "dark"
//! ```
//!
//! Loading and using configuration:
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let bot = Responder::new(cfg.assistant.variant, cfg.persona());
//! ```
//!
use crate::common::ui::theme::Theme;
use crate::core::error::{MathBotError, Result};
use crate::responder::{Persona, Variant};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Upper bound for the simulated thinking delay.
pub const MAX_THINKING_DELAY_MS: u64 = 10_000;

const PROJECT_CONFIG_FILENAME: &str = ".mathbot.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Identity and feature tier of the assistant.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Name used in the "what is your name" reply.
    #[serde(default = "default_name")]
    pub name: String,
    /// Name used in the "who created you" reply.
    #[serde(default = "default_creator")]
    pub creator: String,
    /// Which rule table to run.
    #[serde(default)]
    pub variant: Variant,
}

/// Presentation settings for `mathbot chat`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Pause before each reply is shown, in milliseconds.
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
    /// Initial colour theme.
    #[serde(default)]
    pub theme: Theme,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            creator: default_creator(),
            variant: Variant::default(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay_ms(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// The persona the responder should use.
    pub fn persona(&self) -> Persona {
        Persona {
            name: self.assistant.name.clone(),
            creator: self.assistant.creator.clone(),
        }
    }
}

fn default_name() -> String {
    Persona::default().name
}
fn default_creator() -> String {
    Persona::default().creator
}
fn default_thinking_delay_ms() -> u64 {
    1000
}

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read (after `~` expansion) and it
/// must exist. Otherwise the user and project files are merged over the
/// defaults; both are optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            info!("Loading configuration from: {}", expanded.display());
            load_config_from_path(&expanded)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "MathBot", "mathbot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.mathbot.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();

    Config {
        assistant: AssistantConfig {
            name: if project.assistant.name != defaults.assistant.name {
                project.assistant.name
            } else {
                user.assistant.name
            },
            creator: if project.assistant.creator != defaults.assistant.creator {
                project.assistant.creator
            } else {
                user.assistant.creator
            },
            variant: if project.assistant.variant != defaults.assistant.variant {
                project.assistant.variant
            } else {
                user.assistant.variant
            },
        },
        chat: ChatConfig {
            thinking_delay_ms: if project.chat.thinking_delay_ms
                != defaults.chat.thinking_delay_ms
            {
                project.chat.thinking_delay_ms
            } else {
                user.chat.thinking_delay_ms
            },
            theme: if project.chat.theme != defaults.chat.theme {
                project.chat.theme
            } else {
                user.chat.theme
            },
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.assistant.name.trim().is_empty() {
        return Err(anyhow!(MathBotError::Config(
            "assistant.name cannot be empty.".to_string()
        )));
    }
    if config.assistant.creator.trim().is_empty() {
        return Err(anyhow!(MathBotError::Config(
            "assistant.creator cannot be empty.".to_string()
        )));
    }
    if config.chat.thinking_delay_ms > MAX_THINKING_DELAY_MS {
        return Err(anyhow!(MathBotError::Config(format!(
            "chat.thinking_delay_ms is {} but must be at most {}.",
            config.chat.thinking_delay_ms, MAX_THINKING_DELAY_MS
        ))));
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [assistant]
            name = "Abacus"
            variant = "baseline"

            [chat]
            theme = "light"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.assistant.name, "Abacus");
        assert_eq!(config.assistant.creator, default_creator()); // Default
        assert_eq!(config.assistant.variant, Variant::Baseline);
        assert_eq!(config.chat.theme, Theme::Light);
        assert_eq!(config.chat.thinking_delay_ms, 1000); // Default
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.persona(), Persona::default());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[assistant]\nmood = \"grumpy\"");
        assert!(result.is_err());
        let result: std::result::Result<Config, _> = toml::from_str("[assistant]\nvariant = \"fancy\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user: Config = toml::from_str(
            "[assistant]\nname = \"UserBot\"\n[chat]\nthinking_delay_ms = 250",
        )
        .unwrap();
        let project: Config = toml::from_str("[assistant]\nvariant = \"baseline\"").unwrap();

        let merged = merge_configs(user.clone(), Some(project));
        assert_eq!(merged.assistant.name, "UserBot"); // project left default
        assert_eq!(merged.assistant.variant, Variant::Baseline); // project wins
        assert_eq!(merged.chat.thinking_delay_ms, 250);

        assert_eq!(merge_configs(user.clone(), None), user);
    }

    #[test]
    fn test_validate_config() {
        assert!(validate_config(&Config::default()).is_ok());

        let mut config = Config::default();
        config.chat.thinking_delay_ms = MAX_THINKING_DELAY_MS + 1;
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("thinking_delay_ms"));

        let mut config = Config::default();
        config.assistant.name = "  ".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_find_project_config_walks_up_to_git_root() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(root.join(".git")).unwrap();

        assert_eq!(find_project_config_path(&nested), None);

        fs::write(root.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(root.join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_explicit_config_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bot.toml");
        fs::write(&path, "[assistant]\ncreator = \"Ada\"").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.assistant.creator, "Ada");

        let missing = temp_dir.path().join("missing.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration file"));
    }

    #[test]
    fn test_explicit_path_expands_tilde() {
        let home = dirs::home_dir().unwrap();
        let missing = Path::new("~/definitely-not-a-mathbot-config.toml");
        let err = load_config(Some(missing)).unwrap_err();
        assert!(err
            .to_string()
            .contains(&home.join("definitely-not-a-mathbot-config.toml").display().to_string()));
    }
}
