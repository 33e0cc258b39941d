//! # Chat Themes
//!
//! File: cli/src/common/ui/theme.rs
//!
//! ## Overview
//!
//! Light and dark colour palettes for the chat session, carried over from
//! the browser widget's CSS variables, and the functions that paint chat
//! bubbles with them. Only 24-bit colour is used; `colored` drops the
//! escape codes when colouring is disabled (see `ui::configure_colors`).
//!
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Deserialize;
use std::fmt;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The colours used to draw one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Rgb,
    pub icon: Rgb,
    pub placeholder: Rgb,
    pub outgoing_bg: Rgb,
    pub incoming_bg: Rgb,
}

const LIGHT: Palette = Palette {
    text: Rgb(0x34, 0x35, 0x41),
    icon: Rgb(0x5b, 0x5e, 0x71),
    placeholder: Rgb(0x66, 0x66, 0x66),
    outgoing_bg: Rgb(0xff, 0xff, 0xff),
    incoming_bg: Rgb(0xf7, 0xf7, 0xf8),
};

const DARK: Palette = Palette {
    text: Rgb(0xff, 0xff, 0xff),
    icon: Rgb(0xac, 0xac, 0xbe),
    placeholder: Rgb(0xcc, 0xcc, 0xcc),
    outgoing_bg: Rgb(0x34, 0x35, 0x41),
    incoming_bg: Rgb(0x44, 0x46, 0x54),
};

/// Colour theme of the chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    /// A line the user typed, as echoed back into the chat log.
    pub fn outgoing(self, text: &str) -> ColoredString {
        let p = self.palette();
        format!(" You: {} ", text)
            .truecolor(p.text.0, p.text.1, p.text.2)
            .on_truecolor(p.outgoing_bg.0, p.outgoing_bg.1, p.outgoing_bg.2)
    }

    /// One reply, one painted line per line of text. Continuation lines are
    /// indented under the speaker label.
    pub fn incoming(self, speaker: &str, text: &str) -> Vec<ColoredString> {
        let p = self.palette();
        let indent = " ".repeat(speaker.chars().count() + 3);
        text.lines()
            .enumerate()
            .map(|(i, line)| {
                let line = if i == 0 {
                    format!(" {}: {} ", speaker, line)
                } else {
                    format!("{}{} ", indent, line)
                };
                line.truecolor(p.text.0, p.text.1, p.text.2)
                    .on_truecolor(p.incoming_bg.0, p.incoming_bg.1, p.incoming_bg.2)
            })
            .collect()
    }

    /// Secondary text such as hints and the thinking indicator.
    pub fn hint(self, text: &str) -> ColoredString {
        let p = self.palette();
        text.truecolor(p.placeholder.0, p.placeholder.1, p.placeholder.2)
            .italic()
    }

    /// The input prompt marker.
    pub fn prompt(self) -> ColoredString {
        let p = self.palette();
        "> ".truecolor(p.icon.0, p.icon.1, p.icon.2).bold()
    }
}
