//! Colour scheme configuration handed to renderers.
//!
//! Themes are plain values passed to whoever renders; core keeps no
//! current-theme state.

use crate::model::palette::ColorChoice;
use crate::model::todo_list::TodoList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Resolved colours for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub text: &'static str,
    pub subtext: &'static str,
    pub background: &'static str,
    pub secondary: &'static str,
    pub icon: &'static str,
    pub button: &'static str,
    pub star: &'static str,
}

const LIGHT: Theme = Theme {
    mode: ThemeMode::Light,
    text: "#11181C",
    subtext: "#253036",
    background: "#fff",
    secondary: "rgba(41, 44, 51, 0.1)",
    icon: "#687076",
    button: "royalblue",
    star: "lightblue",
};

const DARK: Theme = Theme {
    mode: ThemeMode::Dark,
    text: "#ECEDEE",
    subtext: "#babec2",
    background: "#292c33",
    secondary: "rgba(255, 255, 255, 0.1)",
    icon: "#9BA1A6",
    button: "royalblue",
    star: "#1F314F",
};

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }

    /// Palette accent readable on this theme's background.
    pub fn accent(&self, color: ColorChoice) -> &'static str {
        match self.mode {
            ThemeMode::Light => color.dark(),
            ThemeMode::Dark => color.light(),
        }
    }

    /// Accent for a stored list, read from its denormalized fields.
    pub fn list_accent<'a>(&self, list: &'a TodoList) -> &'a str {
        match self.mode {
            ThemeMode::Light => &list.dark_color,
            ThemeMode::Dark => &list.light_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}
