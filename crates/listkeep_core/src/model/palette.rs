//! Fixed colour palette for lists.
//!
//! Each entry carries the three denormalized attributes written onto a
//! list record (`colorId`, `darkColor`, `lightColor`) so rendering never
//! needs a palette lookup.

use serde::{Deserialize, Serialize};

/// One of the four selectable list colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorChoice {
    #[default]
    Red,
    Green,
    Blue,
    Purple,
}

impl ColorChoice {
    /// All palette entries in selection order.
    pub const ALL: [ColorChoice; 4] = [
        ColorChoice::Red,
        ColorChoice::Green,
        ColorChoice::Blue,
        ColorChoice::Purple,
    ];

    /// Stable id persisted as `colorId`.
    pub fn color_id(self) -> &'static str {
        match self {
            Self::Red => "1",
            Self::Green => "2",
            Self::Blue => "3",
            Self::Purple => "4",
        }
    }

    /// Strong variant, used as the accent on light backgrounds.
    pub fn dark(self) -> &'static str {
        match self {
            Self::Red => "darkred",
            Self::Green => "darkgreen",
            Self::Blue => "darkblue",
            Self::Purple => "rebeccapurple",
        }
    }

    /// Soft variant, used as the accent on dark backgrounds.
    pub fn light(self) -> &'static str {
        match self {
            Self::Red => "lightcoral",
            Self::Green => "lightgreen",
            Self::Blue => "lightskyblue",
            Self::Purple => "plum",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
        }
    }

    /// Resolves a persisted `colorId`.
    pub fn from_color_id(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.color_id() == value.trim())
    }

    /// Parses a user-facing colour name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|choice| choice.name() == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::ColorChoice;
    use std::collections::HashSet;

    #[test]
    fn color_ids_are_unique_and_resolvable() {
        let ids: HashSet<_> = ColorChoice::ALL.iter().map(|c| c.color_id()).collect();
        assert_eq!(ids.len(), ColorChoice::ALL.len());
        for choice in ColorChoice::ALL {
            assert_eq!(ColorChoice::from_color_id(choice.color_id()), Some(choice));
        }
        assert_eq!(ColorChoice::from_color_id("9"), None);
    }

    #[test]
    fn parse_accepts_mixed_case_names() {
        assert_eq!(ColorChoice::parse(" Purple "), Some(ColorChoice::Purple));
        assert_eq!(ColorChoice::parse("teal"), None);
    }
}
