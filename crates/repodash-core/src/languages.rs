use serde::{Deserialize, Serialize};

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

/// Used for any language not in the table
pub const DEFAULT_LANGUAGE_COLOR: Color = Color::rgb(0xcccccc);

const LANGUAGE_COLORS: &[(&str, Color)] = &[
    ("JavaScript", Color::rgb(0xf1e05a)),
    ("Python", Color::rgb(0x3572a5)),
    ("Java", Color::rgb(0xb07219)),
    ("HTML", Color::rgb(0xe34c26)),
    ("CSS", Color::rgb(0x563d7c)),
    ("TypeScript", Color::rgb(0x2b7489)),
    ("C", Color::rgb(0x555555)),
    ("C++", Color::rgb(0xf34b7d)),
    ("Ruby", Color::rgb(0x701516)),
];

/// Dot color for a language label. Lookup is exact, as GitHub reports it.
pub fn language_color(language: &str) -> Color {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(language_color("JavaScript"), Color { r: 0xf1, g: 0xe0, b: 0x5a });
        assert_eq!(language_color("C++"), Color::rgb(0xf34b7d));
        assert_eq!(language_color("C"), Color::rgb(0x555555));
    }

    #[test]
    fn test_unknown_language_is_neutral() {
        assert_eq!(language_color("Rust"), DEFAULT_LANGUAGE_COLOR);
        assert_eq!(language_color("java"), DEFAULT_LANGUAGE_COLOR);
        assert_eq!(language_color(""), DEFAULT_LANGUAGE_COLOR);
    }
}
