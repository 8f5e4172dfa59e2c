//! Brick Colors
//!
//! Color themes for the brick palette. Each theme has eight slots; the
//! selected color follows its slot when the theme changes.

use serde::{Deserialize, Serialize};

/// Number of color slots per theme (number keys 1-8).
pub const PALETTE_SIZE: usize = 8;

/// Color used before any selection is made or restored.
pub const DEFAULT_COLOR: &str = "#FF3333";

const DEFAULT_PALETTE: [&str; PALETTE_SIZE] = [
    "#FF3333", // Red
    "#FF9933", // Orange
    "#FFCC33", // Yellow
    "#33CC66", // Green
    "#33CCFF", // Light Blue
    "#3366CC", // Dark Blue
    "#9933CC", // Purple
    "#222222", // Black
];

const MUTED_PALETTE: [&str; PALETTE_SIZE] = [
    "#CC6666", "#CC9966", "#CCCC66", "#66CC99", "#66CCCC", "#6699CC", "#9966CC", "#444444",
];

const MONOCHROME_PALETTE: [&str; PALETTE_SIZE] = [
    "#FFFFFF", "#DDDDDD", "#BBBBBB", "#999999", "#777777", "#555555", "#333333", "#111111",
];

/// Palette theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Default,
    Muted,
    Monochrome,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 3] = [ColorTheme::Default, ColorTheme::Muted, ColorTheme::Monochrome];

    /// The eight colors of this theme.
    pub fn colors(&self) -> &'static [&'static str; PALETTE_SIZE] {
        match self {
            ColorTheme::Default => &DEFAULT_PALETTE,
            ColorTheme::Muted => &MUTED_PALETTE,
            ColorTheme::Monochrome => &MONOCHROME_PALETTE,
        }
    }

    /// Color in the given slot (0-7).
    pub fn color(&self, slot: usize) -> Option<&'static str> {
        self.colors().get(slot).copied()
    }

    /// Next theme in the cycle.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Default => ColorTheme::Muted,
            ColorTheme::Muted => ColorTheme::Monochrome,
            ColorTheme::Monochrome => ColorTheme::Default,
        }
    }

    /// Map a color from any theme to the same slot of this theme.
    ///
    /// Unknown colors fall back to the first slot.
    pub fn remap(&self, color: &str) -> &'static str {
        let slot = ColorTheme::ALL
            .iter()
            .find_map(|theme| theme.colors().iter().position(|c| c.eq_ignore_ascii_case(color)))
            .unwrap_or(0);
        self.colors()[slot]
    }
}

/// Lighten a `#RRGGBB` color toward white by `percent` (0-100).
///
/// Returns `None` for malformed input.
pub fn lighten_color(color: &str, percent: f32) -> Option<String> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| -> Option<u8> {
        let value = u8::from_str_radix(hex.get(range)?, 16).ok()?;
        let lifted = value as f32 + (255.0 - value as f32) * (percent.clamp(0.0, 100.0) / 100.0);
        Some(lifted.floor().min(255.0) as u8)
    };

    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle() {
        assert_eq!(ColorTheme::Default.next(), ColorTheme::Muted);
        assert_eq!(ColorTheme::Muted.next(), ColorTheme::Monochrome);
        assert_eq!(ColorTheme::Monochrome.next(), ColorTheme::Default);
    }

    #[test]
    fn test_remap_keeps_slot() {
        assert_eq!(ColorTheme::Muted.remap("#33CC66"), "#66CC99");
        assert_eq!(ColorTheme::Default.remap("#111111"), "#222222");
        assert_eq!(ColorTheme::Monochrome.remap("#abcdef"), "#FFFFFF");
    }

    #[test]
    fn test_color_slots() {
        assert_eq!(ColorTheme::Default.color(0), Some(DEFAULT_COLOR));
        assert_eq!(ColorTheme::Default.color(8), None);
    }

    #[test]
    fn test_lighten_color() {
        assert_eq!(lighten_color("#000000", 50.0).as_deref(), Some("#7f7f7f"));
        assert_eq!(lighten_color("#FF3333", 0.0).as_deref(), Some("#ff3333"));
        assert_eq!(lighten_color("#123456", 100.0).as_deref(), Some("#ffffff"));
        assert!(lighten_color("#12", 10.0).is_none());
        assert!(lighten_color("#zzzzzz", 10.0).is_none());
    }
}
