//! Shared types used across the application.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied variable mapping for template expansion.
///
/// Keys are matched exactly (case-sensitive).
pub type Variables = HashMap<String, String>;

/// An RGB color for embed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Neutral gray used whenever a configured color cannot be parsed.
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value; the top byte is ignored.
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Structured replacement produced for a matched line.
///
/// An embed-only message has an empty `plain_text`. A plain message has no
/// title, description or color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementMessage {
    /// Plain-text body (empty for embed-only messages).
    pub plain_text: String,
    /// Embed title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Embed description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Embed color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

impl ReplacementMessage {
    /// Create a plain-text message.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            ..Self::default()
        }
    }

    /// Whether this message carries embed data.
    pub fn is_embed(&self) -> bool {
        self.color.is_some() || self.title.is_some() || self.description.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_packing() {
        let color = Rgb::from_u32(0xFFD700);
        assert_eq!(color, Rgb::new(0xFF, 0xD7, 0x00));
        assert_eq!(color.to_u32(), 0xFFD700);
        assert_eq!(color.to_string(), "#FFD700");
    }

    #[test]
    fn test_gray_is_neutral() {
        assert_eq!(Rgb::GRAY.to_string(), "#808080");
    }

    #[test]
    fn test_plain_message_is_not_embed() {
        let msg = ReplacementMessage::plain("hello");
        assert!(!msg.is_embed());
        assert_eq!(msg.plain_text, "hello");
    }
}
