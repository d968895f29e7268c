//! Embed color parsing.

use crate::common::error::ColorError;
use crate::common::types::Rgb;

/// Parse a `#RRGGBB` color.
///
/// A `0x` prefix is accepted too, matching how colors are commonly pasted
/// from other tools.
pub fn parse_hex_color(value: &str) -> Result<Rgb, ColorError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| invalid(value))?;

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(value));
    }

    u32::from_str_radix(digits, 16)
        .map(Rgb::from_u32)
        .map_err(|_| invalid(value))
}

fn invalid(value: &str) -> ColorError {
    ColorError::Invalid {
        value: value.to_string(),
    }
}
