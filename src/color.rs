//! Color specifications for grid cells.
//!
//! Cells hold opaque [`Color32`] values. Strings coming from configuration
//! files or palette definitions are validated here before they can reach
//! the grid.

use egui::Color32;

use crate::error::{CanvasError, CanvasResult};

/// Parse a color specification into an opaque color.
///
/// Accepted forms are `#RGB`, `#RRGGBB` and `rgb(r, g, b)` with channels
/// in `0..=255`. Surrounding whitespace and letter case are ignored.
pub fn parse_color(spec: &str) -> CanvasResult<Color32> {
    let trimmed = spec.trim();
    let lower = trimmed.to_ascii_lowercase();

    let parsed = if let Some(hex) = lower.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some(args) = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        parse_rgb_args(args)
    } else {
        None
    };

    parsed.ok_or_else(|| CanvasError::InvalidColor(spec.to_owned()))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (channel, digit) in channels.iter_mut().zip(hex.chars()) {
                let value = digit.to_digit(16)? as u8;
                *channel = value * 16 + value;
            }
            Some(Color32::from_rgb(channels[0], channels[1], channels[2]))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color32> {
    let channels: Vec<u8> = args
        .split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<_>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(Color32::from_rgb(*r, *g, *b)),
        _ => None,
    }
}

/// Format a color as `#RRGGBB`
pub fn to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

/// The opaque inverse of `color`, used to outline the hovered cell so the
/// outline stays visible on any background.
pub fn invert(color: Color32) -> Color32 {
    Color32::from_rgb(255 - color.r(), 255 - color.g(), 255 - color.b())
}
