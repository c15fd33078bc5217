// src/color/hex.rs
//! Hex color validation and stroke derivation.

use regex::Regex;
use std::sync::LazyLock;

/// Used whenever a configured color is missing or invalid.
pub const DEFAULT_COLOR: &str = "#808080";

/// Amount subtracted from each channel for the outline color.
pub const STROKE_DELTA: u8 = 30;

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

#[must_use]
pub fn is_valid(color: &str) -> bool {
    HEX_RE.is_match(color)
}

/// Returns `color` if valid, otherwise the built-in default.
#[must_use]
pub fn sanitize(color: Option<&str>) -> String {
    match color {
        Some(c) if is_valid(c) => c.to_string(),
        _ => DEFAULT_COLOR.to_string(),
    }
}

/// Darkens each channel by [`STROKE_DELTA`], clamped at zero.
///
/// Invalid input is treated as [`DEFAULT_COLOR`].
#[must_use]
pub fn stroke_of(color: &str) -> String {
    let [r, g, b] = channels(color)
        .or_else(|| channels(DEFAULT_COLOR))
        .unwrap_or_default();
    format!(
        "#{:02x}{:02x}{:02x}",
        r.saturating_sub(STROKE_DELTA),
        g.saturating_sub(STROKE_DELTA),
        b.saturating_sub(STROKE_DELTA)
    )
}

fn channels(color: &str) -> Option<[u8; 3]> {
    if !is_valid(color) {
        return None;
    }
    let hex = color.get(1..)?;
    let mut out = [0u8; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let pair = hex.get(i * 2..i * 2 + 2)?;
        *slot = u8::from_str_radix(pair, 16).ok()?;
    }
    Some(out)
}
