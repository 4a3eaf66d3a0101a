//! `box-shadow` and `backdrop-filter` parsing into effects.

use crate::schema::{Color, Effect, EffectKind, Offset};

use super::color::{next_color_token, parse_color};
use super::length::{parse_px, split_top_level};

/// Shadow color used when the value carries no usable color (20% black).
pub const DEFAULT_SHADOW_COLOR: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.2,
};

/// Parse the first layer of a `box-shadow` value.
///
/// Needs at least two px lengths (the x/y offsets); a third is the blur radius.
/// The `inset` keyword produces an inner shadow.
pub fn parse_box_shadow(input: &str) -> Option<Effect> {
    let value = input.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return None;
    }
    let layer = split_top_level(value, ',').into_iter().next()?;

    let (color, rest) = match next_color_token(layer, 0) {
        Some(range) => {
            let color = parse_color(&layer[range.clone()]);
            let rest = format!("{} {}", &layer[..range.start], &layer[range.end..]);
            (color, rest)
        }
        None => (None, layer.to_string()),
    };

    let inset = rest
        .split_whitespace()
        .any(|token| token.eq_ignore_ascii_case("inset"));
    let lengths: Vec<f64> = rest.split_whitespace().filter_map(parse_px).collect();
    if lengths.len() < 2 {
        return None;
    }

    Some(Effect {
        kind: if inset {
            EffectKind::InnerShadow
        } else {
            EffectKind::DropShadow
        },
        color: Some(color.unwrap_or(DEFAULT_SHADOW_COLOR)),
        offset: Some(Offset {
            x: lengths[0],
            y: lengths[1],
        }),
        radius: lengths.get(2).copied().unwrap_or(0.0).max(0.0),
        visible: true,
        blend_mode: None,
    })
}

/// Parse a `backdrop-filter` value; only the `blur(<px>)` function is recognized.
pub fn parse_backdrop_blur(input: &str) -> Option<Effect> {
    let lower = input.to_ascii_lowercase();
    let start = lower.find("blur(")? + "blur(".len();
    let end = start + lower[start..].find(')')?;
    let radius = parse_px(&input[start..end])?;
    if radius < 0.0 {
        return None;
    }
    Some(Effect::background_blur(radius))
}
