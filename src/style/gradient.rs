//! `linear-gradient(...)` parsing into a gradient paint.

use std::f64::consts::PI;

use crate::schema::{ColorStop, GradientTransform, Paint};

use super::color::{next_color_token, parse_color};
use super::length::{parse_number, split_top_level};

/// Direction used when the gradient carries no readable angle (top to bottom).
pub const DEFAULT_GRADIENT_ANGLE: f64 = 180.0;

/// Parse a `background-image` value. Only linear gradients are recognized.
pub fn parse_linear_gradient(input: &str) -> Option<Paint> {
    let lower = input.to_ascii_lowercase();
    if !lower.contains("gradient") {
        return None;
    }
    let open = lower.find("linear-gradient(")? + "linear-gradient(".len();
    let close = matching_paren(input, open - 1)?;
    let args = split_top_level(&input[open..close], ',');

    let (angle, stop_args) = match args.first().and_then(|first| parse_direction(first)) {
        Some(angle) => (angle, &args[1..]),
        None => (DEFAULT_GRADIENT_ANGLE, &args[..]),
    };

    let stops = resolve_stops(stop_args);
    if stops.len() < 2 {
        return None;
    }

    Some(Paint::LinearGradient {
        gradient_stops: stops,
        gradient_transform: Some(angle_to_transform(angle)),
    })
}

/// Convert a CSS gradient angle into the gradient-space → unit-space affine transform.
pub fn angle_to_transform(angle: f64) -> GradientTransform {
    let radians = (angle - 90.0) * PI / 180.0;
    let (sin, cos) = radians.sin_cos();
    [
        [cos, sin, 0.5 - cos * 0.5 - sin * 0.5],
        [-sin, cos, 0.5 + sin * 0.5 - cos * 0.5],
    ]
}

fn parse_direction(arg: &str) -> Option<f64> {
    let arg = arg.trim().to_ascii_lowercase();
    if let Some(side) = arg.strip_prefix("to ") {
        return match side.trim() {
            "top" => Some(0.0),
            "right" => Some(90.0),
            "bottom" => Some(180.0),
            "left" => Some(270.0),
            _ => None,
        };
    }
    let number = arg.strip_suffix("deg")?;
    number.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Collect `<color> [<percent>]` stops, spreading unpositioned ones evenly.
fn resolve_stops(args: &[&str]) -> Vec<ColorStop> {
    let mut found: Vec<(crate::schema::Color, Option<f64>)> = Vec::new();
    for arg in args {
        let Some(range) = next_color_token(arg, 0) else {
            continue;
        };
        let Some(color) = parse_color(&arg[range.clone()]) else {
            continue;
        };
        let position = arg[range.end..]
            .split_whitespace()
            .next()
            .and_then(|token| token.strip_suffix('%'))
            .and_then(parse_number)
            .map(|pct| pct / 100.0);
        found.push((color, position));
    }

    let count = found.len();
    let mut previous = 0.0_f64;
    found
        .into_iter()
        .enumerate()
        .map(|(index, (color, explicit))| {
            let position = explicit.unwrap_or_else(|| {
                if count > 1 {
                    index as f64 / (count - 1) as f64
                } else {
                    0.0
                }
            });
            let position = position.clamp(0.0, 1.0).max(previous);
            previous = position;
            ColorStop { position, color }
        })
        .collect()
}

fn matching_paren(input: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in input[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}
