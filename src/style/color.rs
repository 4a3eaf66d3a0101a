//! Color parsing for computed style values.
//!
//! Three syntaxes are recognized, tried in this order: `rgb()`/`rgba()`,
//! `hsl()`/`hsla()`, then `#rgb`/`#rrggbb`. The keyword `transparent` and an all-zero
//! `rgba(0, 0, 0, 0)` both mean "no color" and parse to `None`.

use std::ops::Range;

use palette::{FromColor, Hsl, Srgb};

use crate::schema::Color;

/// Result of a single color rule that recognized its syntax.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColorToken {
    /// The value explicitly denotes the absence of a color.
    Transparent,
    Color(Color),
}

type ColorRule = fn(&str) -> Option<ColorToken>;

/// Ordered alternatives; the first rule that recognizes the input decides.
const COLOR_RULES: [ColorRule; 3] = [rgb_rule, hsl_rule, hex_rule];

/// Parse a CSS color value into a normalized RGBA record.
pub fn parse_color(input: &str) -> Option<Color> {
    let value = input.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("transparent") {
        return None;
    }
    COLOR_RULES
        .iter()
        .find_map(|rule| rule(value))
        .and_then(|token| match token {
            ColorToken::Transparent => None,
            ColorToken::Color(color) => Some(color),
        })
}

/// Locate the next color token (function or hex) at or after `from`.
///
/// Used by the gradient and shadow parsers, which embed colors in longer values.
pub fn next_color_token(input: &str, from: usize) -> Option<Range<usize>> {
    let lower = input.to_ascii_lowercase();
    let haystack = lower.get(from..)?;
    let candidates = ["rgb", "hsl", "#"];
    let (offset, prefix) = candidates
        .iter()
        .filter_map(|p| haystack.find(p).map(|idx| (idx, *p)))
        .min_by_key(|(idx, _)| *idx)?;
    let start = from + offset;

    if prefix == "#" {
        let end = start
            + 1
            + input[start + 1..]
                .bytes()
                .take_while(|b| b.is_ascii_hexdigit())
                .count();
        if end == start + 1 {
            return next_color_token(input, start + 1);
        }
        return Some(start..end);
    }

    let close = input[start..].find(')')?;
    Some(start..start + close + 1)
}

fn rgb_rule(value: &str) -> Option<ColorToken> {
    let args = function_args(value, &["rgba", "rgb"])?;
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let mut channels = [0u32; 3];
    for (slot, arg) in channels.iter_mut().zip(&args) {
        *slot = parse_unsigned(arg)?;
    }
    let alpha = match args.get(3) {
        Some(raw) => Some(parse_alpha(raw)?),
        None => None,
    };

    if channels == [0, 0, 0] && alpha == Some(0.0) {
        return Some(ColorToken::Transparent);
    }

    Some(ColorToken::Color(Color {
        r: channel(channels[0]),
        g: channel(channels[1]),
        b: channel(channels[2]),
        a: alpha.unwrap_or(1.0),
    }))
}

fn hsl_rule(value: &str) -> Option<ColorToken> {
    let args = function_args(value, &["hsla", "hsl"])?;
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let hue = parse_unsigned(args[0].strip_suffix("deg").unwrap_or(args[0]))?;
    let saturation = parse_unsigned(args[1].strip_suffix('%')?)?;
    let lightness = parse_unsigned(args[2].strip_suffix('%')?)?;
    let alpha = match args.get(3) {
        Some(raw) => parse_alpha(raw)?,
        None => 1.0,
    };

    let (r, g, b) = hsl_to_rgb(hue as f64, saturation as f64, lightness as f64);
    Some(ColorToken::Color(Color { r, g, b, a: alpha }))
}

fn hex_rule(value: &str) -> Option<ColorToken> {
    let digits = value.strip_prefix('#')?;
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let byte = |range: Range<usize>| u8::from_str_radix(expanded.get(range)?, 16).ok();
    Some(ColorToken::Color(Color {
        r: byte(0..2)? as f64 / 255.0,
        g: byte(2..4)? as f64 / 255.0,
        b: byte(4..6)? as f64 / 255.0,
        a: 1.0,
    }))
}

/// HSL (hue in degrees, saturation/lightness in percent) to sRGB fractions.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    let hsl: Hsl<palette::encoding::Srgb, f64> =
        Hsl::new(hue, saturation / 100.0, lightness / 100.0);
    let rgb: Srgb<f64> = Srgb::from_color(hsl);
    (
        rgb.red.clamp(0.0, 1.0),
        rgb.green.clamp(0.0, 1.0),
        rgb.blue.clamp(0.0, 1.0),
    )
}

/// Split `name(a, b, c / d)` into its arguments if `value` is a call to one of `names`.
fn function_args<'a>(value: &'a str, names: &[&str]) -> Option<Vec<&'a str>> {
    let open = value.find('(')?;
    let name = value[..open].trim();
    if !names.iter().any(|n| name.eq_ignore_ascii_case(n)) {
        return None;
    }
    let inner = value[open + 1..].trim_end().strip_suffix(')')?;
    Some(
        inner
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect(),
    )
}

fn parse_unsigned(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_alpha(raw: &str) -> Option<f64> {
    let (number, percent) = match raw.strip_suffix('%') {
        Some(n) => (n, true),
        None => (raw, false),
    };
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    let value: f64 = number.parse().ok()?;
    let alpha = if percent { value / 100.0 } else { value };
    Some(alpha.clamp(0.0, 1.0))
}

fn channel(value: u32) -> f64 {
    (value as f64 / 255.0).min(1.0)
}
