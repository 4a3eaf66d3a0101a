//! Border decomposition: one uniform stroke, or a band rectangle per visible side.

use crate::schema::{Node, Paint, Stroke};
use crate::style::{parse_color, parse_number};

use super::snapshot::{value, ComputedStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    fn label(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

/// The width/color/style triple of one border side.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderSide<'a> {
    pub width: f64,
    pub color: &'a str,
    pub style: &'a str,
}

impl BorderSide<'_> {
    fn is_drawn(&self) -> bool {
        self.width > 0.0 && self.style != "none"
    }
}

/// How a node's border is represented in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum BorderDecomposition {
    /// No visible border.
    None,
    /// All four sides match: a single stroke.
    Uniform(Stroke),
    /// Sides differ: one band rectangle per drawn side.
    Sides(Vec<Node>),
}

pub fn border_side(style: &ComputedStyle, side: Side) -> BorderSide<'_> {
    let (width, color, line) = match side {
        Side::Top => (
            &style.border_top_width,
            &style.border_top_color,
            &style.border_top_style,
        ),
        Side::Right => (
            &style.border_right_width,
            &style.border_right_color,
            &style.border_right_style,
        ),
        Side::Bottom => (
            &style.border_bottom_width,
            &style.border_bottom_color,
            &style.border_bottom_style,
        ),
        Side::Left => (
            &style.border_left_width,
            &style.border_left_color,
            &style.border_left_style,
        ),
    };
    BorderSide {
        width: parse_number(value(width)).unwrap_or(0.0),
        color: value(color),
        style: value(line),
    }
}

/// Decompose the border of a `width × height` box.
pub fn decompose_borders(style: &ComputedStyle, width: f64, height: f64) -> BorderDecomposition {
    let sides = Side::ALL.map(|side| (side, border_side(style, side)));
    let first = &sides[0].1;
    let uniform = sides.iter().all(|(_, s)| s == first);

    if uniform {
        if !first.is_drawn() {
            return BorderDecomposition::None;
        }
        return match parse_color(first.color) {
            Some(color) => BorderDecomposition::Uniform(Stroke::solid(color, Some(first.width))),
            None => BorderDecomposition::None,
        };
    }

    let bands: Vec<Node> = sides
        .iter()
        .filter(|(_, s)| s.is_drawn())
        .filter_map(|(side, s)| {
            let color = parse_color(s.color)?;
            let mut band = side_band(*side, s.width, width, height);
            band.fills.push(Paint::solid(color));
            Some(band)
        })
        .collect();

    if bands.is_empty() {
        BorderDecomposition::None
    } else {
        BorderDecomposition::Sides(bands)
    }
}

/// The rectangle covering one border band of a `width × height` box.
fn side_band(side: Side, thickness: f64, width: f64, height: f64) -> Node {
    let name = format!("border-{}", side.label());
    match side {
        Side::Top => Node::rectangle(name, 0.0, 0.0, width, thickness),
        Side::Bottom => Node::rectangle(name, 0.0, height - thickness, width, thickness),
        Side::Left => Node::rectangle(name, 0.0, 0.0, thickness, height),
        Side::Right => Node::rectangle(name, width - thickness, 0.0, thickness, height),
    }
}
