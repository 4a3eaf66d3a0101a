//! Text metadata and the single-line sizing heuristic.

use crate::schema::{Node, Paint, TextAlign, TextAutoResize};
use crate::style::{parse_color, parse_integer, parse_number};

use super::snapshot::{value, ComputedStyle, Rect};

/// Line height as a multiple of font size when the style leaves it unspecified.
pub const DEFAULT_LINE_HEIGHT_FACTOR: f64 = 1.2;
/// A box at most this many line heights tall is treated as a single line.
pub const SINGLE_LINE_TOLERANCE: f64 = 1.5;
pub const DEFAULT_FONT_WEIGHT: u32 = 400;

/// Typography read from a computed style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: Option<f64>,
    pub font_weight: u32,
    pub font_family: String,
    pub align: TextAlign,
    pub letter_spacing: f64,
    pub line_height: Option<f64>,
}

impl TextStyle {
    pub fn from_computed(style: &ComputedStyle) -> Self {
        let font_size = parse_number(value(&style.font_size));
        let font_weight = parse_integer(value(&style.font_weight))
            .and_then(|w| u32::try_from(w).ok())
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_FONT_WEIGHT);
        let line_height = parse_number(value(&style.line_height))
            .or_else(|| font_size.map(|size| size * DEFAULT_LINE_HEIGHT_FACTOR));

        Self {
            font_size,
            font_weight,
            font_family: first_family(value(&style.font_family)),
            align: horizontal_align(value(&style.text_align), value(&style.direction)),
            letter_spacing: parse_number(value(&style.letter_spacing)).unwrap_or(0.0),
            line_height,
        }
    }

    /// Sizing mode for a box of the given rendered height.
    pub fn auto_resize_for(&self, height: f64) -> TextAutoResize {
        match self.line_height {
            Some(line) if height <= line * SINGLE_LINE_TOLERANCE => TextAutoResize::WidthAndHeight,
            _ => TextAutoResize::Height,
        }
    }

    /// Copy the typography onto a text node and size it by its rendered height.
    pub fn apply(&self, node: &mut Node, rendered_height: f64) {
        node.font_size = self.font_size;
        node.font_weight = Some(self.font_weight);
        node.font_family = Some(self.font_family.clone());
        node.text_align_horizontal = Some(self.align);
        node.letter_spacing = Some(self.letter_spacing);
        node.line_height = self.line_height;
        node.text_auto_resize = Some(self.auto_resize_for(rendered_height));
    }
}

/// The first family of a `font-family` list, quotes stripped.
pub fn first_family(families: &str) -> String {
    families
        .split(',')
        .next()
        .unwrap_or("")
        .replace(['"', '\''], "")
        .trim()
        .to_string()
}

/// `center` wins; `right` or a right-to-left direction aligns right; anything else is left.
pub fn horizontal_align(text_align: &str, direction: &str) -> TextAlign {
    if text_align == "center" {
        TextAlign::Center
    } else if text_align == "right" || direction == "rtl" {
        TextAlign::Right
    } else {
        TextAlign::Left
    }
}

/// Build a text child for a bare run found inside a container.
///
/// The run is positioned by its own layout rectangle when the host measured one;
/// otherwise it takes the parent's box and is treated as wrapping text.
pub fn capture_text_run(
    text: &str,
    run_rect: Option<Rect>,
    parent_style: &ComputedStyle,
    parent_rect: Rect,
) -> Option<Node> {
    let rect = run_rect.unwrap_or(parent_rect);
    let mut node = Node::text(
        "text",
        text,
        rect.x - parent_rect.x,
        rect.y - parent_rect.y,
        rect.width,
        rect.height,
    )?;

    let typography = TextStyle::from_computed(parent_style);
    typography.apply(&mut node, rect.height);
    if run_rect.is_none() {
        node.text_auto_resize = Some(TextAutoResize::Height);
    }
    if let Some(color) = parse_color(value(&parent_style.color)) {
        node.fills = vec![Paint::solid(color)];
    }
    Some(node)
}
