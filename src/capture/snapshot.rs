//! Styled tree snapshot types.
//!
//! These types represent a rendered page as the capture engine sees it: elements
//! with their layout rectangles and raw computed-style strings, bare text runs, and
//! opaque inline SVG elements. They are produced by the browser adapter's page script
//! and can be saved and replayed as JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A snapshot of a rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// The URL of the captured page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The `<body>` element
    pub body: StyledElement,
}

/// Layout rectangle in absolute page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An element with its rendered box and computed style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledElement {
    /// Tag name (e.g., "div", "img")
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Attributes the capture reads (src, data-lucide, aria-label, ...)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    pub rect: Rect,
    #[serde(default)]
    pub style: ComputedStyle,
    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StyledChild>,
}

impl StyledElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The text of the element when its only child is a single text run.
    pub fn sole_text(&self) -> Option<&TextRun> {
        match self.children.as_slice() {
            [StyledChild::Text(run)] => Some(run),
            _ => None,
        }
    }
}

/// A child node of an element.
///
/// `Other` stands for any child the capture does not draw (comments, whitespace-only
/// text, script/style elements). It is kept so that an element whose text sits next
/// to such a node is not mistaken for a text-only element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StyledChild {
    Element(StyledElement),
    Text(TextRun),
    Svg(SvgElement),
    Other,
}

/// A bare text run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    /// The run's own layout rectangle, if the host could measure it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
}

/// An inline SVG element, carried as serialized markup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SvgElement {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    pub rect: Rect,
    #[serde(default)]
    pub style: ComputedStyle,
    pub markup: String,
}

/// Raw computed-style strings, as the browser reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedStyle {
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub clip: Option<String>,
    pub clip_path: Option<String>,
    pub background_color: Option<String>,
    pub background_image: Option<String>,
    pub border_top_width: Option<String>,
    pub border_top_color: Option<String>,
    pub border_top_style: Option<String>,
    pub border_right_width: Option<String>,
    pub border_right_color: Option<String>,
    pub border_right_style: Option<String>,
    pub border_bottom_width: Option<String>,
    pub border_bottom_color: Option<String>,
    pub border_bottom_style: Option<String>,
    pub border_left_width: Option<String>,
    pub border_left_color: Option<String>,
    pub border_left_style: Option<String>,
    pub border_radius: Option<String>,
    pub box_shadow: Option<String>,
    pub backdrop_filter: Option<String>,
    pub color: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub font_family: Option<String>,
    pub text_align: Option<String>,
    pub direction: Option<String>,
    pub letter_spacing: Option<String>,
    pub line_height: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

/// Accessor for an optional style string, empty when unset.
pub(crate) fn value(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}
