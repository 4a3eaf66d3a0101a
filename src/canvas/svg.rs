//! Vector markup to scene objects.
//!
//! Only what the reconstruction engine touches is modeled: the overall size, the
//! group structure, and the fill and stroke of every drawable primitive. Path data
//! is not interpreted.

use roxmltree::{Document, Node as XmlNode};

use crate::reconstruct::scene::FrameProps;
use crate::reconstruct::{HostError, NativePaint, Rgb, SceneKind, SceneNode, ShapeStyle};
use crate::schema::Color;
use crate::style::{parse_color, parse_number};

pub const DEFAULT_SVG_SIZE: f64 = 24.0;

const SHAPES: [&str; 7] = [
    "path", "rect", "circle", "ellipse", "line", "polyline", "polygon",
];

/// Inherited painting properties.
#[derive(Debug, Clone, Copy)]
struct PaintState {
    fill: Option<Color>,
    stroke: Option<Color>,
    fill_opacity: f64,
    stroke_opacity: f64,
    opacity: f64,
    stroke_width: f64,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Some(Color::rgba(0.0, 0.0, 0.0, 1.0)),
            stroke: None,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            opacity: 1.0,
            stroke_width: 1.0,
        }
    }
}

impl PaintState {
    fn inherit(&self, element: XmlNode<'_, '_>) -> Self {
        let mut next = *self;
        if let Some(value) = property(element, "fill") {
            next.fill = svg_paint(&value);
        }
        if let Some(value) = property(element, "stroke") {
            next.stroke = svg_paint(&value);
        }
        if let Some(v) = property(element, "fill-opacity").and_then(|v| parse_number(&v)) {
            next.fill_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = property(element, "stroke-opacity").and_then(|v| parse_number(&v)) {
            next.stroke_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = property(element, "stroke-width").and_then(|v| parse_number(&v)) {
            next.stroke_width = v.max(0.0);
        }
        // Group opacity multiplies down the tree.
        if let Some(v) = property(element, "opacity").and_then(|v| parse_number(&v)) {
            next.opacity *= v.clamp(0.0, 1.0);
        }
        next
    }

    fn style(&self) -> ShapeStyle {
        let paint = |color: Color, opacity: f64| {
            NativePaint::solid(Rgb::from(color), color.a * opacity * self.opacity)
        };
        ShapeStyle {
            fills: self
                .fill
                .map(|c| paint(c, self.fill_opacity))
                .into_iter()
                .collect(),
            strokes: self
                .stroke
                .map(|c| paint(c, self.stroke_opacity))
                .into_iter()
                .collect(),
            stroke_weight: if self.stroke.is_some() {
                self.stroke_width
            } else {
                0.0
            },
            corner_radius: 0.0,
        }
    }
}

/// Parse markup into a frame holding the drawable tree.
pub fn svg_to_scene(markup: &str) -> Result<SceneNode, HostError> {
    let document =
        Document::parse(markup).map_err(|err| HostError::InvalidSvg(err.to_string()))?;
    let root = document.root_element();
    if root.tag_name().name() != "svg" {
        return Err(HostError::InvalidSvg(format!(
            "expected <svg> root, found <{}>",
            root.tag_name().name()
        )));
    }

    let (width, height) = svg_size(root);
    let state = PaintState::default().inherit(root);
    let props = FrameProps {
        children: convert_children(root, &state, (width, height)),
        ..FrameProps::default()
    };
    let mut frame = SceneNode::new("svg", SceneKind::Frame(props));
    frame.resize(width, height);
    Ok(frame)
}

fn convert_children(parent: XmlNode<'_, '_>, state: &PaintState, size: (f64, f64)) -> Vec<SceneNode> {
    parent
        .children()
        .filter(XmlNode::is_element)
        .filter_map(|child| convert(child, state, size))
        .collect()
}

fn convert(element: XmlNode<'_, '_>, parent: &PaintState, size: (f64, f64)) -> Option<SceneNode> {
    let tag = element.tag_name().name();
    let state = parent.inherit(element);
    if tag == "g" {
        let children = convert_children(element, &state, size);
        let mut group = SceneNode::new("Group", SceneKind::Group { children });
        group.resize(size.0, size.1);
        return Some(group);
    }
    if !SHAPES.contains(&tag) {
        return None;
    }

    let (x, y, width, height) = shape_bounds(element, size);
    let mut vector = SceneNode::new("Vector", SceneKind::Vector(state.style()));
    vector.set_position(x, y);
    vector.resize(width, height);
    Some(vector)
}

/// Box of a primitive; path data is not measured, so paths span the whole canvas.
fn shape_bounds(element: XmlNode<'_, '_>, size: (f64, f64)) -> (f64, f64, f64, f64) {
    let num = |name: &str| {
        element
            .attribute(name)
            .and_then(parse_number)
            .unwrap_or(0.0)
    };
    match element.tag_name().name() {
        "rect" => (num("x"), num("y"), num("width"), num("height")),
        "circle" => {
            let r = num("r");
            (num("cx") - r, num("cy") - r, 2.0 * r, 2.0 * r)
        }
        "ellipse" => {
            let (rx, ry) = (num("rx"), num("ry"));
            (num("cx") - rx, num("cy") - ry, 2.0 * rx, 2.0 * ry)
        }
        "line" => points_bounds(&[(num("x1"), num("y1")), (num("x2"), num("y2"))]),
        "polyline" | "polygon" => {
            let coords: Vec<f64> = element
                .attribute("points")
                .unwrap_or("")
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter_map(|t| t.parse().ok())
                .collect();
            let points: Vec<(f64, f64)> = coords.chunks_exact(2).map(|p| (p[0], p[1])).collect();
            points_bounds(&points)
        }
        _ => (0.0, 0.0, size.0, size.1),
    }
}

fn points_bounds(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    let Some(&(x0, y0)) = points.first() else {
        return (0.0, 0.0, 0.0, 0.0);
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
    for &(x, y) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (min_x, min_y, max_x - min_x, max_y - min_y)
}

/// `width`/`height` attributes, else the `viewBox` extent, else 24.
fn svg_size(root: XmlNode<'_, '_>) -> (f64, f64) {
    let view_box: Vec<f64> = root
        .attribute("viewBox")
        .unwrap_or("")
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|t| t.parse().ok())
        .collect();
    let from_view_box = |index: usize| view_box.get(index).copied().filter(|_| view_box.len() == 4);
    let extent = |attr: &str, index: usize| {
        root.attribute(attr)
            .and_then(parse_number)
            .filter(|v| *v > 0.0)
            .or_else(|| from_view_box(index).filter(|v| *v > 0.0))
            .unwrap_or(DEFAULT_SVG_SIZE)
    };
    (extent("width", 2), extent("height", 3))
}

/// A property from the `style` attribute, else the presentation attribute.
fn property(element: XmlNode<'_, '_>, name: &str) -> Option<String> {
    let from_style = element.attribute("style").and_then(|style| {
        style.split(';').find_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
    });
    from_style.or_else(|| element.attribute(name).map(|v| v.trim().to_string()))
}

/// `none` and unrecognized paints draw nothing; `currentColor` resolves to black.
fn svg_paint(value: &str) -> Option<Color> {
    if value.eq_ignore_ascii_case("currentcolor") {
        return Some(Color::rgba(0.0, 0.0, 0.0, 1.0));
    }
    match value {
        "none" => None,
        "black" => Some(Color::rgba(0.0, 0.0, 0.0, 1.0)),
        "white" => Some(Color::WHITE),
        other => parse_color(other),
    }
}
