//! Opaque capture of inline SVG elements.

use crate::schema::{Node, Paint, Stroke};
use crate::style::parse_color;

use super::snapshot::{value, Rect, SvgElement};
use super::MIN_VISIBLE_EXTENT;

const SVG_NAMESPACE_DECL: &str = r#"xmlns="http://www.w3.org/2000/svg""#;

/// Capture an SVG element as a vector node positioned relative to `parent_rect`.
///
/// The markup is carried verbatim; its internals are not interpreted.
pub fn capture_svg(svg: &SvgElement, parent_rect: Rect) -> Option<Node> {
    let rect = svg.rect;
    if rect.width <= MIN_VISIBLE_EXTENT || rect.height <= MIN_VISIBLE_EXTENT {
        return None;
    }

    let name = svg
        .attributes
        .get("data-lucide")
        .or_else(|| svg.attributes.get("aria-label"))
        .cloned()
        .unwrap_or_else(|| "svg".to_string());

    let mut node = Node::vector(
        name,
        with_namespace(&svg.markup),
        rect.x - parent_rect.x,
        rect.y - parent_rect.y,
        rect.width,
        rect.height,
    );

    let fill = value(&svg.style.fill);
    if fill != "none" {
        if let Some(color) = parse_color(fill).or_else(|| parse_color(value(&svg.style.color))) {
            node.fills.push(Paint::solid(color));
        }
    }

    let stroke = value(&svg.style.stroke);
    if stroke != "none" {
        if let Some(color) = parse_color(stroke) {
            node.strokes.push(Stroke::solid(color, None));
        }
    }

    Some(node)
}

/// Declare the SVG namespace on the root tag when the serializer left it out.
pub fn with_namespace(markup: &str) -> String {
    if markup.contains("xmlns=") {
        return markup.to_string();
    }
    markup.replacen("<svg", &format!("<svg {SVG_NAMESPACE_DECL}"), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::snapshot::ComputedStyle;
    use std::collections::HashMap;

    fn icon(width: f64, height: f64, fill: &str, stroke: &str) -> SvgElement {
        SvgElement {
            attributes: HashMap::from([("data-lucide".to_string(), "search".to_string())]),
            rect: Rect::new(40.0, 30.0, width, height),
            style: ComputedStyle {
                fill: Some(fill.into()),
                stroke: Some(stroke.into()),
                color: Some("rgb(0, 128, 0)".into()),
                ..Default::default()
            },
            markup: r#"<svg viewBox="0 0 24 24"><path d="M0 0L24 24" stroke="currentColor"/></svg>"#
                .into(),
        }
    }

    #[test]
    fn captures_markup_with_namespace_and_relative_position() {
        let node = capture_svg(&icon(24.0, 24.0, "none", "rgb(0, 128, 0)"), Rect::new(10.0, 10.0, 100.0, 100.0))
            .expect("vector");
        assert_eq!(node.name, "search");
        assert_eq!((node.x, node.y), (30.0, 20.0));
        let markup = node.svg_content.expect("markup");
        assert!(markup.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox"#));
        assert!(node.fills.is_empty(), "fill none must not produce a fill");
        assert_eq!(node.strokes.len(), 1);
    }

    #[test]
    fn fill_falls_back_to_text_color() {
        let node = capture_svg(&icon(24.0, 24.0, "currentcolor", "none"), Rect::default())
            .expect("vector");
        let color = node.first_solid_color().expect("fill color");
        assert!((color.g - 128.0 / 255.0).abs() < 1e-9);
        assert!(node.strokes.is_empty());
    }

    #[test]
    fn tiny_svgs_are_skipped() {
        assert!(capture_svg(&icon(1.0, 24.0, "none", "none"), Rect::default()).is_none());
        assert!(capture_svg(&icon(24.0, 0.5, "none", "none"), Rect::default()).is_none());
    }

    #[test]
    fn existing_namespace_is_left_alone() {
        let markup = r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
        assert_eq!(with_namespace(markup), markup);
    }
}
