//! Capture: styled page snapshot → design document.
//!
//! A depth-first, order-preserving walk over a [`PageSnapshot`]. Each element is
//! filtered for visibility, classified (text, image, or frame), given paints, border
//! strokes or border bands, effects, and typography, then its children are captured
//! relative to its own box.
//!
//! Nothing in this module returns an error. An element that is invisible or yields
//! no content is simply left out of its parent's children.

pub mod borders;
pub mod snapshot;
pub mod text;
pub mod vector;

pub use borders::{decompose_borders, BorderDecomposition, Side};
pub use snapshot::{ComputedStyle, PageSnapshot, Rect, StyledChild, StyledElement, SvgElement, TextRun};
pub use text::{capture_text_run, TextStyle};
pub use vector::capture_svg;

use tracing::debug;

use crate::schema::{Color, Node, Paint};
use crate::style::{
    parse_backdrop_blur, parse_box_shadow, parse_color, parse_corner_radius, parse_linear_gradient,
};

use snapshot::value;

/// Boxes this size or smaller in either dimension are not rendered content.
pub const MIN_VISIBLE_EXTENT: f64 = 1.0;
/// Fill given to images that have no background paint of their own.
pub const IMAGE_PLACEHOLDER: Color = Color::rgba(0.9, 0.9, 0.9, 1.0);
pub const DEFAULT_PAGE_NAME: &str = "Exported Page";

/// Capture a whole page. The root frame sits at the origin and is sized to the body.
pub fn capture_page(snapshot: &PageSnapshot) -> Node {
    let body = &snapshot.body;
    let name = snapshot
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_PAGE_NAME);

    let mut root = Node::frame(name, 0.0, 0.0, body.rect.width, body.rect.height);
    let background = parse_color(value(&body.style.background_color))
        .filter(|c| c.a > 0.0)
        .unwrap_or(Color::WHITE);
    root.fills.push(Paint::solid(background));
    root.children = capture_children(body);
    root
}

/// Capture one element relative to its parent's box.
pub fn capture_element(element: &StyledElement, parent_rect: Rect) -> Option<Node> {
    let rect = element.rect;
    if !is_visible(&element.style, rect) {
        debug!(tag = %element.tag, "skipping invisible element");
        return None;
    }

    let style = &element.style;
    let is_image = element.tag.eq_ignore_ascii_case("img");
    let text = element
        .sole_text()
        .filter(|_| !is_image)
        .map(|run| run.text.trim())
        .filter(|t| !t.is_empty());
    let (x, y) = (rect.x - parent_rect.x, rect.y - parent_rect.y);

    let mut node = match text {
        Some(characters) => Node::text(element_name(element), characters, x, y, rect.width, rect.height)?,
        None if is_image => Node::rectangle(image_name(element), x, y, rect.width, rect.height),
        None => Node::frame(element_name(element), x, y, rect.width, rect.height),
    };

    if let Some(color) = parse_color(value(&style.background_color)) {
        if color.is_visible_fill() {
            node.fills.push(Paint::solid(color));
        }
    }
    if let Some(gradient) = parse_linear_gradient(value(&style.background_image)) {
        node.fills.push(gradient);
    }
    if is_image && node.fills.is_empty() {
        node.fills.push(Paint::solid(IMAGE_PLACEHOLDER));
    }

    let radius = parse_corner_radius(value(&style.border_radius));
    if radius > 0.0 {
        node.corner_radius = Some(radius);
    }

    if let Some(shadow) = parse_box_shadow(value(&style.box_shadow)) {
        node.effects.push(shadow);
    }
    if let Some(blur) = parse_backdrop_blur(value(&style.backdrop_filter)) {
        node.effects.push(blur);
    }

    match decompose_borders(style, rect.width, rect.height) {
        BorderDecomposition::Uniform(stroke) => node.strokes.push(stroke),
        BorderDecomposition::Sides(bands) if text.is_none() => node.children.extend(bands),
        _ => {}
    }

    if text.is_some() {
        TextStyle::from_computed(style).apply(&mut node, rect.height);
        if let Some(color) = parse_color(value(&style.color)) {
            node.fills = vec![Paint::solid(color)];
        }
    } else if !is_image {
        node.children.extend(capture_children(element));
    }

    Some(node)
}

/// Capture every child of a container, in document order, relative to its box.
pub fn capture_children(element: &StyledElement) -> Vec<Node> {
    element
        .children
        .iter()
        .filter_map(|child| match child {
            StyledChild::Element(el) => capture_element(el, element.rect),
            StyledChild::Svg(svg) => capture_svg(svg, element.rect),
            StyledChild::Text(run) => capture_text_run(&run.text, run.rect, &element.style, element.rect),
            StyledChild::Other => None,
        })
        .collect()
}

/// The visibility filter: hidden, degenerate, or screen-reader-only boxes are skipped.
pub fn is_visible(style: &ComputedStyle, rect: Rect) -> bool {
    if value(&style.display) == "none" || value(&style.visibility) == "hidden" {
        return false;
    }
    if rect.width <= MIN_VISIBLE_EXTENT || rect.height <= MIN_VISIBLE_EXTENT {
        return false;
    }
    let clip: String = value(&style.clip).chars().filter(|c| !c.is_whitespace()).collect();
    if clip == "rect(1px,1px,1px,1px)" {
        return false;
    }
    !value(&style.clip_path).contains("inset(50%)")
}

/// First class token, else the id, else the lowercase tag.
fn element_name(element: &StyledElement) -> String {
    element
        .class_name
        .as_deref()
        .and_then(|classes| classes.split_whitespace().next())
        .or_else(|| element.id.as_deref().filter(|id| !id.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| element.tag.to_ascii_lowercase())
}

fn image_name(element: &StyledElement) -> String {
    match element.attribute("src") {
        Some(src) if !src.is_empty() => {
            format!("IMG: {}", src.rsplit('/').next().unwrap_or(src))
        }
        _ => element_name(element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EffectKind, NodeType, TextAutoResize};
    use std::collections::HashMap;

    fn element(tag: &str, rect: Rect) -> StyledElement {
        StyledElement {
            tag: tag.into(),
            rect,
            style: ComputedStyle {
                display: Some("block".into()),
                visibility: Some("visible".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn text_child(text: &str) -> StyledChild {
        StyledChild::Text(TextRun {
            text: text.into(),
            rect: None,
        })
    }

    #[test]
    fn one_by_one_is_excluded_and_two_by_two_included() {
        let origin = Rect::default();
        let tiny = element("div", Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(capture_element(&tiny, origin).is_none());
        let small = element("div", Rect::new(0.0, 0.0, 2.0, 2.0));
        assert!(capture_element(&small, origin).is_some());
    }

    #[test]
    fn hidden_and_screen_reader_only_are_excluded() {
        let rect = Rect::new(0.0, 0.0, 50.0, 50.0);
        let mut hidden = element("div", rect);
        hidden.style.display = Some("none".into());
        assert!(!is_visible(&hidden.style, rect));

        let mut invisible = element("div", rect);
        invisible.style.visibility = Some("hidden".into());
        assert!(!is_visible(&invisible.style, rect));

        let mut clipped = element("span", rect);
        clipped.style.clip = Some("rect(1px, 1px, 1px, 1px)".into());
        assert!(!is_visible(&clipped.style, rect));

        let mut inset = element("span", rect);
        inset.style.clip_path = Some("inset(50%)".into());
        assert!(!is_visible(&inset.style, rect));
    }

    #[test]
    fn sole_text_child_becomes_text_node() {
        let mut p = element("p", Rect::new(20.0, 30.0, 200.0, 22.0));
        p.class_name = Some("lead muted".into());
        p.style.font_size = Some("16px".into());
        p.style.line_height = Some("22px".into());
        p.style.color = Some("rgb(255, 0, 0)".into());
        p.style.background_color = Some("rgb(0, 0, 255)".into());
        p.children.push(text_child("  Hello world "));

        let node = capture_element(&p, Rect::new(10.0, 10.0, 500.0, 500.0)).expect("text");
        assert_eq!(node.node_type, NodeType::Text);
        assert_eq!(node.name, "lead");
        assert_eq!((node.x, node.y), (10.0, 20.0));
        assert_eq!(node.characters.as_deref(), Some("Hello world"));
        assert_eq!(node.text_auto_resize, Some(TextAutoResize::WidthAndHeight));
        assert_eq!(node.fills.len(), 1, "text color replaces the background");
        assert_eq!(node.first_solid_color().map(|c| c.r), Some(1.0));
    }

    #[test]
    fn image_gets_file_name_and_placeholder() {
        let mut img = element("IMG", Rect::new(0.0, 0.0, 64.0, 64.0));
        img.attributes = HashMap::from([(
            "src".to_string(),
            "https://cdn.example.com/assets/logo.png".to_string(),
        )]);
        img.children.push(text_child("ignored"));
        let node = capture_element(&img, Rect::default()).expect("image");
        assert_eq!(node.node_type, NodeType::Rectangle);
        assert_eq!(node.name, "IMG: logo.png");
        assert_eq!(node.first_solid_color(), Some(IMAGE_PLACEHOLDER));
        assert!(node.children.is_empty());
    }

    #[test]
    fn paints_background_then_gradient() {
        let mut div = element("div", Rect::new(0.0, 0.0, 100.0, 100.0));
        div.style.background_color = Some("rgb(0, 0, 0)".into());
        div.style.background_image =
            Some("linear-gradient(90deg, rgb(255, 0, 0), rgb(0, 0, 255))".into());
        let node = capture_element(&div, Rect::default()).expect("frame");
        assert_eq!(node.fills.len(), 2);
        assert!(matches!(node.fills[0], Paint::Solid { .. }));
        assert!(matches!(node.fills[1], Paint::LinearGradient { .. }));
    }

    #[test]
    fn transparent_background_is_not_a_fill() {
        let mut div = element("div", Rect::new(0.0, 0.0, 100.0, 100.0));
        div.style.background_color = Some("rgba(0, 0, 0, 0)".into());
        let node = capture_element(&div, Rect::default()).expect("frame");
        assert!(node.fills.is_empty());
    }

    #[test]
    fn transparent_colored_background_is_kept() {
        // Zero alpha with a non-zero channel passes the visible-fill check.
        let mut div = element("div", Rect::new(0.0, 0.0, 100.0, 100.0));
        div.style.background_color = Some("rgba(255, 255, 255, 0)".into());
        let node = capture_element(&div, Rect::default()).expect("frame");
        assert_eq!(node.fills.len(), 1);
        assert_eq!(node.first_solid_color().map(|c| c.a), Some(0.0));
    }

    #[test]
    fn effects_list_shadow_before_blur() {
        let mut div = element("div", Rect::new(0.0, 0.0, 100.0, 100.0));
        div.style.box_shadow = Some("rgba(0, 0, 0, 0.1) 0px 4px 6px 0px".into());
        div.style.backdrop_filter = Some("blur(8px)".into());
        div.style.border_radius = Some("12px".into());
        let node = capture_element(&div, Rect::default()).expect("frame");
        let kinds: Vec<EffectKind> = node.effects.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EffectKind::DropShadow, EffectKind::BackgroundBlur]);
        assert_eq!(node.corner_radius, Some(12.0));
    }

    #[test]
    fn border_bands_precede_content_children() {
        let mut div = element("div", Rect::new(0.0, 0.0, 100.0, 40.0));
        div.style.border_bottom_width = Some("1px".into());
        div.style.border_bottom_style = Some("solid".into());
        div.style.border_bottom_color = Some("rgb(200, 200, 200)".into());
        div.children.push(StyledChild::Element({
            let mut inner = element("span", Rect::new(5.0, 5.0, 20.0, 10.0));
            inner.children.push(text_child("x"));
            inner
        }));
        let node = capture_element(&div, Rect::default()).expect("frame");
        assert!(node.strokes.is_empty());
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].name, "border-bottom");
        assert_eq!(node.children[1].node_type, NodeType::Text);
    }

    #[test]
    fn mixed_content_text_runs_use_parent_style() {
        let mut div = element("div", Rect::new(0.0, 0.0, 300.0, 40.0));
        div.style.font_size = Some("14px".into());
        div.style.font_family = Some("Roboto, sans-serif".into());
        div.children.push(StyledChild::Text(TextRun {
            text: "Price: ".into(),
            rect: Some(Rect::new(0.0, 0.0, 40.0, 16.0)),
        }));
        div.children.push(StyledChild::Element({
            let mut strong = element("strong", Rect::new(40.0, 0.0, 30.0, 16.0));
            strong.children.push(text_child("$5"));
            strong
        }));
        div.children.push(text_child("   "));

        let node = capture_element(&div, Rect::default()).expect("frame");
        assert_eq!(node.children.len(), 2);
        let run = &node.children[0];
        assert_eq!(run.name, "text");
        assert_eq!(run.font_family.as_deref(), Some("Roboto"));
        assert_eq!(run.font_size, Some(14.0));
    }

    #[test]
    fn text_beside_a_comment_stays_a_frame() {
        let mut p = element("p", Rect::new(0.0, 0.0, 200.0, 20.0));
        p.children.push(StyledChild::Other);
        p.children.push(StyledChild::Text(TextRun {
            text: "Hi".into(),
            rect: Some(Rect::new(0.0, 0.0, 16.0, 20.0)),
        }));

        let node = capture_element(&p, Rect::default()).expect("frame");
        assert_eq!(node.node_type, NodeType::Frame);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].characters.as_deref(), Some("Hi"));
    }

    #[test]
    fn page_root_defaults_to_white_and_title_name() {
        let mut body = element("body", Rect::new(0.0, 0.0, 1280.0, 900.0));
        body.style.background_color = Some("rgba(0, 0, 0, 0)".into());
        body.children.push(StyledChild::Element(element(
            "main",
            Rect::new(0.0, 100.0, 1280.0, 400.0),
        )));
        let snapshot = PageSnapshot {
            url: None,
            title: Some("  ".into()),
            body,
        };
        let root = capture_page(&snapshot);
        assert_eq!(root.name, DEFAULT_PAGE_NAME);
        assert_eq!((root.width, root.height), (1280.0, 900.0));
        assert_eq!(root.first_solid_color(), Some(Color::WHITE));
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].y, 100.0);
    }
}
