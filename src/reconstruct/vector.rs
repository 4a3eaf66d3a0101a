//! Vector icons: markup instantiation, recoloring, and placeholder rectangles.

use tracing::warn;

use crate::schema::Node;

use super::host::DesignHost;
use super::paint::native_fills;
use super::scene::{NativePaint, Rgb, SceneKind, SceneNode, ShapeStyle};

/// Edge length used when a vector node has no size.
pub const PLACEHOLDER_SIZE: f64 = 24.0;
pub const PLACEHOLDER_OPACITY: f64 = 0.3;
pub const FALLBACK_OPACITY: f64 = 0.2;

const CURRENT_COLOR: &str = "currentColor";
const STROKE_ATTR: &str = "stroke=\"";

/// Build a vector node. Never fails: unusable markup degrades to a rectangle.
pub async fn build_vector(host: &mut dyn DesignHost, node: &Node) -> SceneNode {
    let Some(markup) = node.svg_content.as_deref() else {
        return placeholder(node);
    };

    let markup = match node.first_solid_color() {
        Some(color) => recolor_markup(markup, &color.to_hex()),
        None => markup.to_string(),
    };

    let mut svg = match host.import_svg(&markup).await {
        Ok(svg) => svg,
        Err(err) => {
            warn!(node = %node.name, error = %err, "failed to create vector from markup");
            return fallback(node);
        }
    };

    svg.name = name_or(node, "Icon");
    svg.set_position(node.x, node.y);
    if node.width > 0.0 && node.height > 0.0 {
        svg.resize(node.width, node.height);
    }

    let paints = native_fills(&node.fills);
    if !paints.is_empty() {
        svg.for_each_vector_mut(&mut |leaf: &mut ShapeStyle| {
            if is_stroke_based(leaf) {
                leaf.strokes = paints.clone();
            } else {
                leaf.fills = paints.clone();
            }
        });
    }
    svg
}

/// Point `currentColor` and every `stroke="…"` attribute at `hex`.
pub fn recolor_markup(markup: &str, hex: &str) -> String {
    let markup = markup.replace(CURRENT_COLOR, hex);
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup.as_str();
    while let Some(start) = rest.find(STROKE_ATTR) {
        let value_start = start + STROKE_ATTR.len();
        let Some(len) = rest[value_start..].find('"') else {
            break;
        };
        out.push_str(&rest[..value_start]);
        out.push_str(hex);
        out.push('"');
        rest = &rest[value_start + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Outlined primitives: a stroke, and no fill or a single fully transparent one.
pub fn is_stroke_based(leaf: &ShapeStyle) -> bool {
    let unfilled = match leaf.fills.as_slice() {
        [] => true,
        [only] => only.is_transparent_solid(),
        _ => false,
    };
    !leaf.strokes.is_empty() && unfilled
}

fn placeholder(node: &Node) -> SceneNode {
    let fills = match native_fills(&node.fills) {
        fills if !fills.is_empty() => fills,
        _ => vec![NativePaint::solid(Rgb::GRAY, PLACEHOLDER_OPACITY)],
    };
    let style = ShapeStyle {
        fills,
        corner_radius: node.corner_radius.unwrap_or(0.0),
        ..Default::default()
    };
    rectangle(node, name_or(node, "Icon"), style)
}

fn fallback(node: &Node) -> SceneNode {
    let style = ShapeStyle {
        fills: vec![NativePaint::solid(Rgb::GRAY, FALLBACK_OPACITY)],
        ..Default::default()
    };
    rectangle(node, name_or(node, "Icon (fallback)"), style)
}

fn rectangle(node: &Node, name: String, style: ShapeStyle) -> SceneNode {
    let mut rect = SceneNode::new(name, SceneKind::Rectangle(style));
    rect.set_position(node.x, node.y);
    rect.resize(placeholder_extent(node.width), placeholder_extent(node.height));
    rect
}

fn placeholder_extent(extent: f64) -> f64 {
    let extent = if extent == 0.0 { PLACEHOLDER_SIZE } else { extent };
    extent.max(1.0)
}

pub(crate) fn name_or(node: &Node, default: &str) -> String {
    if node.name.is_empty() {
        default.to_string()
    } else {
        node.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::host::{FontName, HostError, NodeId, Point};
    use crate::schema::{Color, Paint};
    use async_trait::async_trait;

    /// Hands back a fixed object graph for any markup and records what it was given.
    struct SvgHost {
        graph: Option<SceneNode>,
        received: Vec<String>,
    }

    #[async_trait(?Send)]
    impl DesignHost for SvgHost {
        async fn load_font(&mut self, font: &FontName) -> Result<(), HostError> {
            Err(HostError::FontUnavailable(font.clone()))
        }

        async fn available_fonts(&mut self) -> Result<Vec<FontName>, HostError> {
            Ok(Vec::new())
        }

        async fn import_svg(&mut self, markup: &str) -> Result<SceneNode, HostError> {
            self.received.push(markup.to_string());
            self.graph
                .clone()
                .ok_or_else(|| HostError::InvalidSvg("unparsable".into()))
        }

        fn viewport_center(&self) -> Point {
            Point::default()
        }

        fn place(&mut self, _root: SceneNode) -> NodeId {
            NodeId(0)
        }

        fn set_selection(&mut self, _ids: &[NodeId]) {}

        fn scroll_into_view(&mut self, _ids: &[NodeId]) {}
    }

    fn leaf(fills: Vec<NativePaint>, strokes: Vec<NativePaint>) -> SceneNode {
        SceneNode::new(
            "Vector",
            SceneKind::Vector(ShapeStyle {
                fills,
                strokes,
                stroke_weight: 2.0,
                corner_radius: 0.0,
            }),
        )
    }

    fn icon_node(markup: Option<&str>) -> Node {
        let mut node = Node::new(crate::schema::NodeType::Vector, "search", 4.0, 6.0, 16.0, 16.0);
        node.svg_content = markup.map(str::to_string);
        node.fills.push(Paint::solid(Color::rgba(1.0, 0.0, 0.0, 1.0)));
        node
    }

    fn style_of(node: &SceneNode) -> &ShapeStyle {
        match &node.kind {
            SceneKind::Vector(style) | SceneKind::Rectangle(style) => style,
            SceneKind::Frame(frame) => &frame.style,
            other => panic!("no shape style on {other:?}"),
        }
    }

    #[test]
    fn recolors_current_color_and_stroke_attributes() {
        let markup = r##"<svg stroke="currentColor"><path stroke="#000" stroke-width="2" fill="currentColor"/></svg>"##;
        assert_eq!(
            recolor_markup(markup, "#ff0000"),
            r##"<svg stroke="#ff0000"><path stroke="#ff0000" stroke-width="2" fill="#ff0000"/></svg>"##
        );
    }

    #[test]
    fn stroke_based_classification() {
        let red = NativePaint::solid(Rgb::WHITE, 1.0);
        let clear = NativePaint::solid(Rgb::WHITE, 0.0);
        let style = |fills: Vec<NativePaint>, strokes: Vec<NativePaint>| ShapeStyle {
            fills,
            strokes,
            ..Default::default()
        };
        assert!(is_stroke_based(&style(vec![], vec![red.clone()])));
        assert!(is_stroke_based(&style(vec![clear.clone()], vec![red.clone()])));
        assert!(!is_stroke_based(&style(vec![red.clone()], vec![red.clone()])));
        assert!(!is_stroke_based(&style(vec![clear.clone(), clear], vec![red.clone()])));
        assert!(!is_stroke_based(&style(vec![red], vec![])));
    }

    #[tokio::test]
    async fn markup_leaves_get_color_as_stroke_or_fill() {
        let black = NativePaint::solid(Rgb::BLACK, 1.0);
        let mut graph = SceneNode::frame();
        if let SceneKind::Frame(frame) = &mut graph.kind {
            frame.children.push(leaf(vec![], vec![black.clone()]));
            frame.children.push(leaf(vec![black.clone()], vec![]));
        }
        let mut host = SvgHost {
            graph: Some(graph),
            received: Vec::new(),
        };

        let node = icon_node(Some(r#"<svg><path stroke="currentColor"/></svg>"#));
        let built = build_vector(&mut host, &node).await;

        assert_eq!(host.received, vec![r##"<svg><path stroke="#ff0000"/></svg>"##]);
        assert_eq!(built.name, "search");
        assert_eq!((built.x, built.y, built.width, built.height), (4.0, 6.0, 16.0, 16.0));
        let red = NativePaint::solid(Rgb { r: 1.0, g: 0.0, b: 0.0 }, 1.0);
        let children = built.children();
        assert_eq!(style_of(&children[0]).strokes, vec![red.clone()]);
        assert!(style_of(&children[0]).fills.is_empty());
        assert_eq!(style_of(&children[1]).fills, vec![red]);
        assert!(style_of(&children[1]).strokes.is_empty());
    }

    #[tokio::test]
    async fn import_failure_falls_back_to_translucent_rectangle() {
        let mut host = SvgHost {
            graph: None,
            received: Vec::new(),
        };
        let mut node = icon_node(Some("<svg"));
        node.name.clear();
        node.width = 0.0;
        let built = build_vector(&mut host, &node).await;
        assert_eq!(built.name, "Icon (fallback)");
        assert_eq!((built.width, built.height), (24.0, 16.0));
        assert_eq!(
            style_of(&built).fills,
            vec![NativePaint::solid(Rgb::GRAY, FALLBACK_OPACITY)]
        );
    }

    #[tokio::test]
    async fn missing_markup_builds_placeholder_with_node_fill() {
        let mut host = SvgHost {
            graph: None,
            received: Vec::new(),
        };
        let mut node = icon_node(None);
        node.corner_radius = Some(3.0);
        let built = build_vector(&mut host, &node).await;
        assert!(host.received.is_empty());
        assert!(matches!(built.kind, SceneKind::Rectangle(_)));
        assert_eq!(style_of(&built).corner_radius, 3.0);
        assert_eq!(style_of(&built).fills.len(), 1);

        node.fills.clear();
        let built = build_vector(&mut host, &node).await;
        assert_eq!(
            style_of(&built).fills,
            vec![NativePaint::solid(Rgb::GRAY, PLACEHOLDER_OPACITY)]
        );
    }
}
