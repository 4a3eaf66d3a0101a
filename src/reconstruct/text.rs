//! Text objects.

use crate::config::FontsConfig;
use crate::schema::{Node, TextAlign, TextAutoResize};

use super::fonts::resolve_font;
use super::host::DesignHost;
use super::paint::native_fills;
use super::scene::{NativePaint, Rgb, SceneKind, SceneNode, TextProps};
use super::vector::name_or;
use super::ImportError;

pub const DEFAULT_FONT_WEIGHT: u32 = 400;
/// Host default size for new text objects.
pub const HOST_DEFAULT_FONT_SIZE: f64 = 12.0;

/// Build a text object. The font is resolved and loaded before any text property is set.
pub async fn build_text(
    host: &mut dyn DesignHost,
    fonts: &FontsConfig,
    node: &Node,
) -> Result<SceneNode, ImportError> {
    let family = node
        .font_family
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or(fonts.default_family.as_str());
    let weight = node
        .font_weight
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_FONT_WEIGHT);
    let font = resolve_font(host, family, weight, fonts).await?;

    let fills = match native_fills(&node.fills) {
        fills if !fills.is_empty() => fills,
        _ => vec![NativePaint::solid(Rgb::BLACK, 1.0)],
    };
    let props = TextProps {
        font,
        characters: node.characters.clone().unwrap_or_default(),
        font_size: node
            .font_size
            .filter(|s| *s > 0.0)
            .unwrap_or(HOST_DEFAULT_FONT_SIZE),
        align: node.text_align_horizontal.unwrap_or(TextAlign::Left),
        letter_spacing: node.letter_spacing.filter(|s| *s != 0.0),
        line_height: node.line_height.filter(|h| *h > 0.0),
        fills,
        auto_resize: sizing_mode(node),
    };

    let mut text = SceneNode::new(name_or(node, "Text"), SceneKind::Text(props));
    text.set_position(node.x, node.y);
    text.resize(node.width.max(0.0), node.height.max(0.0));
    Ok(text)
}

/// Sizing applied after content: grow both ways, fix the width, or fix the box.
///
/// A box the schema cannot size (zero width, or zero height without a height-only
/// mode) keeps the host's default of growing both ways.
///
/// The object is always resized to the document box first. Under `WidthAndHeight` a
/// measuring host recomputes both dimensions from the content, so that box is only the
/// starting size; a host that cannot measure text (the in-memory canvas) keeps the
/// captured box, which is the size the browser rendered.
pub fn sizing_mode(node: &Node) -> TextAutoResize {
    match node.text_auto_resize {
        Some(TextAutoResize::WidthAndHeight) => TextAutoResize::WidthAndHeight,
        Some(TextAutoResize::Height) if node.width > 0.0 => TextAutoResize::Height,
        _ if node.width > 0.0 && node.height > 0.0 => TextAutoResize::None,
        _ => TextAutoResize::WidthAndHeight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::host::{FontName, HostError, NodeId, Point};
    use crate::schema::{Color, Paint};
    use async_trait::async_trait;

    struct InterOnly;

    #[async_trait(?Send)]
    impl DesignHost for InterOnly {
        async fn load_font(&mut self, font: &FontName) -> Result<(), HostError> {
            if font.family == "Inter" {
                Ok(())
            } else {
                Err(HostError::FontUnavailable(font.clone()))
            }
        }

        async fn available_fonts(&mut self) -> Result<Vec<FontName>, HostError> {
            Ok(vec![FontName::regular("Inter")])
        }

        async fn import_svg(&mut self, _markup: &str) -> Result<SceneNode, HostError> {
            Err(HostError::Other("unused".into()))
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

    fn heading() -> Node {
        let mut node = Node::text("title", "Welcome", 10.0, 20.0, 300.0, 40.0).unwrap();
        node.font_family = Some("Playfair".into());
        node.font_weight = Some(700);
        node.font_size = Some(32.0);
        node.line_height = Some(38.0);
        node.letter_spacing = Some(0.0);
        node.text_align_horizontal = Some(TextAlign::Center);
        node.text_auto_resize = Some(TextAutoResize::WidthAndHeight);
        node.fills.push(Paint::solid(Color::rgba(0.2, 0.2, 0.2, 1.0)));
        node
    }

    #[tokio::test]
    async fn builds_text_with_fallback_font_and_properties() {
        let built = build_text(&mut InterOnly, &FontsConfig::default(), &heading())
            .await
            .unwrap();
        let SceneKind::Text(props) = &built.kind else {
            panic!("expected text");
        };
        assert_eq!(props.font, FontName::new("Inter", "Bold"));
        assert_eq!(props.characters, "Welcome");
        assert_eq!(props.font_size, 32.0);
        assert_eq!(props.align, TextAlign::Center);
        assert_eq!(props.letter_spacing, None, "zero spacing is left at the host default");
        assert_eq!(props.line_height, Some(38.0));
        assert_eq!(props.auto_resize, TextAutoResize::WidthAndHeight);
        assert_eq!((built.x, built.y), (10.0, 20.0));
    }

    #[tokio::test]
    async fn grow_both_ways_starts_from_the_captured_box() {
        let built = build_text(&mut InterOnly, &FontsConfig::default(), &heading())
            .await
            .unwrap();
        let SceneKind::Text(props) = &built.kind else {
            panic!("expected text");
        };
        assert_eq!(props.auto_resize, TextAutoResize::WidthAndHeight);
        assert_eq!((built.width, built.height), (300.0, 40.0));

        let mut unsized_node = heading();
        unsized_node.width = 0.0;
        unsized_node.height = 0.0;
        unsized_node.text_auto_resize = None;
        let built = build_text(&mut InterOnly, &FontsConfig::default(), &unsized_node)
            .await
            .unwrap();
        assert_eq!(sizing_mode(&unsized_node), TextAutoResize::WidthAndHeight);
        assert_eq!((built.width, built.height), (0.0, 0.0));
    }

    #[tokio::test]
    async fn text_without_fills_is_black() {
        let mut node = heading();
        node.fills.clear();
        let built = build_text(&mut InterOnly, &FontsConfig::default(), &node)
            .await
            .unwrap();
        let SceneKind::Text(props) = built.kind else {
            panic!("expected text");
        };
        assert_eq!(props.fills, vec![NativePaint::solid(Rgb::BLACK, 1.0)]);
    }

    #[test]
    fn sizing_modes() {
        let mut node = heading();
        node.text_auto_resize = Some(TextAutoResize::Height);
        assert_eq!(sizing_mode(&node), TextAutoResize::Height);

        node.text_auto_resize = None;
        assert_eq!(sizing_mode(&node), TextAutoResize::None);

        node.text_auto_resize = Some(TextAutoResize::Height);
        node.width = 0.0;
        assert_eq!(sizing_mode(&node), TextAutoResize::WidthAndHeight);
    }
}
