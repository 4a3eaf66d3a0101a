//! Frames: containers whose children are built one at a time.

use tracing::warn;

use crate::schema::Node;

use super::paint::{native_effects, native_fills, native_strokes, stroke_weight};
use super::scene::{FrameProps, SceneKind, SceneNode, ShapeStyle};
use super::vector::name_or;
use super::{ImportError, Reconstructor};

/// Children built for one container, plus how many were skipped.
#[derive(Debug, Default)]
pub struct BuiltChildren {
    pub nodes: Vec<SceneNode>,
    pub failed: usize,
}

/// Paint and effect state of a container, with clipping off and no children yet.
pub fn frame_props(node: &Node) -> FrameProps {
    let strokes = native_strokes(&node.strokes);
    let stroke_weight = if strokes.is_empty() {
        0.0
    } else {
        stroke_weight(&node.strokes)
    };
    FrameProps {
        style: ShapeStyle {
            fills: native_fills(&node.fills),
            strokes,
            stroke_weight,
            corner_radius: node.corner_radius.filter(|r| *r > 0.0).unwrap_or(0.0),
        },
        effects: native_effects(&node.effects),
        clips_content: false,
        children: Vec::new(),
    }
}

impl Reconstructor<'_> {
    pub(crate) async fn build_frame(&mut self, node: &Node) -> Result<SceneNode, ImportError> {
        let mut props = frame_props(node);
        props.children = self.build_children(&node.children).await.nodes;

        let mut frame = SceneNode::new(name_or(node, "Frame"), SceneKind::Frame(props));
        frame.set_position(node.x, node.y);
        frame.resize(node.width.max(1.0), node.height.max(1.0));
        Ok(frame)
    }

    /// Build children in order. A failed child is logged and left out.
    pub(crate) async fn build_children(&mut self, children: &[Node]) -> BuiltChildren {
        let mut built = BuiltChildren::default();
        for child in children {
            match self.build_node(child).await {
                Ok(node) => built.nodes.push(node),
                Err(err) => {
                    warn!(child = %child.name, error = %err, "failed to create child");
                    built.failed += 1;
                }
            }
        }
        built
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Color, Effect, Paint, Stroke};

    #[test]
    fn frame_props_turn_off_clipping_and_map_paints() {
        let mut node = Node::frame("card", 0.0, 0.0, 200.0, 100.0);
        node.fills.push(Paint::solid(Color::WHITE));
        node.strokes
            .push(Stroke::solid(Color::rgba(0.0, 0.0, 0.0, 0.1), Some(2.0)));
        node.effects.push(Effect::background_blur(4.0));
        node.corner_radius = Some(8.0);

        let props = frame_props(&node);
        assert!(!props.clips_content);
        assert_eq!(props.style.fills.len(), 1);
        assert_eq!(props.style.strokes.len(), 1);
        assert_eq!(props.style.stroke_weight, 2.0);
        assert_eq!(props.style.corner_radius, 8.0);
        assert_eq!(props.effects.len(), 1);
    }

    #[test]
    fn frame_without_paint_stays_empty() {
        let props = frame_props(&Node::frame("", 0.0, 0.0, 10.0, 10.0));
        assert!(props.style.fills.is_empty());
        assert!(props.style.strokes.is_empty());
        assert_eq!(props.style.stroke_weight, 0.0);
        assert_eq!(props.style.corner_radius, 0.0);
    }
}
