//! The design document node.

use serde::{Deserialize, Serialize};

use super::paint::{Effect, Paint, Stroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Frame,
    Rectangle,
    Text,
    Group,
    Vector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// How a text box sizes itself around its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    /// Fixed box.
    None,
    /// Single line: grows in both directions.
    WidthAndHeight,
    /// Wrapping text: width fixed by the container, height grows.
    Height,
}

/// How the reconstruction side treats a node, by dispatch precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Vector,
    Text,
    Container,
}

/// One node of the design document.
///
/// Geometry is relative to the direct parent's top-left corner. Text and vector
/// fields are only meaningful on their respective node types and are omitted from
/// the serialized form elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Stroke>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_auto_resize: Option<TextAutoResize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_content: Option<String>,
}

impl Node {
    /// An empty node of the given type and box.
    pub fn new(
        node_type: NodeType,
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            node_type,
            name: name.into(),
            x,
            y,
            width,
            height,
            fills: Vec::new(),
            strokes: Vec::new(),
            effects: Vec::new(),
            corner_radius: None,
            children: Vec::new(),
            characters: None,
            font_size: None,
            font_weight: None,
            font_family: None,
            text_align_horizontal: None,
            letter_spacing: None,
            line_height: None,
            text_auto_resize: None,
            svg_content: None,
        }
    }

    pub fn frame(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(NodeType::Frame, name, x, y, width, height)
    }

    pub fn rectangle(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(NodeType::Rectangle, name, x, y, width, height)
    }

    /// A text node. Returns `None` for blank content; text nodes always carry characters.
    pub fn text(
        name: impl Into<String>,
        characters: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Option<Self> {
        let characters = characters.trim();
        if characters.is_empty() {
            return None;
        }
        let mut node = Self::new(NodeType::Text, name, x, y, width, height);
        node.characters = Some(characters.to_string());
        Some(node)
    }

    /// A vector node carrying opaque markup.
    pub fn vector(
        name: impl Into<String>,
        svg_content: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let mut node = Self::new(NodeType::Vector, name, x, y, width, height);
        node.svg_content = Some(svg_content);
        node
    }

    /// Dispatch precedence: markup or a vector tag first, then non-empty text, else container.
    pub fn role(&self) -> NodeRole {
        if self.node_type == NodeType::Vector || self.svg_content.is_some() {
            NodeRole::Vector
        } else if self
            .characters
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
        {
            NodeRole::Text
        } else {
            NodeRole::Container
        }
    }

    /// Color of the first fill, when that fill is solid.
    pub fn first_solid_color(&self) -> Option<super::Color> {
        self.fills.first().and_then(Paint::solid_color)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(Node::count_nodes).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Color;
    use serde_json::json;

    #[test]
    fn serializes_in_declaration_order_without_empty_fields() {
        let mut node = Node::frame("card", 10.0, 20.0, 100.0, 50.0);
        node.fills.push(Paint::solid(Color::WHITE));
        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(
            text,
            r#"{"type":"FRAME","name":"card","x":10.0,"y":20.0,"width":100.0,"height":50.0,"fills":[{"type":"SOLID","color":{"r":1.0,"g":1.0,"b":1.0,"a":1.0}}]}"#
        );
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let node: Node = serde_json::from_value(json!({"type": "TEXT", "characters": "Hi"})).unwrap();
        assert_eq!(node.width, 0.0);
        assert!(node.fills.is_empty());
        assert_eq!(node.role(), NodeRole::Text);
    }

    #[test]
    fn text_constructor_rejects_blank_content() {
        assert!(Node::text("text", "   ", 0.0, 0.0, 1.0, 1.0).is_none());
        let node = Node::text("text", "  hello ", 0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(node.characters.as_deref(), Some("hello"));
    }

    #[test]
    fn role_prefers_markup_over_text() {
        let mut node = Node::frame("mixed", 0.0, 0.0, 1.0, 1.0);
        node.characters = Some("label".into());
        assert_eq!(node.role(), NodeRole::Text);
        node.svg_content = Some("<svg/>".into());
        assert_eq!(node.role(), NodeRole::Vector);

        let bare = Node::new(NodeType::Vector, "icon", 0.0, 0.0, 1.0, 1.0);
        assert_eq!(bare.role(), NodeRole::Vector);
    }

    #[test]
    fn blank_characters_fall_back_to_container() {
        let mut node = Node::new(NodeType::Text, "t", 0.0, 0.0, 1.0, 1.0);
        node.characters = Some("  ".into());
        assert_eq!(node.role(), NodeRole::Container);
    }

    #[test]
    fn count_nodes_includes_descendants() {
        let mut root = Node::frame("root", 0.0, 0.0, 1.0, 1.0);
        let mut child = Node::frame("child", 0.0, 0.0, 1.0, 1.0);
        child.children.push(Node::rectangle("leaf", 0.0, 0.0, 1.0, 1.0));
        root.children.push(child);
        root.children.push(Node::rectangle("leaf", 0.0, 0.0, 1.0, 1.0));
        assert_eq!(root.count_nodes(), 4);
    }
}
