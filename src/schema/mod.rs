//! Design document schema.
//!
//! The canonical node/paint/effect tree exchanged between capture and reconstruction.
//! Values here are transport-only: they own no live resources and serialize to the
//! JSON document format read by the importer.

pub mod node;
pub mod paint;

pub use node::{Node, NodeRole, NodeType, TextAlign, TextAutoResize};
pub use paint::{
    Color, ColorStop, Effect, EffectKind, GradientTransform, Offset, Paint, Stroke, StrokeKind,
    IDENTITY_TRANSFORM,
};

use crate::Result;

/// Parse a document from its JSON text.
pub fn from_json(text: &str) -> Result<Node> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize a document as pretty-printed JSON.
pub fn to_json_pretty(node: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}
