//! Reconstruction: design document → native objects on a [`DesignHost`].
//!
//! Builders are recursive functions that return a finished [`SceneNode`] subtree; a
//! parent appends each child only once it is fully built. Children are built strictly
//! one after another, including every font load in their subtrees. A child that fails
//! is logged and skipped without affecting its siblings.
//!
//! Dispatch per node, in order of precedence:
//!
//! 1. vector markup present, or tagged `VECTOR` → [`vector::build_vector`]
//! 2. non-blank `characters` → [`text::build_text`]
//! 3. anything else → a frame with its children
//!
//! [`Reconstructor::import_document`] builds a whole document as a root frame, places
//! it on the host's page centered in the view, selects it and scrolls to it.

pub mod fonts;
pub mod frame;
pub mod host;
pub mod paint;
pub mod scene;
pub mod text;
pub mod vector;

pub use fonts::{resolve_font, style_for_weight};
pub use host::{DesignHost, FontName, HostError, NodeId, Point};
pub use scene::{NativeEffect, NativePaint, Rgb, SceneKind, SceneNode, ShapeStyle};

use futures::future::{FutureExt, LocalBoxFuture};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::{FontsConfig, ImportConfig};
use crate::schema::{Node, NodeRole};

use paint::{native_effects, native_fills};
use scene::FrameProps;

pub const DEFAULT_DOCUMENT_NAME: &str = "Imported Design";

/// Why a single node could not be built.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("node \"{name}\" has non-finite geometry")]
    NonFiniteGeometry { name: String },
    #[error(transparent)]
    Host(#[from] HostError),
}

/// A document root placed on the host's page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedRoot {
    pub id: NodeId,
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// Direct children built.
    pub created: usize,
    /// Direct children skipped after a failure.
    pub failed: usize,
}

/// Builds documents into a host. Holds the only handle to the host for its lifetime.
pub struct Reconstructor<'h> {
    host: &'h mut dyn DesignHost,
    fonts: &'h FontsConfig,
    import: &'h ImportConfig,
}

impl<'h> Reconstructor<'h> {
    pub fn new(host: &'h mut dyn DesignHost, fonts: &'h FontsConfig, import: &'h ImportConfig) -> Self {
        Self {
            host,
            fonts,
            import,
        }
    }

    /// Build one node and its subtree.
    pub fn build_node<'a>(
        &'a mut self,
        node: &'a Node,
    ) -> LocalBoxFuture<'a, Result<SceneNode, ImportError>> {
        async move {
            check_geometry(node)?;
            match node.role() {
                NodeRole::Vector => Ok(vector::build_vector(&mut *self.host, node).await),
                NodeRole::Text => text::build_text(&mut *self.host, self.fonts, node).await,
                NodeRole::Container => self.build_frame(node).await,
            }
        }
        .boxed_local()
    }

    /// Build `document` as a root frame, offset horizontally by `offset_x` from the
    /// centered position, then place, select and reveal it.
    pub async fn import_document(
        &mut self,
        document: &Node,
        offset_x: f64,
    ) -> Result<PlacedRoot, ImportError> {
        check_geometry(document)?;
        let width = positive_or(document.width, self.import.default_root_width);
        let height = positive_or(document.height, self.import.default_root_height);

        let mut props = FrameProps {
            clips_content: false,
            ..FrameProps::default()
        };
        props.style.fills = native_fills(&document.fills);
        if props.style.fills.is_empty() {
            props.style.fills = vec![NativePaint::solid(Rgb::WHITE, 1.0)];
        }
        props.effects = native_effects(&document.effects);
        if let Some(radius) = document.corner_radius.filter(|r| *r > 0.0) {
            props.style.corner_radius = radius;
        }

        let children = self.build_children(&document.children).await;
        if !document.children.is_empty() {
            info!(
                created = children.nodes.len(),
                failed = children.failed,
                "created document nodes"
            );
        }
        let created = children.nodes.len();
        props.children = children.nodes;

        let name = if document.name.is_empty() {
            DEFAULT_DOCUMENT_NAME.to_string()
        } else {
            document.name.clone()
        };
        let center = self.host.viewport_center();
        let mut root = SceneNode::new(name.clone(), SceneKind::Frame(props));
        root.resize(width, height);
        root.set_position(center.x - width / 2.0 + offset_x, center.y - height / 2.0);

        let id = self.host.place(root);
        self.host.set_selection(&[id]);
        self.host.scroll_into_view(&[id]);

        Ok(PlacedRoot {
            id,
            name,
            width,
            height,
            created,
            failed: children.failed,
        })
    }
}

fn check_geometry(node: &Node) -> Result<(), ImportError> {
    if [node.x, node.y, node.width, node.height]
        .iter()
        .all(|v| v.is_finite())
    {
        Ok(())
    } else {
        Err(ImportError::NonFiniteGeometry {
            name: node.name.clone(),
        })
    }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        default
    }
}
