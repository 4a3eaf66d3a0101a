//! The primitives a design host offers to the reconstruction engine.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scene::SceneNode;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }

    pub fn regular(family: impl Into<String>) -> Self {
        Self::new(family, "Regular")
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Handle to a root placed on the host's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    #[error("font \"{0}\" is not available")]
    FontUnavailable(FontName),
    #[error("could not create vector from markup: {0}")]
    InvalidSvg(String),
    #[error("host error: {0}")]
    Other(String),
}

/// A design canvas the engine builds into.
///
/// Only font loading, font listing and markup instantiation may suspend. The rest
/// are plain mutations of the host's page and viewport. Calls are never issued
/// concurrently.
#[async_trait(?Send)]
pub trait DesignHost {
    async fn load_font(&mut self, font: &FontName) -> Result<(), HostError>;

    /// Installed fonts, in the host's listing order.
    async fn available_fonts(&mut self) -> Result<Vec<FontName>, HostError>;

    /// Instantiate a native object graph from vector markup.
    async fn import_svg(&mut self, markup: &str) -> Result<SceneNode, HostError>;

    fn viewport_center(&self) -> Point;

    /// Append a fully built root to the current page.
    fn place(&mut self, root: SceneNode) -> NodeId;

    fn set_selection(&mut self, ids: &[NodeId]);

    fn scroll_into_view(&mut self, ids: &[NodeId]);
}
