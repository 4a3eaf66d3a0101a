//! An in-memory design canvas.
//!
//! [`MemoryCanvas`] is the [`DesignHost`] the command line drives: it keeps placed
//! roots on a single page, loads only fonts from its installed list, and turns vector
//! markup into object graphs with [`svg::svg_to_scene`]. The resulting page can be
//! serialized for inspection.

pub mod svg;

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::reconstruct::{DesignHost, FontName, HostError, NodeId, Point, SceneNode};

/// A root frame on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasRoot {
    pub id: NodeId,
    #[serde(flatten)]
    pub node: SceneNode,
}

/// Axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    fn of(node: &SceneNode) -> Self {
        Self {
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
        }
    }

    pub fn union(self, other: Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Bounds {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// Where the view is looking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub center: Point,
    /// Region last scrolled into view.
    pub fitted: Option<Bounds>,
}

/// Serializable snapshot of the page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasPage<'a> {
    pub roots: &'a [CanvasRoot],
    pub selection: &'a [NodeId],
    pub viewport: ViewState,
    pub loaded_fonts: Vec<&'a FontName>,
}

#[derive(Debug, Default)]
pub struct MemoryCanvas {
    installed: Vec<FontName>,
    loaded: BTreeSet<FontName>,
    roots: Vec<CanvasRoot>,
    selection: Vec<NodeId>,
    view: ViewState,
    next_id: u64,
}

impl MemoryCanvas {
    pub fn new(installed: Vec<FontName>) -> Self {
        Self {
            installed,
            ..Self::default()
        }
    }

    pub fn set_viewport_center(&mut self, center: Point) {
        self.view.center = center;
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn roots(&self) -> &[CanvasRoot] {
        &self.roots
    }

    pub fn root(&self, id: NodeId) -> Option<&SceneNode> {
        self.roots.iter().find(|r| r.id == id).map(|r| &r.node)
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn loaded_fonts(&self) -> impl Iterator<Item = &FontName> {
        self.loaded.iter()
    }

    pub fn page(&self) -> CanvasPage<'_> {
        CanvasPage {
            roots: &self.roots,
            selection: &self.selection,
            viewport: self.view,
            loaded_fonts: self.loaded.iter().collect(),
        }
    }

    fn bounds_of(&self, ids: &[NodeId]) -> Option<Bounds> {
        ids.iter()
            .filter_map(|id| self.root(*id))
            .map(Bounds::of)
            .reduce(Bounds::union)
    }
}

#[async_trait(?Send)]
impl DesignHost for MemoryCanvas {
    async fn load_font(&mut self, font: &FontName) -> Result<(), HostError> {
        if !self.installed.contains(font) {
            return Err(HostError::FontUnavailable(font.clone()));
        }
        if self.loaded.insert(font.clone()) {
            debug!(font = %font, "loaded font");
        }
        Ok(())
    }

    async fn available_fonts(&mut self) -> Result<Vec<FontName>, HostError> {
        Ok(self.installed.clone())
    }

    async fn import_svg(&mut self, markup: &str) -> Result<SceneNode, HostError> {
        svg::svg_to_scene(markup)
    }

    fn viewport_center(&self) -> Point {
        self.view.center
    }

    fn place(&mut self, root: SceneNode) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.roots.push(CanvasRoot { id, node: root });
        id
    }

    fn set_selection(&mut self, ids: &[NodeId]) {
        self.selection = ids
            .iter()
            .copied()
            .filter(|id| self.roots.iter().any(|r| r.id == *id))
            .collect();
    }

    fn scroll_into_view(&mut self, ids: &[NodeId]) {
        if let Some(bounds) = self.bounds_of(ids) {
            self.view = ViewState {
                center: bounds.center(),
                fitted: Some(bounds),
            };
        }
    }
}
