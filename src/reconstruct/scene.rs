//! Native scene objects produced by reconstruction and held by a design host.

use serde::Serialize;

use crate::schema::{Color, ColorStop, GradientTransform, Offset, TextAlign, TextAutoResize};

use super::host::FontName;

/// Opaque color without alpha; paints carry opacity separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const GRAY: Rgb = Rgb {
        r: 0.5,
        g: 0.5,
        b: 0.5,
    };
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NativePaint {
    Solid {
        color: Rgb,
        opacity: f64,
    },
    #[serde(rename_all = "camelCase")]
    GradientLinear {
        gradient_transform: GradientTransform,
        gradient_stops: Vec<ColorStop>,
    },
}

impl NativePaint {
    pub fn solid(color: Rgb, opacity: f64) -> Self {
        NativePaint::Solid { color, opacity }
    }

    pub fn is_transparent_solid(&self) -> bool {
        matches!(self, NativePaint::Solid { opacity, .. } if *opacity == 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub color: Color,
    pub offset: Offset,
    pub radius: f64,
    pub spread: f64,
    pub visible: bool,
    pub blend_mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NativeEffect {
    DropShadow(Shadow),
    InnerShadow(Shadow),
    BackgroundBlur { radius: f64, visible: bool },
}

/// Paint state shared by rectangles, vector primitives and frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub fills: Vec<NativePaint>,
    pub strokes: Vec<NativePaint>,
    pub stroke_weight: f64,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameProps {
    #[serde(flatten)]
    pub style: ShapeStyle,
    pub effects: Vec<NativeEffect>,
    pub clips_content: bool,
    pub children: Vec<SceneNode>,
}

impl Default for FrameProps {
    fn default() -> Self {
        Self {
            style: ShapeStyle::default(),
            effects: Vec::new(),
            // Host default; builders turn it off.
            clips_content: true,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub font: FontName,
    pub characters: String,
    pub font_size: f64,
    pub align: TextAlign,
    /// Pixels; unset keeps the host default.
    pub letter_spacing: Option<f64>,
    /// Pixels; unset keeps the host default (auto).
    pub line_height: Option<f64>,
    pub fills: Vec<NativePaint>,
    pub auto_resize: TextAutoResize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneKind {
    Frame(FrameProps),
    Rectangle(ShapeStyle),
    Text(TextProps),
    /// A leaf vector primitive.
    Vector(ShapeStyle),
    Group { children: Vec<SceneNode> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub kind: SceneKind,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: SceneKind) -> Self {
        Self {
            name: name.into(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            kind,
        }
    }

    pub fn frame() -> Self {
        Self::new("Frame", SceneKind::Frame(FrameProps::default()))
    }

    pub fn rectangle() -> Self {
        Self::new("Rectangle", SceneKind::Rectangle(ShapeStyle::default()))
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn children(&self) -> &[SceneNode] {
        match &self.kind {
            SceneKind::Frame(frame) => frame.children.as_slice(),
            SceneKind::Group { children } => children.as_slice(),
            _ => &[],
        }
    }

    /// Visit every vector primitive in this subtree, depth first.
    pub fn for_each_vector_mut(&mut self, visit: &mut impl FnMut(&mut ShapeStyle)) {
        match &mut self.kind {
            SceneKind::Vector(style) => visit(style),
            SceneKind::Frame(FrameProps { children, .. }) | SceneKind::Group { children } => {
                for child in children {
                    child.for_each_vector_mut(visit);
                }
            }
            _ => {}
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(SceneNode::count).sum::<usize>()
    }
}
