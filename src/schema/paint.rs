//! Paint, stroke and effect records.

use serde::{Deserialize, Serialize};

/// RGBA color with each channel a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Whether a background of this color should be kept as a fill.
    ///
    /// Non-zero alpha, or any non-zero channel. The channel test keeps intentional
    /// pure-black fills; it also admits fully transparent colors whose channels are
    /// non-zero.
    pub fn is_visible_fill(&self) -> bool {
        self.a > 0.0 || self.r > 0.0 || self.g > 0.0 || self.b > 0.0
    }

    /// Hex triplet (`#rrggbb`), alpha ignored.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// A gradient stop; `position` is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

/// 2×3 affine matrix mapping gradient space to node-local unit space.
pub type GradientTransform = [[f64; 3]; 2];

pub const IDENTITY_TRANSFORM: GradientTransform = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// A fill paint, painted bottom first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Paint {
    #[serde(rename = "SOLID")]
    Solid {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        opacity: Option<f64>,
    },
    #[serde(rename = "GRADIENT_LINEAR", rename_all = "camelCase")]
    LinearGradient {
        #[serde(default)]
        gradient_stops: Vec<ColorStop>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gradient_transform: Option<GradientTransform>,
    },
    /// Paint kinds this schema does not model (image fills and the like).
    #[serde(other)]
    Unsupported,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint::Solid {
            color: Some(color),
            opacity: None,
        }
    }

    /// The color of a solid paint, if this is one.
    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Paint::Solid { color, .. } => *color,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeKind {
    #[default]
    #[serde(rename = "SOLID")]
    Solid,
}

/// An outline paint with its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    #[serde(rename = "type", default)]
    pub kind: StrokeKind,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Stroke {
    pub fn solid(color: Color, weight: Option<f64>) -> Self {
        Self {
            kind: StrokeKind::Solid,
            color,
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    BackgroundBlur,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// A shadow or blur, applied in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Offset>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<String>,
}

fn visible_by_default() -> bool {
    true
}

impl Effect {
    pub fn background_blur(radius: f64) -> Self {
        Self {
            kind: EffectKind::BackgroundBlur,
            color: None,
            offset: None,
            radius,
            visible: true,
            blend_mode: None,
        }
    }
}
