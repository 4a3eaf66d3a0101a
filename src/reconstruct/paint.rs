//! Schema paints and effects to native paints and effects.

use crate::schema::{
    Color, Effect, EffectKind, Offset, Paint, Stroke, IDENTITY_TRANSFORM,
};

use super::scene::{NativeEffect, NativePaint, Shadow};

pub const DEFAULT_SHADOW_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.25);
pub const DEFAULT_DROP_SHADOW_OFFSET: Offset = Offset { x: 0.0, y: 4.0 };
pub const DEFAULT_INNER_SHADOW_OFFSET: Offset = Offset { x: 0.0, y: 2.0 };
pub const DEFAULT_SHADOW_RADIUS: f64 = 4.0;
pub const DEFAULT_BLUR_RADIUS: f64 = 10.0;
pub const DEFAULT_STROKE_WEIGHT: f64 = 1.0;

/// Solid paints keep rgb and move alpha to opacity; stop-less gradients are dropped.
pub fn native_fills(fills: &[Paint]) -> Vec<NativePaint> {
    fills
        .iter()
        .filter_map(|paint| match paint {
            Paint::Solid {
                color: Some(color), ..
            } => Some(NativePaint::solid((*color).into(), color.a)),
            Paint::LinearGradient {
                gradient_stops,
                gradient_transform,
            } if !gradient_stops.is_empty() => Some(NativePaint::GradientLinear {
                gradient_transform: gradient_transform.unwrap_or(IDENTITY_TRANSFORM),
                gradient_stops: gradient_stops.clone(),
            }),
            _ => None,
        })
        .collect()
}

pub fn native_strokes(strokes: &[Stroke]) -> Vec<NativePaint> {
    strokes
        .iter()
        .map(|stroke| NativePaint::solid(stroke.color.into(), stroke.color.a))
        .collect()
}

/// Weight of the first stroke entry.
pub fn stroke_weight(strokes: &[Stroke]) -> f64 {
    strokes
        .first()
        .and_then(|s| s.weight)
        .filter(|w| *w != 0.0)
        .unwrap_or(DEFAULT_STROKE_WEIGHT)
}

pub fn native_effects(effects: &[Effect]) -> Vec<NativeEffect> {
    effects.iter().map(native_effect).collect()
}

fn native_effect(effect: &Effect) -> NativeEffect {
    let radius = |default: f64| {
        if effect.radius != 0.0 {
            effect.radius
        } else {
            default
        }
    };
    let shadow = |offset: Offset| Shadow {
        color: effect.color.unwrap_or(DEFAULT_SHADOW_COLOR),
        offset: effect.offset.unwrap_or(offset),
        radius: radius(DEFAULT_SHADOW_RADIUS),
        spread: 0.0,
        visible: effect.visible,
        blend_mode: "NORMAL".to_string(),
    };

    match effect.kind {
        EffectKind::DropShadow => NativeEffect::DropShadow(shadow(DEFAULT_DROP_SHADOW_OFFSET)),
        EffectKind::InnerShadow => NativeEffect::InnerShadow(shadow(DEFAULT_INNER_SHADOW_OFFSET)),
        EffectKind::BackgroundBlur => NativeEffect::BackgroundBlur {
            radius: radius(DEFAULT_BLUR_RADIUS),
            visible: effect.visible,
        },
    }
}
