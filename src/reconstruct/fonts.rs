//! Font resolution with an ordered fallback chain.

use tracing::debug;

use crate::config::FontsConfig;

use super::host::{DesignHost, FontName, HostError};

/// Style name for a numeric CSS weight.
pub fn style_for_weight(weight: u32) -> &'static str {
    match weight {
        800.. => "Black",
        700.. => "Bold",
        600.. => "SemiBold",
        500.. => "Medium",
        400.. => "Regular",
        300.. => "Light",
        _ => "Regular",
    }
}

/// Strip quote characters and surrounding whitespace from a family name.
pub fn clean_family(family: &str) -> String {
    family.replace(['"', '\''], "").trim().to_string()
}

/// The candidates tried in order before consulting the host's inventory.
pub fn candidate_fonts(family: &str, weight: u32, fonts: &FontsConfig) -> Vec<FontName> {
    let style = style_for_weight(weight);
    let family = clean_family(family);
    vec![
        FontName::new(&family, style),
        FontName::regular(&family),
        FontName::new(&fonts.default_family, style),
        FontName::regular(&fonts.default_family),
        FontName::regular(&fonts.fallback_family),
    ]
}

/// Resolve and load a font for `family` at `weight`. First success wins.
///
/// When every candidate fails the first font in the host inventory is loaded; if the
/// inventory is empty the configured last-resort family is returned without loading.
pub async fn resolve_font(
    host: &mut dyn DesignHost,
    family: &str,
    weight: u32,
    fonts: &FontsConfig,
) -> Result<FontName, HostError> {
    for font in candidate_fonts(family, weight, fonts) {
        match host.load_font(&font).await {
            Ok(()) => return Ok(font),
            Err(err) => debug!(font = %font, error = %err, "font candidate failed"),
        }
    }

    match host.available_fonts().await?.into_iter().next() {
        Some(first) => {
            host.load_font(&first).await?;
            debug!(font = %first, "using first installed font");
            Ok(first)
        }
        None => Ok(FontName::regular(&fonts.last_resort_family)),
    }
}
