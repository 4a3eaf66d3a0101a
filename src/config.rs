use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reconstruct::FontName;
use crate::Viewport;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fonts: FontsConfig,
    pub import: ImportConfig,
    pub capture: CaptureConfig,
    pub canvas: CanvasConfig,
}

/// Families used by the text font fallback chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub default_family: String,
    pub fallback_family: String,
    /// Reported when nothing loads and the host lists no fonts.
    pub last_resort_family: String,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            default_family: "Inter".to_string(),
            fallback_family: "Roboto".to_string(),
            last_resort_family: "Inter".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Horizontal gap between documents imported in one batch.
    pub batch_spacing: f64,
    pub default_root_width: f64,
    pub default_root_height: f64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_spacing: 100.0,
            default_root_width: 1280.0,
            default_root_height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub viewport: Viewport,
    #[serde(with = "humantime_serde")]
    pub navigation_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub network_idle_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub process_timeout: Duration,
    pub node_command: String,
    pub file_prefix: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            navigation_timeout: Duration::from_secs(30),
            network_idle_timeout: Duration::from_secs(10),
            process_timeout: Duration::from_secs(45),
            node_command: "node".to_string(),
            file_prefix: "figma-export".to_string(),
        }
    }
}

/// Fonts installed in the headless canvas, as `Family:Style` (style defaults to Regular).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub installed_fonts: Vec<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            installed_fonts: [
                "Inter:Regular",
                "Inter:Medium",
                "Inter:SemiBold",
                "Inter:Bold",
                "Roboto:Regular",
                "Roboto:Bold",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl CanvasConfig {
    pub fn font_names(&self) -> Vec<FontName> {
        parse_font_list(&self.installed_fonts)
    }
}

/// Parse `Family:Style` entries; blank entries are dropped.
pub fn parse_font_list<S: AsRef<str>>(entries: &[S]) -> Vec<FontName> {
    entries
        .iter()
        .map(|entry| entry.as_ref().trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((family, style)) if !style.trim().is_empty() => {
                FontName::new(family.trim(), style.trim())
            }
            Some((family, _)) => FontName::regular(family.trim()),
            None => FontName::regular(entry),
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load from `path`, else the central config file if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let source = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => Self::central_config_path().filter(|p| p.is_file()),
        };
        match source {
            Some(file) => Self::from_toml(&std::fs::read_to_string(file)?),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigLoadError> {
        Ok(toml::from_str(text)?)
    }

    /// `~/.config/siteflow/config.toml`
    pub fn central_config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").filter(|h| !h.is_empty())?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("siteflow")
                .join("config.toml"),
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        let families = [
            ("fonts.default_family", &self.fonts.default_family),
            ("fonts.fallback_family", &self.fonts.fallback_family),
            ("fonts.last_resort_family", &self.fonts.last_resort_family),
        ];
        for (key, family) in families {
            if family.trim().is_empty() {
                return Err(format!("{key} must be a non-empty font family"));
            }
        }

        let import = &self.import;
        if !(import.default_root_width > 0.0 && import.default_root_height > 0.0) {
            return Err("import.default_root_width/height must be positive".to_string());
        }
        if !(import.batch_spacing >= 0.0 && import.batch_spacing.is_finite()) {
            return Err("import.batch_spacing must be zero or positive".to_string());
        }

        let capture = &self.capture;
        let timeouts = [
            ("capture.navigation_timeout", capture.navigation_timeout),
            ("capture.network_idle_timeout", capture.network_idle_timeout),
            ("capture.process_timeout", capture.process_timeout),
        ];
        for (key, timeout) in timeouts {
            if timeout.is_zero() {
                return Err(format!("{key} must be greater than zero"));
            }
        }
        if capture.node_command.trim().is_empty() {
            return Err("capture.node_command must not be empty".to_string());
        }
        Ok(())
    }
}
