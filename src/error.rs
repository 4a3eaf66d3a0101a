use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reconstruct::{HostError, ImportError};
use crate::session::ProtocolError;
use crate::viewport::ViewportParseError;

#[derive(Debug, Error)]
pub enum SiteflowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl SiteflowError {
    pub fn capture(message: impl Into<String>) -> Self {
        SiteflowError::Capture(message.into())
    }

    pub fn import(message: impl Into<String>) -> Self {
        SiteflowError::Import(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            SiteflowError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            SiteflowError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Import,
                e.to_string(),
                "Check that the input is a design document or page snapshot JSON file.",
            ),
            SiteflowError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("viewport") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use WIDTHxHEIGHT for viewports (e.g., --viewport 1440x900).",
                    )
                } else if lower.contains("family") || lower.contains("font") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set non-empty family names under [fonts] and list fonts as Family:Style.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the [fonts]/[import]/[capture] config sections.",
                    )
                }
            }
            SiteflowError::Capture(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("playwright npm package is missing") {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Install Playwright (e.g., `npm install playwright` and `npx playwright install chromium`).",
                    )
                } else if lower.contains("chromium executable") {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Run `npx playwright install chromium` to download the browser.",
                    )
                } else if lower.contains("spawn playwright helper")
                    || lower.contains("not found on path")
                {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Install Node.js and ensure the node binary is on PATH; rerun after installing Playwright if needed.",
                    )
                } else if lower.contains("timeout") || lower.contains("timed out") {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Try increasing --nav-timeout/--network-idle-timeout or ensure the page loads without blocking.",
                    )
                } else if lower.contains("invalid url") {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Pass an absolute http(s) URL (e.g., https://example.com).",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Re-run with --verbose, or capture from a saved --snapshot file.",
                    )
                }
            }
            SiteflowError::Import(msg) => ErrorPayload::new(
                ErrorCategory::Import,
                msg.to_string(),
                "Check the document JSON; run with --verbose to see per-node failures.",
            ),
            SiteflowError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

impl From<ViewportParseError> for SiteflowError {
    fn from(err: ViewportParseError) -> Self {
        SiteflowError::Config(format!("Invalid viewport: {err}"))
    }
}

impl From<HostError> for SiteflowError {
    fn from(err: HostError) -> Self {
        SiteflowError::Import(err.to_string())
    }
}

impl From<ImportError> for SiteflowError {
    fn from(err: ImportError) -> Self {
        SiteflowError::Import(err.to_string())
    }
}

impl From<ProtocolError> for SiteflowError {
    fn from(err: ProtocolError) -> Self {
        SiteflowError::Import(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteflowError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Capture,
    Import,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
