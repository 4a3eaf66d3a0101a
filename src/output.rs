use std::path::PathBuf;

use serde::Serialize;

use crate::error::ErrorPayload;
use crate::reconstruct::PlacedRoot;
use crate::session::Reply;
use crate::viewport::Viewport;

/// Schema version for output payloads.
pub const SITEFLOW_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SiteflowOutput {
    Capture(CaptureOutput),
    Import(ImportOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Url,
    Snapshot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOutput {
    pub version: String,
    pub source: SourceDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    pub document_name: String,
    pub node_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutput {
    pub version: String,
    pub inputs: Vec<String>,
    pub imported: usize,
    pub failed: usize,
    pub roots: Vec<PlacedRoot>,
    /// Session replies, in the order they were sent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Reply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
