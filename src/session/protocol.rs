//! Session wire messages.
//!
//! One JSON object per message, discriminated by `type`:
//!
//! ```json
//! {"type":"import-json","data":{"type":"FRAME","name":"Page", ...}}
//! {"type":"import-batch","items":[{"name":"a.json","data":"{...}"}]}
//! {"type":"close"}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::Node;

/// A command sent to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    ImportJson {
        #[serde(default)]
        data: Option<Node>,
    },
    ImportBatch {
        #[serde(default)]
        items: Vec<BatchItem>,
    },
    Close,
}

/// One document of a batch; `data` is the document's JSON text, decoded per item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub name: String,
    pub data: String,
}

/// A message sent back by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Reply {
    Status { message: String },
    Progress {
        current: usize,
        total: usize,
        name: String,
    },
    Success { message: String },
    Error { message: String },
}

impl Reply {
    pub fn status(message: impl Into<String>) -> Self {
        Reply::Status {
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Reply::Success {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Reply::Error {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid command: {0}")]
    InvalidCommand(#[source] serde_json::Error),
    #[error("failed to encode reply: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decode one command, validating its payload shape.
pub fn decode_command(line: &str) -> Result<Command, ProtocolError> {
    serde_json::from_str(line).map_err(ProtocolError::InvalidCommand)
}

/// Encode a reply as a single JSON line (no trailing newline).
pub fn encode_reply(reply: &Reply) -> Result<String, ProtocolError> {
    serde_json::to_string(reply).map_err(ProtocolError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_command() {
        let cmd = decode_command(r#"{"type":"close"}"#).unwrap();
        assert_eq!(cmd, Command::Close);

        let cmd = decode_command(r#"{"type":"import-json"}"#).unwrap();
        assert_eq!(cmd, Command::ImportJson { data: None });

        let cmd = decode_command(
            r#"{"type":"import-batch","items":[{"name":"one.json","data":"{}"}]}"#,
        )
        .unwrap();
        let Command::ImportBatch { items } = cmd else {
            panic!("expected batch");
        };
        assert_eq!(items[0].name, "one.json");
    }

    #[test]
    fn import_json_carries_a_typed_document() {
        let cmd = decode_command(
            r#"{"type":"import-json","data":{"type":"FRAME","name":"Page","x":0,"y":0,"width":10,"height":10}}"#,
        )
        .unwrap();
        let Command::ImportJson { data: Some(node) } = cmd else {
            panic!("expected document");
        };
        assert_eq!(node.name, "Page");
    }

    #[test]
    fn rejects_unknown_type_and_bad_shape() {
        let err = decode_command(r#"{"type":"export"}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid command: "));
        assert!(decode_command(r#"{"type":"import-batch","items":"nope"}"#).is_err());
        assert!(decode_command("not json").is_err());
    }

    #[test]
    fn replies_are_tagged_kebab_case() {
        let line = encode_reply(&Reply::Progress {
            current: 1,
            total: 3,
            name: "a.json".into(),
        })
        .unwrap();
        assert_eq!(line, r#"{"type":"progress","current":1,"total":3,"name":"a.json"}"#);
        assert_eq!(
            encode_reply(&Reply::error("x")).unwrap(),
            r#"{"type":"error","message":"x"}"#
        );
    }
}
