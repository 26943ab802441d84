use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::EtcdApiError;

/// One entry in the remote key hierarchy: a leaf value or a directory.
///
/// Optional wire fields stay `None` when absent so callers can tell
/// "no TTL" apart from "TTL of zero". Serialization skips absent fields,
/// keeping a parse/re-serialize round trip structurally faithful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtcdNode {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<bool>,
    #[serde(rename = "createdIndex")]
    pub created_index: u64,
    #[serde(rename = "modifiedIndex")]
    pub modified_index: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<EtcdNode>>,
}

impl EtcdNode {
    pub fn is_dir(&self) -> bool {
        self.dir == Some(true)
    }

    /// Child nodes of a directory, empty for leaves and empty directories.
    pub fn children(&self) -> &[EtcdNode] {
        self.nodes.as_deref().unwrap_or_default()
    }

    /// Enforce the tree invariant: a node never carries both a value and
    /// child nodes. Checked recursively over the whole subtree.
    pub(crate) fn validate(&self) -> Result<(), EtcdApiError> {
        if self.value.is_some() && !self.children().is_empty() {
            return Err(EtcdApiError::malformed(format!(
                "node '{}' carries both a value and child nodes",
                self.key
            )));
        }
        for child in self.children() {
            child.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for EtcdNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}
