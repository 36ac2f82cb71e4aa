//! JSON layout and version handling for roadmap files.

use crate::graph::{NodeStore, TopicNode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CURRENT_VERSION: &str = "1.0.0";

/// On-disk form of a roadmap: a version tag plus a flat node list.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoadmapFile {
    pub version: String,
    pub nodes: Vec<TopicNode>,
}

impl RoadmapFile {
    pub fn from_store(store: &NodeStore) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            nodes: store.all().cloned().collect(),
        }
    }

    pub fn into_store(self) -> NodeStore {
        self.nodes.into_iter().collect()
    }
}

/// Validate a roadmap file's schema version.
pub fn validate_version(file: &RoadmapFile) -> Result<()> {
    if file.version != CURRENT_VERSION {
        anyhow::bail!(
            "roadmap version mismatch: expected {}, found {}",
            CURRENT_VERSION,
            file.version
        );
    }
    Ok(())
}

/// Serialize a store to a pretty-printed JSON string.
pub fn to_json(store: &NodeStore) -> Result<String> {
    serde_json::to_string_pretty(&RoadmapFile::from_store(store))
        .context("failed to serialize roadmap to JSON")
}

/// Deserialize a store from a JSON string.
///
/// Node invariants (non-empty id and title) are enforced during parsing.
/// Structural checks are left to [`crate::validation`].
pub fn from_json(json: &str) -> Result<NodeStore> {
    let file: RoadmapFile =
        serde_json::from_str(json).context("failed to deserialize roadmap from JSON")?;
    validate_version(&file)?;
    Ok(file.into_store())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_version() {
        let json = r#"{"version": "0.1.0", "nodes": []}"#;
        let err = from_json(json).unwrap_err();
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_rejects_empty_title() {
        let json = r#"{"version": "1.0.0", "nodes": [{"id": "a", "title": "", "kind": "topic"}]}"#;
        let err = from_json(json).unwrap_err();
        assert!(format!("{:#}", err).contains("title cannot be empty"));
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let json = r#"{"version": "1.0.0", "nodes": [
            {"id": "a", "title": "First", "kind": "topic"},
            {"id": "a", "title": "Second", "kind": "topic"}
        ]}"#;
        let store = from_json(json).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().title(), "Second");
    }
}
