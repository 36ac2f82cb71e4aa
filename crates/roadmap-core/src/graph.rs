//! Graph data model for the learning roadmap.
//!
//! A roadmap is a set of [`TopicNode`]s connected by prerequisite edges
//! (`prerequisite → node`). Nodes live in a [`NodeStore`]; learner progress is
//! a caller-owned [`CompletionState`] that is passed into every query.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Errors raised when constructing a [`TopicNode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    #[error("node id cannot be empty")]
    EmptyId,
    #[error("node title cannot be empty")]
    EmptyTitle,
}

/// The role a node plays in the roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Entry sentinel. Has no prerequisites and no effort.
    Start,
    /// An ordinary learning topic.
    Topic,
    /// Exit sentinel. Has no effort.
    End,
}

impl NodeKind {
    /// START and END are bookkeeping nodes, not things to study.
    pub fn is_sentinel(self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::End)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Topic => "topic",
            NodeKind::End => "end",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in the roadmap: a learning subject or a START/END sentinel.
///
/// Construct with [`TopicNode::new`] and the `with_*` builders. Deserialization
/// goes through the same validation, so an empty `id` or `title` never reaches
/// a [`NodeStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTopicNode")]
pub struct TopicNode {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) kind: NodeKind,
    pub(crate) subtopics: Vec<String>,
    pub(crate) prerequisites: Vec<String>,
    pub(crate) estimated_hours: u32,
    pub(crate) resources: Vec<String>,
}

/// Unvalidated wire form of a [`TopicNode`].
#[derive(Deserialize)]
struct RawTopicNode {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    kind: NodeKind,
    #[serde(default)]
    subtopics: Vec<String>,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    estimated_hours: u32,
    #[serde(default)]
    resources: Vec<String>,
}

impl TryFrom<RawTopicNode> for TopicNode {
    type Error = NodeError;

    fn try_from(raw: RawTopicNode) -> Result<Self, Self::Error> {
        let mut node = TopicNode::new(raw.id, raw.title, raw.kind)?;
        node.description = raw.description;
        node.subtopics = raw.subtopics;
        node.prerequisites = raw.prerequisites;
        node.estimated_hours = raw.estimated_hours;
        node.resources = raw.resources;
        Ok(node)
    }
}

impl TopicNode {
    /// Create a node with no description, prerequisites, effort or resources.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: NodeKind,
    ) -> Result<Self, NodeError> {
        let id = id.into();
        let title = title.into();
        if id.is_empty() {
            return Err(NodeError::EmptyId);
        }
        if title.is_empty() {
            return Err(NodeError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            description: String::new(),
            kind,
            subtopics: Vec::new(),
            prerequisites: Vec::new(),
            estimated_hours: 0,
            resources: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_subtopics<I, S>(mut self, subtopics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtopics = subtopics.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = hours;
        self
    }

    #[must_use]
    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn subtopics(&self) -> &[String] {
        &self.subtopics
    }

    /// Ids that must be completed before this node is eligible, in listed order.
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn estimated_hours(&self) -> u32 {
        self.estimated_hours
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn is_topic(&self) -> bool {
        self.kind == NodeKind::Topic
    }
}

/// In-memory holder of every [`TopicNode`] in one roadmap.
///
/// Iteration is in ascending id order, so output is deterministic for a given
/// set of nodes. The store is populated once and then only read; it is
/// `Send + Sync`, and shared borrows make concurrent reads safe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStore {
    nodes: BTreeMap<String, TopicNode>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store populated with the canonical AI engineering roadmap.
    pub fn with_default_roadmap() -> Self {
        let mut store = Self::new();
        store.load_default();
        store
    }

    /// Insert a node, replacing any existing node with the same id.
    pub fn add(&mut self, node: TopicNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn get(&self, id: &str) -> Option<&TopicNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All stored nodes in ascending id order.
    pub fn all(&self) -> impl Iterator<Item = &TopicNode> + '_ {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Populate the store with the canonical fixture (see [`crate::fixture`]).
    pub fn load_default(&mut self) {
        for node in crate::fixture::default_roadmap() {
            self.add(node);
        }
    }
}

impl FromIterator<TopicNode> for NodeStore {
    fn from_iter<I: IntoIterator<Item = TopicNode>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<TopicNode> for NodeStore {
    fn extend<I: IntoIterator<Item = TopicNode>>(&mut self, iter: I) {
        for node in iter {
            self.add(node);
        }
    }
}

/// The set of node ids a learner has finished.
///
/// Owned by whoever presents the roadmap. The engine only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionState {
    completed: BTreeSet<String>,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.completed.iter().map(String::as_str)
    }

    /// Mark `id` complete. Returns false if it already was.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.completed.insert(id.into())
    }

    /// Clear `id`. Returns false if it was not complete.
    pub fn remove(&mut self, id: &str) -> bool {
        self.completed.remove(id)
    }

    #[must_use]
    pub fn with_completed(mut self, id: impl Into<String>) -> Self {
        self.insert(id);
        self
    }

    #[must_use]
    pub fn without(mut self, id: &str) -> Self {
        self.remove(id);
        self
    }
}

impl<S: Into<String>> FromIterator<S> for CompletionState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            completed: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompletionState {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.completed.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_id() {
        let err = TopicNode::new("", "Title", NodeKind::Topic).unwrap_err();
        assert_eq!(err, NodeError::EmptyId);
    }

    #[test]
    fn test_new_rejects_empty_title() {
        let err = TopicNode::new("id", "", NodeKind::Topic).unwrap_err();
        assert_eq!(err, NodeError::EmptyTitle);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"id": "", "title": "x", "kind": "topic"}"#;
        let err = serde_json::from_str::<TopicNode>(json).unwrap_err();
        assert!(err.to_string().contains("node id cannot be empty"));
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let json = r#"{"id": "a", "title": "A", "kind": "end"}"#;
        let node: TopicNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind(), NodeKind::End);
        assert!(node.prerequisites().is_empty());
        assert_eq!(node.estimated_hours(), 0);
    }

    #[test]
    fn test_sentinel_kinds() {
        assert!(NodeKind::Start.is_sentinel());
        assert!(NodeKind::End.is_sentinel());
        assert!(!NodeKind::Topic.is_sentinel());
    }

    #[test]
    fn test_completion_state_value_helpers() {
        let state = CompletionState::new()
            .with_completed("start")
            .with_completed("llm-apis")
            .without("start");
        assert!(state.contains("llm-apis"));
        assert!(!state.contains("start"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_completion_state_dedups() {
        let state: CompletionState = ["a", "a", "b"].into_iter().collect();
        assert_eq!(state.len(), 2);
    }
}
