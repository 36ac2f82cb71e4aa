//! Graph queries over a [`NodeStore`]: overview, learning paths,
//! prerequisites, recommendations, and remaining effort.
//!
//! Every query is total. Unknown ids yield empty results, never errors, and
//! progress is always supplied by the caller as a [`CompletionState`].

use roadmap_core::graph::{CompletionState, NodeKind, NodeStore, TopicNode};
use serde::Serialize;
use std::collections::HashSet;

/// Aggregate size of a roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_nodes: usize,
    pub estimated_total_hours: u64,
}

/// The fields a presentation layer needs to list a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    pub estimated_hours: u32,
}

impl From<&TopicNode> for NodeSummary {
    fn from(node: &TopicNode) -> Self {
        Self {
            id: node.id().to_string(),
            title: node.title().to_string(),
            kind: node.kind(),
            estimated_hours: node.estimated_hours(),
        }
    }
}

/// Convert query results into serializable summaries.
pub fn summaries(nodes: &[&TopicNode]) -> Vec<NodeSummary> {
    nodes.iter().map(|n| NodeSummary::from(*n)).collect()
}

/// Stateless query engine borrowing a populated store.
#[derive(Debug, Clone, Copy)]
pub struct RoadmapEngine<'a> {
    store: &'a NodeStore,
}

impl<'a> RoadmapEngine<'a> {
    pub fn new(store: &'a NodeStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a NodeStore {
        self.store
    }

    /// Count every node and sum every estimate, sentinels included.
    pub fn overview(&self) -> Overview {
        Overview {
            total_nodes: self.store.len(),
            estimated_total_hours: self
                .store
                .all()
                .map(|n| u64::from(n.estimated_hours()))
                .sum(),
        }
    }

    /// All ancestors of `target_id` followed by the target itself, each node
    /// after all of its prerequisites.
    ///
    /// Depth-first from the target, visiting prerequisites in listed order and
    /// appending a node once all of them are done. A node is entered at most
    /// once, which handles diamonds and stops (silently) on cycles. Unknown
    /// prerequisite ids are skipped; an unknown target gives an empty path.
    pub fn learning_path(&self, target_id: &str) -> Vec<&'a TopicNode> {
        let Some(target) = self.store.get(target_id) else {
            return Vec::new();
        };

        let mut path = Vec::new();
        let mut visited: HashSet<&'a str> = HashSet::new();
        // (node, index of the next prerequisite to visit)
        let mut stack: Vec<(&'a TopicNode, usize)> = vec![(target, 0)];
        visited.insert(target.id());

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let Some(prereq_id) = node.prerequisites().get(next) else {
                path.push(node);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if visited.contains(prereq_id.as_str()) {
                continue;
            }
            if let Some(prereq) = self.store.get(prereq_id) {
                visited.insert(prereq.id());
                stack.push((prereq, 0));
            }
        }

        path
    }

    /// Total estimated hours along [`Self::learning_path`].
    pub fn path_hours(&self, target_id: &str) -> u64 {
        self.learning_path(target_id)
            .iter()
            .map(|n| u64::from(n.estimated_hours()))
            .sum()
    }

    /// Direct prerequisites of `node_id` that exist in the store, in listed order.
    pub fn prerequisites(&self, node_id: &str) -> Vec<&'a TopicNode> {
        let Some(node) = self.store.get(node_id) else {
            return Vec::new();
        };
        node.prerequisites()
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    /// Topics that are not done yet but whose prerequisites all are.
    ///
    /// START and END are never recommended. Results follow store order.
    pub fn next_recommended(&self, completed: &CompletionState) -> Vec<&'a TopicNode> {
        self.store
            .all()
            .filter(|node| node.kind() == NodeKind::Topic)
            .filter(|node| !completed.contains(node.id()))
            .filter(|node| node.prerequisites().iter().all(|p| completed.contains(p)))
            .collect()
    }

    /// Sum of estimated hours over every node not in `completed`.
    pub fn remaining_hours(&self, completed: &CompletionState) -> u64 {
        self.store
            .all()
            .filter(|node| !completed.contains(node.id()))
            .map(|node| u64::from(node.estimated_hours()))
            .sum()
    }

    /// `(label, id)` pairs for every TOPIC node, sorted by label.
    /// Labels read `"{title} ({hours}h)"`.
    pub fn topic_choices(&self) -> Vec<(String, String)> {
        let mut choices: Vec<(String, String)> = self
            .store
            .all()
            .filter(|node| node.is_topic())
            .map(|node| {
                (
                    format!("{} ({}h)", node.title(), node.estimated_hours()),
                    node.id().to_string(),
                )
            })
            .collect();
        choices.sort();
        choices
    }

    /// Whether every TOPIC node is in `completed`.
    pub fn is_finished(&self, completed: &CompletionState) -> bool {
        self.store
            .all()
            .filter(|node| node.is_topic())
            .all(|node| completed.contains(node.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, kind: NodeKind, prereqs: &[&str], hours: u32) -> TopicNode {
        TopicNode::new(id, id, kind)
            .unwrap()
            .with_prerequisites(prereqs.iter().copied())
            .with_hours(hours)
    }

    #[test]
    fn test_diamond_visits_shared_ancestor_once() {
        let store: NodeStore = [
            node("s", NodeKind::Start, &[], 0),
            node("a", NodeKind::Topic, &["s"], 1),
            node("b", NodeKind::Topic, &["s"], 2),
            node("e", NodeKind::End, &["a", "b"], 0),
        ]
        .into_iter()
        .collect();
        let engine = RoadmapEngine::new(&store);

        let ids: Vec<&str> = engine.learning_path("e").iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["s", "a", "b", "e"]);
    }

    #[test]
    fn test_cycle_truncates_instead_of_looping() {
        let store: NodeStore = [
            node("a", NodeKind::Topic, &["b"], 1),
            node("b", NodeKind::Topic, &["a"], 1),
        ]
        .into_iter()
        .collect();
        let engine = RoadmapEngine::new(&store);

        let ids: Vec<&str> = engine.learning_path("a").iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_missing_prerequisite_is_skipped() {
        let store: NodeStore = [node("a", NodeKind::Topic, &["ghost"], 1)]
            .into_iter()
            .collect();
        let engine = RoadmapEngine::new(&store);

        let ids: Vec<&str> = engine.learning_path("a").iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["a"]);
        assert!(engine.prerequisites("a").is_empty());
    }

    #[test]
    fn test_prerequisites_keep_listed_order() {
        let store: NodeStore = [
            node("z", NodeKind::Topic, &[], 1),
            node("y", NodeKind::Topic, &[], 1),
            node("x", NodeKind::Topic, &["z", "missing", "y"], 1),
        ]
        .into_iter()
        .collect();
        let engine = RoadmapEngine::new(&store);

        let ids: Vec<&str> = engine.prerequisites("x").iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["z", "y"]);
    }
}
