//! Structural checks for a roadmap before it is served.
//!
//! Queries never re-verify the graph; a cycle there just truncates the
//! traversal. Roadmaps loaded from disk are checked here instead, so a
//! cyclic or headless roadmap is rejected up front.

use crate::graph::{NodeKind, NodeStore, TopicNode};
use std::collections::HashSet;

/// A structural defect that makes the roadmap unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Prerequisite chain that loops back on itself, in "requires" order.
    #[error("prerequisite cycle detected: {}", .cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },
    #[error("roadmap has no start node")]
    MissingStart,
    #[error("roadmap has multiple start nodes: {}", .ids.join(", "))]
    MultipleStarts { ids: Vec<String> },
    #[error("roadmap has no end node")]
    MissingEnd,
    #[error("roadmap has multiple end nodes: {}", .ids.join(", "))]
    MultipleEnds { ids: Vec<String> },
}

/// Outcome of [`validate`]: hard errors plus advisory warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first error, or the warnings when there are none.
    pub fn into_result(self) -> Result<Vec<String>, ValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.warnings),
        }
    }
}

/// Run every structural check against `store`.
pub fn validate(store: &NodeStore) -> ValidationReport {
    let mut report = ValidationReport::default();

    let ids_of = |kind: NodeKind| -> Vec<String> {
        store
            .all()
            .filter(|n| n.kind() == kind)
            .map(|n| n.id().to_string())
            .collect()
    };

    let starts = ids_of(NodeKind::Start);
    match starts.len() {
        0 => report.errors.push(ValidationError::MissingStart),
        1 => {}
        _ => report
            .errors
            .push(ValidationError::MultipleStarts { ids: starts }),
    }

    let ends = ids_of(NodeKind::End);
    match ends.len() {
        0 => report.errors.push(ValidationError::MissingEnd),
        1 => {}
        _ => report.errors.push(ValidationError::MultipleEnds { ids: ends }),
    }

    if let Some(cycle) = detect_cycle(store) {
        report.errors.push(ValidationError::CycleDetected { cycle });
    }

    for node in store.all() {
        for prereq in node.prerequisites() {
            if !store.contains(prereq) {
                report.warnings.push(format!(
                    "{} lists unknown prerequisite {}",
                    node.id(),
                    prereq
                ));
            }
        }
        match node.kind() {
            NodeKind::Start if !node.prerequisites().is_empty() => {
                report
                    .warnings
                    .push(format!("start node {} has prerequisites", node.id()));
            }
            NodeKind::Topic | NodeKind::End if node.prerequisites().is_empty() => {
                report.warnings.push(format!(
                    "{} node {} has no prerequisites",
                    node.kind(),
                    node.id()
                ));
            }
            _ => {}
        }
    }

    report
}

/// DFS-based cycle detection over the prerequisite relation.
///
/// Returns the first cycle found (ids in "requires" order, first id repeated
/// at the end), or `None` for a DAG. Unknown prerequisite ids are ignored.
pub fn detect_cycle(store: &NodeStore) -> Option<Vec<String>> {
    let mut visiting: HashSet<&str> = HashSet::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for node in store.all() {
        if !visited.contains(node.id())
            && let Some(cycle) = cycle_from(store, node, &mut visiting, &mut visited)
        {
            return Some(cycle);
        }
    }
    None
}

/// Iterative DFS from `root`. The stack doubles as the current path, so
/// `visiting` holds exactly the ids on it.
fn cycle_from<'a>(
    store: &'a NodeStore,
    root: &'a TopicNode,
    visiting: &mut HashSet<&'a str>,
    visited: &mut HashSet<&'a str>,
) -> Option<Vec<String>> {
    // (node, index of the next prerequisite to visit)
    let mut stack: Vec<(&'a TopicNode, usize)> = vec![(root, 0)];
    visiting.insert(root.id());

    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        let Some(prereq_id) = node.prerequisites().get(next) else {
            visiting.remove(node.id());
            visited.insert(node.id());
            stack.pop();
            continue;
        };
        frame.1 += 1;
        let prereq_id = prereq_id.as_str();

        if visiting.contains(prereq_id) {
            let start = stack.iter().position(|(n, _)| n.id() == prereq_id)?;
            let mut cycle: Vec<String> = stack[start..]
                .iter()
                .map(|(n, _)| n.id().to_string())
                .collect();
            cycle.push(prereq_id.to_string());
            return Some(cycle);
        }
        if visited.contains(prereq_id) {
            continue;
        }
        if let Some(prereq) = store.get(prereq_id) {
            visiting.insert(prereq.id());
            stack.push((prereq, 0));
        }
    }
    None
}
