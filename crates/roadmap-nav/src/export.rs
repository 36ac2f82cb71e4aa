//! Export the roadmap as DOT (Graphviz) or a Mermaid flowchart.
//!
//! Edges point from prerequisite to dependent. Completed nodes are filled
//! green; sentinels get their own shapes.

use roadmap_core::graph::{CompletionState, NodeKind, NodeStore, TopicNode};
use std::collections::{HashMap, HashSet};

/// Export format for graph visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Dot,
    Mermaid,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            "mermaid" | "md" => Ok(ExportFormat::Mermaid),
            other => Err(format!(
                "unknown export format: {}. Use 'dot' or 'mermaid'.",
                other
            )),
        }
    }
}

const DONE_FILL: &str = "#e0ffe0";
const TODO_FILL: &str = "#ffffff";
const SENTINEL_FILL: &str = "#e0e0ff";

fn node_label(node: &TopicNode) -> String {
    if node.kind().is_sentinel() {
        node.title().to_string()
    } else {
        format!("{} ({}h)", node.title(), node.estimated_hours())
    }
}

/// Export the roadmap as a DOT (Graphviz) string.
pub fn export_dot(store: &NodeStore, completed: &CompletionState) -> String {
    let mut out = String::new();
    out.push_str("digraph Roadmap {\n");
    out.push_str("  rankdir=TB;\n");
    out.push_str("  node [shape=box, fontsize=10];\n\n");

    for node in store.all() {
        let shape = match node.kind() {
            NodeKind::Start => "circle",
            NodeKind::Topic => "box",
            NodeKind::End => "doublecircle",
        };
        let fill = if completed.contains(node.id()) {
            DONE_FILL
        } else if node.kind().is_sentinel() {
            SENTINEL_FILL
        } else {
            TODO_FILL
        };
        out.push_str(&format!(
            "  \"{}\" [shape={}, style=filled, fillcolor=\"{}\", label=\"{}\"];\n",
            dot_escape(node.id()),
            shape,
            fill,
            dot_escape(&node_label(node))
        ));
    }

    out.push('\n');

    for node in store.all() {
        for prereq in node.prerequisites() {
            if !store.contains(prereq) {
                continue;
            }
            out.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                dot_escape(prereq),
                dot_escape(node.id())
            ));
        }
    }

    out.push_str("}\n");
    out
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Export the roadmap as a Mermaid flowchart string.
pub fn export_mermaid(store: &NodeStore, completed: &CompletionState) -> String {
    let mut out = String::new();
    out.push_str("flowchart TD\n");
    let ids = mermaid_ids(store);

    for node in store.all() {
        let id = &ids[node.id()];
        let label = node_label(node).replace('"', "#quot;");
        let line = match node.kind() {
            NodeKind::Start | NodeKind::End => format!("  {}((\"{}\"))\n", id, label),
            NodeKind::Topic => format!("  {}[\"{}\"]\n", id, label),
        };
        out.push_str(&line);
    }

    for node in store.all() {
        for prereq in node.prerequisites() {
            if !store.contains(prereq) {
                continue;
            }
            out.push_str(&format!(
                "  {} --> {}\n",
                ids[prereq.as_str()],
                ids[node.id()]
            ));
        }
    }

    let done: Vec<&str> = store
        .all()
        .filter(|n| completed.contains(n.id()))
        .map(|n| ids[n.id()].as_str())
        .collect();
    if !done.is_empty() {
        out.push_str(&format!("  classDef done fill:{}\n", DONE_FILL));
        out.push_str(&format!("  class {} done\n", done.join(",")));
    }

    out
}

/// Mermaid ids must be plain identifiers.
fn mermaid_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// One distinct Mermaid identifier per node. Ids that sanitize to the same
/// identifier get a numeric suffix, in store order.
fn mermaid_ids(store: &NodeStore) -> HashMap<&str, String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut ids = HashMap::new();
    for id in store.ids() {
        let base = mermaid_id(id);
        let mut candidate = base.clone();
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        taken.insert(candidate.clone());
        ids.insert(id, candidate);
    }
    ids
}

/// Export the roadmap in the given format.
pub fn export(store: &NodeStore, format: ExportFormat, completed: &CompletionState) -> String {
    match format {
        ExportFormat::Dot => export_dot(store, completed),
        ExportFormat::Mermaid => export_mermaid(store, completed),
    }
}
