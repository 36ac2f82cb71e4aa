use roadmap_core::graph::*;
use roadmap_nav::engine::{RoadmapEngine, summaries};
use std::collections::HashMap;

fn make_node(id: &str, kind: NodeKind, prereqs: &[&str], hours: u32) -> TopicNode {
    TopicNode::new(id, format!("Title {}", id), kind)
        .unwrap()
        .with_prerequisites(prereqs.iter().copied())
        .with_hours(hours)
}

fn ids<'a>(nodes: &[&'a TopicNode]) -> Vec<&'a str> {
    nodes.iter().map(|n| n.id()).collect()
}

fn completed(ids: &[&str]) -> CompletionState {
    ids.iter().copied().collect()
}

/// A store with diamonds, a dangling prerequisite, and an unreachable island.
fn make_irregular_store() -> NodeStore {
    [
        make_node("s", NodeKind::Start, &[], 0),
        make_node("a", NodeKind::Topic, &["s"], 4),
        make_node("b", NodeKind::Topic, &["s", "a"], 6),
        make_node("c", NodeKind::Topic, &["b", "a", "ghost"], 8),
        make_node("d", NodeKind::Topic, &["c", "s"], 1),
        make_node("island", NodeKind::Topic, &[], 3),
        make_node("e", NodeKind::End, &["d", "b"], 0),
    ]
    .into_iter()
    .collect()
}

// ---------------------------------------------------------------------------
// Canonical fixture scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_overview_of_default_roadmap() {
    let store = NodeStore::with_default_roadmap();
    let overview = RoadmapEngine::new(&store).overview();
    assert_eq!(overview.total_nodes, 11);
    assert_eq!(overview.estimated_total_hours, 275);
}

#[test]
fn test_full_learning_path() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);

    let path = engine.learning_path("ai-engineer");
    let ids = ids(&path);
    assert_eq!(
        ids,
        vec![
            "start",
            "llm-apis",
            "model-adaptation",
            "storage-retrieval",
            "infrastructure",
            "ai-agents",
            "rag-agentic",
            "observability-evaluation",
            "security",
            "forward-looking",
            "ai-engineer",
        ]
    );
    let pos = |id: &str| ids.iter().position(|x| *x == id).unwrap();
    assert!(pos("model-adaptation") < pos("infrastructure"));
    assert_eq!(engine.path_hours("ai-engineer"), 275);
}

#[test]
fn test_path_for_node_without_prerequisites() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    assert_eq!(ids(&engine.learning_path("start")), vec!["start"]);
}

#[test]
fn test_path_for_unknown_target_is_empty() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    assert!(engine.learning_path("quantum-computing").is_empty());
    assert_eq!(engine.path_hours("quantum-computing"), 0);
}

#[test]
fn test_prerequisites_of_infrastructure() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    assert_eq!(
        ids(&engine.prerequisites("infrastructure")),
        vec!["model-adaptation", "storage-retrieval"]
    );
    assert!(engine.prerequisites("start").is_empty());
    assert!(engine.prerequisites("unknown").is_empty());
}

#[test]
fn test_recommend_after_start() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    let next = ids(&engine.next_recommended(&completed(&["start"])));
    assert!(next.contains(&"llm-apis"));
    assert!(!next.contains(&"model-adaptation"));
}

#[test]
fn test_recommend_after_llm_apis() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    let next = ids(&engine.next_recommended(&completed(&["start", "llm-apis"])));
    assert!(next.contains(&"model-adaptation"));
    assert!(next.contains(&"storage-retrieval"));
    assert_eq!(next.len(), 2);
}

#[test]
fn test_nothing_recommended_before_start() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    assert!(engine.next_recommended(&CompletionState::new()).is_empty());
}

#[test]
fn test_end_is_never_recommended() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    let all_but_end: CompletionState = store.ids().filter(|id| *id != "ai-engineer").collect();
    assert!(engine.next_recommended(&all_but_end).is_empty());
}

#[test]
fn test_remaining_hours_after_llm_apis() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    assert_eq!(
        engine.remaining_hours(&completed(&["start", "llm-apis"])),
        255
    );
    assert_eq!(engine.remaining_hours(&CompletionState::new()), 275);
}

#[test]
fn test_topic_choices_sorted_and_topics_only() {
    let store = NodeStore::with_default_roadmap();
    let choices = RoadmapEngine::new(&store).topic_choices();
    assert_eq!(choices.len(), 9);
    assert_eq!(choices[0], ("AI Agents (50h)".to_string(), "ai-agents".to_string()));
    let mut sorted = choices.clone();
    sorted.sort();
    assert_eq!(choices, sorted);
    assert!(choices.iter().all(|(_, id)| id != "start" && id != "ai-engineer"));
}

#[test]
fn test_summaries_serialize() {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);
    let path = summaries(&engine.learning_path("llm-apis"));
    let json = serde_json::to_value(&path).unwrap();
    assert_eq!(json[0]["id"], "start");
    assert_eq!(json[0]["kind"], "start");
    assert_eq!(json[1]["title"], "LLM APIs");
    assert_eq!(json[1]["estimated_hours"], 20);
}

// ---------------------------------------------------------------------------
// Properties over an irregular store
// ---------------------------------------------------------------------------

#[test]
fn test_overview_counts_every_node() {
    let store = make_irregular_store();
    let overview = RoadmapEngine::new(&store).overview();
    assert_eq!(overview.total_nodes, 7);
    assert_eq!(overview.estimated_total_hours, 4 + 6 + 8 + 1 + 3);
}

#[test]
fn test_every_path_is_topologically_ordered() {
    let store = make_irregular_store();
    let engine = RoadmapEngine::new(&store);

    for target in store.ids() {
        let path = engine.learning_path(target);
        assert_eq!(path.last().unwrap().id(), target);

        let position: HashMap<&str, usize> =
            path.iter().enumerate().map(|(i, n)| (n.id(), i)).collect();
        assert_eq!(position.len(), path.len(), "duplicate node in path to {}", target);

        for (i, node) in path.iter().enumerate() {
            for prereq in node.prerequisites() {
                if store.contains(prereq) {
                    let p = position[prereq.as_str()];
                    assert!(p < i, "{} must come before {} in path to {}", prereq, node.id(), target);
                }
            }
        }
    }
}

#[test]
fn test_path_is_idempotent() {
    let store = make_irregular_store();
    let engine = RoadmapEngine::new(&store);
    for target in store.ids() {
        assert_eq!(
            ids(&engine.learning_path(target)),
            ids(&engine.learning_path(target))
        );
    }
}

#[test]
fn test_path_excludes_unrelated_nodes() {
    let store = make_irregular_store();
    let engine = RoadmapEngine::new(&store);
    let path = ids(&engine.learning_path("e"));
    assert!(!path.contains(&"island"));
    assert_eq!(path, vec!["s", "a", "b", "c", "d", "e"]);
}

#[test]
fn test_remaining_plus_completed_equals_total() {
    let store = make_irregular_store();
    let engine = RoadmapEngine::new(&store);
    let total = engine.overview().estimated_total_hours;

    let done = ["s", "a", "c", "island"];
    let state = completed(&done);
    let done_hours: u64 = done
        .iter()
        .map(|id| u64::from(store.get(id).unwrap().estimated_hours()))
        .sum();
    assert_eq!(engine.remaining_hours(&state) + done_hours, total);
}

#[test]
fn test_recommendations_respect_eligibility() {
    let store = make_irregular_store();
    let engine = RoadmapEngine::new(&store);
    let state = completed(&["s", "a", "b"]);

    let next = engine.next_recommended(&state);
    for node in &next {
        assert_eq!(node.kind(), NodeKind::Topic);
        assert!(!state.contains(node.id()));
    }
    // island has no prerequisites; c is blocked by its dangling "ghost" prerequisite.
    assert_eq!(ids(&next), vec!["island"]);
}
