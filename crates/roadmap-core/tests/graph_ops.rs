use roadmap_core::graph::*;

fn make_node(id: &str, kind: NodeKind, prereqs: &[&str], hours: u32) -> TopicNode {
    TopicNode::new(id, format!("Title {}", id), kind)
        .unwrap()
        .with_prerequisites(prereqs.iter().copied())
        .with_hours(hours)
}

#[test]
fn test_add_and_get() {
    let mut store = NodeStore::new();
    store.add(make_node("a", NodeKind::Topic, &[], 5));

    assert_eq!(store.len(), 1);
    let node = store.get("a").unwrap();
    assert_eq!(node.title(), "Title a");
    assert_eq!(node.estimated_hours(), 5);
}

#[test]
fn test_get_missing_returns_none() {
    let store = NodeStore::new();
    assert!(store.get("nope").is_none());
    assert!(!store.contains("nope"));
}

#[test]
fn test_add_overwrites_same_id() {
    let mut store = NodeStore::new();
    store.add(make_node("a", NodeKind::Topic, &[], 5));
    store.add(make_node("a", NodeKind::Topic, &["x"], 9));

    assert_eq!(store.len(), 1);
    let node = store.get("a").unwrap();
    assert_eq!(node.estimated_hours(), 9);
    assert_eq!(node.prerequisites(), ["x".to_string()]);
}

#[test]
fn test_all_is_deterministic() {
    let mut first = NodeStore::new();
    let mut second = NodeStore::new();
    for id in ["c", "a", "b"] {
        first.add(make_node(id, NodeKind::Topic, &[], 1));
    }
    for id in ["b", "c", "a"] {
        second.add(make_node(id, NodeKind::Topic, &[], 1));
    }

    let ids: Vec<&str> = first.all().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    let again: Vec<&str> = first.all().map(|n| n.id()).collect();
    assert_eq!(ids, again);
    let other: Vec<&str> = second.all().map(|n| n.id()).collect();
    assert_eq!(ids, other);
}

#[test]
fn test_load_default_has_canonical_nodes() {
    let store = NodeStore::with_default_roadmap();
    assert_eq!(store.len(), 11);
    for id in [
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
    ] {
        assert!(store.contains(id), "missing {}", id);
    }
    let total: u32 = store.all().map(|n| n.estimated_hours()).sum();
    assert_eq!(total, 275);
}

#[test]
fn test_load_default_prerequisites() {
    let store = NodeStore::with_default_roadmap();
    let infra = store.get("infrastructure").unwrap();
    assert_eq!(
        infra.prerequisites(),
        ["model-adaptation".to_string(), "storage-retrieval".to_string()]
    );
    assert_eq!(store.get("start").unwrap().kind(), NodeKind::Start);
    assert_eq!(store.get("ai-engineer").unwrap().kind(), NodeKind::End);
}

#[test]
fn test_load_default_twice_is_idempotent() {
    let mut store = NodeStore::with_default_roadmap();
    store.load_default();
    assert_eq!(store.len(), 11);
}

#[test]
fn test_builder_keeps_display_fields() {
    let node = TopicNode::new("rust", "Rust", NodeKind::Topic)
        .unwrap()
        .with_description("Systems programming")
        .with_subtopics(["Ownership", "Traits"])
        .with_resources(["https://doc.rust-lang.org/book/"]);

    assert_eq!(node.description(), "Systems programming");
    assert_eq!(node.subtopics().len(), 2);
    assert_eq!(node.resources()[0], "https://doc.rust-lang.org/book/");
    assert!(node.is_topic());
}

#[test]
fn test_from_iterator_collects_store() {
    let store: NodeStore = vec![
        make_node("s", NodeKind::Start, &[], 0),
        make_node("t", NodeKind::Topic, &["s"], 3),
    ]
    .into_iter()
    .collect();
    assert_eq!(store.len(), 2);
    assert_eq!(store.ids().collect::<Vec<_>>(), vec!["s", "t"]);
}
