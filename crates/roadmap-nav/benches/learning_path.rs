use criterion::{Criterion, criterion_group, criterion_main};
use roadmap_core::graph::*;
use roadmap_nav::engine::RoadmapEngine;
use std::hint::black_box;

/// Build a layered DAG: `layers` rows of `width` topics, each topic requiring
/// every topic in the row above. The densest shape a roadmap takes.
fn build_layered_roadmap(layers: usize, width: usize) -> NodeStore {
    let mut store = NodeStore::new();
    store.add(TopicNode::new("start", "Start", NodeKind::Start).unwrap());

    let mut previous = vec!["start".to_string()];
    for layer in 0..layers {
        let mut current = Vec::with_capacity(width);
        for col in 0..width {
            let id = format!("t{}-{}", layer, col);
            store.add(
                TopicNode::new(&id, format!("Topic {} {}", layer, col), NodeKind::Topic)
                    .unwrap()
                    .with_prerequisites(previous.iter().cloned())
                    .with_hours(5),
            );
            current.push(id);
        }
        previous = current;
    }

    store.add(
        TopicNode::new("end", "End", NodeKind::End)
            .unwrap()
            .with_prerequisites(previous),
    );
    store
}

fn bench_path_canonical(c: &mut Criterion) {
    let store = NodeStore::with_default_roadmap();
    let engine = RoadmapEngine::new(&store);

    c.bench_function("learning_path_canonical", |b| {
        b.iter(|| engine.learning_path(black_box("ai-engineer")))
    });
}

fn bench_path_layered(c: &mut Criterion) {
    let store = build_layered_roadmap(50, 10);
    let engine = RoadmapEngine::new(&store);

    c.bench_function("learning_path_layered_500", |b| {
        b.iter(|| engine.learning_path(black_box("end")))
    });
}

fn bench_recommend_layered(c: &mut Criterion) {
    let store = build_layered_roadmap(50, 10);
    let engine = RoadmapEngine::new(&store);
    let completed: CompletionState = store
        .all()
        .filter(|n| n.id() == "start" || n.id().starts_with("t0-") || n.id().starts_with("t1-"))
        .map(|n| n.id().to_string())
        .collect();

    c.bench_function("next_recommended_layered_500", |b| {
        b.iter(|| engine.next_recommended(black_box(&completed)))
    });
}

criterion_group!(
    benches,
    bench_path_canonical,
    bench_path_layered,
    bench_recommend_layered,
);
criterion_main!(benches);
