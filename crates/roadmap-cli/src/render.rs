//! Plain-text rendering for terminal output.

use roadmap_core::graph::{CompletionState, NodeStore, TopicNode};
use roadmap_nav::{Overview, ProgressReport, RoadmapEngine};
use std::fmt::Write as _;

const BAR_WIDTH: usize = 30;

fn check(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

pub fn overview(overview: &Overview, topics: usize) -> String {
    format!(
        "Roadmap: {} nodes ({} topics)\nEstimated total: {} hours\n",
        overview.total_nodes, topics, overview.estimated_total_hours
    )
}

/// Every node in store order, one per line.
pub fn node_list(store: &NodeStore, completed: &CompletionState) -> String {
    let width = store.ids().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    for node in store.all() {
        let _ = writeln!(
            out,
            "{} {:<width$}  {:<5}  {:>3}h  {}",
            check(completed.contains(node.id())),
            node.id(),
            node.kind().as_str(),
            node.estimated_hours(),
            node.title(),
        );
    }
    out
}

/// Detail card for one node.
pub fn node_card(node: &TopicNode, engine: &RoadmapEngine<'_>, completed: &CompletionState) -> String {
    let mut out = String::new();
    let status = if completed.contains(node.id()) {
        "completed"
    } else {
        "not completed"
    };
    let _ = writeln!(out, "{} [{}] ({})", node.title(), node.kind(), status);
    let _ = writeln!(out, "ID: {}", node.id());
    let _ = writeln!(out, "Estimated time: {} hours", node.estimated_hours());
    if !node.description().is_empty() {
        let _ = writeln!(out, "\n{}", node.description());
    }

    if !node.subtopics().is_empty() {
        out.push_str("\nSubtopics:\n");
        for subtopic in node.subtopics() {
            let _ = writeln!(out, "  - {}", subtopic);
        }
    }

    let prereqs = engine.prerequisites(node.id());
    if !prereqs.is_empty() {
        out.push_str("\nPrerequisites:\n");
        for prereq in prereqs {
            let _ = writeln!(
                out,
                "  {} {} ({})",
                check(completed.contains(prereq.id())),
                prereq.title(),
                prereq.id()
            );
        }
    }

    if !node.resources().is_empty() {
        out.push_str("\nResources:\n");
        for resource in node.resources() {
            let _ = writeln!(out, "  - {}", resource);
        }
    }
    out
}

/// Numbered learning path with a total.
pub fn learning_path(target: &TopicNode, path: &[&TopicNode], completed: &CompletionState) -> String {
    let hours: u64 = path.iter().map(|n| u64::from(n.estimated_hours())).sum();
    let mut out = format!(
        "Learning path to {} ({} steps, {} hours)\n\n",
        target.title(),
        path.len(),
        hours
    );
    for (i, node) in path.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} {} ({}h)",
            i + 1,
            check(completed.contains(node.id())),
            node.title(),
            node.estimated_hours()
        );
    }
    out
}

/// Bulleted list of nodes with ids and hours.
pub fn node_bullets(nodes: &[&TopicNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        let _ = writeln!(
            out,
            "  - {} ({}, {}h)",
            node.title(),
            node.id(),
            node.estimated_hours()
        );
    }
    out
}

/// Progress tracker: bar, counts, and what to study next.
pub fn progress(report: &ProgressReport) -> String {
    let filled = ((report.percent_complete / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);

    let mut out = format!(
        "[{}{}] {:.1}%\n",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        report.percent_complete
    );
    let _ = writeln!(out, "Completed topics: {}", report.completed_topics);
    let _ = writeln!(
        out,
        "Hours: {} done, {} remaining of {}",
        report.completed_hours, report.remaining_hours, report.total_hours
    );

    if report.finished {
        out.push_str("\nCongratulations! You've completed every topic on the roadmap.\n");
    } else if report.next.is_empty() {
        out.push_str("\nNo topics are unlocked yet. Complete the start node first.\n");
    } else {
        out.push_str("\nNext recommended topics:\n");
        for node in &report.next {
            let _ = writeln!(out, "  - {} ({}h)", node.title, node.estimated_hours);
        }
    }
    out
}

#[cfg(feature = "assist")]
pub fn audio_reply(reply: &roadmap_assist::AudioReply) -> String {
    let mut out = String::new();
    if !reply.transcription.is_empty() {
        let _ = writeln!(out, "You said: \"{}\"", reply.transcription);
    }
    if let Some(sentiment) = &reply.sentiment {
        let _ = writeln!(
            out,
            "Mood: {} ({:.0}% confidence). {}",
            sentiment.emotion,
            sentiment.confidence * 100.0,
            sentiment.analysis
        );
    }
    let _ = writeln!(out, "\n{}\n", reply.response);
    let _ = writeln!(out, "Tip: {}", reply.recommendation);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_card() {
        let store = NodeStore::with_default_roadmap();
        let engine = RoadmapEngine::new(&store);
        let completed: CompletionState = ["start", "llm-apis"].into_iter().collect();
        let node = store.get("infrastructure").unwrap();

        let card = node_card(node, &engine, &completed);
        assert!(card.starts_with("Infrastructure [topic] (not completed)\n"));
        assert!(card.contains("Estimated time: 40 hours"));
        assert!(card.contains("  [ ] Model Adaptation (model-adaptation)"));
        assert!(card.contains("\nResources:\n"));
    }

    #[test]
    fn test_learning_path() {
        let store = NodeStore::with_default_roadmap();
        let engine = RoadmapEngine::new(&store);
        let completed: CompletionState = ["start"].into_iter().collect();
        let target = store.get("model-adaptation").unwrap();

        let text = learning_path(target, &engine.learning_path(target.id()), &completed);
        assert!(text.starts_with("Learning path to Model Adaptation (3 steps, 50 hours)"));
        assert!(text.contains("  1. [x] Start (0h)"));
        assert!(text.contains("  3. [ ] Model Adaptation (30h)"));
    }

    #[test]
    fn test_progress_bar() {
        let store = NodeStore::with_default_roadmap();
        let engine = RoadmapEngine::new(&store);

        let fresh: CompletionState = ["start"].into_iter().collect();
        let text = progress(&ProgressReport::compute(&engine, &fresh, 3));
        assert!(text.starts_with(&format!("[{}] 0.0%", "-".repeat(BAR_WIDTH))));
        assert!(text.contains("  - LLM APIs (20h)"));

        let all: CompletionState = store.ids().collect();
        let text = progress(&ProgressReport::compute(&engine, &all, 3));
        assert!(text.starts_with(&format!("[{}] 100.0%", "#".repeat(BAR_WIDTH))));
        assert!(text.contains("Congratulations!"));

        let none = CompletionState::new();
        let text = progress(&ProgressReport::compute(&engine, &none, 3));
        assert!(text.contains("Complete the start node first."));
    }

    #[test]
    fn test_node_list_marks_completed() {
        let store = NodeStore::with_default_roadmap();
        let completed: CompletionState = ["security"].into_iter().collect();
        let text = node_list(&store, &completed);
        assert_eq!(text.lines().count(), 11);
        let line = text.lines().find(|l| l.contains("Security")).unwrap();
        assert!(line.starts_with("[x] security"));
    }
}
