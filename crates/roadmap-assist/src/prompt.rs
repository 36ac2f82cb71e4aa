//! Prompt construction for the learning assistant.
//!
//! Prompts are built from the roadmap itself, so a custom roadmap file gets
//! a matching assistant without code changes.

use crate::provider::CompletionRequest;
use roadmap_core::graph::{CompletionState, NodeKind, NodeStore, TopicNode};
use roadmap_nav::RoadmapEngine;
use std::fmt::Write as _;

/// Token budget and temperature for a kind of request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub max_tokens: u32,
    pub temperature: f32,
}

pub const QUERY: Preset = Preset {
    max_tokens: 500,
    temperature: 0.7,
};
pub const TOPIC_HELP: Preset = Preset {
    max_tokens: 400,
    temperature: 0.6,
};
pub const STUDY_GUIDE: Preset = Preset {
    max_tokens: 2000,
    temperature: 0.7,
};

impl Preset {
    pub fn request(self, system: String, user: String) -> CompletionRequest {
        CompletionRequest {
            system,
            user,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Topics in the order a learner meets them: the learning path to the END
/// node, or store order when the roadmap has no END node.
fn topics_in_order(store: &NodeStore) -> Vec<&TopicNode> {
    let engine = RoadmapEngine::new(store);
    let ordered = match store.all().find(|n| n.kind() == NodeKind::End) {
        Some(end) => engine.learning_path(end.id()),
        None => store.all().collect(),
    };
    ordered.into_iter().filter(|n| n.is_topic()).collect()
}

/// The mentor system prompt.
///
/// Appends the learner's emotional state and completed topics when present.
pub fn system_prompt(
    store: &NodeStore,
    sentiment_context: Option<&str>,
    completed: &CompletionState,
) -> String {
    let mut prompt = String::from(
        "You are an expert AI Engineering learning assistant and mentor. \
         You help students navigate the AI Engineering learning roadmap, which includes:\n\n",
    );

    for (i, node) in topics_in_order(store).iter().enumerate() {
        if node.subtopics().is_empty() {
            let _ = writeln!(prompt, "{}. {}", i + 1, node.title());
        } else {
            let _ = writeln!(
                prompt,
                "{}. {} ({})",
                i + 1,
                node.title(),
                node.subtopics().join(", ")
            );
        }
    }

    prompt.push_str(
        "\nProvide personalized, encouraging guidance. Be specific about next steps and resources.",
    );

    if let Some(ctx) = sentiment_context.filter(|c| !c.is_empty()) {
        let _ = write!(
            prompt,
            "\n\nUser's current emotional state: {ctx}. Adjust your response tone and recommendations accordingly."
        );
    }
    if !completed.is_empty() {
        let done: Vec<&str> = completed.iter().collect();
        let _ = write!(
            prompt,
            "\n\nUser has completed: {}. Build on their existing knowledge.",
            done.join(", ")
        );
    }

    prompt
}

/// What a tutor for `topic_id` specializes in.
fn topic_focus(store: &NodeStore, topic_id: &str) -> String {
    match store.get(topic_id) {
        Some(node) if node.subtopics().is_empty() => {
            format!("{}: {}", node.title(), node.description())
        }
        Some(node) => format!(
            "{}: {}, including {}",
            node.title(),
            node.description(),
            node.subtopics().join(", ")
        ),
        None => format!("AI Engineering topic: {topic_id}"),
    }
}

/// System prompt for a question about one topic.
pub fn topic_help_prompt(store: &NodeStore, topic_id: &str) -> String {
    format!(
        "You are an expert AI Engineering tutor specializing in {}. \
         Provide clear, practical guidance that helps students understand and apply the concepts. \
         Be encouraging and provide specific next steps when possible.",
        topic_focus(store, topic_id)
    )
}

const GUIDE_OUTLINE: [&str; 10] = [
    "Learning Objectives (3-5 specific, measurable goals)",
    "Prerequisites & Background Knowledge",
    "Week-by-Week Study Plan (break down the hours logically)",
    "Core Concepts & Theory (key topics to master)",
    "Hands-On Projects (2-3 practical exercises)",
    "Essential Resources (books, courses, documentation)",
    "Assessment Criteria (how to measure progress)",
    "Common Pitfalls & How to Avoid Them",
    "Connection to Other Topics in the roadmap",
    "Next Steps & Advanced Topics",
];

/// System and user messages for a study guide on `topic_id`.
pub fn study_guide_request(
    store: &NodeStore,
    topic_id: &str,
    completed: &CompletionState,
) -> CompletionRequest {
    let (title, overview, hours, focus) = match store.get(topic_id) {
        Some(node) => (
            node.title().to_string(),
            node.description().to_string(),
            format!("{} hours", node.estimated_hours()),
            if node.subtopics().is_empty() {
                "Core Concepts, Practical Applications, Best Practices".to_string()
            } else {
                node.subtopics().join(", ")
            },
        ),
        None => (
            format!("AI Engineering Topic: {topic_id}"),
            format!("Study guide for {topic_id}"),
            "Variable".to_string(),
            "Core Concepts, Practical Applications, Best Practices".to_string(),
        ),
    };

    let mut system = format!(
        "You are an expert AI Engineering curriculum designer. \
         Generate a comprehensive, actionable study guide for the topic: {title}.\n\n\
         Topic Overview: {overview}\n\
         Estimated Time: {hours}\n\
         Key Focus Areas: {focus}\n"
    );

    let prereqs: Vec<&str> = RoadmapEngine::new(store)
        .prerequisites(topic_id)
        .iter()
        .filter(|n| n.is_topic())
        .map(|n| n.title())
        .collect();
    if !prereqs.is_empty() {
        let _ = writeln!(system, "Roadmap Prerequisites: {}", prereqs.join(", "));
    }

    if !completed.is_empty() {
        let done: Vec<&str> = completed.iter().collect();
        let _ = writeln!(
            system,
            "\nThe user has already completed: {}. Build upon this knowledge and suggest connections.",
            done.join(", ")
        );
    }

    system.push_str("\nCreate a detailed study guide with:\n");
    for (i, section) in GUIDE_OUTLINE.iter().enumerate() {
        let _ = writeln!(system, "{}. {}", i + 1, section);
    }
    system.push_str(
        "\nFormat as Markdown with headers, bullet points, and emphasis. \
         Make it comprehensive but practical: someone should be able to follow this guide to mastery.",
    );

    let user = format!(
        "Generate a comprehensive study guide for {title}. Make it detailed, practical, and \
         actionable for someone wanting to master this topic as part of their AI Engineering journey."
    );

    STUDY_GUIDE.request(system, user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_lists_topics_in_path_order() {
        let store = NodeStore::with_default_roadmap();
        let prompt = system_prompt(&store, None, &CompletionState::new());

        assert!(prompt.starts_with("You are an expert AI Engineering learning assistant"));
        assert!(prompt.contains(
            "1. LLM APIs (Types of LLMs, Structured Outputs, Prompt Caching, Multi-modal models)"
        ));
        assert!(prompt.contains("\n9. Forward looking elements"));
        assert!(!prompt.contains("10."));
        assert!(!prompt.contains("Start"));
        assert!(!prompt.contains("emotional state"));
        assert!(!prompt.contains("User has completed"));
    }

    #[test]
    fn test_system_prompt_context_suffixes() {
        let store = NodeStore::with_default_roadmap();
        let completed: CompletionState = ["start", "llm-apis"].into_iter().collect();
        let prompt = system_prompt(&store, Some("calm (confidence: 0.80)"), &completed);

        assert!(prompt.contains(
            "\n\nUser's current emotional state: calm (confidence: 0.80). Adjust your response tone"
        ));
        assert!(prompt.ends_with("User has completed: llm-apis, start. Build on their existing knowledge."));
    }

    #[test]
    fn test_system_prompt_without_end_node() {
        let store: NodeStore = [TopicNode::new("rust", "Rust", NodeKind::Topic).unwrap()]
            .into_iter()
            .collect();
        let prompt = system_prompt(&store, Some(""), &CompletionState::new());
        assert!(prompt.contains("1. Rust\n"));
        assert!(!prompt.contains("emotional state"));
    }

    #[test]
    fn test_topic_help_prompt() {
        let store = NodeStore::with_default_roadmap();
        let prompt = topic_help_prompt(&store, "security");
        assert!(prompt.contains("specializing in Security:"));
        assert!(prompt.contains("including Guardrails"));

        let unknown = topic_help_prompt(&store, "quantum");
        assert!(unknown.contains("specializing in AI Engineering topic: quantum."));
    }

    #[test]
    fn test_study_guide_request() {
        let store = NodeStore::with_default_roadmap();
        let request = study_guide_request(&store, "infrastructure", &CompletionState::new());

        assert_eq!(request.max_tokens, 2000);
        assert!(request.system.contains("Estimated Time: 40 hours"));
        assert!(request.system.contains("Roadmap Prerequisites: Model Adaptation, Storage for Retrieval"));
        assert!(request.system.contains("10. Next Steps & Advanced Topics"));
        assert!(!request.system.contains("already completed"));
        assert!(request.user.starts_with("Generate a comprehensive study guide for Infrastructure."));

        let unknown = study_guide_request(&store, "quantum", &CompletionState::new());
        assert!(unknown.system.contains("Estimated Time: Variable"));
    }
}
