//! The canonical AI engineering roadmap.
//!
//! Eleven nodes forming one DAG from `start` to `ai-engineer`:
//!
//! ```text
//! start → llm-apis → {model-adaptation, storage-retrieval}
//!       → {infrastructure, ai-agents} → rag-agentic → observability-evaluation
//!       → security → forward-looking → ai-engineer
//! ```

use crate::graph::{NodeKind, TopicNode};

/// Id of the entry sentinel.
pub const START_ID: &str = "start";
/// Id of the exit sentinel.
pub const END_ID: &str = "ai-engineer";

struct Entry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    kind: NodeKind,
    subtopics: &'static [&'static str],
    prerequisites: &'static [&'static str],
    hours: u32,
    resources: &'static [&'static str],
}

const ROADMAP: &[Entry] = &[
    Entry {
        id: START_ID,
        title: "Start",
        description: "Beginning of the AI Engineering journey",
        kind: NodeKind::Start,
        subtopics: &[],
        prerequisites: &[],
        hours: 0,
        resources: &[],
    },
    Entry {
        id: "llm-apis",
        title: "LLM APIs",
        description: "Understanding different types of LLMs and their APIs",
        kind: NodeKind::Topic,
        subtopics: &[
            "Types of LLMs",
            "Structured Outputs",
            "Prompt Caching",
            "Multi-modal models",
        ],
        prerequisites: &[START_ID],
        hours: 20,
        resources: &[
            "https://platform.openai.com/docs",
            "https://docs.anthropic.com/claude/docs",
        ],
    },
    Entry {
        id: "model-adaptation",
        title: "Model Adaptation",
        description: "Techniques for adapting models to specific use cases",
        kind: NodeKind::Topic,
        subtopics: &["Prompt Engineering", "Tool Use", "Finetuning"],
        prerequisites: &["llm-apis"],
        hours: 30,
        resources: &[
            "https://arxiv.org/abs/2005.14165",
            "https://huggingface.co/docs/transformers/training",
        ],
    },
    Entry {
        id: "storage-retrieval",
        title: "Storage for Retrieval",
        description: "Database solutions for AI applications",
        kind: NodeKind::Topic,
        subtopics: &["Vector Databases", "Graph Databases", "Hybrid retrieval"],
        prerequisites: &["llm-apis"],
        hours: 25,
        resources: &[
            "https://weaviate.io/developers/weaviate",
            "https://neo4j.com/docs/",
        ],
    },
    Entry {
        id: "infrastructure",
        title: "Infrastructure",
        description: "Deployment and scaling of AI applications",
        kind: NodeKind::Topic,
        subtopics: &[
            "Kubernetes",
            "Cloud Services",
            "CI/CD",
            "Model Routing",
            "LLM deployment",
        ],
        prerequisites: &["model-adaptation", "storage-retrieval"],
        hours: 40,
        resources: &[
            "https://kubernetes.io/docs/",
            "https://aws.amazon.com/sagemaker/",
        ],
    },
    Entry {
        id: "ai-agents",
        title: "AI Agents",
        description: "Building intelligent autonomous agents",
        kind: NodeKind::Topic,
        subtopics: &[
            "AI Agent Design Patterns",
            "Multi-agent systems",
            "Memory + Tools",
            "Planning",
            "Finetuning",
            "ABL, AL, etc.",
        ],
        prerequisites: &["model-adaptation", "storage-retrieval"],
        hours: 50,
        resources: &["https://github.com/microsoft/autogen", "https://langchain.com/"],
    },
    Entry {
        id: "rag-agentic",
        title: "RAG & Agentic RAG",
        description: "Retrieval-Augmented Generation and agentic approaches",
        kind: NodeKind::Topic,
        subtopics: &[
            "Data retrieval and generation",
            "Vector + Graph",
            "MCP",
            "LLM Orchestration Frameworks",
        ],
        prerequisites: &["ai-agents", "storage-retrieval"],
        hours: 35,
        resources: &[
            "https://arxiv.org/abs/2005.11401",
            "https://github.com/langchain-ai/langchain",
        ],
    },
    Entry {
        id: "observability-evaluation",
        title: "Observability & Evaluation",
        description: "Monitoring and evaluating AI systems",
        kind: NodeKind::Topic,
        subtopics: &[
            "AI Agent instrumentation",
            "Observability platforms",
            "Evaluation techniques",
            "AI Agent Evaluation",
        ],
        prerequisites: &["ai-agents", "rag-agentic"],
        hours: 30,
        resources: &[
            "https://weights-and-biases.github.io/",
            "https://docs.wandb.ai/",
        ],
    },
    Entry {
        id: "security",
        title: "Security",
        description: "Security considerations for AI applications",
        kind: NodeKind::Topic,
        subtopics: &[
            "Guardrails",
            "Testing LLM-based applications",
            "Secure orchestration",
        ],
        prerequisites: &["infrastructure", "observability-evaluation"],
        hours: 25,
        resources: &["https://owasp.org/www-project-ai-security-and-privacy-guide/"],
    },
    Entry {
        id: "forward-looking",
        title: "Forward looking elements",
        description: "Emerging trends and future technologies",
        kind: NodeKind::Topic,
        subtopics: &[
            "Voice and Vision Agents",
            "Auto Agents",
            "Automated Prompt Engineering",
        ],
        prerequisites: &["security", "observability-evaluation"],
        hours: 20,
        resources: &["https://arxiv.org/abs/2310.12397"],
    },
    Entry {
        id: END_ID,
        title: "AI Engineer",
        description: "Congratulations! You've completed the AI Engineering roadmap",
        kind: NodeKind::End,
        subtopics: &[],
        prerequisites: &["forward-looking"],
        hours: 0,
        resources: &[],
    },
];

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Build the canonical roadmap nodes.
pub fn default_roadmap() -> Vec<TopicNode> {
    ROADMAP
        .iter()
        .map(|entry| TopicNode {
            id: entry.id.to_string(),
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            kind: entry.kind,
            subtopics: to_owned(entry.subtopics),
            prerequisites: to_owned(entry.prerequisites),
            estimated_hours: entry.hours,
            resources: to_owned(entry.resources),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_ids_and_titles_non_empty() {
        for node in default_roadmap() {
            assert!(!node.id().is_empty());
            assert!(!node.title().is_empty());
        }
    }

    #[test]
    fn test_sentinels_have_zero_hours() {
        let nodes = default_roadmap();
        for node in nodes.iter().filter(|n| n.kind().is_sentinel()) {
            assert_eq!(node.estimated_hours(), 0, "{} should be free", node.id());
        }
        assert_eq!(
            nodes.iter().filter(|n| n.kind() == NodeKind::Start).count(),
            1
        );
        assert_eq!(nodes.iter().filter(|n| n.kind() == NodeKind::End).count(), 1);
    }
}
