//! Resolve user-typed node ids, with a "did you mean" hint on typos.

use anyhow::Result;
use roadmap_core::graph::{NodeStore, TopicNode};

/// Below this similarity a suggestion is noise.
const MIN_SIMILARITY: f64 = 0.6;

/// Closest id to `query`, comparing against both ids and titles.
pub fn closest_id<'a>(store: &'a NodeStore, query: &str) -> Option<&'a str> {
    let query = query.to_lowercase();
    let mut best: Option<(&str, f64)> = None;
    for node in store.all() {
        let sim = strsim::normalized_levenshtein(&query, node.id())
            .max(strsim::normalized_levenshtein(&query, &node.title().to_lowercase()));
        if sim > MIN_SIMILARITY && best.is_none_or(|(_, b)| sim > b) {
            best = Some((node.id(), sim));
        }
    }
    best.map(|(id, _)| id)
}

/// Look up `id`, failing with a suggestion when it is unknown.
pub fn resolve<'a>(store: &'a NodeStore, id: &str) -> Result<&'a TopicNode> {
    if let Some(node) = store.get(id) {
        return Ok(node);
    }
    match closest_id(store, id) {
        Some(suggestion) => anyhow::bail!("Unknown topic '{}'. Did you mean '{}'?", id, suggestion),
        None => anyhow::bail!("Unknown topic '{}'. Run `roadmap list` to see all ids.", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_id_resolves() {
        let store = NodeStore::with_default_roadmap();
        assert_eq!(resolve(&store, "security").unwrap().title(), "Security");
    }

    #[test]
    fn test_typo_gets_suggestion() {
        let store = NodeStore::with_default_roadmap();
        let err = resolve(&store, "ai-agent").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'ai-agents'?"));

        assert_eq!(closest_id(&store, "Infrastucture"), Some("infrastructure"));
    }

    #[test]
    fn test_nonsense_gets_no_suggestion() {
        let store = NodeStore::with_default_roadmap();
        assert_eq!(closest_id(&store, "zzzzzzzzzzzz"), None);
        let err = resolve(&store, "zzzzzzzzzzzz").unwrap_err();
        assert!(err.to_string().contains("roadmap list"));
    }
}
