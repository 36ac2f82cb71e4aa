//! Progress summary for a learner's [`CompletionState`].

use crate::engine::{NodeSummary, RoadmapEngine};
use roadmap_core::graph::CompletionState;
use serde::Serialize;

/// Everything a progress tracker shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Completed ids that exist in the roadmap (unknown ids are ignored).
    pub completed_topics: usize,
    pub completed_hours: u64,
    pub remaining_hours: u64,
    pub total_hours: u64,
    /// 0.0 to 100.0; 0.0 when the roadmap has no hours at all.
    pub percent_complete: f64,
    /// The first `limit` recommended topics, in store order.
    pub next: Vec<NodeSummary>,
    /// Every TOPIC node is complete.
    pub finished: bool,
}

impl ProgressReport {
    pub fn compute(engine: &RoadmapEngine<'_>, completed: &CompletionState, limit: usize) -> Self {
        let total_hours = engine.overview().estimated_total_hours;
        let remaining_hours = engine.remaining_hours(completed);
        let completed_hours = total_hours.saturating_sub(remaining_hours);
        let percent_complete = if total_hours > 0 {
            completed_hours as f64 / total_hours as f64 * 100.0
        } else {
            0.0
        };
        let completed_topics = completed
            .iter()
            .filter(|id| engine.store().contains(id))
            .count();
        let next = engine
            .next_recommended(completed)
            .into_iter()
            .take(limit)
            .map(NodeSummary::from)
            .collect();

        Self {
            completed_topics,
            completed_hours,
            remaining_hours,
            total_hours,
            percent_complete,
            next,
            finished: engine.is_finished(completed),
        }
    }
}
