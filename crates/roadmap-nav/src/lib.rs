//! Queries over the learning roadmap.
//!
//! Provides the [`engine::RoadmapEngine`] (overview, learning paths,
//! prerequisites, recommendations, remaining effort), progress reports for a
//! caller-supplied completion state, and DOT/Mermaid export.

pub mod engine;
pub mod export;
pub mod progress;

pub use engine::{NodeSummary, Overview, RoadmapEngine};
pub use progress::ProgressReport;
