//! The learner's completion state, persisted in `.roadmap/progress.json`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use roadmap_core::graph::{CompletionState, NodeKind, NodeStore};
use roadmap_core::storage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressFile {
    pub completed: CompletionState,
    pub updated_at: DateTime<Utc>,
}

impl ProgressFile {
    pub fn path(project_root: &Path) -> PathBuf {
        storage::roadmap_dir(project_root).join(PROGRESS_FILE)
    }

    /// A new learner: only the START node is done.
    pub fn fresh(store: &NodeStore) -> Self {
        Self {
            completed: store
                .all()
                .filter(|n| n.kind() == NodeKind::Start)
                .map(|n| n.id())
                .collect(),
            updated_at: Utc::now(),
        }
    }

    /// Load saved progress, or start fresh when none exists yet.
    pub fn load_or_fresh(project_root: &Path, store: &NodeStore) -> Result<Self> {
        let path = Self::path(project_root);
        if !path.exists() {
            tracing::debug!("no progress file at {}, starting fresh", path.display());
            return Ok(Self::fresh(store));
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read progress from {}", path.display()))?;
        let progress: Self = serde_json::from_str(&json)
            .with_context(|| format!("invalid progress file {}", path.display()))?;

        for id in progress.completed.iter().filter(|id| !store.contains(id)) {
            tracing::warn!("progress lists unknown topic {}", id);
        }
        Ok(progress)
    }

    /// Stamp and write to disk, creating `.roadmap/` if needed.
    pub fn save(&mut self, project_root: &Path) -> Result<()> {
        self.updated_at = Utc::now();
        let dir = storage::roadmap_dir(project_root);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = Self::path(project_root);
        let json = serde_json::to_string_pretty(self).context("failed to serialize progress")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write progress to {}", path.display()))?;
        Ok(())
    }
}
