//! Read/write roadmap files from disk.

use crate::graph::NodeStore;
use crate::{schema, validation};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const ROADMAP_DIR: &str = ".roadmap";
const ROADMAP_FILE: &str = "roadmap.json";

/// Get the path to the roadmap directory for a given project root.
pub fn roadmap_dir(project_root: &Path) -> PathBuf {
    project_root.join(ROADMAP_DIR)
}

/// Get the path to the roadmap file for a given project root.
pub fn roadmap_file(project_root: &Path) -> PathBuf {
    roadmap_dir(project_root).join(ROADMAP_FILE)
}

/// Check if a roadmap file exists for the given project root.
pub fn roadmap_exists(project_root: &Path) -> bool {
    roadmap_file(project_root).exists()
}

/// Load the project's roadmap from `.roadmap/roadmap.json`.
pub fn load(project_root: &Path) -> Result<NodeStore> {
    load_file(&roadmap_file(project_root))
}

/// Load and validate a roadmap from an arbitrary JSON file.
///
/// Structural errors (cycles, missing or duplicate sentinels) fail the load;
/// warnings such as dangling prerequisites are logged and tolerated.
pub fn load_file(path: &Path) -> Result<NodeStore> {
    let store = read_file(path)?;

    let warnings = validation::validate(&store)
        .into_result()
        .with_context(|| format!("roadmap {} failed validation", path.display()))?;
    for warning in warnings {
        tracing::warn!("{}: {}", path.display(), warning);
    }

    tracing::debug!("loaded {} nodes from {}", store.len(), path.display());
    Ok(store)
}

/// Parse a roadmap file without structural validation.
pub fn read_file(path: &Path) -> Result<NodeStore> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read roadmap from {}", path.display()))?;
    schema::from_json(&json).with_context(|| format!("invalid roadmap file {}", path.display()))
}

/// Save a roadmap to disk, creating the .roadmap directory if needed.
pub fn save(project_root: &Path, store: &NodeStore) -> Result<()> {
    let dir = roadmap_dir(project_root);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create roadmap directory {}", dir.display()))?;
    save_file(&roadmap_file(project_root), store)
}

/// Save a roadmap to an arbitrary path.
pub fn save_file(path: &Path, store: &NodeStore) -> Result<()> {
    let json = schema::to_json(store)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write roadmap to {}", path.display()))?;
    Ok(())
}
