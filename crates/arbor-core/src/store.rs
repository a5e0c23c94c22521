//! File-based snapshot persistence under .arbor/snapshots/

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::model::ProjectSnapshot;

/// Storage directory: .arbor/
pub const STORE_DIR: &str = ".arbor";

/// Snapshot subdirectory
pub const SNAPSHOT_DIR: &str = "snapshots";

/// Get the snapshot directory path for a project root.
pub fn snapshot_dir(root: &Path) -> PathBuf {
    root.join(STORE_DIR).join(SNAPSHOT_DIR)
}

/// Ensure the snapshot directory exists.
pub fn ensure_snapshot_dir(root: &Path) -> Result<(), CoreError> {
    let dir = snapshot_dir(root);
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Write a snapshot as pretty JSON, named by its id. Returns the path
/// written.
pub fn save_snapshot(root: &Path, snapshot: &ProjectSnapshot) -> Result<PathBuf, CoreError> {
    ensure_snapshot_dir(root)?;
    let path = snapshot_dir(root).join(format!("{}.json", snapshot.id));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    tracing::debug!("Snapshot saved: {}", path.display());
    Ok(path)
}

/// Read a snapshot file. Only JSON shape is validated (what serde
/// enforces); semantic validation is deliberately absent — a snapshot
/// with dangling ids loads as-is.
pub fn load_snapshot_file(path: &Path) -> Result<ProjectSnapshot, CoreError> {
    let json = fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&json)?;
    tracing::debug!("Snapshot loaded from: {}", path.display());
    Ok(snapshot)
}

/// List snapshot files for a project root, sorted by file name. Returns
/// an empty list when the directory does not exist yet.
pub fn list_snapshots(root: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let dir = snapshot_dir(root);
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Remove every stored snapshot.
pub fn clear_snapshots(root: &Path) -> Result<(), CoreError> {
    let dir = snapshot_dir(root);
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    Ok(())
}
