use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use crate::models::Snapshot;

/// Writes the snapshot document to a fixed path, overwriting the previous
/// run's output in full. Persistence failures are logged, never raised; the
/// in-memory snapshot stays valid regardless.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, snapshot: &Snapshot) {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).ok();
        }

        match File::create(&self.path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                match serde_json::to_writer_pretty(writer, snapshot) {
                    Ok(_) => tracing::info!(
                        "📦 Snapshot saved: {} ({} pools)",
                        self.path.display(),
                        snapshot.results.len()
                    ),
                    Err(e) => tracing::error!("Failed to write snapshot: {}", e),
                }
            }
            Err(e) => tracing::error!("Failed to create {}: {}", self.path.display(), e),
        }
    }
}
