use std::fs;
use std::path::{Path, PathBuf};

use panel_core::Snapshot;
use panel_logging::panel_info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not read snapshot {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse snapshot {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a catalog snapshot: `{"ProvisionedProducts": [...], "users": [...]}`.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: Snapshot =
        serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    panel_info!(
        "Loaded snapshot {:?}: {} products, {} directory users",
        path,
        snapshot.products.len(),
        snapshot.users.len()
    );
    Ok(snapshot)
}
