//! Portable scene snapshots used for undo history and repaint.

use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format version written into every snapshot document.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to encode scene: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Malformed snapshot: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Unsupported snapshot version {found} (expected {})", SNAPSHOT_VERSION)]
    UnsupportedVersion { found: u32 },
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    scene: &'a Scene,
}

#[derive(Deserialize)]
struct SnapshotIn {
    version: u32,
    scene: serde_json::Value,
}

/// A serialized, restorable scene (a JSON document).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(String);

impl Snapshot {
    /// Serialize a scene.
    pub fn capture(scene: &Scene) -> Result<Self, SnapshotError> {
        let doc = SnapshotOut {
            version: SNAPSHOT_VERSION,
            scene,
        };
        serde_json::to_string(&doc)
            .map(Snapshot)
            .map_err(SnapshotError::Encode)
    }

    /// Wrap an externally stored document. It is validated on restore.
    pub fn from_json(json: impl Into<String>) -> Self {
        Snapshot(json.into())
    }

    /// Rebuild the scene this snapshot describes.
    pub fn restore(&self) -> Result<Scene, SnapshotError> {
        let doc: SnapshotIn = serde_json::from_str(&self.0).map_err(SnapshotError::Malformed)?;
        if doc.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion { found: doc.version });
        }
        serde_json::from_value(doc.scene).map_err(SnapshotError::Malformed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
