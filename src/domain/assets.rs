//! Optional image artifacts read from the local asset directory.
//!
//! The mock service illustrates execution with a fixed set of PNG
//! frames: one "current status" screenshot and four staged action
//! frames. Every read is best-effort: a missing file is logged and
//! skipped, never fatal.

use std::path::PathBuf;

/// Named artifact in the asset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// The most recent status screenshot (`robot_screenshot.png`).
    Status,
    /// Frame for staged-execution step `n` (`robot_action_{n}.png`).
    Stage(u8),
}

impl Artifact {
    /// File name of this artifact within the asset directory.
    #[must_use]
    pub fn file_name(self) -> String {
        match self {
            Self::Status => "robot_screenshot.png".to_string(),
            Self::Stage(step) => format!("robot_action_{step}.png"),
        }
    }
}

/// Read-only source of named image artifacts.
#[derive(Debug, Clone)]
pub struct AssetStore {
    base_dir: PathBuf,
}

impl AssetStore {
    /// Creates a store rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Reads an artifact, returning `None` if it is missing or
    /// unreadable. Misses are logged at `warn` and never fail the
    /// caller.
    pub async fn load(&self, artifact: Artifact) -> Option<Vec<u8>> {
        let path = self.base_dir.join(artifact.file_name());
        match tokio::fs::read(&path).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "artifact not available");
                None
            }
        }
    }
}
