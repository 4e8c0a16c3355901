//! Snapshot persistence for the authoritative game state

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::state::export::GameSnapshot;
use crate::state::AppState;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

/// Trait that snapshot backends must implement
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved snapshot, if there is one
    async fn load(&self) -> StoreResult<Option<GameSnapshot>>;

    /// Replace the saved snapshot
    async fn save(&self, snapshot: &GameSnapshot) -> StoreResult<()>;

    /// Name of this backend (for logging)
    fn name(&self) -> &str;
}

/// Stores the snapshot as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> StoreResult<Option<GameSnapshot>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, snapshot: &GameSnapshot) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write-then-rename so a crash never leaves a torn file behind
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Restore state from the store at startup. Returns true if a snapshot was applied.
pub async fn restore(state: &AppState, store: &dyn SnapshotStore) -> StoreResult<bool> {
    match store.load().await? {
        Some(snapshot) => {
            state.import_state(snapshot).await?;
            tracing::info!("Restored game state from {} snapshot", store.name());
            Ok(true)
        }
        None => {
            tracing::info!("No {} snapshot found, starting fresh", store.name());
            Ok(false)
        }
    }
}

/// Spawn a background task that saves a snapshot whenever the state has changed
pub fn spawn_snapshot_writer(
    state: Arc<AppState>,
    store: Arc<dyn SnapshotStore>,
    interval: Duration,
) {
    tokio::spawn(async move {
        let mut saved_revision = state.revision();

        loop {
            tokio::time::sleep(interval).await;

            let revision = state.revision();
            if revision == saved_revision {
                continue;
            }

            let snapshot = state.export_state().await;
            match store.save(&snapshot).await {
                Ok(()) => {
                    tracing::debug!("Saved snapshot at revision {}", revision);
                    saved_revision = revision;
                }
                // No retry policy: the next tick tries again with fresh state
                Err(e) => tracing::error!("Failed to save snapshot: {}", e),
            }
        }
    });
}
