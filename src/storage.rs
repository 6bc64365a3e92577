use crate::errors::SourceError;
use crate::models::{ActivitySnapshot, CardRecord, UserRecord};
use crate::sources::{CardSource, UserSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{env, path::Path, path::PathBuf, sync::Arc};
use tokio::fs;
use tracing::error;

pub fn resolve_snapshot_path() -> PathBuf {
    if let Ok(path) = env::var("ACTIVITY_SNAPSHOT_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/activity.json")
}

pub async fn load_snapshot(path: &Path) -> ActivitySnapshot {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("failed to parse snapshot file: {err}");
                ActivitySnapshot::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ActivitySnapshot::default(),
        Err(err) => {
            error!("failed to read snapshot file: {err}");
            ActivitySnapshot::default()
        }
    }
}

/// Serves both fetch contracts from one in-memory activity snapshot. Clones
/// share the snapshot, so a single store can act as user and card source at
/// the same time.
#[derive(Clone)]
pub struct SnapshotStore {
    snapshot: Arc<ActivitySnapshot>,
}

impl SnapshotStore {
    pub fn new(snapshot: ActivitySnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}

fn in_window(created_at: DateTime<Utc>, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    created_at >= from && created_at <= to
}

#[async_trait]
impl UserSource for SnapshotStore {
    async fn fetch_new_users(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<UserRecord>, SourceError> {
        Ok(self
            .snapshot
            .users
            .iter()
            .filter(|user| in_window(user.created_at, from, to))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CardSource for SnapshotStore {
    async fn fetch_new_cards(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CardRecord>, SourceError> {
        Ok(self
            .snapshot
            .cards
            .iter()
            .filter(|card| in_window(card.created_at, from, to))
            .cloned()
            .collect())
    }
}
