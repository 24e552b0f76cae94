//! Scene store implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snowflake_core::{Result, SceneError};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::record::SceneRecord;

/// A versioned store entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEntry {
    /// The scene this entry belongs to.
    pub scene_id: Uuid,

    /// The record. `None` for tombstones.
    pub record: Option<SceneRecord>,

    /// Version number (monotonically increasing across the store).
    pub version: u64,

    /// Timestamp when this version was written.
    pub timestamp: DateTime<Utc>,
}

impl StoreEntry {
    /// Whether this entry marks a deletion.
    pub fn is_tombstone(&self) -> bool {
        self.record.is_none()
    }
}

/// Trait for scene stores keyed by scene ID.
#[async_trait]
pub trait SceneStore: Send + Sync {
    /// Get the current record for a scene.
    async fn get(&self, scene_id: Uuid) -> Result<Option<StoreEntry>>;

    /// Write the first version of a record. Fails if the scene is live.
    async fn create(&self, record: SceneRecord) -> Result<StoreEntry>;

    /// Write a new version of a record, keyed by its card's ID.
    async fn put(&self, record: SceneRecord) -> Result<StoreEntry>;

    /// Delete a scene (creates a tombstone).
    async fn delete(&self, scene_id: Uuid) -> Result<()>;

    /// All versions written for a scene, oldest first, tombstones included.
    async fn history(&self, scene_id: Uuid) -> Result<Vec<StoreEntry>>;

    /// The record as it stood at a point in time.
    async fn get_at(&self, scene_id: Uuid, timestamp: DateTime<Utc>) -> Result<Option<StoreEntry>>;

    /// Current entries for every live scene.
    async fn list(&self) -> Result<Vec<StoreEntry>>;

    /// Get the current version of the store.
    async fn version(&self) -> u64;
}

/// In-memory implementation of SceneStore.
pub struct InMemorySceneStore {
    /// scene_id -> list of versions (append-only).
    entries: Arc<RwLock<HashMap<Uuid, Vec<StoreEntry>>>>,

    /// Global version counter.
    version: Arc<RwLock<u64>>,
}

impl InMemorySceneStore {
    /// Create a new in-memory scene store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            version: Arc::new(RwLock::new(0)),
        }
    }

    /// Get the next version number.
    async fn next_version(&self) -> u64 {
        let mut version = self.version.write().await;
        *version += 1;
        *version
    }

    async fn append(&self, scene_id: Uuid, record: Option<SceneRecord>) -> StoreEntry {
        let mut entries = self.entries.write().await;
        self.append_locked(&mut entries, scene_id, record).await
    }

    async fn append_locked(
        &self,
        entries: &mut HashMap<Uuid, Vec<StoreEntry>>,
        scene_id: Uuid,
        record: Option<SceneRecord>,
    ) -> StoreEntry {
        let version = self.next_version().await;

        let entry = StoreEntry {
            scene_id,
            record,
            version,
            timestamp: Utc::now(),
        };

        entries
            .entry(scene_id)
            .or_insert_with(Vec::new)
            .push(entry.clone());

        entry
    }
}

impl Default for InMemorySceneStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SceneStore for InMemorySceneStore {
    async fn get(&self, scene_id: Uuid) -> Result<Option<StoreEntry>> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(&scene_id)
            .and_then(|versions| versions.last())
            .filter(|latest| !latest.is_tombstone())
            .cloned())
    }

    async fn create(&self, record: SceneRecord) -> Result<StoreEntry> {
        let scene_id = record.card.id;

        // Check and write under one lock so two creates cannot both succeed.
        let mut entries = self.entries.write().await;
        let live = entries
            .get(&scene_id)
            .and_then(|versions| versions.last())
            .is_some_and(|latest| !latest.is_tombstone());
        if live {
            return Err(SceneError::AlreadyExists {
                resource_type: "Scene".to_string(),
                id: scene_id.to_string(),
            });
        }

        let entry = self.append_locked(&mut entries, scene_id, Some(record)).await;
        debug!(scene_id = %scene_id, version = entry.version, "scene record created");
        Ok(entry)
    }

    async fn put(&self, record: SceneRecord) -> Result<StoreEntry> {
        let scene_id = record.card.id;
        let entry = self.append(scene_id, Some(record)).await;
        debug!(scene_id = %scene_id, version = entry.version, "scene record written");
        Ok(entry)
    }

    async fn delete(&self, scene_id: Uuid) -> Result<()> {
        if self.get(scene_id).await?.is_none() {
            return Err(SceneError::NotFound {
                resource_type: "Scene".to_string(),
                id: scene_id.to_string(),
            });
        }

        let entry = self.append(scene_id, None).await;
        info!("Deleted scene {} at version {}", scene_id, entry.version);
        Ok(())
    }

    async fn history(&self, scene_id: Uuid) -> Result<Vec<StoreEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&scene_id).cloned().unwrap_or_default())
    }

    async fn get_at(&self, scene_id: Uuid, timestamp: DateTime<Utc>) -> Result<Option<StoreEntry>> {
        let entries = self.entries.read().await;

        // Latest version written at or before the timestamp
        Ok(entries
            .get(&scene_id)
            .and_then(|versions| versions.iter().rev().find(|e| e.timestamp <= timestamp))
            .filter(|e| !e.is_tombstone())
            .cloned())
    }

    async fn list(&self) -> Result<Vec<StoreEntry>> {
        let entries = self.entries.read().await;

        let mut live: Vec<StoreEntry> = entries
            .values()
            .filter_map(|versions| versions.last())
            .filter(|e| !e.is_tombstone())
            .cloned()
            .collect();
        live.sort_by_key(|e| e.version);

        Ok(live)
    }

    async fn version(&self) -> u64 {
        *self.version.read().await
    }
}
