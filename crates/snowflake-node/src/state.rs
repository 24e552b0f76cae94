//! Application state.

use std::sync::Arc;

use snowflake_core::{SceneCard, SceneError, TriageResult};
use snowflake_store::{InMemorySceneStore, SceneRecord, SceneStore, StoreEntry};
use snowflake_triage::{SceneValidator, TriageConfig};
use uuid::Uuid;

use crate::draft::{ProseDrafter, TemplateDrafter};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Scene records.
    pub store: Arc<dyn SceneStore>,

    /// The validator and triage classifier.
    pub validator: Arc<SceneValidator>,

    /// Prose generator for accepted scenes.
    pub drafter: Arc<dyn ProseDrafter>,
}

impl AppState {
    /// Create state with an in-memory store and the template drafter.
    pub fn new(config: TriageConfig) -> Self {
        Self {
            store: Arc::new(InMemorySceneStore::new()),
            validator: Arc::new(SceneValidator::with_config(config)),
            drafter: Arc::new(TemplateDrafter::new()),
        }
    }

    /// Current record for a scene, or a not-found error.
    pub async fn record(&self, id: Uuid) -> Result<SceneRecord, SceneError> {
        self.store
            .get(id)
            .await?
            .and_then(|entry| entry.record)
            .ok_or_else(|| SceneError::NotFound {
                resource_type: "Scene".to_string(),
                id: id.to_string(),
            })
    }

    /// Card of a stored scene.
    pub async fn card(&self, id: Uuid) -> Result<SceneCard, SceneError> {
        Ok(self.record(id).await?.card)
    }

    /// Triage a card and store it with its verdict.
    ///
    /// Fails with `AlreadyExists` if the scene is live; revisions go through
    /// triage by id instead.
    pub async fn plan(
        &self,
        card: SceneCard,
        prior: Option<&SceneCard>,
    ) -> Result<(TriageResult, StoreEntry), SceneError> {
        let result = self.validator.triage(&card, prior);
        let record = SceneRecord::planned(card).with_triage(result.clone());
        let entry = self.store.create(record).await?;
        Ok((result, entry))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TriageConfig::default())
    }
}
