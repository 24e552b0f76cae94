//! Chain validation endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use snowflake_core::{RawSceneCard, SceneCard, SceneChain, SceneError, SceneType};
use snowflake_triage::ChainLink;
use tracing::debug;
use uuid::Uuid;

use crate::api::ApiError;
use crate::state::AppState;

/// An ordered list of scenes, inline or by stored ID.
#[derive(Debug, Default, Deserialize)]
pub struct ChainRequest {
    #[serde(default)]
    pub cards: Vec<RawSceneCard>,
    #[serde(default)]
    pub scene_ids: Vec<Uuid>,
}

/// Outcome of checking every adjacent pair.
#[derive(Debug, Serialize)]
pub struct ChainResponse {
    pub valid: bool,
    pub alternates: bool,
    pub expected_next: Option<SceneType>,
    pub links: Vec<ChainLink>,
}

/// Validate an ordered chain of scenes.
pub async fn validate_chain(
    State(state): State<AppState>,
    payload: Result<Json<ChainRequest>, JsonRejection>,
) -> Result<Json<ChainResponse>, ApiError> {
    let Json(req) = payload?;
    if !req.cards.is_empty() && !req.scene_ids.is_empty() {
        return Err(SceneError::construction(None, "give cards or scene_ids, not both").into());
    }

    let mut chain = SceneChain::new();
    for raw in req.cards {
        chain.push(SceneCard::try_from(raw)?);
    }
    for id in req.scene_ids {
        chain.push(state.card(id).await?);
    }

    let links = state.validator.validate_sequence(&chain);
    let valid = links.iter().all(ChainLink::is_valid);

    debug!(scenes = chain.len(), valid, "chain validated");

    Ok(Json(ChainResponse {
        valid,
        alternates: chain.alternates(),
        expected_next: chain.expected_next(),
        links,
    }))
}
