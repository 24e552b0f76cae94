//! Scene API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snowflake_core::{
    RawSceneCard, SceneCard, SceneError, SceneStatus, SceneType, TriageResult, Verdict,
};
use snowflake_store::{SceneRecord, StoreEntry};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ApiError;
use crate::state::AppState;

/// Request to plan a new scene.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// The scene card, flat.
    pub card: RawSceneCard,

    /// Stored scene this one follows.
    #[serde(default)]
    pub prior_id: Option<Uuid>,
}

/// Response after planning a scene.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub id: Uuid,
    pub status: SceneStatus,
    pub version: u64,
    pub triage: TriageResult,
}

/// Request to triage a card.
///
/// The card is given inline or by stored ID; the prior scene likewise.
#[derive(Debug, Default, Deserialize)]
pub struct TriageRequest {
    #[serde(default)]
    pub card: Option<RawSceneCard>,
    #[serde(default)]
    pub scene_id: Option<Uuid>,
    #[serde(default)]
    pub prior: Option<RawSceneCard>,
    #[serde(default)]
    pub prior_id: Option<Uuid>,
}

/// Request to draft prose for a stored scene.
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub scene_id: Uuid,
}

/// Response with drafted prose.
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub scene_id: Uuid,
    pub verdict: Verdict,
    pub prose: String,
    pub version: u64,
}

/// Query for reading a scene as of a point in time.
#[derive(Debug, Default, Deserialize)]
pub struct SceneQuery {
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Response with a stored scene.
#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub id: Uuid,
    pub version: u64,
    pub updated_at: String,
    #[serde(flatten)]
    pub record: SceneRecord,
}

/// One version in a scene's history.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub version: u64,
    pub timestamp: String,
    pub deleted: bool,
    pub status: Option<SceneStatus>,
    pub verdict: Option<Verdict>,
}

/// Summary row for the scene list.
#[derive(Debug, Serialize)]
pub struct SceneSummary {
    pub id: Uuid,
    pub scene_type: SceneType,
    pub pov_character: String,
    pub status: SceneStatus,
    pub verdict: Option<Verdict>,
    pub version: u64,
}

/// Resolve a card given inline or by stored ID.
async fn resolve_card(
    state: &AppState,
    inline: Option<RawSceneCard>,
    id: Option<Uuid>,
    what: &str,
) -> Result<Option<SceneCard>, SceneError> {
    match (inline, id) {
        (Some(_), Some(_)) => Err(SceneError::construction(
            None,
            format!("give the {} inline or by id, not both", what),
        )),
        (Some(raw), None) => SceneCard::try_from(raw).map(Some),
        (None, Some(id)) => state.card(id).await.map(Some),
        (None, None) => Ok(None),
    }
}

/// Card of the scene a record was last chained against, if it still exists.
async fn prior_card(
    state: &AppState,
    record: &SceneRecord,
) -> Result<Option<SceneCard>, SceneError> {
    let Some(prior_id) = record.prior_id() else {
        return Ok(None);
    };

    let prior = state.store.get(prior_id).await?.and_then(|e| e.record);
    if prior.is_none() {
        warn!(
            "Prior scene {} of {} is gone; re-triaging without it",
            prior_id, record.card.id
        );
    }
    Ok(prior.map(|r| r.card))
}

fn scene_response(entry: StoreEntry) -> Result<SceneResponse, SceneError> {
    let record = entry.record.ok_or_else(|| SceneError::NotFound {
        resource_type: "Scene".to_string(),
        id: entry.scene_id.to_string(),
    })?;
    Ok(SceneResponse {
        id: entry.scene_id,
        version: entry.version,
        updated_at: entry.timestamp.to_rfc3339(),
        record,
    })
}

/// Plan a scene: build the card, triage it and store it.
///
/// A NO verdict is stored as rejected and answered with 422 and the full
/// result, as triage does.
pub async fn plan_scene(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlanResponse>), ApiError> {
    let Json(req) = payload?;
    let card = SceneCard::try_from(req.card)?;
    let prior = match req.prior_id {
        Some(id) => Some(state.card(id).await?),
        None => None,
    };

    let (result, entry) = state.plan(card, prior.as_ref()).await?;
    let status = entry
        .record
        .as_ref()
        .map(|r| r.status)
        .unwrap_or(SceneStatus::Planned);

    info!(
        "📝 Planned scene {} (verdict {}, version {})",
        entry.scene_id, result.verdict, entry.version
    );

    if result.verdict == Verdict::No {
        return Err(ApiError::Rejected(result));
    }

    Ok((
        StatusCode::CREATED,
        Json(PlanResponse {
            id: entry.scene_id,
            status,
            version: entry.version,
            triage: result,
        }),
    ))
}

/// Triage a card. NO answers 422 with the full result.
pub async fn triage_scene(
    State(state): State<AppState>,
    payload: Result<Json<TriageRequest>, JsonRejection>,
) -> Result<Json<TriageResult>, ApiError> {
    let Json(req) = payload?;
    let by_id = req.scene_id.is_some();
    let card = resolve_card(&state, req.card, req.scene_id, "card")
        .await?
        .ok_or_else(|| SceneError::construction(None, "a card or scene_id is required"))?;
    let prior = resolve_card(&state, req.prior, req.prior_id, "prior").await?;

    let result = state.validator.triage(&card, prior.as_ref());

    // Inline cards only update the store when they match what is stored.
    let stored = state.store.get(card.id).await?.and_then(|e| e.record);
    if let Some(record) = stored {
        if by_id || record.card == card {
            state.store.put(record.with_triage(result.clone())).await?;
        }
    }

    if result.verdict == Verdict::No {
        warn!(
            "🚫 Scene {} rejected with {} violations",
            card.id,
            result.violations.len()
        );
        return Err(ApiError::Rejected(result));
    }

    Ok(Json(result))
}

/// Draft prose for a stored scene.
pub async fn draft_scene(
    State(state): State<AppState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<Json<DraftResponse>, ApiError> {
    let Json(req) = payload?;
    let mut record = state.record(req.scene_id).await?;

    let verdict = match record.current_verdict() {
        Some(verdict) => verdict,
        None => {
            let prior = prior_card(&state, &record).await?;
            let result = state.validator.triage(&record.card, prior.as_ref());
            let verdict = result.verdict;
            record = record.with_triage(result);
            verdict
        }
    };

    if !verdict.is_acceptable() {
        state.store.put(record).await?;
        return Err(SceneError::NotDraftable {
            scene_id: req.scene_id,
            verdict,
        }
        .into());
    }

    let prose = state.drafter.draft(&record.card);
    let entry = state.store.put(record.with_prose(prose.clone())).await?;

    info!(
        "✍️  Drafted scene {} with {} ({} chars)",
        req.scene_id,
        state.drafter.name(),
        prose.len()
    );

    Ok(Json(DraftResponse {
        scene_id: req.scene_id,
        verdict,
        prose,
        version: entry.version,
    }))
}

/// Get a scene by ID, optionally as of a point in time.
pub async fn get_scene(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SceneQuery>,
) -> Result<Json<SceneResponse>, ApiError> {
    let entry = match query.at {
        Some(at) => state.store.get_at(id, at).await?,
        None => state.store.get(id).await?,
    };

    let entry = entry.ok_or_else(|| SceneError::NotFound {
        resource_type: "Scene".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(scene_response(entry)?))
}

/// Delete a scene.
pub async fn delete_scene(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Every stored version of a scene.
pub async fn scene_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let history = state.store.history(id).await?;
    if history.is_empty() {
        return Err(SceneError::NotFound {
            resource_type: "Scene".to_string(),
            id: id.to_string(),
        }
        .into());
    }

    let entries = history
        .into_iter()
        .map(|e| HistoryEntry {
            version: e.version,
            timestamp: e.timestamp.to_rfc3339(),
            deleted: e.is_tombstone(),
            status: e.record.as_ref().map(|r| r.status),
            verdict: e.record.as_ref().and_then(|r| r.current_verdict()),
        })
        .collect();

    Ok(Json(entries))
}

/// List all live scenes.
pub async fn list_scenes(
    State(state): State<AppState>,
) -> Result<Json<Vec<SceneSummary>>, ApiError> {
    let entries = state.store.list().await?;

    let summaries = entries
        .into_iter()
        .filter_map(|e| {
            let version = e.version;
            e.record.map(|r| SceneSummary {
                id: r.card.id,
                scene_type: r.card.scene_type(),
                pov_character: r.card.pov_character.clone(),
                status: r.status,
                verdict: r.current_verdict(),
                version,
            })
        })
        .collect();

    Ok(Json(summaries))
}
