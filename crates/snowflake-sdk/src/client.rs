//! Snowflake client implementation.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use snowflake_core::{
    RawSceneCard, Result, SceneCard, SceneError, SceneStatus, SceneType, TriageResult, Verdict,
    Violation,
};
use tracing::debug;
use uuid::Uuid;

/// Client for interacting with a Snowflake node.
#[derive(Clone)]
pub struct SceneClient {
    /// Base URL of the node.
    base_url: String,

    /// HTTP client.
    http_client: reqwest::Client,
}

/// A scene stored by the planning step.
///
/// A NO verdict still stores the scene, as rejected; the node does not
/// report the version it was written at in that case.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannedScene {
    pub id: Uuid,
    pub status: SceneStatus,
    #[serde(default)]
    pub version: Option<u64>,
    pub triage: TriageResult,
}

/// Prose drafted for a stored scene.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftedScene {
    pub scene_id: Uuid,
    pub verdict: Verdict,
    pub prose: String,
    pub version: u64,
}

/// A stored scene with its workflow state.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneView {
    pub id: Uuid,
    pub version: u64,
    pub updated_at: String,
    pub card: SceneCard,
    pub status: SceneStatus,
    pub triage: Option<TriageResult>,
    pub prose: Option<String>,
}

/// Row of the scene list.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneSummary {
    pub id: Uuid,
    pub scene_type: SceneType,
    pub pov_character: String,
    pub status: SceneStatus,
    pub verdict: Option<Verdict>,
    pub version: u64,
}

/// Outcome of validating a chain.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainReport {
    pub valid: bool,
    pub alternates: bool,
    pub expected_next: Option<SceneType>,
    pub links: Vec<LinkReport>,
}

/// One adjacent pair of a chain.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkReport {
    pub prior_id: Uuid,
    pub next_id: Uuid,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Serialize)]
struct PlanRequest {
    card: RawSceneCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    prior_id: Option<Uuid>,
}

#[derive(Debug, Default, Serialize)]
struct TriageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<RawSceneCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scene_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prior: Option<RawSceneCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prior_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl SceneClient {
    /// Connect to a node.
    pub async fn connect(url: &str) -> Result<Self> {
        let base_url = url.trim_end_matches('/').to_string();
        let http_client = reqwest::Client::new();

        // Verify connection with health check
        let health_url = format!("{}/health", base_url);
        http_client
            .get(&health_url)
            .send()
            .await
            .map_err(|e| SceneError::ConnectionError(e.to_string()))?
            .error_for_status()
            .map_err(|e| SceneError::ConnectionError(e.to_string()))?;

        debug!("connected to {}", base_url);

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Plan a scene, optionally following a stored one.
    pub async fn plan(&self, card: &SceneCard, prior_id: Option<Uuid>) -> Result<PlannedScene> {
        let url = format!("{}/scene/plan", self.base_url);
        let request = PlanRequest {
            card: RawSceneCard::from(card),
            prior_id,
        };

        let response = self.post(&url, &request).await?;
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let triage: TriageResult = parse(response).await?;
            return Ok(PlannedScene {
                id: triage.scene_id,
                status: SceneStatus::Rejected,
                version: None,
                triage,
            });
        }
        if !response.status().is_success() {
            return Err(error_from(response, Some(card.id)).await);
        }

        parse(response).await
    }

    /// Triage a card, optionally against the scene before it.
    ///
    /// A NO verdict is a result, not an error.
    pub async fn triage(&self, card: &SceneCard, prior: Option<&SceneCard>) -> Result<TriageResult> {
        let request = TriageRequest {
            card: Some(RawSceneCard::from(card)),
            prior: prior.map(RawSceneCard::from),
            ..Default::default()
        };
        self.send_triage(request, Some(card.id)).await
    }

    /// Triage a stored scene; the node records the verdict.
    pub async fn triage_stored(
        &self,
        scene_id: Uuid,
        prior_id: Option<Uuid>,
    ) -> Result<TriageResult> {
        let request = TriageRequest {
            scene_id: Some(scene_id),
            prior_id,
            ..Default::default()
        };
        self.send_triage(request, Some(scene_id)).await
    }

    async fn send_triage(
        &self,
        request: TriageRequest,
        scene_id: Option<Uuid>,
    ) -> Result<TriageResult> {
        let url = format!("{}/scene/triage", self.base_url);
        let response = self.post(&url, &request).await?;

        match response.status() {
            s if s.is_success() || s == StatusCode::UNPROCESSABLE_ENTITY => parse(response).await,
            _ => Err(error_from(response, scene_id).await),
        }
    }

    /// Draft prose for a stored scene.
    pub async fn draft(&self, scene_id: Uuid) -> Result<DraftedScene> {
        let url = format!("{}/scene/draft", self.base_url);
        let response = self
            .post(&url, &serde_json::json!({ "scene_id": scene_id }))
            .await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(SceneError::NotDraftable {
                scene_id,
                verdict: Verdict::No,
            });
        }
        if !response.status().is_success() {
            return Err(error_from(response, Some(scene_id)).await);
        }

        parse(response).await
    }

    /// Get a stored scene.
    pub async fn get_scene(&self, id: Uuid) -> Result<SceneView> {
        let url = format!("{}/scene/{}", self.base_url, id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SceneError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from(response, Some(id)).await);
        }

        parse(response).await
    }

    /// Delete a stored scene.
    pub async fn delete_scene(&self, id: Uuid) -> Result<()> {
        let url = format!("{}/scene/{}", self.base_url, id);

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| SceneError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from(response, Some(id)).await);
        }

        Ok(())
    }

    /// List stored scenes.
    pub async fn list_scenes(&self) -> Result<Vec<SceneSummary>> {
        let url = format!("{}/scenes", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SceneError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from(response, None).await);
        }

        parse(response).await
    }

    /// Validate an ordered chain of cards.
    pub async fn validate_chain(&self, cards: &[SceneCard]) -> Result<ChainReport> {
        let url = format!("{}/chain/validate", self.base_url);
        let cards: Vec<RawSceneCard> = cards.iter().map(RawSceneCard::from).collect();

        let response = self
            .post(&url, &serde_json::json!({ "cards": cards }))
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response, None).await);
        }

        parse(response).await
    }

    async fn post<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Response> {
        self.http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SceneError::ConnectionError(e.to_string()))
    }
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| SceneError::SerializationError(e.to_string()))
}

/// Map a failed response onto a scene error.
async fn error_from(response: Response, scene_id: Option<Uuid>) -> SceneError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);

    match status {
        StatusCode::BAD_REQUEST => SceneError::Construction { scene_id, message },
        StatusCode::NOT_FOUND => SceneError::NotFound {
            resource_type: "Scene".to_string(),
            id: scene_id.map(|id| id.to_string()).unwrap_or_default(),
        },
        StatusCode::CONFLICT => SceneError::AlreadyExists {
            resource_type: "Scene".to_string(),
            id: scene_id.map(|id| id.to_string()).unwrap_or_default(),
        },
        _ => SceneError::Internal(format!("{}: {}", status, message)),
    }
}
