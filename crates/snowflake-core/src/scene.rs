//! Scene Card types and builder.
//!
//! A [`SceneCard`] is one planned scene: shared metadata plus exactly one
//! structural body. The body is a sum type, so a reactive card can never
//! carry proactive fields and the scene type is always derived from it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{Result, SceneError};
use crate::types::{PovMode, SceneType, Tense};

/// A single planned scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCard {
    /// Unique identifier, fixed at creation.
    pub id: Uuid,

    /// Viewpoint character.
    pub pov_character: String,

    /// Point-of-view mode.
    pub pov_mode: PovMode,

    /// Narrative tense.
    pub tense: Tense,

    /// The immediate, time-bounded pressure behind the scene.
    pub scene_crucible: Option<String>,

    /// Structural payload.
    pub body: SceneBody,
}

/// The structural payload of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scene_type", rename_all = "snake_case")]
pub enum SceneBody {
    Proactive(ProactiveBody),
    Reactive(ReactiveBody),
}

/// Goal, Conflict, Setback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProactiveBody {
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub conflict: Vec<Obstacle>,
    #[serde(default)]
    pub setback: Option<Setback>,
}

/// What the POV character wants within this scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Goal {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub criteria: GoalCriteria,
}

/// The five tests a scene goal must pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GoalCriteria {
    /// Can be attempted in the time the scene covers.
    #[serde(default)]
    pub fits_available_time: bool,
    /// Could succeed in principle.
    #[serde(default)]
    pub achievable: bool,
    /// Is not trivial.
    #[serde(default)]
    pub difficult: bool,
    /// Follows from what the POV character wants.
    #[serde(default)]
    pub fits_motivation: bool,
    /// An observer could tell whether it succeeded.
    #[serde(default)]
    pub concrete_and_testable: bool,
}

impl GoalCriteria {
    /// All criteria satisfied.
    pub fn all() -> Self {
        Self {
            fits_available_time: true,
            achievable: true,
            difficult: true,
            fits_motivation: true,
            concrete_and_testable: true,
        }
    }

    /// Each criterion by its wire name, in declaration order.
    pub fn checks(&self) -> [(&'static str, bool); 5] {
        [
            ("fits_available_time", self.fits_available_time),
            ("achievable", self.achievable),
            ("difficult", self.difficult),
            ("fits_motivation", self.fits_motivation),
            ("concrete_and_testable", self.concrete_and_testable),
        ]
    }

    /// Names of the criteria that do not hold.
    pub fn unmet(&self) -> Vec<&'static str> {
        self.checks()
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| name)
            .collect()
    }
}

/// One event standing between the character and the goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(default)]
    pub description: String,
    /// Declared severity score; higher is worse.
    #[serde(default)]
    pub severity: Option<f32>,
}

impl Obstacle {
    /// Obstacle with a declared severity.
    pub fn new(description: impl Into<String>, severity: f32) -> Self {
        Self {
            description: description.into(),
            severity: Some(severity),
        }
    }

    /// Obstacle whose severity must be inferred by a scorer.
    pub fn unscored(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            severity: None,
        }
    }
}

/// How a proactive scene ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setback {
    pub outcome: SetbackOutcome,
    #[serde(default)]
    pub rationale: String,
}

impl Setback {
    pub fn new(outcome: SetbackOutcome, rationale: impl Into<String>) -> Self {
        Self {
            outcome,
            rationale: rationale.into(),
        }
    }
}

/// Outcome classes for a proactive scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetbackOutcome {
    Failure,
    PartialFailure,
    /// The goal is met but a worse problem appears.
    SuccessWithComplication,
    /// Unambiguous success. Never valid for a proactive scene.
    CleanSuccess,
}

impl SetbackOutcome {
    /// Returns true if a proactive scene may end this way.
    pub fn is_setback(&self) -> bool {
        !matches!(self, SetbackOutcome::CleanSuccess)
    }
}

/// Reaction, Dilemma, Decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ReactiveBody {
    #[serde(default)]
    pub reaction: String,
    #[serde(default)]
    pub dilemma: Vec<DilemmaOption>,
    #[serde(default)]
    pub decision: Decision,
    #[serde(default)]
    pub next_goal_stub: String,
}

/// One of the options the character weighs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DilemmaOption {
    #[serde(default)]
    pub description: String,
    /// What choosing this option would cost.
    #[serde(default)]
    pub cost: Option<String>,
    /// Flagged as carrying no real cost.
    #[serde(default)]
    pub safe: bool,
}

impl DilemmaOption {
    /// A costly option.
    pub fn bad(description: impl Into<String>, cost: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            cost: Some(cost.into()),
            safe: false,
        }
    }

    /// An option flagged as safe.
    pub fn safe(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            cost: None,
            safe: true,
        }
    }
}

/// What the character commits to at the end of a reactive scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Decision {
    #[serde(default)]
    pub text: String,
    /// Unambiguous commitment.
    #[serde(default)]
    pub firm: bool,
    /// Accepts a cost, explicitly or implicitly.
    #[serde(default)]
    pub risk_acknowledged: bool,
    /// Changes the situation; not a stalling move.
    #[serde(default)]
    pub forcing: bool,
}

impl Decision {
    /// A decision with all three properties.
    pub fn committed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            firm: true,
            risk_acknowledged: true,
            forcing: true,
        }
    }
}

impl SceneCard {
    /// Create a new SceneCardBuilder.
    pub fn builder() -> SceneCardBuilder {
        SceneCardBuilder::new()
    }

    /// The scene type, derived from the body.
    pub fn scene_type(&self) -> SceneType {
        match self.body {
            SceneBody::Proactive(_) => SceneType::Proactive,
            SceneBody::Reactive(_) => SceneType::Reactive,
        }
    }

    /// The proactive body, if this is a proactive scene.
    pub fn proactive(&self) -> Option<&ProactiveBody> {
        match &self.body {
            SceneBody::Proactive(body) => Some(body),
            SceneBody::Reactive(_) => None,
        }
    }

    /// The reactive body, if this is a reactive scene.
    pub fn reactive(&self) -> Option<&ReactiveBody> {
        match &self.body {
            SceneBody::Reactive(body) => Some(body),
            SceneBody::Proactive(_) => None,
        }
    }

    /// SHA-256 over the card's JSON form, hex-encoded.
    pub fn fingerprint(&self) -> String {
        let content = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Builder for creating SceneCards with a fluent API.
#[derive(Debug, Default)]
pub struct SceneCardBuilder {
    id: Option<Uuid>,
    scene_type: Option<SceneType>,
    pov_character: String,
    pov_mode: PovMode,
    tense: Tense,
    scene_crucible: Option<String>,
    proactive: Option<ProactiveBody>,
    reactive: Option<ReactiveBody>,
}

impl SceneCardBuilder {
    /// Create a new SceneCardBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-supplied ID instead of a fresh one.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the scene type. Required.
    pub fn scene_type(mut self, scene_type: SceneType) -> Self {
        self.scene_type = Some(scene_type);
        self
    }

    /// Set the viewpoint character.
    pub fn pov(mut self, character: impl Into<String>) -> Self {
        self.pov_character = character.into();
        self
    }

    /// Set the point-of-view mode.
    pub fn pov_mode(mut self, mode: PovMode) -> Self {
        self.pov_mode = mode;
        self
    }

    /// Set the tense.
    pub fn tense(mut self, tense: Tense) -> Self {
        self.tense = tense;
        self
    }

    /// Set the scene crucible.
    pub fn crucible(mut self, crucible: impl Into<String>) -> Self {
        self.scene_crucible = Some(crucible.into());
        self
    }

    /// Attach a proactive body.
    pub fn proactive(mut self, body: ProactiveBody) -> Self {
        self.proactive = Some(body);
        self
    }

    /// Attach a reactive body.
    pub fn reactive(mut self, body: ReactiveBody) -> Self {
        self.reactive = Some(body);
        self
    }

    /// Build the SceneCard.
    pub fn build(self) -> Result<SceneCard> {
        let id = self.id.unwrap_or_else(Uuid::new_v4);
        if id.is_nil() {
            return Err(SceneError::construction(None, "scene id must not be nil"));
        }

        let scene_type = self
            .scene_type
            .ok_or_else(|| SceneError::construction(Some(id), "scene_type is required"))?;

        let body = match (scene_type, self.proactive, self.reactive) {
            (_, Some(_), Some(_)) => {
                return Err(SceneError::construction(
                    Some(id),
                    "a scene card carries a proactive or a reactive body, not both",
                ))
            }
            (SceneType::Proactive, Some(body), None) => SceneBody::Proactive(body),
            (SceneType::Reactive, None, Some(body)) => SceneBody::Reactive(body),
            (SceneType::Proactive, None, Some(_)) => {
                return Err(SceneError::construction(
                    Some(id),
                    "scene_type is proactive but a reactive body was supplied",
                ))
            }
            (SceneType::Reactive, Some(_), None) => {
                return Err(SceneError::construction(
                    Some(id),
                    "scene_type is reactive but a proactive body was supplied",
                ))
            }
            (scene_type, None, None) => {
                return Err(SceneError::construction(
                    Some(id),
                    format!("{} scene requires a body", scene_type),
                ))
            }
        };

        Ok(SceneCard {
            id,
            pov_character: self.pov_character,
            pov_mode: self.pov_mode,
            tense: self.tense,
            scene_crucible: self.scene_crucible,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proactive_body() -> ProactiveBody {
        ProactiveBody {
            goal: Goal {
                text: "reach the bridge".to_string(),
                criteria: GoalCriteria::all(),
            },
            conflict: vec![Obstacle::new("a patrol", 1.0)],
            setback: Some(Setback::new(SetbackOutcome::Failure, "the bridge is blown")),
        }
    }

    #[test]
    fn test_builder_proactive() {
        let card = SceneCard::builder()
            .scene_type(SceneType::Proactive)
            .pov("Dirk")
            .crucible("the bridge blows at dawn")
            .proactive(proactive_body())
            .build()
            .unwrap();

        assert_eq!(card.scene_type(), SceneType::Proactive);
        assert!(card.proactive().is_some());
        assert!(card.reactive().is_none());
        assert_eq!(card.pov_mode, PovMode::ThirdLimited);
    }

    #[test]
    fn test_builder_keeps_supplied_id() {
        let id = Uuid::new_v4();
        let card = SceneCard::builder()
            .id(id)
            .scene_type(SceneType::Reactive)
            .reactive(ReactiveBody::default())
            .build()
            .unwrap();
        assert_eq!(card.id, id);
    }

    #[test]
    fn test_builder_missing_scene_type() {
        let err = SceneCard::builder()
            .proactive(proactive_body())
            .build()
            .unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn test_builder_rejects_both_bodies() {
        let result = SceneCard::builder()
            .scene_type(SceneType::Proactive)
            .proactive(proactive_body())
            .reactive(ReactiveBody::default())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_mismatched_body() {
        let result = SceneCard::builder()
            .scene_type(SceneType::Reactive)
            .proactive(proactive_body())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_missing_body() {
        let result = SceneCard::builder().scene_type(SceneType::Proactive).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_nil_id() {
        let result = SceneCard::builder()
            .id(Uuid::nil())
            .scene_type(SceneType::Proactive)
            .proactive(proactive_body())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_goal_criteria_unmet() {
        let mut criteria = GoalCriteria::all();
        assert!(criteria.unmet().is_empty());
        criteria.difficult = false;
        assert_eq!(criteria.unmet(), vec!["difficult"]);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let card = SceneCard::builder()
            .scene_type(SceneType::Proactive)
            .pov("Dirk")
            .proactive(proactive_body())
            .build()
            .unwrap();
        let same = card.clone();
        assert_eq!(card.fingerprint(), same.fingerprint());

        let mut changed = card.clone();
        changed.pov_character = "Hans".to_string();
        assert_ne!(card.fingerprint(), changed.fingerprint());
        assert_eq!(card.fingerprint().len(), 64);
    }

    #[test]
    fn test_body_is_tagged_on_the_wire() {
        let card = SceneCard::builder()
            .scene_type(SceneType::Reactive)
            .reactive(ReactiveBody::default())
            .build()
            .unwrap();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["body"]["scene_type"], "reactive");

        let back: SceneCard = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_reactive_body_rejects_proactive_fields() {
        let json = serde_json::json!({
            "scene_type": "reactive",
            "reaction": "shock",
            "goal": { "text": "run" }
        });
        assert!(serde_json::from_value::<SceneBody>(json).is_err());
    }
}
