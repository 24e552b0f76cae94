//! Flat wire shape for scene cards.
//!
//! API clients send every field at the top level. Conversion into a
//! [`SceneCard`] is where shape errors surface: a missing scene type, fields
//! from both structures, or no structural fields at all. Absent fields
//! inside the chosen structure are not errors; they become empty values that
//! the structural validator reports.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SceneError};
use crate::scene::{
    Decision, DilemmaOption, Goal, Obstacle, ProactiveBody, ReactiveBody, SceneBody, SceneCard,
    Setback,
};
use crate::types::{PovMode, SceneType, Tense};

/// Untyped scene card as received over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSceneCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_type: Option<SceneType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pov_character: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pov_mode: Option<PovMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<Tense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_crucible: Option<String>,

    // Proactive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<Vec<Obstacle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setback: Option<Setback>,

    // Reactive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dilemma: Option<Vec<DilemmaOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_goal_stub: Option<String>,
}

impl RawSceneCard {
    fn proactive_fields(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.goal.is_some() {
            present.push("goal");
        }
        if self.conflict.is_some() {
            present.push("conflict");
        }
        if self.setback.is_some() {
            present.push("setback");
        }
        present
    }

    fn reactive_fields(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.reaction.is_some() {
            present.push("reaction");
        }
        if self.dilemma.is_some() {
            present.push("dilemma");
        }
        if self.decision.is_some() {
            present.push("decision");
        }
        if self.next_goal_stub.is_some() {
            present.push("next_goal_stub");
        }
        present
    }
}

impl TryFrom<RawSceneCard> for SceneCard {
    type Error = SceneError;

    fn try_from(raw: RawSceneCard) -> Result<Self> {
        let proactive = raw.proactive_fields();
        let reactive = raw.reactive_fields();

        let scene_type = raw
            .scene_type
            .ok_or_else(|| SceneError::construction(raw.id, "scene_type is required"))?;

        let (expected, foreign) = match scene_type {
            SceneType::Proactive => (&proactive, &reactive),
            SceneType::Reactive => (&reactive, &proactive),
        };
        if !foreign.is_empty() {
            return Err(SceneError::construction(
                raw.id,
                format!(
                    "{} scene carries {} fields: {}",
                    scene_type,
                    scene_type.successor(),
                    foreign.join(", ")
                ),
            ));
        }
        if expected.is_empty() {
            return Err(SceneError::construction(
                raw.id,
                format!("{} scene has no structural fields", scene_type),
            ));
        }

        let body = match scene_type {
            SceneType::Proactive => SceneBody::Proactive(ProactiveBody {
                goal: raw.goal.unwrap_or_default(),
                conflict: raw.conflict.unwrap_or_default(),
                setback: raw.setback,
            }),
            SceneType::Reactive => SceneBody::Reactive(ReactiveBody {
                reaction: raw.reaction.unwrap_or_default(),
                dilemma: raw.dilemma.unwrap_or_default(),
                decision: raw.decision.unwrap_or_default(),
                next_goal_stub: raw.next_goal_stub.unwrap_or_default(),
            }),
        };

        let mut builder = SceneCard::builder()
            .scene_type(scene_type)
            .pov(raw.pov_character.unwrap_or_default())
            .pov_mode(raw.pov_mode.unwrap_or_default())
            .tense(raw.tense.unwrap_or_default());
        if let Some(id) = raw.id {
            builder = builder.id(id);
        }
        if let Some(crucible) = raw.scene_crucible {
            builder = builder.crucible(crucible);
        }
        builder = match body {
            SceneBody::Proactive(body) => builder.proactive(body),
            SceneBody::Reactive(body) => builder.reactive(body),
        };
        builder.build()
    }
}

impl From<&SceneCard> for RawSceneCard {
    fn from(card: &SceneCard) -> Self {
        let mut raw = RawSceneCard {
            id: Some(card.id),
            scene_type: Some(card.scene_type()),
            pov_character: Some(card.pov_character.clone()),
            pov_mode: Some(card.pov_mode),
            tense: Some(card.tense),
            scene_crucible: card.scene_crucible.clone(),
            ..Default::default()
        };
        match &card.body {
            SceneBody::Proactive(body) => {
                raw.goal = Some(body.goal.clone());
                raw.conflict = Some(body.conflict.clone());
                raw.setback = body.setback.clone();
            }
            SceneBody::Reactive(body) => {
                raw.reaction = Some(body.reaction.clone());
                raw.dilemma = Some(body.dilemma.clone());
                raw.decision = Some(body.decision.clone());
                raw.next_goal_stub = Some(body.next_goal_stub.clone());
            }
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scene_type_is_construction_error() {
        let raw = RawSceneCard {
            reaction: Some("numb".to_string()),
            ..Default::default()
        };
        let err = SceneCard::try_from(raw).unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn test_mixed_fields_are_rejected() {
        let raw: RawSceneCard = serde_json::from_value(serde_json::json!({
            "scene_type": "proactive",
            "goal": { "text": "cross the river" },
            "reaction": "despair",
            "next_goal_stub": "find a boat"
        }))
        .unwrap();
        let err = SceneCard::try_from(raw).unwrap_err();
        assert!(err.to_string().contains("reaction, next_goal_stub"));
    }

    #[test]
    fn test_no_structural_fields_is_rejected() {
        let raw = RawSceneCard {
            scene_type: Some(SceneType::Reactive),
            pov_character: Some("Goldilocks".to_string()),
            ..Default::default()
        };
        assert!(SceneCard::try_from(raw).is_err());
    }

    #[test]
    fn test_absent_fields_become_empty_values() {
        let raw = RawSceneCard {
            scene_type: Some(SceneType::Proactive),
            goal: Some(Goal {
                text: "hold the door".to_string(),
                criteria: Default::default(),
            }),
            ..Default::default()
        };
        let card = SceneCard::try_from(raw).unwrap();
        let body = card.proactive().unwrap();
        assert!(body.conflict.is_empty());
        assert!(body.setback.is_none());
        assert!(card.scene_crucible.is_none());
        assert!(card.pov_character.is_empty());
    }

    #[test]
    fn test_flat_round_trip_preserves_card() {
        let raw = RawSceneCard {
            scene_type: Some(SceneType::Reactive),
            pov_character: Some("Goldilocks".to_string()),
            reaction: Some("panic".to_string()),
            next_goal_stub: Some("get out".to_string()),
            ..Default::default()
        };
        let card = SceneCard::try_from(raw).unwrap();
        let again = SceneCard::try_from(RawSceneCard::from(&card)).unwrap();
        assert_eq!(card, again);
    }

    #[test]
    fn test_absent_inner_text_deserializes_empty() {
        let raw: RawSceneCard = serde_json::from_value(serde_json::json!({
            "scene_type": "reactive",
            "dilemma": [{ "cost": "prison" }],
            "decision": { "firm": true, "risk_acknowledged": true, "forcing": true }
        }))
        .unwrap();

        let card = SceneCard::try_from(raw).unwrap();
        let body = card.reactive().unwrap();
        assert!(body.decision.text.is_empty());
        assert!(body.decision.firm);
        assert!(body.dilemma[0].description.is_empty());
    }
}
