//! Common types used across the scene engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two Snowflake scene structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    /// Goal, Conflict, Setback.
    Proactive,
    /// Reaction, Dilemma, Decision.
    Reactive,
}

impl SceneType {
    /// The type a well-formed sequence expects next.
    pub fn successor(&self) -> SceneType {
        match self {
            SceneType::Proactive => SceneType::Reactive,
            SceneType::Reactive => SceneType::Proactive,
        }
    }
}

impl fmt::Display for SceneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneType::Proactive => write!(f, "proactive"),
            SceneType::Reactive => write!(f, "reactive"),
        }
    }
}

/// Point-of-view mode, fixed per scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PovMode {
    FirstPerson,
    SecondPerson,
    #[default]
    ThirdLimited,
    ThirdOmniscient,
}

/// Narrative tense, fixed per scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    #[default]
    Past,
    Present,
}

/// Where a scene sits in the plan → triage → draft workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneStatus {
    /// Card has been accepted by the planning step.
    Planned,
    /// Triage returned YES or MAYBE.
    Triaged,
    /// Prose has been generated from the card.
    Drafted,
    /// Triage returned NO; the scene must be restructured.
    Rejected,
}

impl SceneStatus {
    /// Returns true if no further workflow step applies.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SceneStatus::Drafted)
    }

    /// Returns true if the prose drafter may consume the scene.
    pub fn is_draftable(&self) -> bool {
        matches!(self, SceneStatus::Planned | SceneStatus::Triaged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_type_successor() {
        assert_eq!(SceneType::Proactive.successor(), SceneType::Reactive);
        assert_eq!(SceneType::Reactive.successor(), SceneType::Proactive);
    }

    #[test]
    fn test_scene_status_flags() {
        assert!(SceneStatus::Drafted.is_terminal());
        assert!(!SceneStatus::Rejected.is_terminal());
        assert!(SceneStatus::Triaged.is_draftable());
        assert!(!SceneStatus::Rejected.is_draftable());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&PovMode::ThirdLimited).unwrap(),
            "\"third_limited\""
        );
        let tense: Tense = serde_json::from_str("\"present\"").unwrap();
        assert_eq!(tense, Tense::Present);
    }
}
