//! # Snowflake Core
//!
//! Core types for the Snowflake scene engine.
//!
//! This crate provides the fundamental building blocks:
//! - [`SceneCard`] - A proactive or reactive scene plan
//! - [`SceneChain`] - An ordered sequence of scenes
//! - [`RawSceneCard`] - The flat wire shape accepted by the API
//! - [`TriageResult`] - YES / NO / MAYBE verdict with violations
//! - [`SceneError`] - Error types

pub mod chain;
pub mod error;
pub mod raw;
pub mod scene;
pub mod triage;
pub mod types;

// Re-exports for convenience
pub use chain::SceneChain;
pub use error::{Result, SceneError};
pub use raw::RawSceneCard;
pub use scene::{
    Decision, DilemmaOption, Goal, GoalCriteria, Obstacle, ProactiveBody, ReactiveBody, SceneBody,
    SceneCard, SceneCardBuilder, Setback, SetbackOutcome,
};
pub use triage::{Rule, RuleSeverity, TriageResult, Verdict, Violation};
pub use types::*;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::chain::SceneChain;
    pub use crate::error::{Result, SceneError};
    pub use crate::raw::RawSceneCard;
    pub use crate::scene::{
        Decision, DilemmaOption, Goal, GoalCriteria, Obstacle, ProactiveBody, ReactiveBody,
        SceneBody, SceneCard, SceneCardBuilder, Setback, SetbackOutcome,
    };
    pub use crate::triage::{Rule, RuleSeverity, TriageResult, Verdict, Violation};
    pub use crate::types::{PovMode, SceneStatus, SceneType, Tense};
}
