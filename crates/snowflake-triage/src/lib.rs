//! # Snowflake Triage
//!
//! Structural validation, chain validation and YES/NO/MAYBE triage for
//! Snowflake Method scene cards.
//!
//! The free functions use a default [`SceneValidator`]. Build one directly to
//! change thresholds or swap the scoring strategies.

pub mod chain;
mod classify;
pub mod config;
pub mod scoring;
mod structure;
pub mod text;
pub mod validator;

#[cfg(test)]
pub(crate) mod fixtures;

pub use chain::ChainLink;
pub use config::{SeverityOverride, TriageConfig};
pub use scoring::{
    CostAwareAssessor, DeclaredSafety, DeclaredSeverity, KeywordSeverity, OptionAssessor,
    SeverityScorer,
};
pub use validator::SceneValidator;

use snowflake_core::{SceneCard, TriageResult, Violation};

/// Check one card in isolation with the default validator.
pub fn validate_structure(card: &SceneCard) -> Vec<Violation> {
    SceneValidator::default().validate_structure(card)
}

/// Check the link rule between two adjacent cards with the default validator.
pub fn validate_chain(prior: &SceneCard, next: &SceneCard) -> Vec<Violation> {
    SceneValidator::default().validate_chain(prior, next)
}

/// Triage a card with the default validator.
pub fn triage(card: &SceneCard, prior: Option<&SceneCard>) -> TriageResult {
    SceneValidator::default().triage(card, prior)
}
