//! The validator that ties configuration and scoring strategies together.

use std::fmt;

use snowflake_core::{SceneCard, SceneChain, TriageResult, Violation};

use crate::chain::{self, ChainLink};
use crate::classify;
use crate::config::TriageConfig;
use crate::scoring::{DeclaredSafety, DeclaredSeverity, OptionAssessor, SeverityScorer};
use crate::structure;

/// Validates scene cards and triages them.
///
/// Every method is a pure function of its inputs and the validator's
/// configuration; nothing here mutates a card.
pub struct SceneValidator {
    config: TriageConfig,
    scorer: Box<dyn SeverityScorer>,
    assessor: Box<dyn OptionAssessor>,
}

impl SceneValidator {
    /// Create a validator with default configuration and declared-value strategies.
    pub fn new() -> Self {
        Self::with_config(TriageConfig::default())
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: TriageConfig) -> Self {
        Self {
            config,
            scorer: Box::new(DeclaredSeverity),
            assessor: Box::new(DeclaredSafety),
        }
    }

    /// Swap the obstacle severity strategy.
    pub fn with_scorer(mut self, scorer: impl SeverityScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Swap the dilemma option strategy.
    pub fn with_assessor(mut self, assessor: impl OptionAssessor + 'static) -> Self {
        self.assessor = Box::new(assessor);
        self
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TriageConfig) {
        self.config = config;
    }

    pub fn scorer(&self) -> &dyn SeverityScorer {
        self.scorer.as_ref()
    }

    pub fn assessor(&self) -> &dyn OptionAssessor {
        self.assessor.as_ref()
    }

    /// Check one card in isolation. An empty list means it is well-formed.
    pub fn validate_structure(&self, card: &SceneCard) -> Vec<Violation> {
        structure::validate(card, self)
    }

    /// Check the link rule between two scenes claimed to be adjacent.
    pub fn validate_chain(&self, prior: &SceneCard, next: &SceneCard) -> Vec<Violation> {
        chain::validate(prior, next, self)
    }

    /// Check every adjacent pair of a chain.
    pub fn validate_sequence(&self, chain: &SceneChain) -> Vec<ChainLink> {
        chain::validate_sequence(chain, self)
    }

    /// Classify a card, optionally against the scene before it.
    pub fn triage(&self, card: &SceneCard, prior: Option<&SceneCard>) -> TriageResult {
        classify::classify(card, prior, self)
    }
}

impl Default for SceneValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneValidator")
            .field("config", &self.config)
            .field("scorer", &self.scorer.name())
            .field("assessor", &self.assessor.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CostAwareAssessor, KeywordSeverity};

    #[test]
    fn test_default_strategies() {
        let validator = SceneValidator::default();
        assert_eq!(validator.scorer().name(), "declared");
        assert_eq!(validator.assessor().name(), "declared");
    }

    #[test]
    fn test_swapped_strategies_show_in_debug() {
        let validator = SceneValidator::new()
            .with_scorer(KeywordSeverity::new())
            .with_assessor(CostAwareAssessor);
        let debug = format!("{:?}", validator);
        assert!(debug.contains("keyword"));
        assert!(debug.contains("cost_aware"));
    }

    #[test]
    fn test_set_config() {
        let mut validator = SceneValidator::new();
        validator.set_config(TriageConfig::default().with_goal_match_threshold(0.9));
        assert_eq!(validator.config().goal_match_threshold, 0.9);
    }
}
