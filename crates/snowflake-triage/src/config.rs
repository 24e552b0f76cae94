//! Triage configuration.

use serde::{Deserialize, Serialize};
use snowflake_core::{Result, Rule, RuleSeverity, SceneError};

/// Configuration for the validators and the triage classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Minimum share (0.0 to 1.0) of the prior next-goal stub's content words
    /// that must appear in the following goal.
    pub goal_match_threshold: f32,

    /// Fewest words a next-goal stub may have before it reads as vague.
    pub min_next_goal_words: usize,

    /// Reclassifications applied on top of each rule's default severity.
    /// Later entries win.
    pub severity_overrides: Vec<SeverityOverride>,
}

/// Moves one rule into a different triage bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityOverride {
    pub rule: Rule,
    pub severity: RuleSeverity,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            goal_match_threshold: 0.5,
            min_next_goal_words: 3,
            severity_overrides: Vec::new(),
        }
    }
}

impl TriageConfig {
    /// Reclassify a rule.
    pub fn with_override(mut self, rule: Rule, severity: RuleSeverity) -> Self {
        self.severity_overrides.push(SeverityOverride { rule, severity });
        self
    }

    /// Set the goal match threshold.
    pub fn with_goal_match_threshold(mut self, threshold: f32) -> Self {
        self.goal_match_threshold = threshold;
        self
    }

    /// Effective severity of a rule.
    pub fn severity_of(&self, rule: Rule) -> RuleSeverity {
        self.severity_overrides
            .iter()
            .rev()
            .find(|o| o.rule == rule)
            .map(|o| o.severity)
            .unwrap_or_else(|| rule.default_severity())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.goal_match_threshold) {
            return Err(SceneError::InvalidConfig(format!(
                "goal_match_threshold must be within 0.0..=1.0, got {}",
                self.goal_match_threshold
            )));
        }
        if self.min_next_goal_words == 0 {
            return Err(SceneError::InvalidConfig(
                "min_next_goal_words must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
