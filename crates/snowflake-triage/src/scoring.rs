//! Swappable strategies for the fuzzy parts of validation.
//!
//! Obstacle severity and dilemma-option safety are judgment calls. The
//! validators only compare what these strategies report.

use snowflake_core::{DilemmaOption, Obstacle};

use crate::text;

/// Scores how severe an obstacle is.
pub trait SeverityScorer: Send + Sync {
    /// Severity score, higher is worse. `None` if the obstacle cannot be scored.
    fn score(&self, obstacle: &Obstacle) -> Option<f32>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Decides whether a dilemma option carries no real cost.
pub trait OptionAssessor: Send + Sync {
    fn is_safe(&self, option: &DilemmaOption) -> bool;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Uses the severity declared on the obstacle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredSeverity;

impl SeverityScorer for DeclaredSeverity {
    fn score(&self, obstacle: &Obstacle) -> Option<f32> {
        obstacle.severity.filter(|s| s.is_finite())
    }

    fn name(&self) -> &str {
        "declared"
    }
}

/// Falls back to intensity keywords when no severity is declared.
#[derive(Debug, Clone)]
pub struct KeywordSeverity {
    keywords: Vec<(String, f32)>,
}

impl KeywordSeverity {
    /// Scorer with the built-in keyword table.
    pub fn new() -> Self {
        let keywords = [
            ("delay", 1.0),
            ("inconvenience", 1.0),
            ("argument", 2.0),
            ("threat", 2.0),
            ("chase", 3.0),
            ("ambush", 3.0),
            ("fighter", 3.0),
            ("fire", 4.0),
            ("attack", 4.0),
            ("wound", 4.0),
            ("injury", 4.0),
            ("jump", 4.0),
            ("crash", 5.0),
            ("explosion", 5.0),
            ("explodes", 5.0),
            ("death", 5.0),
        ];
        Self {
            keywords: keywords
                .into_iter()
                .map(|(k, w)| (k.to_string(), w))
                .collect(),
        }
    }

    /// Add or replace a keyword weight.
    pub fn keyword(mut self, word: impl Into<String>, weight: f32) -> Self {
        let word = word.into().to_lowercase();
        self.keywords.retain(|(k, _)| *k != word);
        self.keywords.push((word, weight));
        self
    }
}

impl Default for KeywordSeverity {
    fn default() -> Self {
        Self::new()
    }
}

impl SeverityScorer for KeywordSeverity {
    fn score(&self, obstacle: &Obstacle) -> Option<f32> {
        if let Some(declared) = DeclaredSeverity.score(obstacle) {
            return Some(declared);
        }
        let words = text::tokens(&obstacle.description);
        self.keywords
            .iter()
            .filter(|(k, _)| words.iter().any(|w| w == k))
            .map(|(_, weight)| *weight)
            .fold(None, |best: Option<f32>, w| Some(best.map_or(w, |b| b.max(w))))
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// Trusts the option's `safe` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredSafety;

impl OptionAssessor for DeclaredSafety {
    fn is_safe(&self, option: &DilemmaOption) -> bool {
        option.safe
    }

    fn name(&self) -> &str {
        "declared"
    }
}

/// Treats an option as safe when it is flagged safe or states no cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostAwareAssessor;

impl OptionAssessor for CostAwareAssessor {
    fn is_safe(&self, option: &DilemmaOption) -> bool {
        option.safe
            || option
                .cost
                .as_deref()
                .map_or(true, |cost| cost.trim().is_empty())
    }

    fn name(&self) -> &str {
        "cost_aware"
    }
}
