//! Violation and triage result types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every rule a scene or scene link can break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// A required field is absent or blank.
    MissingField,
    /// The crucible names no deadline or time pressure.
    CrucibleNotTimeBounded,
    /// One of the five goal criteria does not hold.
    GoalCriterionUnmet,
    /// A proactive scene has no obstacles.
    EmptyConflict,
    /// An obstacle is less severe than the one before it.
    ConflictDeescalates,
    /// Obstacles never rise above the first one's severity.
    ConflictFlat,
    /// The severity scorer could not score an obstacle.
    SeverityUnscored,
    /// The proactive scene ends in clean success.
    InvalidOutcome,
    /// The dilemma offers fewer than two options.
    TooFewDilemmaOptions,
    /// A dilemma option carries no real cost.
    SafeDilemmaOption,
    /// The decision is not an unambiguous commitment.
    DecisionNotFirm,
    /// The decision accepts no cost.
    DecisionRiskFree,
    /// The decision does not change the situation.
    DecisionNotForcing,
    /// The next-goal stub is not concrete enough to act on.
    VagueNextGoal,
    /// The goal does not follow from the previous scene's next-goal stub.
    GoalDoesNotFollowStub,
    /// Two adjacent scenes share a type, so no link rule applies.
    NoChainRule,
}

impl Rule {
    /// Default classification used by triage.
    pub fn default_severity(&self) -> RuleSeverity {
        match self {
            Rule::CrucibleNotTimeBounded
            | Rule::SeverityUnscored
            | Rule::VagueNextGoal
            | Rule::GoalDoesNotFollowStub => RuleSeverity::Soft,
            Rule::NoChainRule => RuleSeverity::Advisory,
            _ => RuleSeverity::Hard,
        }
    }

    /// Short revision hint offered with MAYBE verdicts.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Rule::MissingField => "fill in the missing field",
            Rule::CrucibleNotTimeBounded => {
                "tie the crucible to a deadline so the scene must happen now"
            }
            Rule::GoalCriterionUnmet => "rework the goal until every criterion holds",
            Rule::EmptyConflict => "add obstacles between the character and the goal",
            Rule::ConflictDeescalates => "reorder obstacles so each is at least as bad as the last",
            Rule::ConflictFlat => "end the conflict on a worse obstacle than it started with",
            Rule::SeverityUnscored => "give the obstacle an explicit severity",
            Rule::InvalidOutcome => "end in failure or in success that brings a new problem",
            Rule::TooFewDilemmaOptions => "offer at least two options",
            Rule::SafeDilemmaOption => "give every option a real cost",
            Rule::DecisionNotFirm => "make the decision an unambiguous commitment",
            Rule::DecisionRiskFree => "show what the decision risks",
            Rule::DecisionNotForcing => "make the decision change the situation",
            Rule::VagueNextGoal => "name a concrete action and its object",
            Rule::GoalDoesNotFollowStub => "derive the goal from the previous decision",
            Rule::NoChainRule => "alternate proactive and reactive scenes",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("{:?}", self));
        f.write_str(&name)
    }
}

/// How much a broken rule weighs in triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
    /// Restructure the scene.
    Hard,
    /// Patch the text.
    Soft,
    /// Listed, never affects the verdict.
    Advisory,
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted path to the offending field.
    pub field: String,
    pub rule: Rule,
    pub explanation: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: Rule, explanation: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            explanation: explanation.into(),
        }
    }

    /// A `MissingField` violation.
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let explanation = format!("{} is required", field);
        Self::new(field, Rule::MissingField, explanation)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.field, self.rule, self.explanation)
    }
}

/// Triage outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Yes,
    No,
    Maybe,
}

impl Verdict {
    /// YES and MAYBE scenes may be drafted.
    pub fn is_acceptable(&self) -> bool {
        !matches!(self, Verdict::No)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Yes => write!(f, "YES"),
            Verdict::No => write!(f, "NO"),
            Verdict::Maybe => write!(f, "MAYBE"),
        }
    }
}

/// The result of triaging one scene card.
///
/// Computed fresh on every call and never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub scene_id: Uuid,

    /// The neighbor the scene was chained against, if any.
    #[serde(default)]
    pub prior_id: Option<Uuid>,

    pub verdict: Verdict,

    /// Every failed rule, in check order.
    pub violations: Vec<Violation>,

    /// Populated for MAYBE only.
    #[serde(default)]
    pub revise_suggestions: Vec<String>,

    /// Fingerprint of the card this verdict was computed for.
    pub card_fingerprint: String,
}

impl TriageResult {
    /// Returns true if the verdict was computed for a card with this fingerprint.
    pub fn is_current_for(&self, fingerprint: &str) -> bool {
        self.card_fingerprint == fingerprint
    }

    /// Violations of a given rule.
    pub fn violations_of(&self, rule: Rule) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }
}
