//! Cross-scene link validation.

use serde::{Deserialize, Serialize};
use snowflake_core::{Rule, SceneBody, SceneCard, SceneChain, Violation};
use tracing::debug;
use uuid::Uuid;

use crate::text;
use crate::validator::SceneValidator;

/// Result of checking one adjacent pair in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub prior_id: Uuid,
    pub next_id: Uuid,
    pub violations: Vec<Violation>,
}

impl ChainLink {
    /// Returns true if the link broke no rule.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Violations of the link rule between `prior` and `next`.
pub(crate) fn validate(
    prior: &SceneCard,
    next: &SceneCard,
    validator: &SceneValidator,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    match (&prior.body, &next.body) {
        (SceneBody::Reactive(reactive), SceneBody::Proactive(proactive)) => {
            let stub = reactive.next_goal_stub.trim();
            let goal = proactive.goal.text.trim();
            let threshold = validator.config().goal_match_threshold;

            if stub.is_empty() {
                violations.push(Violation::new(
                    "goal.text",
                    Rule::GoalDoesNotFollowStub,
                    format!("prior scene {} left no next-goal stub to follow", prior.id),
                ));
            } else if goal.is_empty() {
                violations.push(Violation::new(
                    "goal.text",
                    Rule::GoalDoesNotFollowStub,
                    format!("goal is empty; expected it to follow '{}'", stub),
                ));
            } else {
                let score = text::stub_similarity(stub, goal);
                if score < threshold {
                    violations.push(Violation::new(
                        "goal.text",
                        Rule::GoalDoesNotFollowStub,
                        format!(
                            "goal matches {:.0}% of the prior next-goal stub '{}' (threshold {:.0}%)",
                            score * 100.0,
                            stub,
                            threshold * 100.0
                        ),
                    ));
                }
            }
        }
        (SceneBody::Proactive(_), SceneBody::Reactive(reactive)) => {
            if reactive.reaction.trim().is_empty() {
                violations.push(Violation::new(
                    "reaction",
                    Rule::MissingField,
                    "reaction must respond to the prior scene's setback",
                ));
            }
        }
        _ => violations.push(Violation::new(
            "scene_type",
            Rule::NoChainRule,
            format!(
                "both scenes are {}; no chain rule applies",
                prior.scene_type()
            ),
        )),
    }

    debug!(
        prior_id = %prior.id,
        next_id = %next.id,
        violations = violations.len(),
        "chain link checked"
    );
    violations
}

/// Check every adjacent pair in order.
pub(crate) fn validate_sequence(chain: &SceneChain, validator: &SceneValidator) -> Vec<ChainLink> {
    chain
        .links()
        .map(|(prior, next)| ChainLink {
            prior_id: prior.id,
            next_id: next.id,
            violations: validate(prior, next, validator),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriageConfig;
    use crate::fixtures;

    fn set_goal(card: &mut SceneCard, text: &str) {
        if let SceneBody::Proactive(body) = &mut card.body {
            body.goal.text = text.to_string();
        }
    }

    #[test]
    fn test_exact_stub_match_is_clean() {
        let prior = fixtures::goldilocks_pepper_spray();
        let mut next = fixtures::unrelated_proactive();
        set_goal(&mut next, "escape the corridor before backup arrives");

        assert!(SceneValidator::new().validate_chain(&prior, &next).is_empty());
    }

    #[test]
    fn test_light_rewording_is_clean() {
        let prior = fixtures::goldilocks_pepper_spray();
        let mut next = fixtures::unrelated_proactive();
        set_goal(&mut next, "Get out of the corridor before the backup arrives");

        assert!(SceneValidator::new().validate_chain(&prior, &next).is_empty());
    }

    #[test]
    fn test_empty_goal_violates() {
        let prior = fixtures::goldilocks_pepper_spray();
        let mut next = fixtures::unrelated_proactive();
        set_goal(&mut next, "");

        let violations = SceneValidator::new().validate_chain(&prior, &next);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::GoalDoesNotFollowStub);
    }

    #[test]
    fn test_unrelated_goal_violates_once() {
        let prior = fixtures::goldilocks_pepper_spray();
        let next = fixtures::unrelated_proactive();

        let violations = SceneValidator::new().validate_chain(&prior, &next);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "goal.text");
        assert!(violations[0].explanation.contains("0%"));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let prior = fixtures::goldilocks_pepper_spray();
        let mut next = fixtures::unrelated_proactive();
        set_goal(&mut next, "Get out of the corridor before the backup arrives");

        let strict = SceneValidator::with_config(
            TriageConfig::default().with_goal_match_threshold(1.0),
        );
        assert_eq!(strict.validate_chain(&prior, &next).len(), 1);
    }

    #[test]
    fn test_reaction_link_only_needs_a_reaction() {
        let prior = fixtures::dirk_parachute();
        let next = fixtures::goldilocks_pepper_spray();
        assert!(SceneValidator::new().validate_chain(&prior, &next).is_empty());

        let mut silent = next.clone();
        if let SceneBody::Reactive(body) = &mut silent.body {
            body.reaction = " ".to_string();
        }
        let violations = SceneValidator::new().validate_chain(&prior, &silent);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::MissingField);
    }

    #[test]
    fn test_same_type_neighbors() {
        let prior = fixtures::dirk_parachute();
        let next = fixtures::unrelated_proactive();

        let violations = SceneValidator::new().validate_chain(&prior, &next);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::NoChainRule);
    }

    #[test]
    fn test_sequence_reports_every_link() {
        let mut follow_up = fixtures::unrelated_proactive();
        set_goal(&mut follow_up, "escape the corridor before backup arrives");

        let chain: SceneChain = vec![
            fixtures::dirk_parachute(),
            fixtures::goldilocks_pepper_spray(),
            follow_up,
            fixtures::unrelated_proactive(),
        ]
        .into();

        let links = SceneValidator::new().validate_sequence(&chain);
        assert_eq!(links.len(), 3);
        assert!(links[0].is_valid());
        assert!(links[1].is_valid());
        assert_eq!(links[2].violations[0].rule, Rule::NoChainRule);
        assert_eq!(links[1].prior_id, chain.get(1).unwrap().id);
    }
}
