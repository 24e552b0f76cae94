//! YES / NO / MAYBE classification.

use snowflake_core::{RuleSeverity, SceneCard, TriageResult, Verdict};
use tracing::{debug, warn};

use crate::validator::SceneValidator;
use crate::{chain, structure};

/// Triage `card`, chaining it against `prior` when one is given.
///
/// Hard violations give NO with no suggestions. Soft violations alone give
/// MAYBE with one suggestion per soft violation. Advisory violations are
/// reported but never change the verdict.
pub(crate) fn classify(
    card: &SceneCard,
    prior: Option<&SceneCard>,
    validator: &SceneValidator,
) -> TriageResult {
    let mut violations = structure::validate(card, validator);
    if let Some(prior) = prior {
        // A defect already reported on the card is not repeated for the link.
        for violation in chain::validate(prior, card, validator) {
            let reported = violations
                .iter()
                .any(|v| v.field == violation.field && v.rule == violation.rule);
            if !reported {
                violations.push(violation);
            }
        }
    }

    let config = validator.config();
    let has = |severity: RuleSeverity| {
        violations
            .iter()
            .any(|v| config.severity_of(v.rule) == severity)
    };

    let verdict = if has(RuleSeverity::Hard) {
        Verdict::No
    } else if has(RuleSeverity::Soft) {
        Verdict::Maybe
    } else {
        Verdict::Yes
    };

    let revise_suggestions = if verdict == Verdict::Maybe {
        violations
            .iter()
            .filter(|v| config.severity_of(v.rule) == RuleSeverity::Soft)
            .map(|v| format!("{}: {} ({})", v.field, v.rule.suggestion(), v.explanation))
            .collect()
    } else {
        Vec::new()
    };

    match verdict {
        Verdict::No => warn!(
            scene_id = %card.id,
            violations = violations.len(),
            "scene rejected by triage"
        ),
        _ => debug!(
            scene_id = %card.id,
            verdict = %verdict,
            violations = violations.len(),
            "scene triaged"
        ),
    }

    TriageResult {
        scene_id: card.id,
        prior_id: prior.map(|p| p.id),
        verdict,
        violations,
        revise_suggestions,
        card_fingerprint: card.fingerprint(),
    }
}
