//! Structural validation of a single scene card.

use snowflake_core::{ProactiveBody, ReactiveBody, Rule, SceneBody, SceneCard, Violation};
use tracing::debug;

use crate::text;
use crate::validator::SceneValidator;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Every structural violation of `card`, in check order.
pub(crate) fn validate(card: &SceneCard, validator: &SceneValidator) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_metadata(card, &mut violations);
    match &card.body {
        SceneBody::Proactive(body) => check_proactive(body, validator, &mut violations),
        SceneBody::Reactive(body) => check_reactive(body, validator, &mut violations),
    }

    debug!(
        scene_id = %card.id,
        scene_type = %card.scene_type(),
        violations = violations.len(),
        "structure checked"
    );
    violations
}

fn check_metadata(card: &SceneCard, out: &mut Vec<Violation>) {
    if blank(&card.pov_character) {
        out.push(Violation::missing("pov_character"));
    }

    match card.scene_crucible.as_deref() {
        None => out.push(Violation::missing("scene_crucible")),
        Some(crucible) if blank(crucible) => out.push(Violation::missing("scene_crucible")),
        Some(crucible) if !text::is_time_bounded(crucible) => out.push(Violation::new(
            "scene_crucible",
            Rule::CrucibleNotTimeBounded,
            "crucible names no deadline or time pressure",
        )),
        Some(_) => {}
    }
}

fn check_proactive(body: &ProactiveBody, validator: &SceneValidator, out: &mut Vec<Violation>) {
    // Goal
    if blank(&body.goal.text) {
        out.push(Violation::missing("goal.text"));
    }
    for criterion in body.goal.criteria.unmet() {
        out.push(Violation::new(
            format!("goal.criteria.{}", criterion),
            Rule::GoalCriterionUnmet,
            format!("goal fails the {} criterion", criterion),
        ));
    }

    // Conflict
    if body.conflict.is_empty() {
        out.push(Violation::new(
            "conflict",
            Rule::EmptyConflict,
            "a proactive scene needs at least one obstacle",
        ));
    }
    for (i, obstacle) in body.conflict.iter().enumerate() {
        if blank(&obstacle.description) {
            out.push(Violation::missing(format!("conflict[{}].description", i)));
        }
    }
    check_escalation(body, validator, out);

    // Setback
    match &body.setback {
        None => out.push(Violation::missing("setback")),
        Some(setback) => {
            if !setback.outcome.is_setback() {
                out.push(Violation::new(
                    "setback.outcome",
                    Rule::InvalidOutcome,
                    "a proactive scene cannot end in clean success",
                ));
            }
            if blank(&setback.rationale) {
                out.push(Violation::missing("setback.rationale"));
            }
        }
    }
}

fn check_escalation(body: &ProactiveBody, validator: &SceneValidator, out: &mut Vec<Violation>) {
    let scorer = validator.scorer();
    let mut scored = Vec::with_capacity(body.conflict.len());

    for (i, obstacle) in body.conflict.iter().enumerate() {
        match scorer.score(obstacle) {
            Some(score) => scored.push((i, score)),
            None => out.push(Violation::new(
                format!("conflict[{}].severity", i),
                Rule::SeverityUnscored,
                format!("the {} scorer could not score this obstacle", scorer.name()),
            )),
        }
    }

    let mut deescalated = false;
    for pair in scored.windows(2) {
        let ((prev_i, prev), (next_i, next)) = (pair[0], pair[1]);
        if next < prev {
            deescalated = true;
            out.push(Violation::new(
                format!("conflict[{}].severity", next_i),
                Rule::ConflictDeescalates,
                format!(
                    "obstacle {} (severity {}) is less severe than obstacle {} (severity {})",
                    next_i, next, prev_i, prev
                ),
            ));
        }
    }

    if let (Some(&(_, first)), Some(&(_, last))) = (scored.first(), scored.last()) {
        if scored.len() >= 2 && !deescalated && last <= first {
            out.push(Violation::new(
                "conflict",
                Rule::ConflictFlat,
                format!("conflict never rises above its opening severity {}", first),
            ));
        }
    }
}

fn check_reactive(body: &ReactiveBody, validator: &SceneValidator, out: &mut Vec<Violation>) {
    if blank(&body.reaction) {
        out.push(Violation::missing("reaction"));
    }

    // Dilemma
    if body.dilemma.len() < 2 {
        out.push(Violation::new(
            "dilemma",
            Rule::TooFewDilemmaOptions,
            format!(
                "dilemma offers {} option(s); at least two bad options are required",
                body.dilemma.len()
            ),
        ));
    }
    let assessor = validator.assessor();
    for (i, option) in body.dilemma.iter().enumerate() {
        if blank(&option.description) {
            out.push(Violation::missing(format!("dilemma[{}].description", i)));
        }
        if assessor.is_safe(option) {
            out.push(Violation::new(
                format!("dilemma[{}]", i),
                Rule::SafeDilemmaOption,
                format!("option '{}' carries no real cost", option.description),
            ));
        }
    }

    // Decision
    let decision = &body.decision;
    if blank(&decision.text) {
        out.push(Violation::missing("decision.text"));
    }
    if !decision.firm {
        out.push(Violation::new(
            "decision.firm",
            Rule::DecisionNotFirm,
            "decision is not an unambiguous commitment",
        ));
    }
    if !decision.risk_acknowledged {
        out.push(Violation::new(
            "decision.risk_acknowledged",
            Rule::DecisionRiskFree,
            "decision accepts no cost",
        ));
    }
    if !decision.forcing {
        out.push(Violation::new(
            "decision.forcing",
            Rule::DecisionNotForcing,
            "decision is a stalling move that leaves the situation unchanged",
        ));
    }

    // Next goal
    if blank(&body.next_goal_stub) {
        out.push(Violation::missing("next_goal_stub"));
    } else if let Some(reason) = text::vagueness(
        &body.next_goal_stub,
        validator.config().min_next_goal_words,
    ) {
        out.push(Violation::new(
            "next_goal_stub",
            Rule::VagueNextGoal,
            format!("next-goal stub {}", reason),
        ));
    }
}
