//! Canonical scene cards used across the tests.

use snowflake_core::{
    Decision, DilemmaOption, Goal, GoalCriteria, Obstacle, ProactiveBody, ReactiveBody,
    SceneCard, SceneType, Setback, SetbackOutcome,
};

/// Dirk bails out of a burning bomber over France.
pub(crate) fn dirk_parachute() -> SceneCard {
    SceneCard::builder()
        .scene_type(SceneType::Proactive)
        .pov("Dirk")
        .crucible("Dirk's crippled bomber will go down over occupied France within minutes")
        .proactive(ProactiveBody {
            goal: Goal {
                text: "parachute into France and hole up for the night".to_string(),
                criteria: GoalCriteria::all(),
            },
            conflict: vec![
                Obstacle::new("anti-aircraft fire rakes the fuselage", 1.0),
                Obstacle::new("a night fighter closes in", 2.0),
                Obstacle::new("the port engine catches fire", 3.0),
                Obstacle::new("the crew is forced to jump", 4.0),
                Obstacle::new("the bomber explodes overhead", 5.0),
            ],
            setback: Some(Setback::new(
                SetbackOutcome::Failure,
                "broke leg, passed out",
            )),
        })
        .build()
        .expect("canonical proactive card")
}

/// Goldilocks decides to fight her way out.
pub(crate) fn goldilocks_pepper_spray() -> SceneCard {
    SceneCard::builder()
        .scene_type(SceneType::Reactive)
        .pov("Goldilocks")
        .crucible("Guards will flood the corridor within minutes")
        .reactive(ReactiveBody {
            reaction: "Her heart hammers as the guard blocks the only exit".to_string(),
            dilemma: vec![
                DilemmaOption::bad("surrender to the guard", "prison for the rest of her life"),
                DilemmaOption::bad("run past him", "he is armed and faster"),
                DilemmaOption::bad("bluff her way out", "one wrong word and she is caught"),
                DilemmaOption::bad("use pepper spray now", "assaulting a guard is a felony"),
            ],
            decision: Decision::committed("use pepper spray now"),
            next_goal_stub: "escape the corridor before backup arrives".to_string(),
        })
        .build()
        .expect("canonical reactive card")
}

/// A well-formed proactive card that has nothing to do with Goldilocks.
pub(crate) fn unrelated_proactive() -> SceneCard {
    SceneCard::builder()
        .scene_type(SceneType::Proactive)
        .pov("Magnus")
        .crucible("The final round starts at noon")
        .proactive(ProactiveBody {
            goal: Goal {
                text: "win the chess tournament in Vienna".to_string(),
                criteria: GoalCriteria::all(),
            },
            conflict: vec![
                Obstacle::new("a sleepless night", 1.0),
                Obstacle::new("his rival opens with a novelty", 2.0),
            ],
            setback: Some(Setback::new(
                SetbackOutcome::SuccessWithComplication,
                "he wins, but is accused of cheating",
            )),
        })
        .build()
        .expect("unrelated proactive card")
}
