//! Prose drafting from triaged scene cards.

use snowflake_core::{PovMode, ProactiveBody, ReactiveBody, SceneBody, SceneCard, Tense};

/// Turns an accepted scene card into narrative text.
///
/// Callers only hand over cards whose verdict is YES or MAYBE.
pub trait ProseDrafter: Send + Sync {
    /// Draft prose for a card.
    fn draft(&self, card: &SceneCard) -> String;

    /// Name of the drafter.
    fn name(&self) -> &'static str;
}

/// Splices card fields into sentence frames chosen by POV mode and tense.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateDrafter;

impl TemplateDrafter {
    pub fn new() -> Self {
        Self
    }
}

impl ProseDrafter for TemplateDrafter {
    fn draft(&self, card: &SceneCard) -> String {
        let voice = Voice::new(card);
        let mut sentences = Vec::new();

        if let Some(crucible) = card.scene_crucible.as_deref() {
            if !crucible.trim().is_empty() {
                sentences.push(sentence(crucible));
            }
        }

        match &card.body {
            SceneBody::Proactive(body) => draft_proactive(&voice, body, &mut sentences),
            SceneBody::Reactive(body) => draft_reactive(&voice, body, &mut sentences),
        }

        sentences.join(" ")
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

fn draft_proactive(voice: &Voice, body: &ProactiveBody, out: &mut Vec<String>) {
    out.push(sentence(&format!(
        "{} {} to {}",
        voice.subject,
        voice.verb("want", "wants", "wanted"),
        strip_to(&body.goal.text)
    )));

    let last = body.conflict.len().saturating_sub(1);
    for (i, obstacle) in body.conflict.iter().enumerate() {
        let lead = match i {
            0 => "First",
            i if i == last => "Finally",
            _ => "Then",
        };
        out.push(sentence(&format!("{}, {}", lead, obstacle.description.trim())));
    }

    if let Some(setback) = &body.setback {
        out.push(sentence(&format!("In the end, {}", setback.rationale.trim())));
    }
}

fn draft_reactive(voice: &Voice, body: &ReactiveBody, out: &mut Vec<String>) {
    if !body.reaction.trim().is_empty() {
        out.push(sentence(&body.reaction));
    }

    if !body.dilemma.is_empty() {
        let options: Vec<&str> = body.dilemma.iter().map(|o| o.description.trim()).collect();
        out.push(sentence(&format!(
            "{} {} the options: {}",
            voice.subject,
            voice.verb("weigh", "weighs", "weighed"),
            options.join("; ")
        )));
    }

    out.push(sentence(&format!(
        "{} {} to {}",
        voice.subject,
        voice.verb("decide", "decides", "decided"),
        strip_to(&body.decision.text)
    )));

    if !body.next_goal_stub.trim().is_empty() {
        out.push(sentence(&format!(
            "Now {} {} to {}",
            voice.object_subject(),
            voice.verb("have", "has", "had"),
            strip_to(&body.next_goal_stub)
        )));
    }
}

/// Grammatical person and tense for one scene.
struct Voice {
    subject: String,
    third_person: bool,
    tense: Tense,
}

impl Voice {
    fn new(card: &SceneCard) -> Self {
        let (subject, third_person) = match card.pov_mode {
            PovMode::FirstPerson => ("I".to_string(), false),
            PovMode::SecondPerson => ("You".to_string(), false),
            PovMode::ThirdLimited | PovMode::ThirdOmniscient => {
                (card.pov_character.trim().to_string(), true)
            }
        };
        Self {
            subject,
            third_person,
            tense: card.tense,
        }
    }

    /// Pick a verb form: base, third-person present, past.
    fn verb<'a>(&self, base: &'a str, third: &'a str, past: &'a str) -> &'a str {
        match (self.tense, self.third_person) {
            (Tense::Past, _) => past,
            (Tense::Present, true) => third,
            (Tense::Present, false) => base,
        }
    }

    /// The subject when it does not open a sentence.
    fn object_subject(&self) -> String {
        if self.subject == "You" {
            "you".to_string()
        } else {
            self.subject.clone()
        }
    }
}

/// Drop a leading "to " so frames that already say "to" read cleanly.
fn strip_to(text: &str) -> &str {
    let text = text.trim();
    match text.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("to ") => text[3..].trim_start(),
        _ => text,
    }
}

/// Capitalize and terminate a sentence.
fn sentence(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowflake_core::{
        Decision, DilemmaOption, Goal, GoalCriteria, Obstacle, SceneType, Setback,
        SetbackOutcome,
    };

    fn proactive(mode: PovMode, tense: Tense) -> SceneCard {
        SceneCard::builder()
            .scene_type(SceneType::Proactive)
            .pov("Dirk")
            .pov_mode(mode)
            .tense(tense)
            .crucible("the bomber will go down within minutes")
            .proactive(ProactiveBody {
                goal: Goal {
                    text: "parachute into France".to_string(),
                    criteria: GoalCriteria::all(),
                },
                conflict: vec![
                    Obstacle::new("flak rakes the fuselage", 1.0),
                    Obstacle::new("a night fighter closes in", 2.0),
                    Obstacle::new("the bomber explodes", 3.0),
                ],
                setback: Some(Setback::new(SetbackOutcome::Failure, "he broke his leg")),
            })
            .build()
            .unwrap()
    }

    fn reactive(mode: PovMode, tense: Tense) -> SceneCard {
        SceneCard::builder()
            .scene_type(SceneType::Reactive)
            .pov("Goldilocks")
            .pov_mode(mode)
            .tense(tense)
            .reactive(ReactiveBody {
                reaction: "her heart hammers".to_string(),
                dilemma: vec![
                    DilemmaOption::bad("surrender", "prison"),
                    DilemmaOption::bad("run", "he is faster"),
                ],
                decision: Decision::committed("use pepper spray now"),
                next_goal_stub: "to escape the corridor".to_string(),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_third_person_past() {
        let prose = TemplateDrafter.draft(&proactive(PovMode::ThirdLimited, Tense::Past));
        assert!(prose.starts_with("The bomber will go down within minutes."));
        assert!(prose.contains("Dirk wanted to parachute into France."));
        assert!(prose.contains("First, flak rakes the fuselage."));
        assert!(prose.contains("Then, a night fighter closes in."));
        assert!(prose.contains("Finally, the bomber explodes."));
        assert!(prose.ends_with("In the end, he broke his leg."));
    }

    #[test]
    fn test_third_person_present() {
        let prose = TemplateDrafter.draft(&proactive(PovMode::ThirdOmniscient, Tense::Present));
        assert!(prose.contains("Dirk wants to parachute into France."));
    }

    #[test]
    fn test_first_person_present() {
        let prose = TemplateDrafter.draft(&reactive(PovMode::FirstPerson, Tense::Present));
        assert!(prose.starts_with("Her heart hammers."));
        assert!(prose.contains("I weigh the options: surrender; run."));
        assert!(prose.contains("I decide to use pepper spray now."));
        assert!(prose.contains("Now I have to escape the corridor."));
    }

    #[test]
    fn test_second_person_past() {
        let prose = TemplateDrafter.draft(&reactive(PovMode::SecondPerson, Tense::Past));
        assert!(prose.contains("You decided to use pepper spray now."));
        assert!(prose.contains("Now you had to escape the corridor."));
    }

    #[test]
    fn test_sentence_helpers() {
        assert_eq!(sentence("  hello "), "Hello.");
        assert_eq!(sentence("done!"), "Done!");
        assert_eq!(sentence(""), "");
        assert_eq!(strip_to("To run"), "run");
        assert_eq!(strip_to("tomorrow"), "tomorrow");
    }
}
