//! Text heuristics shared by the validators.
//!
//! These are structural sanity checks over short planning strings, not
//! language understanding.

use std::collections::HashSet;

/// Words ignored when comparing a goal to a next-goal stub.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "to", "of", "and", "or", "in", "on", "at", "for", "from", "with", "into",
    "before", "after", "while", "his", "her", "their", "its", "my", "our", "your", "it", "is",
    "be", "that", "this", "then", "so", "as",
];

/// Words that signal a deadline or running clock.
const TIME_MARKERS: &[&str] = &[
    "tonight", "today", "tomorrow", "now", "before", "until", "till", "within", "minute",
    "minutes", "hour", "hours", "seconds", "dawn", "dusk", "midnight", "noon", "sunrise",
    "sunset", "deadline", "soon", "immediately", "morning", "night", "countdown", "clock",
    "remaining", "time",
];

/// Single words that make a goal stub non-committal.
const VAGUE_WORDS: &[&str] = &[
    "maybe", "somehow", "something", "someday", "perhaps", "possibly", "eventually", "whatever",
    "stuff", "things",
];

/// Phrases that make a goal stub non-committal.
const VAGUE_PHRASES: &[&str] = &[
    "figure out",
    "think about",
    "see what",
    "wait and see",
    "deal with",
    "try to",
];

/// Lowercase alphanumeric tokens.
pub fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|t| t.trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Tokens joined by single spaces.
pub fn normalize(text: &str) -> String {
    tokens(text).join(" ")
}

/// Distinct non-stop-word tokens, in first-seen order.
pub fn content_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens(text)
        .into_iter()
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// How closely `goal` follows `stub`, from 0.0 to 1.0.
///
/// A goal that contains the whole normalized stub scores 1.0. Otherwise the
/// score is the share of the stub's content words present in the goal.
pub fn stub_similarity(stub: &str, goal: &str) -> f32 {
    let stub_norm = normalize(stub);
    let goal_norm = normalize(goal);
    if stub_norm.is_empty() || goal_norm.is_empty() {
        return 0.0;
    }
    if format!(" {} ", goal_norm).contains(&format!(" {} ", stub_norm)) {
        return 1.0;
    }

    let stub_words = content_words(stub);
    if stub_words.is_empty() {
        return 0.0;
    }
    let goal_words: HashSet<String> = content_words(goal).into_iter().collect();
    let shared = stub_words.iter().filter(|w| goal_words.contains(*w)).count();
    shared as f32 / stub_words.len() as f32
}

/// Returns true if the text names some deadline or time pressure.
pub fn is_time_bounded(text: &str) -> bool {
    tokens(text)
        .iter()
        .any(|t| TIME_MARKERS.contains(&t.as_str()) || t.chars().all(|c| c.is_ascii_digit()))
}

/// Why a next-goal stub reads as vague, or `None` if it is concrete enough.
pub fn vagueness(text: &str, min_words: usize) -> Option<String> {
    let words = tokens(text);
    if words.len() < min_words {
        return Some(format!(
            "has {} word(s); at least {} are needed to name an action and its object",
            words.len(),
            min_words
        ));
    }
    if let Some(word) = words.iter().find(|w| VAGUE_WORDS.contains(&w.as_str())) {
        return Some(format!("contains the non-committal word '{}'", word));
    }
    let padded = format!(" {} ", words.join(" "));
    VAGUE_PHRASES
        .iter()
        .find(|p| padded.contains(&format!(" {} ", p)))
        .map(|p| format!("contains the non-committal phrase '{}'", p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        assert_eq!(
            tokens("Escape the corridor -- before backup arrives!"),
            vec!["escape", "the", "corridor", "before", "backup", "arrives"]
        );
        assert_eq!(tokens("Dirk's leg"), vec!["dirk's", "leg"]);
        assert!(tokens("  ...  ").is_empty());
    }

    #[test]
    fn test_similarity_exact_and_contained() {
        let stub = "escape the corridor before backup arrives";
        assert_eq!(stub_similarity(stub, stub), 1.0);
        assert_eq!(
            stub_similarity(stub, "Goldilocks must escape the corridor before backup arrives."),
            1.0
        );
    }

    #[test]
    fn test_similarity_reworded() {
        let score = stub_similarity(
            "escape the corridor before backup arrives",
            "get out of the corridor before the backup arrives",
        );
        assert!(score >= 0.5 && score < 1.0, "score was {}", score);
    }

    #[test]
    fn test_similarity_unrelated() {
        assert_eq!(
            stub_similarity(
                "escape the corridor before backup arrives",
                "win the chess tournament in Vienna"
            ),
            0.0
        );
        assert_eq!(stub_similarity("escape", ""), 0.0);
    }

    #[test]
    fn test_containment_respects_word_boundaries() {
        assert!(stub_similarity("cat", "concatenate the files") < 1.0);
    }

    #[test]
    fn test_time_bounded() {
        assert!(is_time_bounded("The guards arrive within minutes"));
        assert!(is_time_bounded("The ship sails at 6"));
        assert!(!is_time_bounded("Goldilocks is in danger"));
    }

    #[test]
    fn test_vagueness() {
        assert!(vagueness("escape the corridor before backup arrives", 3).is_none());
        assert!(vagueness("run", 3).unwrap().contains("1 word"));
        assert!(vagueness("maybe talk to Papa Bear", 3)
            .unwrap()
            .contains("maybe"));
        assert!(vagueness("figure out what to do next", 3)
            .unwrap()
            .contains("figure out"));
    }
}
