//! What the store keeps for each scene.

use serde::{Deserialize, Serialize};
use snowflake_core::{SceneCard, SceneStatus, TriageResult, Verdict};
use uuid::Uuid;

/// A scene card with its workflow state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// The card as last planned.
    pub card: SceneCard,

    /// Workflow status.
    pub status: SceneStatus,

    /// Most recent triage result, if any.
    pub triage: Option<TriageResult>,

    /// Generated prose, once drafted.
    pub prose: Option<String>,
}

impl SceneRecord {
    /// Record a freshly planned card.
    pub fn planned(card: SceneCard) -> Self {
        Self {
            card,
            status: SceneStatus::Planned,
            triage: None,
            prose: None,
        }
    }

    /// Attach a triage result and move the status to match its verdict.
    ///
    /// Any earlier prose is dropped: it was drafted from an older verdict.
    pub fn with_triage(mut self, result: TriageResult) -> Self {
        self.status = if result.verdict == Verdict::No {
            SceneStatus::Rejected
        } else {
            SceneStatus::Triaged
        };
        self.triage = Some(result);
        self.prose = None;
        self
    }

    /// Attach drafted prose.
    pub fn with_prose(mut self, prose: String) -> Self {
        self.status = SceneStatus::Drafted;
        self.prose = Some(prose);
        self
    }

    /// The scene the last triage chained against.
    pub fn prior_id(&self) -> Option<Uuid> {
        self.triage.as_ref().and_then(|t| t.prior_id)
    }

    /// The stored verdict, if it still describes the stored card.
    pub fn current_verdict(&self) -> Option<Verdict> {
        self.triage
            .as_ref()
            .filter(|t| t.is_current_for(&self.card.fingerprint()))
            .map(|t| t.verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowflake_core::{ReactiveBody, SceneType, Violation};

    fn card() -> SceneCard {
        SceneCard::builder()
            .scene_type(SceneType::Reactive)
            .pov("Goldilocks")
            .reactive(ReactiveBody::default())
            .build()
            .unwrap()
    }

    fn result_for(card: &SceneCard, verdict: Verdict) -> TriageResult {
        TriageResult {
            scene_id: card.id,
            prior_id: None,
            verdict,
            violations: vec![Violation::missing("reaction")],
            revise_suggestions: Vec::new(),
            card_fingerprint: card.fingerprint(),
        }
    }

    #[test]
    fn test_triage_moves_status() {
        let card = card();
        let record = SceneRecord::planned(card.clone());
        assert_eq!(record.status, SceneStatus::Planned);

        let rejected = record.clone().with_triage(result_for(&card, Verdict::No));
        assert_eq!(rejected.status, SceneStatus::Rejected);
        assert!(!rejected.status.is_draftable());

        let triaged = record.with_triage(result_for(&card, Verdict::Maybe));
        assert_eq!(triaged.status, SceneStatus::Triaged);
        assert_eq!(triaged.current_verdict(), Some(Verdict::Maybe));
    }

    #[test]
    fn test_retriage_drops_prose() {
        let card = card();
        let drafted = SceneRecord::planned(card.clone())
            .with_triage(result_for(&card, Verdict::Yes))
            .with_prose("She ran.".to_string());
        assert_eq!(drafted.status, SceneStatus::Drafted);

        let retriaged = drafted.with_triage(result_for(&card, Verdict::Yes));
        assert!(retriaged.prose.is_none());
        assert_eq!(retriaged.status, SceneStatus::Triaged);
    }

    #[test]
    fn test_stale_verdict_is_not_current() {
        let card = card();
        let mut record =
            SceneRecord::planned(card.clone()).with_triage(result_for(&card, Verdict::Yes));
        record.card.pov_character = "Papa Bear".to_string();
        assert_eq!(record.current_verdict(), None);
    }

    #[test]
    fn test_prior_id_follows_last_triage() {
        let card = card();
        let record = SceneRecord::planned(card.clone());
        assert_eq!(record.prior_id(), None);

        let prior = Uuid::new_v4();
        let mut result = result_for(&card, Verdict::Yes);
        result.prior_id = Some(prior);
        assert_eq!(record.with_triage(result).prior_id(), Some(prior));
    }
}
