//! Ordered scene sequences.

use serde::{Deserialize, Serialize};

use crate::scene::SceneCard;
use crate::types::SceneType;

/// An ordered run of scenes, each claimed to follow the one before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneChain {
    scenes: Vec<SceneCard>,
}

impl SceneChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene to the end of the chain.
    pub fn push(&mut self, card: SceneCard) {
        self.scenes.push(card);
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SceneCard> {
        self.scenes.get(index)
    }

    pub fn scenes(&self) -> &[SceneCard] {
        &self.scenes
    }

    /// Adjacent (prior, next) pairs in order.
    pub fn links(&self) -> impl Iterator<Item = (&SceneCard, &SceneCard)> {
        self.scenes.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Returns true if scene types strictly alternate.
    pub fn alternates(&self) -> bool {
        self.links()
            .all(|(prior, next)| prior.scene_type().successor() == next.scene_type())
    }

    /// The type the next appended scene should have, if the chain is non-empty.
    pub fn expected_next(&self) -> Option<SceneType> {
        self.scenes.last().map(|card| card.scene_type().successor())
    }
}

impl From<Vec<SceneCard>> for SceneChain {
    fn from(scenes: Vec<SceneCard>) -> Self {
        Self { scenes }
    }
}

impl FromIterator<SceneCard> for SceneChain {
    fn from_iter<I: IntoIterator<Item = SceneCard>>(iter: I) -> Self {
        Self {
            scenes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ProactiveBody, ReactiveBody};

    fn card(scene_type: SceneType) -> SceneCard {
        let builder = SceneCard::builder().scene_type(scene_type).pov("Dirk");
        match scene_type {
            SceneType::Proactive => builder.proactive(ProactiveBody::default()),
            SceneType::Reactive => builder.reactive(ReactiveBody::default()),
        }
        .build()
        .unwrap()
    }

    #[test]
    fn test_links() {
        let chain: SceneChain = vec![
            card(SceneType::Proactive),
            card(SceneType::Reactive),
            card(SceneType::Proactive),
        ]
        .into();

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.links().count(), 2);
        assert!(chain.alternates());
        assert_eq!(chain.expected_next(), Some(SceneType::Reactive));
    }

    #[test]
    fn test_same_type_neighbors_do_not_alternate() {
        let mut chain = SceneChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.expected_next(), None);

        chain.push(card(SceneType::Proactive));
        chain.push(card(SceneType::Proactive));
        assert!(!chain.alternates());
    }

    #[test]
    fn test_single_scene_has_no_links() {
        let chain: SceneChain = std::iter::once(card(SceneType::Reactive)).collect();
        assert_eq!(chain.links().count(), 0);
        assert!(chain.alternates());
    }
}
