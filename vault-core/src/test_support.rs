//! Test-only builders shared by unit tests, behaviour tests and benchmarks.

use crate::{
    Candidate, CandidateSnapshot, Decision, InteractionEvent, MediaType, PreferenceProfile, Scorer,
    Timestamp, VaultedItem,
};

/// Build a tagged candidate with the given popularity.
#[must_use]
pub fn candidate(id: &str, media_type: MediaType, tags: &[&str], popularity: f32) -> Candidate {
    Candidate::new(id, format!("Title {id}"), media_type)
        .with_tags(tags.iter().copied())
        .with_popularity(popularity)
}

/// Build a full-strength swipe on a candidate with a matching snapshot.
#[must_use]
pub fn swipe(
    id: &str,
    decision: Decision,
    media_type: MediaType,
    tags: &[&str],
    timestamp: Timestamp,
) -> InteractionEvent {
    InteractionEvent::new(id, "session", format!("candidate-{id}"), decision, timestamp)
        .with_snapshot(CandidateSnapshot::new(media_type, tags.iter().copied()))
}

/// Build a vaulted item.
#[must_use]
pub fn vaulted(id: &str, media_type: MediaType, tags: &[&str], timestamp: Timestamp) -> VaultedItem {
    VaultedItem::new(id, media_type, timestamp).with_tags(tags.iter().copied())
}

/// Build a pool cycling through `types`, with strictly decreasing popularity.
///
/// Every candidate carries one label named after its type (for example
/// `"book-topic"`) plus a shared `"common"` label.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "test pool popularity is a simple linear ramp over small counts"
)]
pub fn mixed_pool(count: usize, types: &[MediaType]) -> Vec<Candidate> {
    let denominator = count.max(1) as f32;
    types
        .iter()
        .copied()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(index, media_type)| {
            let popularity = 1.0 - index as f32 / denominator;
            let topic = format!("{media_type}-topic");
            Candidate::new(format!("pool-{index}"), format!("Pool {index}"), media_type)
                .with_tags([topic.as_str(), "common"])
                .with_popularity(popularity)
        })
        .collect()
}

/// `Scorer` returning the same score for every candidate.
#[derive(Debug, Copy, Clone, Default)]
pub struct ConstantScorer(pub f32);

impl Scorer for ConstantScorer {
    fn score(&self, _candidate: &Candidate, _profile: &PreferenceProfile) -> f32 {
        Self::sanitise(self.0)
    }
}
