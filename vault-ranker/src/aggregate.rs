//! Fold explicit swipe history into a preference profile.

use log::warn;
use vault_core::{DecisionWeights, InteractionEvent, PreferenceProfile, RankingConfig};

use crate::accumulator::ProfileAccumulator;

/// Compute a signed preference profile from swipe events.
///
/// Each event contributes `decision weight * strength` to every topic label
/// and to the media type of its snapshot. Each key's weight is the mean of
/// the contributions that touched it, and its count is the number of those
/// events. `total_interactions` always equals `events.len()`.
///
/// Malformed events never abort the fold. An event with an unrecognised
/// decision, a negative or non-finite strength, or no snapshot contributes no
/// keys but still counts as history. Strengths above `1.0` are capped.
///
/// # Examples
/// ```
/// use vault_core::{CandidateSnapshot, Decision, InteractionEvent, MediaType, RankingConfig};
/// use vault_ranker::compute_preferences;
///
/// let events = vec![
///     InteractionEvent::new("e1", "s1", "c1", Decision::Like, 1)
///         .with_snapshot(CandidateSnapshot::new(MediaType::Book, ["fantasy"])),
///     InteractionEvent::new("e2", "s1", "c2", Decision::Dislike, 2)
///         .with_snapshot(CandidateSnapshot::new(MediaType::Book, ["horror"])),
/// ];
/// let profile = compute_preferences(&events, &RankingConfig::default());
///
/// assert_eq!(profile.total_interactions(), 2);
/// assert!(profile.tag_weight("fantasy") > 0.0);
/// assert!(profile.tag_weight("horror") < 0.0);
/// ```
#[must_use]
pub fn compute_preferences(events: &[InteractionEvent], config: &RankingConfig) -> PreferenceProfile {
    let mut accumulator = ProfileAccumulator::default();
    for event in events {
        accumulator.observe_timestamp(event.timestamp);
        let Some(contribution) = signed_contribution(event, &config.decision_weights) else {
            continue;
        };
        let Some(snapshot) = event.snapshot.as_ref() else {
            warn!(
                "interaction {} has no candidate snapshot; contributing nothing",
                event.id
            );
            continue;
        };
        accumulator.record(snapshot.media_type, &snapshot.tags, contribution);
    }
    accumulator.finish(events.len())
}

#[expect(
    clippy::float_arithmetic,
    reason = "contributions scale decision weights by signal strength"
)]
fn signed_contribution(event: &InteractionEvent, weights: &DecisionWeights) -> Option<f32> {
    let Some(decision) = event.decision else {
        warn!(
            "interaction {} has an unrecognised decision; contributing nothing",
            event.id
        );
        return None;
    };
    if !event.strength.is_finite() || event.strength < 0.0 {
        warn!(
            "interaction {} has invalid strength {}; contributing nothing",
            event.id, event.strength
        );
        return None;
    }
    let contribution = weights.weight(decision) * event.strength.min(1.0);
    contribution.is_finite().then_some(contribution)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use vault_core::test_support::swipe;
    use vault_core::{Decision, InteractionEvent, MediaType, PreferenceEntry, RankingConfig};

    use super::compute_preferences;

    const TOLERANCE: f32 = 1e-6;

    #[fixture]
    fn config() -> RankingConfig {
        RankingConfig::default()
    }

    #[rstest]
    fn empty_history_yields_empty_profile(config: RankingConfig) {
        let profile = compute_preferences(&[], &config);
        assert!(profile.is_empty());
        assert_eq!(profile.total_interactions(), 0);
        assert!(profile.last_updated().is_none());
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating point values"
    )]
    fn weights_are_means_not_sums(config: RankingConfig) {
        let events = vec![
            swipe("1", Decision::Like, MediaType::Book, &["fantasy"], 1),
            swipe("2", Decision::SuperLike, MediaType::Book, &["fantasy"], 2),
            swipe("3", Decision::Dislike, MediaType::Movie, &["fantasy"], 3),
        ];
        let profile = compute_preferences(&events, &config);

        let fantasy = profile.tag("fantasy").expect("fantasy tracked");
        let weights = config.decision_weights;
        let expected = (weights.like + weights.super_like + weights.dislike) / 3.0;
        assert!((fantasy.weight - expected).abs() <= TOLERANCE);
        assert_eq!(fantasy.count, 3);

        let book = profile.media_type(MediaType::Book).expect("book tracked");
        assert!((book.weight - (weights.like + weights.super_like) / 2.0).abs() <= TOLERANCE);
        assert_eq!(book.count, 2);
        assert_eq!(
            profile.media_type(MediaType::Movie),
            Some(PreferenceEntry::new(weights.dislike, 1))
        );
        assert_eq!(profile.last_updated(), Some(3));
    }

    #[rstest]
    #[case(0.5, 0.5)]
    #[case(0.0, 0.0)]
    #[case(3.0, 1.0)]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating point values"
    )]
    fn strength_scales_contribution(
        config: RankingConfig,
        #[case] strength: f32,
        #[case] factor: f32,
    ) {
        let events =
            vec![swipe("1", Decision::Like, MediaType::Game, &["rpg"], 1).with_strength(strength)];
        let profile = compute_preferences(&events, &config);
        let rpg = profile.tag("rpg").expect("rpg tracked");
        assert!((rpg.weight - config.decision_weights.like * factor).abs() <= TOLERANCE);
        assert_eq!(rpg.count, 1);
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn invalid_strength_contributes_nothing(config: RankingConfig, #[case] strength: f32) {
        let events = vec![
            swipe("1", Decision::Like, MediaType::Game, &["rpg"], 1).with_strength(strength),
            swipe("2", Decision::Like, MediaType::Game, &["indie"], 2),
        ];
        let profile = compute_preferences(&events, &config);
        assert!(profile.tag("rpg").is_none());
        assert_eq!(profile.tag("indie").map(|entry| entry.count), Some(1));
        assert_eq!(profile.total_interactions(), 2);
    }

    #[rstest]
    fn malformed_events_count_but_contribute_nothing(config: RankingConfig) {
        let mut unknown = swipe("1", Decision::Like, MediaType::Show, &["drama"], 1);
        unknown.decision = None;
        let missing_snapshot = InteractionEvent::new("2", "s", "c2", Decision::Like, 2);
        let mut untyped = swipe("3", Decision::Like, MediaType::Show, &["comedy"], 3);
        if let Some(snapshot) = untyped.snapshot.as_mut() {
            snapshot.media_type = None;
        }

        let profile = compute_preferences(&[unknown, missing_snapshot, untyped], &config);
        assert_eq!(profile.total_interactions(), 3);
        assert!(profile.tag("drama").is_none());
        assert!(profile.media_type(MediaType::Show).is_none());
        assert_eq!(profile.tag("comedy").map(|entry| entry.count), Some(1));
    }

    #[rstest]
    fn decodes_store_records_leniently(config: RankingConfig) {
        let events: Vec<InteractionEvent> = serde_json::from_str(
            r#"[
                {"id": "1", "decision": "super_like", "snapshot": {"media_type": "podcast", "tags": ["tech"]}},
                {"id": "2", "decision": "meh", "snapshot": {"media_type": "podcast", "tags": ["tech"]}}
            ]"#,
        )
        .expect("lenient decode");
        let profile = compute_preferences(&events, &config);
        assert_eq!(profile.total_interactions(), 2);
        assert_eq!(
            profile.tag("tech"),
            Some(PreferenceEntry::new(config.decision_weights.super_like, 1))
        );
    }

    #[rstest]
    fn repeated_computation_is_identical(config: RankingConfig) {
        let events = vec![
            swipe("1", Decision::Like, MediaType::Essay, &["ethics", "logic"], 1),
            swipe("2", Decision::Skip, MediaType::Essay, &["logic"], 2).with_strength(0.3),
            swipe("3", Decision::Dislike, MediaType::Sports, &["football"], 3),
        ];
        let first = compute_preferences(&events, &config);
        let second = compute_preferences(&events, &config);
        assert_eq!(first, second);
    }
}
