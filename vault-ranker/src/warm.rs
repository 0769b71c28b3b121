//! Warm-start ranking against a learned preference profile.
//!
//! Ranking runs in three passes over the whole pool:
//! 1. score every candidate and subtract a diversity penalty for types that
//!    dominated the recently seen window;
//! 2. sort by score, then popularity, then input order;
//! 3. walk the output slots after the first and, with probability `epsilon`
//!    per slot, lift a lower-ranked candidate into the slot.
//!
//! A batch of `n` slots receives at most `floor(epsilon * n)` lifts and the
//! top slot is never explored, so the best-scoring candidate always leads
//! with [`RankReason::Preference`].
//!
//! Lifting rotates the skipped candidates down by one instead of swapping,
//! so every candidate not marked [`RankReason::Explore`] keeps its relative
//! order. The batch is truncated only after all three passes.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::debug;
use rand::Rng;
use vault_core::{
    Candidate, MediaType, PreferenceProfile, RankReason, RankedCandidate, RankingConfig, Scorer,
};

use crate::PreferenceScorer;

/// Penalty for media types that dominated the recently seen window.
///
/// The deduction for a type is `penalty * occurrences / window`, where
/// `occurrences` counts that type among the last `window` seen items. A type
/// that filled the whole window loses the full `penalty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiversityPolicy {
    window: usize,
    penalty: f32,
}

impl DiversityPolicy {
    /// Construct a policy. Non-finite or negative penalties disable it.
    #[must_use]
    pub const fn new(window: usize, penalty: f32) -> Self {
        let usable = penalty.is_finite() && penalty >= 0.0;
        Self {
            window,
            penalty: if usable { penalty } else { 0.0 },
        }
    }

    /// Construct the policy configured in `config`.
    #[must_use]
    pub const fn from_config(config: &RankingConfig) -> Self {
        Self::new(config.diversity_window, config.diversity_penalty)
    }

    /// Per-type deductions for the most recent `window` entries of
    /// `recently_seen`, which is ordered oldest first.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "penalties scale with the share of the window a type occupies"
    )]
    pub fn penalties(&self, recently_seen: &[Candidate]) -> BTreeMap<MediaType, f32> {
        if self.window == 0 || self.penalty <= 0.0 {
            return BTreeMap::new();
        }
        let start = recently_seen.len().saturating_sub(self.window);
        let recent = recently_seen.get(start..).unwrap_or_default();
        let mut occurrences: BTreeMap<MediaType, usize> = BTreeMap::new();
        for seen in recent {
            *occurrences.entry(seen.media_type).or_default() += 1;
        }
        let window = self.window as f32;
        occurrences
            .into_iter()
            .map(|(media_type, count)| (media_type, self.penalty * count as f32 / window))
            .collect()
    }
}

impl Default for DiversityPolicy {
    fn default() -> Self {
        Self::from_config(&RankingConfig::default())
    }
}

/// Orders a candidate pool against a profile.
///
/// Generic over the [`Scorer`] so callers can substitute their own affinity
/// model; [`get_warm_batch`] uses [`PreferenceScorer`].
#[derive(Debug, Clone)]
pub struct WarmRanker<C>
where
    C: Scorer,
{
    scorer: C,
    diversity: DiversityPolicy,
    epsilon_explore: f64,
}

impl WarmRanker<PreferenceScorer> {
    /// Construct a ranker using the default scorer configured from `config`.
    #[must_use]
    pub const fn from_config(config: &RankingConfig) -> Self {
        Self::with_scorer(PreferenceScorer::from_config(config), config)
    }
}

impl<C> WarmRanker<C>
where
    C: Scorer,
{
    /// Construct a ranker with an explicit scorer.
    ///
    /// Exploration is disabled when `config.epsilon_explore` is not a
    /// positive finite number and saturates at `1.0`.
    #[must_use]
    pub const fn with_scorer(scorer: C, config: &RankingConfig) -> Self {
        let epsilon = config.epsilon_explore;
        let usable = epsilon.is_finite() && epsilon > 0.0;
        Self {
            scorer,
            diversity: DiversityPolicy::from_config(config),
            epsilon_explore: if usable { epsilon.min(1.0) } else { 0.0 },
        }
    }

    /// Replace the diversity policy while returning `self` for chaining.
    #[must_use]
    pub const fn with_diversity(mut self, diversity: DiversityPolicy) -> Self {
        self.diversity = diversity;
        self
    }

    /// Rank `candidates` and return at most `batch_size` of them.
    ///
    /// Without a `batch_size` the whole pool is returned. `rng` is consulted
    /// only when exploration is enabled.
    pub fn rank<R>(
        &self,
        candidates: &[Candidate],
        profile: &PreferenceProfile,
        recently_seen: &[Candidate],
        batch_size: Option<usize>,
        rng: &mut R,
    ) -> Vec<RankedCandidate>
    where
        R: Rng + ?Sized,
    {
        let penalties = self.diversity.penalties(recently_seen);
        let mut ranked: Vec<Slot<'_>> = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                let penalty = penalties.get(&candidate.media_type).copied().unwrap_or(0.0);
                Slot {
                    index,
                    candidate,
                    popularity: candidate.popularity_score(),
                    score: penalised(self.scorer.score(candidate, profile), penalty),
                    reason: RankReason::Preference,
                }
            })
            .collect();
        ranked.sort_by(Slot::rank_order);

        let limit = batch_size.map_or(ranked.len(), |size| size.min(ranked.len()));
        self.explore(&mut ranked, limit, rng);
        ranked.truncate(limit);
        ranked
            .into_iter()
            .map(|slot| RankedCandidate::new(slot.candidate.clone(), slot.score, slot.reason))
            .collect()
    }

    fn explore<R>(&self, ranked: &mut [Slot<'_>], limit: usize, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let mut budget = self.exploration_budget(limit);
        if budget == 0 {
            return;
        }
        let len = ranked.len();
        for slot in 1..limit {
            let first_lower = slot.saturating_add(1);
            if budget == 0 || first_lower >= len {
                break;
            }
            if !rng.gen_bool(self.epsilon_explore) {
                continue;
            }
            let source = rng.gen_range(first_lower..len);
            if let Some(span) = ranked.get_mut(slot..=source) {
                span.rotate_right(1);
                if let Some(lifted) = span.first_mut() {
                    lifted.reason = RankReason::Explore;
                }
            }
            budget = budget.saturating_sub(1);
            debug!("exploration lifted rank {source} into slot {slot}");
        }
    }

    /// Most lifts a batch of `limit` slots may receive: `floor(epsilon * limit)`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the budget is a floored fraction of the batch size"
    )]
    const fn exploration_budget(&self, limit: usize) -> usize {
        (self.epsilon_explore * limit as f64).floor() as usize
    }
}

/// Score, diversify and order `candidates` against `profile`.
///
/// Uses [`PreferenceScorer`] and the diversity and exploration settings in
/// `config`. With `config.epsilon_explore == 0.0` the output is strictly
/// ordered and `rng` is never touched. Otherwise at most
/// `floor(epsilon_explore * batch_len)` items are marked
/// [`RankReason::Explore`] and the first item never is.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use vault_core::{Candidate, MediaType, PreferenceEntry, PreferenceProfile, RankReason, RankingConfig};
/// use vault_ranker::get_warm_batch;
///
/// let pool = vec![
///     Candidate::new("a", "A", MediaType::Book).with_tags(["horror"]),
///     Candidate::new("b", "B", MediaType::Book).with_tags(["space"]),
/// ];
/// let profile = PreferenceProfile::new().with_tag("space", PreferenceEntry::new(1.0, 3));
/// let config = RankingConfig { epsilon_explore: 0.0, ..RankingConfig::default() };
///
/// let batch = get_warm_batch(&pool, &profile, &[], None, &config, &mut StdRng::seed_from_u64(7));
/// assert_eq!(batch[0].candidate.id, "b");
/// assert!(batch.iter().all(|item| item.reason == RankReason::Preference));
/// ```
pub fn get_warm_batch<R>(
    candidates: &[Candidate],
    profile: &PreferenceProfile,
    recently_seen: &[Candidate],
    batch_size: Option<usize>,
    config: &RankingConfig,
    rng: &mut R,
) -> Vec<RankedCandidate>
where
    R: Rng + ?Sized,
{
    WarmRanker::from_config(config).rank(candidates, profile, recently_seen, batch_size, rng)
}

#[derive(Debug)]
struct Slot<'a> {
    index: usize,
    candidate: &'a Candidate,
    popularity: f32,
    score: f32,
    reason: RankReason,
}

impl Slot<'_> {
    fn rank_order(left: &Self, right: &Self) -> Ordering {
        right
            .score
            .total_cmp(&left.score)
            .then_with(|| right.popularity.total_cmp(&left.popularity))
            .then_with(|| left.index.cmp(&right.index))
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the diversity penalty is subtracted from the affinity score"
)]
fn penalised(score: f32, penalty: f32) -> f32 {
    let adjusted = score - penalty;
    if adjusted.is_finite() { adjusted } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};
    use vault_core::test_support::{ConstantScorer, candidate};
    use vault_core::{
        Candidate, MediaType, PreferenceEntry, PreferenceProfile, RankReason, RankingConfig,
    };

    use super::{DiversityPolicy, WarmRanker, get_warm_batch};

    const TOLERANCE: f32 = 1e-6;

    #[fixture]
    fn deterministic() -> RankingConfig {
        RankingConfig {
            epsilon_explore: 0.0,
            ..RankingConfig::default()
        }
    }

    #[fixture]
    fn profile() -> PreferenceProfile {
        PreferenceProfile::new()
            .with_tag("space", PreferenceEntry::new(1.0, 5))
            .with_tag("horror", PreferenceEntry::new(-1.0, 5))
            .with_media_type(MediaType::Documentary, PreferenceEntry::new(0.5, 5))
    }

    #[fixture]
    fn pool() -> Vec<Candidate> {
        vec![
            candidate("horror-movie", MediaType::Movie, &["horror"], 0.9),
            candidate("space-doc", MediaType::Documentary, &["space"], 0.2),
            candidate("space-book", MediaType::Book, &["space"], 0.5),
            candidate("cooking-show", MediaType::Show, &["cooking"], 0.7),
        ]
    }

    fn ids(batch: &[vault_core::RankedCandidate]) -> Vec<&str> {
        batch.iter().map(|item| item.candidate.id.as_str()).collect()
    }

    #[rstest]
    fn orders_by_preference(
        deterministic: RankingConfig,
        profile: PreferenceProfile,
        pool: Vec<Candidate>,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let batch = get_warm_batch(&pool, &profile, &[], None, &deterministic, &mut rng);
        assert_eq!(
            ids(&batch),
            vec!["space-doc", "space-book", "cooking-show", "horror-movie"]
        );
        assert!(batch.iter().all(|item| item.reason == RankReason::Preference));
        assert!(batch.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[rstest]
    fn empty_pool_yields_empty_batch(deterministic: RankingConfig, profile: PreferenceProfile) {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(get_warm_batch(&[], &profile, &[], Some(5), &deterministic, &mut rng).is_empty());
    }

    #[rstest]
    #[case(None, 4)]
    #[case(Some(2), 2)]
    #[case(Some(10), 4)]
    #[case(Some(0), 0)]
    fn batch_size_truncates_after_ranking(
        deterministic: RankingConfig,
        profile: PreferenceProfile,
        pool: Vec<Candidate>,
        #[case] batch_size: Option<usize>,
        #[case] expected_len: usize,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let batch = get_warm_batch(&pool, &profile, &[], batch_size, &deterministic, &mut rng);
        assert_eq!(batch.len(), expected_len);
        if let Some(first) = batch.first() {
            assert_eq!(first.candidate.id, "space-doc");
        }
    }

    #[rstest]
    fn ties_break_on_popularity_then_input_order(deterministic: RankingConfig) {
        let pool = vec![
            candidate("low", MediaType::Game, &[], 0.1),
            candidate("high-a", MediaType::Game, &[], 0.6),
            candidate("high-b", MediaType::Game, &[], 0.6),
        ];
        let ranker = WarmRanker::with_scorer(ConstantScorer(0.5), &deterministic);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let batch = ranker.rank(&pool, &PreferenceProfile::new(), &[], None, &mut rng);
        assert_eq!(ids(&batch), vec!["high-a", "high-b", "low"]);
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating point values"
    )]
    fn repeated_types_are_suppressed(deterministic: RankingConfig) {
        let profile = PreferenceProfile::new();
        let pool = vec![
            candidate("book", MediaType::Book, &[], 0.5),
            candidate("game", MediaType::Game, &[], 0.5),
        ];
        let seen: Vec<Candidate> = (0..3)
            .map(|index| candidate(&format!("seen-{index}"), MediaType::Book, &[], 0.5))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let batch = get_warm_batch(&pool, &profile, &seen, None, &deterministic, &mut rng);
        assert_eq!(ids(&batch), vec!["game", "book"]);
        let book = batch.get(1).expect("book ranked");
        let expected = deterministic.popularity_weight * 0.5
            - deterministic.diversity_penalty * 3.0 / 10.0;
        assert!((book.score - expected).abs() <= TOLERANCE);
    }

    #[rstest]
    fn only_the_recent_window_counts() {
        let policy = DiversityPolicy::new(2, 1.0);
        let seen = vec![
            candidate("old", MediaType::Book, &[], 0.0),
            candidate("newer", MediaType::Game, &[], 0.0),
            candidate("newest", MediaType::Game, &[], 0.0),
        ];
        let penalties = policy.penalties(&seen);
        assert!(!penalties.contains_key(&MediaType::Book));
        assert_eq!(penalties.get(&MediaType::Game).copied(), Some(1.0));
    }

    #[rstest]
    #[case(DiversityPolicy::new(0, 1.0))]
    #[case(DiversityPolicy::new(5, 0.0))]
    #[case(DiversityPolicy::new(5, f32::NAN))]
    fn disabled_policies_penalise_nothing(#[case] policy: DiversityPolicy) {
        let seen = vec![candidate("seen", MediaType::Book, &[], 0.0)];
        assert!(policy.penalties(&seen).is_empty());
    }

    #[rstest]
    fn exploration_is_reproducible_under_a_seed(profile: PreferenceProfile) {
        let config = RankingConfig {
            epsilon_explore: 0.5,
            ..RankingConfig::default()
        };
        let pool = vault_core::test_support::mixed_pool(30, &MediaType::ALL);
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            get_warm_batch(&pool, &profile, &[], Some(10), &config, &mut rng)
        };
        let (first, second) = (run(42), run(42));
        assert_eq!(first, second);
    }

    #[rstest]
    fn full_exploration_spares_the_top_slot(
        deterministic: RankingConfig,
        profile: PreferenceProfile,
        pool: Vec<Candidate>,
    ) {
        let config = RankingConfig {
            epsilon_explore: 1.0,
            ..deterministic
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let batch = get_warm_batch(&pool, &profile, &[], None, &config, &mut rng);
        let reasons: Vec<RankReason> = batch.iter().map(|item| item.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RankReason::Preference,
                RankReason::Explore,
                RankReason::Explore,
                RankReason::Preference
            ]
        );
        assert_eq!(ids(&batch).first().copied(), Some("space-doc"));
        assert_eq!(batch.len(), pool.len());
    }

    #[rstest]
    #[case(1.0, 20)]
    #[case(0.5, 20)]
    #[case(0.25, 8)]
    #[case(0.1, 9)]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the expected bound is a floored fraction of the batch size"
    )]
    fn exploration_is_bounded_by_epsilon(
        profile: PreferenceProfile,
        #[case] epsilon: f64,
        #[case] batch_size: usize,
    ) {
        let config = RankingConfig {
            epsilon_explore: epsilon,
            ..RankingConfig::default()
        };
        let pool = vault_core::test_support::mixed_pool(60, &MediaType::ALL);
        let bound = (epsilon * batch_size as f64).floor() as usize;
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let batch = get_warm_batch(&pool, &profile, &[], Some(batch_size), &config, &mut rng);
            let explored = batch
                .iter()
                .filter(|item| item.reason == RankReason::Explore)
                .count();
            assert_eq!(batch.len(), batch_size);
            assert!(explored <= bound, "seed {seed}: {explored} lifts exceed {bound}");
            assert_eq!(batch.first().map(|item| item.reason), Some(RankReason::Preference));
        }
    }

    #[rstest]
    fn non_explored_items_keep_their_order(profile: PreferenceProfile) {
        let config = RankingConfig {
            epsilon_explore: 0.4,
            ..RankingConfig::default()
        };
        let pool = vault_core::test_support::mixed_pool(40, &MediaType::ALL);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let batch = get_warm_batch(&pool, &profile, &[], Some(15), &config, &mut rng);
            let preferred: Vec<f32> = batch
                .iter()
                .filter(|item| item.reason == RankReason::Preference)
                .map(|item| item.score)
                .collect();
            assert!(preferred.windows(2).all(|pair| pair[0] >= pair[1]));
        }
    }
}
