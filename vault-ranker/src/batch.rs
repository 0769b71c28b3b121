//! Entry points that pick between cold-start and warm ranking.

use std::fmt;

use log::debug;
use rand::Rng;
use vault_core::{Candidate, InteractionEvent, RankedCandidate, RankingConfig, VaultedItem};

use crate::{
    compute_preferences, compute_vault_preferences, get_cold_start_batch, get_warm_batch,
    merge_preferences,
};

/// Which ranking path a request takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingMode {
    /// Too little history; rank by popularity.
    Cold,
    /// Enough history to trust a learned profile.
    Warm,
}

impl RankingMode {
    /// Choose the mode for a history of `history_len` interactions.
    ///
    /// # Examples
    /// ```
    /// use vault_core::RankingConfig;
    /// use vault_ranker::RankingMode;
    ///
    /// let config = RankingConfig::default();
    /// assert_eq!(RankingMode::for_history(0, &config), RankingMode::Cold);
    /// assert_eq!(
    ///     RankingMode::for_history(config.cold_start_threshold, &config),
    ///     RankingMode::Warm
    /// );
    /// ```
    #[must_use]
    pub const fn for_history(history_len: usize, config: &RankingConfig) -> Self {
        if history_len < config.cold_start_threshold {
            Self::Cold
        } else {
            Self::Warm
        }
    }

    /// Lowercase name used in log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Warm => "warm",
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank `candidates` for a user with the given swipe history.
///
/// Fewer than `config.cold_start_threshold` events selects the cold-start
/// path. Otherwise a profile is computed from `events` alone and the pool is
/// ranked warm. Both paths return at most `config.default_batch_size` items.
///
/// Vaulted items are not consulted here; see [`get_vault_informed_batch`].
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use vault_core::{Candidate, MediaType, RankReason, RankingConfig};
/// use vault_ranker::get_ranked_batch;
///
/// let pool = vec![
///     Candidate::new("a", "A", MediaType::Book).with_popularity(0.4),
///     Candidate::new("b", "B", MediaType::Movie).with_popularity(0.6),
/// ];
/// let batch = get_ranked_batch(&pool, &[], &[], &RankingConfig::default(), &mut StdRng::seed_from_u64(1));
///
/// assert_eq!(batch.len(), 2);
/// assert!(batch.iter().all(|item| item.reason == RankReason::Trending));
/// ```
pub fn get_ranked_batch<R>(
    candidates: &[Candidate],
    events: &[InteractionEvent],
    recently_seen: &[Candidate],
    config: &RankingConfig,
    rng: &mut R,
) -> Vec<RankedCandidate>
where
    R: Rng + ?Sized,
{
    let mode = RankingMode::for_history(events.len(), config);
    debug!(
        "ranking {} candidates in {mode} mode from {} interactions (threshold {})",
        candidates.len(),
        events.len(),
        config.cold_start_threshold
    );
    let batch_size = Some(config.default_batch_size);
    match mode {
        RankingMode::Cold => get_cold_start_batch(candidates, batch_size),
        RankingMode::Warm => {
            let profile = compute_preferences(events, config);
            get_warm_batch(candidates, &profile, recently_seen, batch_size, config, rng)
        }
    }
}

/// Rank `candidates` using both swipe history and the user's vault.
///
/// Events and vaulted items together count as history when choosing the
/// mode. On the warm path the swipe profile and the vault profile are merged
/// with `config.merge` before ranking.
pub fn get_vault_informed_batch<R>(
    candidates: &[Candidate],
    events: &[InteractionEvent],
    vault_items: &[VaultedItem],
    recently_seen: &[Candidate],
    config: &RankingConfig,
    rng: &mut R,
) -> Vec<RankedCandidate>
where
    R: Rng + ?Sized,
{
    let history = events.len().saturating_add(vault_items.len());
    let mode = RankingMode::for_history(history, config);
    debug!(
        "ranking {} candidates in {mode} mode from {} interactions and {} vaulted items (threshold {})",
        candidates.len(),
        events.len(),
        vault_items.len(),
        config.cold_start_threshold
    );
    let batch_size = Some(config.default_batch_size);
    match mode {
        RankingMode::Cold => get_cold_start_batch(candidates, batch_size),
        RankingMode::Warm => {
            let swipes = compute_preferences(events, config);
            let vault = compute_vault_preferences(vault_items, config);
            let profile = merge_preferences(&swipes, &vault, config.merge);
            get_warm_batch(candidates, &profile, recently_seen, batch_size, config, rng)
        }
    }
}
