//! Default warm-start scorer.
//!
//! The score of a candidate is the mean weight of its topic labels plus the
//! weight of its media type plus a small popularity term. Untracked labels
//! and types contribute `0.0`.

use vault_core::config::DEFAULT_POPULARITY_WEIGHT;
use vault_core::{Candidate, PreferenceProfile, RankingConfig, Scorer};

/// Scorer that reads tag and type weights from a [`PreferenceProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceScorer {
    popularity_weight: f32,
}

impl PreferenceScorer {
    /// Construct a scorer with an explicit popularity coefficient.
    ///
    /// Non-finite or negative coefficients disable the popularity term.
    #[must_use]
    pub const fn new(popularity_weight: f32) -> Self {
        let usable = popularity_weight.is_finite() && popularity_weight >= 0.0;
        Self {
            popularity_weight: if usable { popularity_weight } else { 0.0 },
        }
    }

    /// Construct a scorer using the coefficient from `config`.
    #[must_use]
    pub const fn from_config(config: &RankingConfig) -> Self {
        Self::new(config.popularity_weight)
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "tag affinity is the mean of per-label weights"
    )]
    fn tag_affinity(candidate: &Candidate, profile: &PreferenceProfile) -> f32 {
        if candidate.tags.is_empty() {
            return 0.0;
        }
        let total: f32 = candidate
            .tags
            .iter()
            .map(|tag| profile.tag_weight(tag))
            .sum();
        total / candidate.tags.len() as f32
    }
}

impl Default for PreferenceScorer {
    fn default() -> Self {
        Self::new(DEFAULT_POPULARITY_WEIGHT)
    }
}

impl Scorer for PreferenceScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "the score sums tag, type and popularity components"
    )]
    fn score(&self, candidate: &Candidate, profile: &PreferenceProfile) -> f32 {
        let tags = Self::tag_affinity(candidate, profile);
        let media_type = profile.media_type_weight(candidate.media_type);
        let popularity = self.popularity_weight * candidate.popularity_score();
        Self::sanitise(tags + media_type + popularity)
    }
}
