//! Tunables for preference learning and ranking.
//!
//! [`RankingConfig`] is the single configuration surface of the engine. It is
//! supplied by the caller for each ranking call and never read from the
//! environment. The defaults below are starting points chosen to satisfy the
//! qualitative ordering `super_like > like > 0 >= skip >= dislike`; callers
//! are expected to tune them.

use thiserror::Error;

use crate::Decision;

/// Weight of a super like.
pub const DEFAULT_SUPER_LIKE_WEIGHT: f32 = 2.0;
/// Weight of a like.
pub const DEFAULT_LIKE_WEIGHT: f32 = 1.0;
/// Weight of a skip; mildly negative.
pub const DEFAULT_SKIP_WEIGHT: f32 = -0.1;
/// Weight of a dislike.
pub const DEFAULT_DISLIKE_WEIGHT: f32 = -1.0;
/// Weight every vaulted item contributes.
pub const DEFAULT_VAULT_IMPLICIT_WEIGHT: f32 = 0.8;
/// Share of the swipe-derived profile when merging.
pub const DEFAULT_SWIPE_MERGE_WEIGHT: f32 = 0.7;
/// Share of the vault-derived profile when merging.
pub const DEFAULT_VAULT_MERGE_WEIGHT: f32 = 0.3;
/// History size below which ranking falls back to cold start.
pub const DEFAULT_COLD_START_THRESHOLD: usize = 10;
/// Batch size used when the caller does not request one.
pub const DEFAULT_BATCH_SIZE: usize = 20;
/// Number of recently seen items inspected for the diversity penalty.
pub const DEFAULT_DIVERSITY_WINDOW: usize = 10;
/// Penalty applied when the whole window shares a candidate's type.
pub const DEFAULT_DIVERSITY_PENALTY: f32 = 0.3;
/// Per-slot exploration probability.
pub const DEFAULT_EPSILON_EXPLORE: f64 = 0.1;
/// Coefficient of the popularity term in warm scoring.
pub const DEFAULT_POPULARITY_WEIGHT: f32 = 0.1;

/// Signed weight per swipe decision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DecisionWeights {
    /// Weight of [`Decision::SuperLike`].
    pub super_like: f32,
    /// Weight of [`Decision::Like`].
    pub like: f32,
    /// Weight of [`Decision::Skip`].
    pub skip: f32,
    /// Weight of [`Decision::Dislike`].
    pub dislike: f32,
}

impl DecisionWeights {
    /// Weight for a decision.
    #[must_use]
    pub const fn weight(&self, decision: Decision) -> f32 {
        match decision {
            Decision::SuperLike => self.super_like,
            Decision::Like => self.like,
            Decision::Skip => self.skip,
            Decision::Dislike => self.dislike,
        }
    }

    const fn has_finite_values(self) -> bool {
        self.super_like.is_finite()
            && self.like.is_finite()
            && self.skip.is_finite()
            && self.dislike.is_finite()
    }

    const fn is_ordered(self) -> bool {
        self.super_like > self.like
            && self.like > 0.0
            && self.skip <= 0.0
            && self.skip >= self.dislike
            && self.dislike < 0.0
    }
}

impl Default for DecisionWeights {
    fn default() -> Self {
        Self {
            super_like: DEFAULT_SUPER_LIKE_WEIGHT,
            like: DEFAULT_LIKE_WEIGHT,
            skip: DEFAULT_SKIP_WEIGHT,
            dislike: DEFAULT_DISLIKE_WEIGHT,
        }
    }
}

/// Convex coefficients used when blending a swipe profile with a vault
/// profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MergeWeights {
    /// Coefficient of the first (swipe-derived) profile.
    pub swipe: f32,
    /// Coefficient of the second (vault-derived) profile.
    pub vault: f32,
}

impl MergeWeights {
    /// Construct merge coefficients.
    #[must_use]
    pub const fn new(swipe: f32, vault: f32) -> Self {
        Self { swipe, vault }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums coefficients to ensure a non-zero total"
    )]
    const fn is_valid(self) -> bool {
        self.swipe.is_finite()
            && self.vault.is_finite()
            && self.swipe >= 0.0
            && self.vault >= 0.0
            && (self.swipe + self.vault) > 0.0
    }
}

impl Default for MergeWeights {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_MERGE_WEIGHT, DEFAULT_VAULT_MERGE_WEIGHT)
    }
}

/// Every tunable of the engine.
///
/// # Examples
/// ```
/// use vault_core::RankingConfig;
///
/// let config = RankingConfig {
///     epsilon_explore: 0.0,
///     ..RankingConfig::default()
/// }
/// .validate()
/// .expect("valid configuration");
/// assert_eq!(config.cold_start_threshold, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RankingConfig {
    /// Signed weight per decision.
    pub decision_weights: DecisionWeights,
    /// Weight contributed by each vaulted item.
    pub vault_implicit_weight: f32,
    /// Coefficients for merging swipe and vault profiles.
    pub merge: MergeWeights,
    /// Minimum history size for warm ranking.
    pub cold_start_threshold: usize,
    /// Batch size used by the orchestrator.
    pub default_batch_size: usize,
    /// Number of most recent seen items inspected for diversity.
    pub diversity_window: usize,
    /// Maximum score deduction for a repeated type.
    pub diversity_penalty: f32,
    /// Per-slot probability of exploration in `0.0..=1.0`; a batch of `n`
    /// items receives at most `floor(epsilon_explore * n)` explored slots.
    pub epsilon_explore: f64,
    /// Coefficient of candidate popularity in warm scoring.
    pub popularity_weight: f32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            decision_weights: DecisionWeights::default(),
            vault_implicit_weight: DEFAULT_VAULT_IMPLICIT_WEIGHT,
            merge: MergeWeights::default(),
            cold_start_threshold: DEFAULT_COLD_START_THRESHOLD,
            default_batch_size: DEFAULT_BATCH_SIZE,
            diversity_window: DEFAULT_DIVERSITY_WINDOW,
            diversity_penalty: DEFAULT_DIVERSITY_PENALTY,
            epsilon_explore: DEFAULT_EPSILON_EXPLORE,
            popularity_weight: DEFAULT_POPULARITY_WEIGHT,
        }
    }
}

/// Errors raised when a [`RankingConfig`] is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A decision weight was NaN or infinite.
    #[error("decision weights must be finite")]
    NonFiniteDecisionWeight,
    /// Decision weights break the required ordering.
    #[error("decision weights must satisfy super_like > like > 0 >= skip >= dislike and dislike < 0")]
    DecisionOrder,
    /// The vault weight was not a positive finite number.
    #[error("vault implicit weight must be finite and positive (got {0})")]
    VaultWeight(f32),
    /// Merge coefficients were negative, non-finite or summed to zero.
    #[error("merge weights must be finite, non-negative and sum to a positive value")]
    MergeWeights,
    /// Exploration rate fell outside `0.0..=1.0`.
    #[error("epsilon_explore must be within 0.0..=1.0 (got {0})")]
    Epsilon(f64),
    /// A non-negative tunable was negative or non-finite.
    #[error("{field} must be finite and non-negative (got {value})")]
    NegativeTunable {
        /// Offending field name.
        field: &'static str,
        /// Supplied value.
        value: f32,
    },
    /// The default batch size was zero.
    #[error("default_batch_size must be at least 1")]
    ZeroBatchSize,
    /// Decoding a JSON document failed.
    #[cfg(feature = "serde")]
    #[error("failed to decode ranking configuration")]
    Decode {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

impl RankingConfig {
    /// Validate the configuration and return it.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] whose rule is violated.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.decision_weights.has_finite_values() {
            return Err(ConfigError::NonFiniteDecisionWeight);
        }
        if !self.decision_weights.is_ordered() {
            return Err(ConfigError::DecisionOrder);
        }
        if !(self.vault_implicit_weight.is_finite() && self.vault_implicit_weight > 0.0) {
            return Err(ConfigError::VaultWeight(self.vault_implicit_weight));
        }
        if !self.merge.is_valid() {
            return Err(ConfigError::MergeWeights);
        }
        if !(0.0..=1.0).contains(&self.epsilon_explore) {
            return Err(ConfigError::Epsilon(self.epsilon_explore));
        }
        require_non_negative("diversity_penalty", self.diversity_penalty)?;
        require_non_negative("popularity_weight", self.popularity_weight)?;
        if self.default_batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(self)
    }

    /// Decode a JSON document and validate it.
    ///
    /// Missing fields take their defaults, so partial documents only override
    /// what they name.
    ///
    /// # Errors
    /// Returns [`ConfigError::Decode`] for malformed JSON and any validation
    /// error from [`RankingConfig::validate`].
    ///
    /// # Examples
    /// ```
    /// use vault_core::RankingConfig;
    ///
    /// let config = RankingConfig::from_json_str(r#"{"cold_start_threshold": 5}"#)
    ///     .expect("valid document");
    /// assert_eq!(config.cold_start_threshold, 5);
    /// assert_eq!(config.default_batch_size, RankingConfig::default().default_batch_size);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(document).map_err(|source| ConfigError::Decode { source })?;
        config.validate()
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeTunable { field, value })
    }
}
