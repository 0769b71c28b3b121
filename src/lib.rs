//! Facade crate for the vault preference and ranking engine.
//!
//! This crate re-exports the domain types from `vault-core` and the profile
//! building and ranking entry points from `vault-ranker`, so callers depend
//! on a single crate.

#![forbid(unsafe_code)]

pub use vault_core::{
    Candidate, CandidateSnapshot, ConfigError, Decision, DecisionWeights, InteractionEvent,
    MediaType, MergeWeights, ParseDecisionError, ParseMediaTypeError, PreferenceEntry,
    PreferenceProfile, RankReason, RankedCandidate, RankingConfig, Scorer, Tags, Timestamp,
    VaultedItem,
};

#[cfg(feature = "test-support")]
pub use vault_core::test_support;

pub use vault_ranker::{
    DiversityPolicy, PreferenceScorer, RankingMode, WarmRanker, compute_preferences,
    compute_vault_preferences, get_cold_start_batch, get_ranked_batch, get_vault_informed_batch,
    get_warm_batch, merge_all, merge_preferences,
};
