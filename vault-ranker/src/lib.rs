//! Preference learning and batch ranking for the content vault.
//!
//! The crate turns externally supplied history into ordered batches:
//! - **Profile building** folds swipe decisions ([`compute_preferences`]) and
//!   vault saves ([`compute_vault_preferences`]) into
//!   [`PreferenceProfile`](vault_core::PreferenceProfile)s whose weights are
//!   per-key means. Profiles from different sources are blended with
//!   [`merge_preferences`].
//! - **Ranking** either stratifies the pool by popularity
//!   ([`get_cold_start_batch`]) or scores it against a profile with a
//!   diversity penalty and seeded exploration ([`get_warm_batch`]).
//!   [`get_ranked_batch`] picks between the two from the history size.
//!
//! Every function is pure apart from the caller-supplied random source. No
//! state survives between calls.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use vault_core::{Candidate, CandidateSnapshot, Decision, InteractionEvent, MediaType, RankingConfig};
//! use vault_ranker::get_ranked_batch;
//!
//! let pool = vec![
//!     Candidate::new("dune", "Dune", MediaType::Book).with_tags(["scifi"]),
//!     Candidate::new("saw", "Saw", MediaType::Movie).with_tags(["horror"]),
//! ];
//! let events: Vec<_> = (0..10)
//!     .map(|i| {
//!         InteractionEvent::new(format!("e{i}"), "s1", format!("c{i}"), Decision::Like, i)
//!             .with_snapshot(CandidateSnapshot::new(MediaType::Book, ["scifi"]))
//!     })
//!     .collect();
//! let config = RankingConfig { epsilon_explore: 0.0, ..RankingConfig::default() };
//!
//! let batch = get_ranked_batch(&pool, &events, &[], &config, &mut StdRng::seed_from_u64(1));
//! assert_eq!(batch[0].candidate.id, "dune");
//! ```

#![forbid(unsafe_code)]

mod accumulator;
mod aggregate;
mod batch;
mod cold_start;
mod merge;
mod scorer;
mod vault;
mod warm;

pub use aggregate::compute_preferences;
pub use batch::{RankingMode, get_ranked_batch, get_vault_informed_batch};
pub use cold_start::get_cold_start_batch;
pub use merge::{merge_all, merge_preferences};
pub use scorer::PreferenceScorer;
pub use vault::compute_vault_preferences;
pub use warm::{DiversityPolicy, WarmRanker, get_warm_batch};
