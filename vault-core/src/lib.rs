//! Core domain types for the vault ranking engine.
//!
//! These models describe the in-process data contract between the engine and
//! its collaborators: candidates and interaction history come in already
//! materialised, preference profiles and ranked batches go out. Nothing here
//! performs I/O or holds state between calls.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod candidate;
pub mod config;
pub mod decision;
pub mod event;
#[cfg(feature = "serde")]
mod lenient;
pub mod media_type;
pub mod profile;
pub mod ranked;
pub mod scorer;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{Candidate, CandidateSnapshot, Tags};
pub use config::{ConfigError, DecisionWeights, MergeWeights, RankingConfig};
pub use decision::{Decision, ParseDecisionError};
pub use event::{InteractionEvent, Timestamp, VaultedItem};
pub use media_type::{MediaType, ParseMediaTypeError};
pub use profile::{PreferenceEntry, PreferenceProfile};
pub use ranked::{RankReason, RankedCandidate};
pub use scorer::Scorer;
