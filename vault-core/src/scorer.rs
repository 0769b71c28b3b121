//! Score candidates against a preference profile.
//!
//! The `Scorer` trait assigns a signed affinity to a
//! [`Candidate`](crate::Candidate) given a user's
//! [`PreferenceProfile`](crate::PreferenceProfile).

use crate::{Candidate, PreferenceProfile};

/// Calculate an affinity score for a candidate.
///
/// Higher scores indicate a better match between the candidate and the
/// learned preferences. Scores are signed: disliked topics push a candidate
/// below zero. Implementations must be thread-safe (`Send` + `Sync`) so
/// rankers can be shared across sessions. The method is infallible;
/// implementers must return `0.0` when no information is available and must
/// produce finite scores.
///
/// Use [`Scorer::sanitise`] to apply the finiteness guard.
///
/// # Examples
///
/// ```rust
/// use vault_core::{Candidate, MediaType, PreferenceProfile, Scorer};
///
/// struct PopularityOnly;
///
/// impl Scorer for PopularityOnly {
///     fn score(&self, candidate: &Candidate, _profile: &PreferenceProfile) -> f32 {
///         candidate.popularity_score()
///     }
/// }
///
/// let candidate = Candidate::new("c1", "Dune", MediaType::Book).with_popularity(0.9);
/// let profile = PreferenceProfile::new();
/// assert_eq!(PopularityOnly.score(&candidate, &profile), 0.9);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `candidate` according to `profile`.
    fn score(&self, candidate: &Candidate, profile: &PreferenceProfile) -> f32;

    /// Validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and passes finite values through.
    fn sanitise(score: f32) -> f32
    where
        Self: Sized,
    {
        if score.is_finite() { score } else { 0.0 }
    }
}
