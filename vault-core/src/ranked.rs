//! Ranked output handed to the presentation layer.

use std::fmt;

use crate::Candidate;

/// Why a candidate landed where it did.
///
/// Used for attribution and debugging only; never fed back into ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RankReason {
    /// Chosen by popularity during cold start.
    Trending,
    /// Ordered by the learned preference profile.
    Preference,
    /// Lifted above its rank by exploration.
    Explore,
}

impl RankReason {
    /// Return the reason as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Preference => "preference",
            Self::Explore => "explore",
        }
    }
}

impl fmt::Display for RankReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate with its final score and attribution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedCandidate {
    /// The candidate as supplied.
    pub candidate: Candidate,
    /// Final score used for ordering.
    pub score: f32,
    /// Attribution tag.
    pub reason: RankReason,
}

impl RankedCandidate {
    /// Construct a ranked candidate.
    #[must_use]
    pub const fn new(candidate: Candidate, score: f32, reason: RankReason) -> Self {
        Self {
            candidate,
            score,
            reason,
        }
    }
}
