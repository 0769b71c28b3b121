//! Candidates offered to the swipe deck.

use std::collections::BTreeSet;

use crate::MediaType;

/// Normalised, lower-cased topic labels supplied by the tagger.
///
/// The engine treats labels as opaque keys and never rewrites them.
pub type Tags = BTreeSet<String>;

/// Content that may be shown to a user.
///
/// # Examples
/// ```
/// use vault_core::{Candidate, MediaType};
///
/// let candidate = Candidate::new("c1", "Cosmos", MediaType::Documentary)
///     .with_tags(["space", "science"])
///     .with_popularity(0.8);
///
/// assert!(candidate.tags.contains("space"));
/// assert_eq!(candidate.popularity_score(), 0.8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Content category.
    pub media_type: MediaType,
    /// Free-form topic labels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Tags,
    /// Global popularity in `0.0..=1.0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub popularity: f32,
}

impl Candidate {
    /// Construct an untagged candidate with zero popularity.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            media_type,
            tags: Tags::new(),
            popularity: 0.0,
        }
    }

    /// Replace the topic labels while returning `self` for chaining.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the popularity while returning `self` for chaining.
    #[must_use]
    pub fn with_popularity(mut self, popularity: f32) -> Self {
        self.popularity = popularity;
        self
    }

    /// Popularity clamped into `0.0..=1.0`; non-finite values read as `0.0`.
    #[must_use]
    pub const fn popularity_score(&self) -> f32 {
        if self.popularity.is_finite() {
            self.popularity.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Capture the type and labels as they stand now.
    #[must_use]
    pub fn snapshot(&self) -> CandidateSnapshot {
        CandidateSnapshot {
            media_type: Some(self.media_type),
            tags: self.tags.clone(),
        }
    }
}

/// Denormalised copy of a candidate's type and labels taken at swipe time.
///
/// Either part may be missing when the store could not resolve the target.
/// Missing parts contribute no preference keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateSnapshot {
    /// Content category at interaction time.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::optional_from_str")
    )]
    pub media_type: Option<MediaType>,
    /// Topic labels at interaction time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Tags,
}

impl CandidateSnapshot {
    /// Build a snapshot from a type and labels.
    #[must_use]
    pub fn new<I, S>(media_type: MediaType, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            media_type: Some(media_type),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}
