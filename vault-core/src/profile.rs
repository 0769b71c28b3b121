//! Preference profiles: signed, averaged weights over topic labels and media
//! types.
//!
//! A profile is a plain value computed fresh for each ranking request. Every
//! entry stores the arithmetic mean of the signed contributions that touched
//! its key together with the number of contributing events, so weights stay
//! comparable no matter how often a key was seen.

use std::collections::BTreeMap;

use crate::{MediaType, Timestamp};

/// Averaged weight and evidence count for one key.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceEntry {
    /// Mean signed contribution.
    pub weight: f32,
    /// Number of contributing events.
    pub count: u32,
}

impl PreferenceEntry {
    /// Construct an entry.
    #[must_use]
    pub const fn new(weight: f32, count: u32) -> Self {
        Self { weight, count }
    }
}

/// Learned preferences of one user or session.
///
/// # Examples
/// ```
/// use vault_core::{MediaType, PreferenceEntry, PreferenceProfile};
///
/// let profile = PreferenceProfile::new()
///     .with_tag("space", PreferenceEntry::new(0.9, 4))
///     .with_media_type(MediaType::Documentary, PreferenceEntry::new(0.5, 4))
///     .with_total_interactions(4);
///
/// assert_eq!(profile.tag_weight("space"), 0.9);
/// assert_eq!(profile.tag_weight("cooking"), 0.0);
/// assert_eq!(profile.total_interactions(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceProfile {
    tag_preferences: BTreeMap<String, PreferenceEntry>,
    type_preferences: BTreeMap<MediaType, PreferenceEntry>,
    total_interactions: usize,
    last_updated: Option<Timestamp>,
}

impl PreferenceProfile {
    /// Construct an empty profile.
    ///
    /// # Examples
    /// ```
    /// use vault_core::PreferenceProfile;
    ///
    /// let profile = PreferenceProfile::new();
    /// assert!(profile.is_empty());
    /// assert_eq!(profile.total_interactions(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a profile from already-averaged parts.
    #[must_use]
    pub const fn from_parts(
        tag_preferences: BTreeMap<String, PreferenceEntry>,
        type_preferences: BTreeMap<MediaType, PreferenceEntry>,
        total_interactions: usize,
        last_updated: Option<Timestamp>,
    ) -> Self {
        Self {
            tag_preferences,
            type_preferences,
            total_interactions,
            last_updated,
        }
    }

    /// Insert or replace a tag entry while returning `self` for chaining.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>, entry: PreferenceEntry) -> Self {
        self.tag_preferences.insert(tag.into(), entry);
        self
    }

    /// Insert or replace a media type entry while returning `self` for
    /// chaining.
    #[must_use]
    pub fn with_media_type(mut self, media_type: MediaType, entry: PreferenceEntry) -> Self {
        self.type_preferences.insert(media_type, entry);
        self
    }

    /// Set the number of folded source events.
    #[must_use]
    pub fn with_total_interactions(mut self, total_interactions: usize) -> Self {
        self.total_interactions = total_interactions;
        self
    }

    /// Set the computation timestamp.
    #[must_use]
    pub fn with_last_updated(mut self, last_updated: Option<Timestamp>) -> Self {
        self.last_updated = last_updated;
        self
    }

    /// Entry for a topic label, if tracked.
    #[must_use]
    pub fn tag(&self, tag: &str) -> Option<PreferenceEntry> {
        self.tag_preferences.get(tag).copied()
    }

    /// Entry for a media type, if tracked.
    #[must_use]
    pub fn media_type(&self, media_type: MediaType) -> Option<PreferenceEntry> {
        self.type_preferences.get(&media_type).copied()
    }

    /// Weight for a topic label; untracked labels read as `0.0`.
    #[must_use]
    pub fn tag_weight(&self, tag: &str) -> f32 {
        self.tag(tag).map_or(0.0, |entry| entry.weight)
    }

    /// Weight for a media type; untracked types read as `0.0`.
    #[must_use]
    pub fn media_type_weight(&self, media_type: MediaType) -> f32 {
        self.media_type(media_type).map_or(0.0, |entry| entry.weight)
    }

    /// All tag entries ordered by label.
    #[must_use]
    pub const fn tag_preferences(&self) -> &BTreeMap<String, PreferenceEntry> {
        &self.tag_preferences
    }

    /// All media type entries ordered by type.
    #[must_use]
    pub const fn type_preferences(&self) -> &BTreeMap<MediaType, PreferenceEntry> {
        &self.type_preferences
    }

    /// Number of source events folded into the profile.
    #[must_use]
    pub const fn total_interactions(&self) -> usize {
        self.total_interactions
    }

    /// Latest timestamp among the folded events.
    #[must_use]
    pub const fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated
    }

    /// Report whether the profile tracks no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag_preferences.is_empty() && self.type_preferences.is_empty()
    }

    /// The `limit` strongest positively weighted tags.
    ///
    /// Ordered by weight, then by count, then by label so the listing is
    /// stable for display.
    #[must_use]
    pub fn top_tags(&self, limit: usize) -> Vec<(&str, PreferenceEntry)> {
        let mut positive: Vec<(&str, PreferenceEntry)> = self
            .tag_preferences
            .iter()
            .filter(|(_, entry)| entry.weight > 0.0)
            .map(|(tag, entry)| (tag.as_str(), *entry))
            .collect();
        positive.sort_by(|(left_tag, left), (right_tag, right)| {
            right
                .weight
                .total_cmp(&left.weight)
                .then_with(|| right.count.cmp(&left.count))
                .then_with(|| left_tag.cmp(right_tag))
        });
        positive.truncate(limit);
        positive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn profile() -> PreferenceProfile {
        PreferenceProfile::new()
            .with_tag("space", PreferenceEntry::new(0.9, 2))
            .with_tag("history", PreferenceEntry::new(0.9, 5))
            .with_tag("horror", PreferenceEntry::new(-0.8, 3))
            .with_tag("cooking", PreferenceEntry::new(0.2, 1))
            .with_media_type(MediaType::Book, PreferenceEntry::new(0.4, 6))
            .with_total_interactions(6)
    }

    #[rstest]
    fn untracked_keys_read_as_zero(profile: PreferenceProfile) {
        assert_eq!(profile.tag_weight("gardening"), 0.0);
        assert_eq!(profile.media_type_weight(MediaType::Podcast), 0.0);
        assert!(profile.tag("gardening").is_none());
    }

    #[rstest]
    fn top_tags_skip_negative_and_break_ties_on_count(profile: PreferenceProfile) {
        let top: Vec<&str> = profile.top_tags(3).into_iter().map(|(tag, _)| tag).collect();
        assert_eq!(top, vec!["history", "space", "cooking"]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(10, 3)]
    fn top_tags_respect_limit(profile: PreferenceProfile, #[case] limit: usize, #[case] len: usize) {
        assert_eq!(profile.top_tags(limit).len(), len);
    }

    #[rstest]
    fn empty_profile_reports_empty() {
        let profile = PreferenceProfile::new();
        assert!(profile.is_empty());
        assert!(profile.last_updated().is_none());
        assert!(profile.top_tags(5).is_empty());
    }
}
