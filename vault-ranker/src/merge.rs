//! Blend independently sourced preference profiles.

use std::collections::BTreeMap;

use vault_core::{MergeWeights, PreferenceEntry, PreferenceProfile};

/// Merge two profiles with convex coefficients.
///
/// For a key present in both profiles the merged weight is
/// `weights.swipe * a.weight + weights.vault * b.weight` and the counts add
/// up. A key present in only one profile is copied unchanged. Interaction
/// totals add up and the later of the two timestamps is kept.
///
/// The operation is deterministic but not associative across differing
/// coefficients; use [`merge_all`] to fold more than two sources.
///
/// # Examples
/// ```
/// use vault_core::{MergeWeights, PreferenceEntry, PreferenceProfile};
/// use vault_ranker::merge_preferences;
///
/// let swipes = PreferenceProfile::new().with_tag("x", PreferenceEntry::new(1.0, 5));
/// let vault = PreferenceProfile::new().with_tag("x", PreferenceEntry::new(0.2, 2));
/// let merged = merge_preferences(&swipes, &vault, MergeWeights::default());
///
/// let x = merged.tag("x").unwrap();
/// assert!((x.weight - 0.76).abs() < 1e-6);
/// assert_eq!(x.count, 7);
/// ```
#[must_use]
pub fn merge_preferences(
    a: &PreferenceProfile,
    b: &PreferenceProfile,
    weights: MergeWeights,
) -> PreferenceProfile {
    PreferenceProfile::from_parts(
        merge_maps(a.tag_preferences(), b.tag_preferences(), weights),
        merge_maps(a.type_preferences(), b.type_preferences(), weights),
        a.total_interactions()
            .saturating_add(b.total_interactions()),
        a.last_updated().max(b.last_updated()),
    )
}

/// Fold several profiles pairwise from left to right.
///
/// An empty slice yields an empty profile and a single profile is returned
/// as is.
#[must_use]
pub fn merge_all(profiles: &[PreferenceProfile], weights: MergeWeights) -> PreferenceProfile {
    let mut remaining = profiles.iter();
    let Some(first) = remaining.next() else {
        return PreferenceProfile::new();
    };
    remaining.fold(first.clone(), |merged, next| {
        merge_preferences(&merged, next, weights)
    })
}

fn merge_maps<K>(
    left: &BTreeMap<K, PreferenceEntry>,
    right: &BTreeMap<K, PreferenceEntry>,
    weights: MergeWeights,
) -> BTreeMap<K, PreferenceEntry>
where
    K: Ord + Clone,
{
    let mut merged = left.clone();
    for (key, entry) in right {
        merged
            .entry(key.clone())
            .and_modify(|existing| *existing = blend(*existing, *entry, weights))
            .or_insert(*entry);
    }
    merged
}

#[expect(
    clippy::float_arithmetic,
    reason = "merging is a convex combination of weights"
)]
const fn blend(
    left: PreferenceEntry,
    right: PreferenceEntry,
    weights: MergeWeights,
) -> PreferenceEntry {
    PreferenceEntry::new(
        weights.swipe * left.weight + weights.vault * right.weight,
        left.count.saturating_add(right.count),
    )
}
