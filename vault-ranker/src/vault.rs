//! Fold saved vault items into an implicit preference profile.

use log::warn;
use vault_core::{PreferenceProfile, RankingConfig, VaultedItem};

use crate::accumulator::ProfileAccumulator;

/// Compute a preference profile from vaulted items.
///
/// Every item contributes `config.vault_implicit_weight` to each of its
/// topic labels and to its media type. An item counts as one unit of
/// evidence regardless of how many labels it carries, so
/// `total_interactions` equals `items.len()`.
///
/// A vault weight that is not a positive finite number leaves every key
/// untouched; the items are still counted.
#[must_use]
pub fn compute_vault_preferences(items: &[VaultedItem], config: &RankingConfig) -> PreferenceProfile {
    let mut accumulator = ProfileAccumulator::default();
    let weight = config.vault_implicit_weight;
    let usable = weight.is_finite() && weight > 0.0;
    if !usable && !items.is_empty() {
        warn!(
            "vault implicit weight {weight} is not a positive finite number; vaulted items contribute nothing"
        );
    }
    for item in items {
        accumulator.observe_timestamp(item.timestamp);
        if usable {
            accumulator.record(Some(item.media_type), &item.tags, weight);
        }
    }
    accumulator.finish(items.len())
}
