//! Internal accumulator shared by the swipe and vault aggregators.
//!
//! Collects running sums and counts per key, then converts each key to its
//! arithmetic mean when the profile is finished.

use std::collections::BTreeMap;

use vault_core::{MediaType, PreferenceEntry, PreferenceProfile, Tags, Timestamp};

#[derive(Debug, Default, Clone, Copy)]
struct RunningMean {
    sum: f32,
    count: u32,
}

impl RunningMean {
    #[expect(
        clippy::float_arithmetic,
        reason = "preference aggregation sums signed contributions"
    )]
    fn record(&mut self, contribution: f32) {
        self.sum += contribution;
        self.count = self.count.saturating_add(1);
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "weights are the mean of the recorded contributions"
    )]
    fn finish(self) -> PreferenceEntry {
        let weight = if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f32
        };
        PreferenceEntry::new(weight, self.count)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ProfileAccumulator {
    tags: BTreeMap<String, RunningMean>,
    media_types: BTreeMap<MediaType, RunningMean>,
    latest: Option<Timestamp>,
}

impl ProfileAccumulator {
    pub(crate) fn observe_timestamp(&mut self, timestamp: Timestamp) {
        self.latest = self.latest.max(Some(timestamp));
    }

    pub(crate) fn record(&mut self, media_type: Option<MediaType>, tags: &Tags, contribution: f32) {
        for tag in tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .record(contribution);
        }
        if let Some(kind) = media_type {
            self.media_types.entry(kind).or_default().record(contribution);
        }
    }

    pub(crate) fn finish(self, total_interactions: usize) -> PreferenceProfile {
        let tags = self
            .tags
            .into_iter()
            .map(|(tag, mean)| (tag, mean.finish()))
            .collect();
        let media_types = self
            .media_types
            .into_iter()
            .map(|(kind, mean)| (kind, mean.finish()))
            .collect();
        PreferenceProfile::from_parts(tags, media_types, total_interactions, self.latest)
    }
}
