//! Popularity-stratified batches for users without usable history.

use std::collections::BTreeMap;

use vault_core::config::DEFAULT_BATCH_SIZE;
use vault_core::{Candidate, MediaType, RankReason, RankedCandidate};

/// Select a trending batch spanning as many media types as possible.
///
/// Candidates are grouped by media type and each group is sorted by
/// popularity, highest first. Groups are then visited round-robin, the group
/// with the most popular lead first, taking one candidate per visit until
/// `batch_size` items are collected or the pool runs dry. Every item carries
/// [`RankReason::Trending`] and its clamped popularity as the score.
///
/// `batch_size` defaults to [`DEFAULT_BATCH_SIZE`]. An empty pool yields an
/// empty batch.
///
/// # Examples
/// ```
/// use vault_core::{Candidate, MediaType, RankReason};
/// use vault_ranker::get_cold_start_batch;
///
/// let pool = vec![
///     Candidate::new("b1", "B1", MediaType::Book).with_popularity(0.9),
///     Candidate::new("b2", "B2", MediaType::Book).with_popularity(0.8),
///     Candidate::new("m1", "M1", MediaType::Movie).with_popularity(0.1),
/// ];
/// let batch = get_cold_start_batch(&pool, Some(2));
///
/// let ids: Vec<_> = batch.iter().map(|item| item.candidate.id.as_str()).collect();
/// assert_eq!(ids, ["b1", "m1"]);
/// assert!(batch.iter().all(|item| item.reason == RankReason::Trending));
/// ```
#[must_use]
pub fn get_cold_start_batch(
    candidates: &[Candidate],
    batch_size: Option<usize>,
) -> Vec<RankedCandidate> {
    let limit = batch_size.unwrap_or(DEFAULT_BATCH_SIZE).min(candidates.len());
    let mut lanes = stratify(candidates);
    let mut batch = Vec::with_capacity(limit);
    while batch.len() < limit {
        let before = batch.len();
        for lane in &mut lanes {
            if batch.len() == limit {
                break;
            }
            if let Some(candidate) = lane.next() {
                batch.push(RankedCandidate::new(
                    candidate.clone(),
                    candidate.popularity_score(),
                    RankReason::Trending,
                ));
            }
        }
        if batch.len() == before {
            break;
        }
    }
    batch
}

type Lane<'a> = std::vec::IntoIter<&'a Candidate>;

/// One popularity-sorted lane per media type, most popular lead first.
fn stratify(candidates: &[Candidate]) -> Vec<Lane<'_>> {
    let mut groups: BTreeMap<MediaType, Vec<&Candidate>> = BTreeMap::new();
    for candidate in candidates {
        groups.entry(candidate.media_type).or_default().push(candidate);
    }
    let mut lanes: Vec<Vec<&Candidate>> = groups.into_values().collect();
    for lane in &mut lanes {
        lane.sort_by(|left, right| right.popularity_score().total_cmp(&left.popularity_score()));
    }
    lanes.sort_by(|left, right| lead_popularity(right).total_cmp(&lead_popularity(left)));
    lanes.into_iter().map(Vec::into_iter).collect()
}

fn lead_popularity(lane: &[&Candidate]) -> f32 {
    lane.first().map_or(0.0, |candidate| candidate.popularity_score())
}
