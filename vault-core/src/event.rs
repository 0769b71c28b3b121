//! Interaction history supplied by the store.
//!
//! Two kinds of evidence feed the preference model: explicit swipe
//! decisions ([`InteractionEvent`]) and implicit saves ([`VaultedItem`]).
//! Both carry the type and labels of their target so ranking never needs a
//! live join.

use crate::{CandidateSnapshot, Decision, MediaType, Tags};

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Strength assumed when the store omits one.
pub const DEFAULT_STRENGTH: f32 = 1.0;

#[cfg(feature = "serde")]
const fn default_strength() -> f32 {
    DEFAULT_STRENGTH
}

/// A single swipe recorded during a session.
///
/// `decision` is `None` when the store held a decision kind this engine does
/// not recognise; such events count towards the history size but contribute
/// no preference weight.
///
/// # Examples
/// ```
/// use vault_core::{CandidateSnapshot, Decision, InteractionEvent, MediaType};
///
/// let event = InteractionEvent::new("e1", "s1", "c1", Decision::Like, 1_700_000_000_000)
///     .with_strength(0.5)
///     .with_snapshot(CandidateSnapshot::new(MediaType::Book, ["fantasy"]));
///
/// assert_eq!(event.decision, Some(Decision::Like));
/// assert_eq!(event.strength, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionEvent {
    /// Unique identifier.
    pub id: String,
    /// Swipe session the event belongs to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub session_id: String,
    /// Identifier of the swiped candidate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub candidate_id: String,
    /// The verdict, if recognised.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::optional_from_str")
    )]
    pub decision: Option<Decision>,
    /// Signal strength in `0.0..=1.0`.
    #[cfg_attr(feature = "serde", serde(default = "default_strength"))]
    pub strength: f32,
    /// When the swipe happened.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: Timestamp,
    /// Type and labels of the target at swipe time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub snapshot: Option<CandidateSnapshot>,
}

impl InteractionEvent {
    /// Construct an event at full strength without a snapshot.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        session_id: impl Into<String>,
        candidate_id: impl Into<String>,
        decision: Decision,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            candidate_id: candidate_id.into(),
            decision: Some(decision),
            strength: DEFAULT_STRENGTH,
            timestamp,
            snapshot: None,
        }
    }

    /// Set the strength while returning `self` for chaining.
    #[must_use]
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Attach a snapshot while returning `self` for chaining.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: CandidateSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }
}

/// An item the user saved to their vault.
///
/// Vaulting is always read as a positive signal of fixed weight.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VaultedItem {
    /// Unique identifier.
    pub id: String,
    /// Content category.
    pub media_type: MediaType,
    /// Topic labels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Tags,
    /// When the item was saved.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: Timestamp,
}

impl VaultedItem {
    /// Construct an untagged vaulted item.
    #[must_use]
    pub fn new(id: impl Into<String>, media_type: MediaType, timestamp: Timestamp) -> Self {
        Self {
            id: id.into(),
            media_type,
            tags: Tags::new(),
            timestamp,
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
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unknown_decision_decodes_as_none() {
        let json = r#"{"id":"e1","decision":"maybe","snapshot":{"media_type":"book","tags":["a"]}}"#;
        let event: InteractionEvent = serde_json::from_str(json).expect("lenient decode");
        assert!(event.decision.is_none());
        assert_eq!(event.strength, DEFAULT_STRENGTH);
    }

    #[rstest]
    fn unknown_snapshot_type_decodes_as_none() {
        let json = r#"{"id":"e2","decision":"super_like","snapshot":{"media_type":"hologram","tags":["a"]}}"#;
        let event: InteractionEvent = serde_json::from_str(json).expect("lenient decode");
        assert_eq!(event.decision, Some(Decision::SuperLike));
        let snapshot = event.snapshot.expect("snapshot present");
        assert!(snapshot.media_type.is_none());
        assert!(snapshot.tags.contains("a"));
    }

    #[rstest]
    fn missing_snapshot_is_tolerated() {
        let event: InteractionEvent =
            serde_json::from_str(r#"{"id":"e3","decision":"like","strength":0.25}"#)
                .expect("decode without snapshot");
        assert!(event.snapshot.is_none());
        assert_eq!(event.strength, 0.25);
    }

    #[rstest]
    fn vaulted_item_round_trips_through_json() {
        let item = VaultedItem::new("v1", MediaType::Essay, 42).with_tags(["ethics"]);
        let json = serde_json::to_string(&item).expect("encode");
        assert!(json.contains(r#""media_type":"essay""#));
        let decoded: VaultedItem = serde_json::from_str(&json).expect("decode");
        assert_eq!(decoded, item);
    }
}
