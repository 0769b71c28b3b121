//! Swipe decisions recorded against candidates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Explicit verdict a user gave a candidate card.
///
/// # Examples
/// ```
/// use vault_core::Decision;
///
/// let decision: Decision = "super_like".parse().unwrap();
/// assert_eq!(decision, Decision::SuperLike);
/// assert_eq!(decision.to_string(), "super_like");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Decision {
    /// Positive swipe.
    Like,
    /// Negative swipe.
    Dislike,
    /// Passed over without an opinion.
    Skip,
    /// Emphatic positive swipe.
    SuperLike,
}

impl Decision {
    /// Return the decision in its `snake_case` wire form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Skip => "skip",
            Self::SuperLike => "super_like",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown decision '{0}'")]
pub struct ParseDecisionError(String);

impl FromStr for Decision {
    type Err = ParseDecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            "skip" => Ok(Self::Skip),
            "super_like" => Ok(Self::SuperLike),
            _ => Err(ParseDecisionError(s.to_owned())),
        }
    }
}
