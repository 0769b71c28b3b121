//! Media types drawn from the closed set the vault recognises.
//!
//! The enum offers compile-time safety for type preference lookups.
//!
//! # Examples
//! ```
//! use vault_core::MediaType;
//!
//! assert_eq!(MediaType::Documentary.as_str(), "documentary");
//! assert_eq!(MediaType::Book.to_string(), "book");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Broad content category of a candidate or vaulted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MediaType {
    /// Books and long-form writing.
    Book,
    /// Feature films.
    Movie,
    /// Episodic television.
    Show,
    /// Audio podcasts.
    Podcast,
    /// Video games and tabletop games.
    Game,
    /// Albums, tracks and artists.
    Music,
    /// Short-form or online video.
    Video,
    /// Documentary films and series.
    Documentary,
    /// Stand-up comedy specials.
    Standup,
    /// Sporting events and teams.
    Sports,
    /// Essays and articles.
    Essay,
    /// People worth following.
    Person,
}

impl MediaType {
    /// Every media type in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Book,
        Self::Movie,
        Self::Show,
        Self::Podcast,
        Self::Game,
        Self::Music,
        Self::Video,
        Self::Documentary,
        Self::Standup,
        Self::Sports,
        Self::Essay,
        Self::Person,
    ];

    /// Return the media type as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use vault_core::MediaType;
    ///
    /// assert_eq!(MediaType::Podcast.as_str(), "podcast");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Movie => "movie",
            Self::Show => "show",
            Self::Podcast => "podcast",
            Self::Game => "game",
            Self::Music => "music",
            Self::Video => "video",
            Self::Documentary => "documentary",
            Self::Standup => "standup",
            Self::Sports => "sports",
            Self::Essay => "essay",
            Self::Person => "person",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known media type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown media type '{0}'")]
pub struct ParseMediaTypeError(String);

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|media_type| media_type.as_str() == lowered)
            .ok_or_else(|| ParseMediaTypeError(s.to_owned()))
    }
}
