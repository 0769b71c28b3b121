//! Serde helpers that degrade unrecognised values instead of failing.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string and parse it, mapping unknown values to
/// `None`.
///
/// One malformed record must not abort decoding the rest of a history, so the
/// parse error is swallowed and the field reads as absent.
pub(crate) fn optional_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}
