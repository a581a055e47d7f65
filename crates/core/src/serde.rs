//! Serde helper functions for request payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating blank strings as None.
///
/// Used for optional text and foreign-key ids so that `""` never reaches the
/// mapper as an id.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
