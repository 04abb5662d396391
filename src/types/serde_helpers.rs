//! Internal serde helpers for the exchange's looser wire conventions.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional field where the exchange may send `""`,
/// `"UNSPECIFIED"`, or `"None"` to mean absent.
pub fn none_markers<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s))
            if s.is_empty() || s == "UNSPECIFIED" || s.eq_ignore_ascii_case("none") =>
        {
            Ok(None)
        }
        Some(other) => T::deserialize(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
