//! Lenient field deserializers for service responses
//!
//! A success response is never rejected for its shape: `null` reads as
//! the zero value and counts accept any JSON number.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// `null` becomes `T::default()`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Non-negative count from any JSON number; `3.0` reads as 3.
///
/// Fractions round to the nearest integer; negative or non-finite values
/// and `null` read as 0.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    if value.is_finite() && value > 0.0 {
        Ok(value.round() as u64)
    } else {
        Ok(0)
    }
}

/// Ordered map where both the map itself and any value may be `null`
pub fn map_or_default<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    let map = Option::<IndexMap<String, Option<V>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(map
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}
