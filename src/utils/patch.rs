//! Partial-update helpers
//!
//! PATCH bodies distinguish an absent field (leave untouched) from an
//! explicit `null` (clear the column). Fields use `Option<Option<T>>`
//! deserialized through [`double_option`].

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) as `Some(..)`.
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Resolve a patched nullable column against its current value
pub fn apply<T>(patch: Option<Option<T>>, current: Option<T>) -> Option<T> {
    match patch {
        Some(value) => value,
        None => current,
    }
}
