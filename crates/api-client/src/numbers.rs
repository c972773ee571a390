//! Serde helpers for whole-number fields (cents, limits, milliseconds).
//!
//! Tool callers send JSON numbers, and `100.0` is as valid a price as `100`. These helpers accept
//! any JSON number with no fractional part and reject the rest with a message naming the value.

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Number;

fn to_whole<T, E>(n: &Number) -> Result<T, E>
where
    T: TryFrom<u64>,
    E: serde::de::Error,
{
    let whole = match (n.as_u64(), n.as_f64()) {
        (Some(u), _) => Some(u),
        // Below 2^53 every integral f64 converts exactly.
        (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 && f < 9_007_199_254_740_992.0 => {
            Some(f as u64)
        }
        _ => None,
    };
    whole
        .and_then(|u| T::try_from(u).ok())
        .ok_or_else(|| E::custom(format!("expected a non-negative whole number, got {n}")))
}

/// `#[serde(deserialize_with = "theagora_api_client::numbers::whole")]`
pub fn whole<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let n = Number::deserialize(deserializer)?;
    to_whole(&n)
}

/// Like [`whole`], for optional fields. Pair it with `#[serde(default)]`.
pub fn whole_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(|n| to_whole(&n))
        .transpose()
}
