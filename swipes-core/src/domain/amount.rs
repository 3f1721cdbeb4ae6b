//! Decoding helpers for monetary fields
//!
//! The services API sends amounts as JSON numbers, but some deployments
//! return them as strings. Both decode into `Decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

fn to_decimal<E: serde::de::Error>(value: JsonValue) -> Result<Option<Decimal>, E> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => {
            let s = n.to_string();
            s.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(&s))
                .map(Some)
                .map_err(|e| E::custom(format!("invalid decimal: {}", e)))
        }
        JsonValue::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| E::custom(format!("invalid decimal: {}", e))),
        _ => Err(E::custom("expected number or string for amount")),
    }
}

/// Deserialize an amount that can be number or string
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    to_decimal::<D::Error>(value)?
        .ok_or_else(|| serde::de::Error::custom("amount cannot be null"))
}

/// Deserialize an optional amount that can be number, string or null
pub(crate) fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    match value {
        Some(v) => to_decimal::<D::Error>(v),
        None => Ok(None),
    }
}
