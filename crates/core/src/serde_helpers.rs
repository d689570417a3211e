//! Deserialization helpers for form-style JSON input.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Deserialize an optional value that may also arrive as text.
///
/// Accepts `null`, the typed value itself (`9`, `"2024-05-01"`), or a string
/// to be parsed (`"9"`). Empty and whitespace-only strings become `None`.
/// Use together with `#[serde(default)]`.
pub fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Text(String),
    }

    match Option::<Raw<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Value(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(de::Error::custom)
            }
        }
    }
}
