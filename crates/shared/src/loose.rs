//! Normalization of loosely typed boolean flags.
//!
//! Older backend versions serialized flags such as `require_password` as
//! booleans, integers (`0`/`1`) or strings (`"true"`/`"false"`). Everything
//! past the deserialization boundary works with a plain `bool`.

use serde::{Deserialize, Deserializer, Serialize};

/// A flag as it may arrive from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum LooseFlag {
    Bool(bool),
    Number(f64),
    Text(String),
    #[default]
    Null,
}

impl LooseFlag {
    /// Collapses any representation into a canonical boolean.
    ///
    /// Truthy: `true`, non-zero numbers, and the strings `true`, `1`, `yes`,
    /// `on` (trimmed, case-insensitive). Everything else, including `null`,
    /// is false.
    pub fn normalize(&self) -> bool {
        match self {
            LooseFlag::Bool(b) => *b,
            LooseFlag::Number(n) => *n != 0.0 && !n.is_nan(),
            LooseFlag::Text(s) => {
                let s = s.trim();
                ["true", "1", "yes", "on"]
                    .iter()
                    .any(|truthy| s.eq_ignore_ascii_case(truthy))
            }
            LooseFlag::Null => false,
        }
    }
}

impl From<bool> for LooseFlag {
    fn from(value: bool) -> Self {
        LooseFlag::Bool(value)
    }
}

impl From<i64> for LooseFlag {
    fn from(value: i64) -> Self {
        LooseFlag::Number(value as f64)
    }
}

impl From<i32> for LooseFlag {
    fn from(value: i32) -> Self {
        LooseFlag::Number(f64::from(value))
    }
}

impl From<&str> for LooseFlag {
    fn from(value: &str) -> Self {
        LooseFlag::Text(value.to_string())
    }
}

impl From<String> for LooseFlag {
    fn from(value: String) -> Self {
        LooseFlag::Text(value)
    }
}

impl<T: Into<LooseFlag>> From<Option<T>> for LooseFlag {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(LooseFlag::Null)
    }
}

impl From<&serde_json::Value> for LooseFlag {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => LooseFlag::Bool(*b),
            serde_json::Value::Number(n) => LooseFlag::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => LooseFlag::Text(s.clone()),
            _ => LooseFlag::Null,
        }
    }
}

/// Deserializes a loosely typed flag straight into a `bool`.
///
/// Use with `#[serde(default, deserialize_with = "shared::loose::deserialize_flag")]`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(LooseFlag::from(&value).normalize())
}
