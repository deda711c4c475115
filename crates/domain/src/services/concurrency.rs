//! Optimistic concurrency for whole-object saves.
//!
//! The backend carries no version column for event settings, so the token is
//! a content hash of the record as it was loaded. Before saving, the caller
//! re-fetches the record and checks it still hashes to the same token.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::crypto::sha256_hex;

/// Error returned when a save would overwrite someone else's change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Record was modified since it was loaded (expected version {expected}, found {actual})")]
pub struct ConflictError {
    pub expected: VersionToken,
    pub actual: VersionToken,
}

/// Content hash identifying one state of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    /// Token for a serializable record.
    ///
    /// Hashes the `serde_json::Value` form, whose object keys are sorted, so
    /// field order does not affect the token.
    pub fn of<T: Serialize>(record: &T) -> Self {
        let canonical = serde_json::to_value(record)
            .map(|value| value.to_string())
            .unwrap_or_default();
        VersionToken(sha256_hex(&canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VersionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form is enough to tell versions apart in messages.
        let short: String = self.0.chars().take(12).collect();
        write!(f, "{}", short)
    }
}

/// Checks that `current` is still the version identified by `expected`.
pub fn ensure_fresh<T: Serialize>(expected: &VersionToken, current: &T) -> Result<(), ConflictError> {
    let actual = VersionToken::of(current);
    if &actual == expected {
        Ok(())
    } else {
        tracing::warn!(
            expected = %expected,
            actual = %actual,
            "Rejecting stale write"
        );
        Err(ConflictError {
            expected: expected.clone(),
            actual,
        })
    }
}
