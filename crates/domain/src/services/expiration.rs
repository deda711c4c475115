//! Gallery expiration classification.
//!
//! Classifies an event by its expiry timestamp relative to an explicit `now`.
//! Nothing here reads the wall clock.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use shared::time::{parse_timestamp, DateParseError};

/// Days before expiry at which a gallery counts as expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Days added by the "extend" action when no other value is configured.
pub const DEFAULT_EXTENSION_DAYS: i64 = 7;

const SECONDS_PER_DAY: i64 = 86_400;

/// Expiration status of a gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationStatus {
    Active,
    Expiring,
    Expired,
    Archived,
}

impl std::fmt::Display for ExpirationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpirationStatus::Active => write!(f, "active"),
            ExpirationStatus::Expiring => write!(f, "expiring"),
            ExpirationStatus::Expired => write!(f, "expired"),
            ExpirationStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Result of classifying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Classification {
    pub status: ExpirationStatus,
    /// Whole days until expiry (floored). `None` when expiry is not tracked.
    pub days_remaining: Option<i64>,
}

/// Thresholds used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    pub expiring_soon_days: i64,
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self {
            expiring_soon_days: EXPIRING_SOON_DAYS,
        }
    }
}

impl ExpirationPolicy {
    pub fn classify(
        &self,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        is_archived: bool,
    ) -> Classification {
        if is_archived {
            return Classification {
                status: ExpirationStatus::Archived,
                days_remaining: None,
            };
        }

        let Some(expires_at) = expires_at else {
            return Classification {
                status: ExpirationStatus::Active,
                days_remaining: None,
            };
        };

        let days = days_between(now, expires_at);
        let status = if days <= 0 {
            ExpirationStatus::Expired
        } else if days <= self.expiring_soon_days {
            ExpirationStatus::Expiring
        } else {
            ExpirationStatus::Active
        };

        Classification {
            status,
            days_remaining: Some(days),
        }
    }
}

/// Floored number of whole days from `now` until `expires_at`.
fn days_between(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> i64 {
    (expires_at - now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Classifies with the default seven-day threshold.
pub fn classify(
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    is_archived: bool,
) -> Classification {
    ExpirationPolicy::default().classify(expires_at, now, is_archived)
}

/// Classifies a raw backend timestamp.
///
/// An unparseable timestamp is treated as absent (never-expiring) and the
/// parse error is returned alongside so the caller can report it.
pub fn classify_raw(
    expires_at: Option<&str>,
    now: DateTime<Utc>,
    is_archived: bool,
    policy: &ExpirationPolicy,
) -> (Classification, Option<DateParseError>) {
    let (parsed, error) = match expires_at.map(parse_timestamp) {
        None | Some(Err(DateParseError::Empty)) => (None, None),
        Some(Ok(ts)) => (Some(ts), None),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Malformed expires_at, treating gallery as non-expiring");
            (None, Some(e))
        }
    };
    (policy.classify(parsed, now, is_archived), error)
}

/// Whether the "extend" action is offered for this classification.
pub fn can_extend(classification: &Classification) -> bool {
    matches!(
        classification.status,
        ExpirationStatus::Expiring | ExpirationStatus::Expired
    )
}

/// New expiry after extending by `days`.
pub fn extended_expiry(expires_at: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    expires_at + Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_archived_ignores_expiry() {
        for expires_at in [None, Some(now() - Duration::days(3)), Some(now() + Duration::days(3))] {
            let c = classify(expires_at, now(), true);
            assert_eq!(c.status, ExpirationStatus::Archived);
            assert_eq!(c.days_remaining, None);
        }
    }

    #[test]
    fn test_no_expiry_is_active() {
        let c = classify(None, now(), false);
        assert_eq!(c.status, ExpirationStatus::Active);
        assert_eq!(c.days_remaining, None);
    }

    #[test]
    fn test_past_expiry_is_expired() {
        for offset in [Duration::seconds(1), Duration::hours(25), Duration::days(400)] {
            let c = classify(Some(now() - offset), now(), false);
            assert_eq!(c.status, ExpirationStatus::Expired);
            assert!(c.days_remaining.unwrap() <= 0);
        }
    }

    #[test]
    fn test_three_days_is_expiring() {
        let c = classify(Some(now() + Duration::days(3)), now(), false);
        assert_eq!(
            c,
            Classification {
                status: ExpirationStatus::Expiring,
                days_remaining: Some(3),
            }
        );
    }

    #[test]
    fn test_boundaries() {
        let c = classify(Some(now() + Duration::days(7)), now(), false);
        assert_eq!(c.status, ExpirationStatus::Expiring);

        let c = classify(Some(now() + Duration::days(8)), now(), false);
        assert_eq!(c.status, ExpirationStatus::Active);
        assert_eq!(c.days_remaining, Some(8));

        // Less than one whole day left floors to zero
        let c = classify(Some(now() + Duration::hours(12)), now(), false);
        assert_eq!(c.status, ExpirationStatus::Expired);
        assert_eq!(c.days_remaining, Some(0));

        let c = classify(Some(now()), now(), false);
        assert_eq!(c.status, ExpirationStatus::Expired);
    }

    #[test]
    fn test_days_are_floored() {
        let c = classify(Some(now() + Duration::days(3) - Duration::seconds(1)), now(), false);
        assert_eq!(c.days_remaining, Some(2));

        let c = classify(Some(now() - Duration::hours(1)), now(), false);
        assert_eq!(c.days_remaining, Some(-1));
    }

    #[test]
    fn test_custom_threshold() {
        let policy = ExpirationPolicy {
            expiring_soon_days: 14,
        };
        let c = policy.classify(Some(now() + Duration::days(10)), now(), false);
        assert_eq!(c.status, ExpirationStatus::Expiring);
    }

    #[test]
    fn test_classify_raw_degrades_malformed() {
        let policy = ExpirationPolicy::default();
        let (c, err) = classify_raw(Some("31/02/2024"), now(), false, &policy);
        assert_eq!(c.status, ExpirationStatus::Active);
        assert_eq!(c.days_remaining, None);
        assert!(matches!(err, Some(DateParseError::Unrecognized(_))));

        let (c, err) = classify_raw(Some("2024-06-04T12:00:00Z"), now(), false, &policy);
        assert_eq!(c.status, ExpirationStatus::Expiring);
        assert!(err.is_none());

        let (c, err) = classify_raw(Some(""), now(), false, &policy);
        assert_eq!(c.status, ExpirationStatus::Active);
        assert!(err.is_none());
    }

    #[test]
    fn test_can_extend() {
        assert!(can_extend(&classify(Some(now() + Duration::days(2)), now(), false)));
        assert!(can_extend(&classify(Some(now() - Duration::days(2)), now(), false)));
        assert!(!can_extend(&classify(Some(now() + Duration::days(20)), now(), false)));
        assert!(!can_extend(&classify(Some(now()), now(), true)));
        assert!(!can_extend(&classify(None, now(), false)));
    }

    #[test]
    fn test_extension_reclassifies_as_active() {
        let expires_at = now() + Duration::days(5);
        assert_eq!(classify(Some(expires_at), now(), false).status, ExpirationStatus::Expiring);

        let extended = extended_expiry(expires_at, DEFAULT_EXTENSION_DAYS);
        let c = classify(Some(extended), now(), false);
        assert_eq!(c.status, ExpirationStatus::Active);
        assert_eq!(c.days_remaining, Some(12));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExpirationStatus::Expiring.to_string(), "expiring");
        assert_eq!(
            serde_json::to_value(ExpirationStatus::Archived).unwrap(),
            serde_json::json!("archived")
        );
    }
}
