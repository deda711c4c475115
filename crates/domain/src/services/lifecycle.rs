//! Event lifecycle transitions.
//!
//! `draft → active → {expiring → expired} → archived`. Archived is terminal.
//! Transitions produce an [`EventPatch`]; the event itself is never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::event::{Event, EventPatch};
use crate::services::expiration::{self, ExpirationPolicy, ExpirationStatus};

/// Maximum days a single extension may add.
pub const MAX_EXTENSION_DAYS: i64 = 365;

/// Errors from lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Extension must be between 1 and 365 days, got {0}")]
    InvalidExtension(i64),
}

/// Outcome of a transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Applied(EventPatch),
    NoOp,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }
}

/// Status shown in event lists and detail headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Active,
    Expiring,
    Expired,
    Inactive,
    Archived,
}

impl From<ExpirationStatus> for DisplayStatus {
    fn from(status: ExpirationStatus) -> Self {
        match status {
            ExpirationStatus::Active => DisplayStatus::Active,
            ExpirationStatus::Expiring => DisplayStatus::Expiring,
            ExpirationStatus::Expired => DisplayStatus::Expired,
            ExpirationStatus::Archived => DisplayStatus::Archived,
        }
    }
}

/// Display status with precedence archived > expired > inactive > expiring > active.
pub fn display_status(event: &Event, now: DateTime<Utc>, policy: &ExpirationPolicy) -> DisplayStatus {
    let classification = policy.classify(event.expires_at, now, event.is_archived);
    match classification.status {
        ExpirationStatus::Archived => DisplayStatus::Archived,
        ExpirationStatus::Expired => DisplayStatus::Expired,
        _ if !event.is_active => DisplayStatus::Inactive,
        status => status.into(),
    }
}

/// Extends an event's expiry by `days`.
///
/// No-op for archived events and for events without an expiry.
pub fn extend(event: &Event, days: i64) -> Result<Transition, LifecycleError> {
    if !(1..=MAX_EXTENSION_DAYS).contains(&days) {
        return Err(LifecycleError::InvalidExtension(days));
    }
    if event.is_archived {
        tracing::debug!(event_id = event.id, "Ignoring extension of archived event");
        return Ok(Transition::NoOp);
    }
    let Some(expires_at) = event.expires_at else {
        return Ok(Transition::NoOp);
    };

    let new_expiry = expiration::extended_expiry(expires_at, days);
    tracing::info!(
        event_id = event.id,
        days,
        expires_at = %new_expiry,
        "Extending event expiration"
    );
    Ok(Transition::Applied(EventPatch {
        expires_at: Some(new_expiry),
        ..Default::default()
    }))
}

/// Archives an event. No-op if already archived.
pub fn archive(event: &Event, now: DateTime<Utc>) -> Transition {
    if event.is_archived {
        return Transition::NoOp;
    }
    tracing::info!(event_id = event.id, "Archiving event");
    Transition::Applied(EventPatch {
        is_active: Some(false),
        is_archived: Some(true),
        archived_at: Some(now),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::expiration::{classify, DEFAULT_EXTENSION_DAYS};
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn event(expires_in_days: Option<i64>) -> Event {
        let mut event: Event = serde_json::from_value(json!({
            "id": 42,
            "slug": "summer-party",
            "event_name": "Summer Party",
            "is_active": true,
            "share_link": "abc123"
        }))
        .unwrap();
        event.expires_at = expires_in_days.map(|d| now() + Duration::days(d));
        event
    }

    #[test]
    fn test_display_status_precedence() {
        let policy = ExpirationPolicy::default();

        assert_eq!(display_status(&event(Some(30)), now(), &policy), DisplayStatus::Active);
        assert_eq!(display_status(&event(Some(3)), now(), &policy), DisplayStatus::Expiring);

        let mut inactive = event(Some(3));
        inactive.is_active = false;
        assert_eq!(display_status(&inactive, now(), &policy), DisplayStatus::Inactive);

        let mut inactive_expired = event(Some(-1));
        inactive_expired.is_active = false;
        assert_eq!(display_status(&inactive_expired, now(), &policy), DisplayStatus::Expired);

        let mut archived = event(Some(3));
        archived.is_archived = true;
        assert_eq!(display_status(&archived, now(), &policy), DisplayStatus::Archived);
    }

    #[test]
    fn test_extend_expiring_event() {
        let original = event(Some(5));
        let Transition::Applied(patch) = extend(&original, DEFAULT_EXTENSION_DAYS).unwrap() else {
            panic!("expected extension to apply");
        };
        let updated = patch.apply_to(&original);
        assert_eq!(updated.expires_at, Some(now() + Duration::days(12)));
        assert_eq!(
            classify(updated.expires_at, now(), updated.is_archived).status,
            ExpirationStatus::Active
        );
    }

    #[test]
    fn test_extend_archived_is_noop() {
        let mut archived = event(Some(-3));
        archived.is_archived = true;
        assert_eq!(extend(&archived, 7), Ok(Transition::NoOp));
    }

    #[test]
    fn test_extend_without_expiry_is_noop() {
        assert_eq!(extend(&event(None), 7), Ok(Transition::NoOp));
    }

    #[test]
    fn test_extend_rejects_invalid_days() {
        assert_eq!(extend(&event(Some(3)), 0), Err(LifecycleError::InvalidExtension(0)));
        assert_eq!(extend(&event(Some(3)), 366), Err(LifecycleError::InvalidExtension(366)));
    }

    #[test]
    fn test_archive() {
        let original = event(Some(-2));
        let transition = archive(&original, now());
        assert!(transition.is_applied());

        let Transition::Applied(patch) = transition else {
            unreachable!()
        };
        let archived = patch.apply_to(&original);
        assert!(archived.is_archived);
        assert!(!archived.is_active);
        assert_eq!(archived.archived_at, Some(now()));

        // Terminal: archiving again and extending do nothing
        assert_eq!(archive(&archived, now()), Transition::NoOp);
        assert_eq!(extend(&archived, 7), Ok(Transition::NoOp));
    }
}
