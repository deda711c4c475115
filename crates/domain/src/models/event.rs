//! Event (gallery) domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::loose::deserialize_flag;
use shared::time::deserialize_lenient;
use shared::validation::{validate_gallery_password, validate_slug};

/// Default gallery lifetime for new events, in days.
pub const DEFAULT_EXPIRATION_DAYS: u32 = 30;

/// Maximum gallery lifetime for new events, in days.
pub const MAX_EXPIRATION_DAYS: u32 = 365;

/// A photo-gallery event as returned by the backend.
///
/// Timestamps and flags are decoded leniently: malformed values degrade to
/// `None`/`false` instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: i64,
    pub slug: String,
    pub event_name: String,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_archived: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub require_password: bool,
    #[serde(default)]
    pub share_link: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub color_theme: Option<String>,
    #[serde(default)]
    pub hero_photo_id: Option<i64>,
    #[serde(default)]
    pub welcome_message: Option<String>,
}

/// Field changes produced by a lifecycle transition, sent to the backend as
/// a partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl EventPatch {
    /// Returns a copy of `event` with this patch applied.
    pub fn apply_to(&self, event: &Event) -> Event {
        let mut updated = event.clone();
        if let Some(expires_at) = self.expires_at {
            updated.expires_at = Some(expires_at);
        }
        if let Some(is_active) = self.is_active {
            updated.is_active = is_active;
        }
        if let Some(is_archived) = self.is_archived {
            updated.is_archived = is_archived;
        }
        if let Some(archived_at) = self.archived_at {
            updated.archived_at = Some(archived_at);
        }
        updated
    }
}

/// Event creation form, validated client-side before submission.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_draft_password", skip_on_field_errors = false))]
pub struct EventDraft {
    #[validate(length(min = 1, max = 255, message = "Event name is required"))]
    pub event_name: String,

    #[validate(length(min = 1, max = 50, message = "Event type is required"))]
    pub event_type: String,

    pub event_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[validate(length(max = 255, message = "Customer name must be at most 255 characters"))]
    pub customer_name: Option<String>,

    #[validate(email(message = "Invalid customer email"))]
    pub customer_email: String,

    #[validate(email(message = "Invalid admin email"))]
    pub admin_email: String,

    #[serde(default)]
    pub require_password: bool,

    pub password: Option<String>,

    #[validate(length(max = 2000, message = "Welcome message must be at most 2000 characters"))]
    pub welcome_message: Option<String>,

    pub color_theme: Option<String>,

    /// Days until the gallery expires (1-365, default: 30).
    #[validate(range(min = 1, max = 365, message = "Expiration must be between 1 and 365 days"))]
    pub expiration_days: Option<u32>,
}

impl EventDraft {
    /// Effective gallery lifetime in days.
    pub fn expiration_days(&self) -> u32 {
        self.expiration_days.unwrap_or(DEFAULT_EXPIRATION_DAYS)
    }

    /// Expiry timestamp the backend will assign when created at `now`.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + chrono::Duration::days(i64::from(self.expiration_days()))
    }
}

fn validate_draft_password(draft: &EventDraft) -> Result<(), validator::ValidationError> {
    if !draft.require_password {
        return Ok(());
    }
    match draft.password.as_deref() {
        Some(password) => validate_gallery_password(password),
        None => {
            let mut err = validator::ValidationError::new("password_required");
            err.message = Some("A password is required for protected galleries".into());
            Err(err)
        }
    }
}
