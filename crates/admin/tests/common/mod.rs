//! Common fixtures for admin integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use domain::models::admin_user::{AdminRole, AdminUser};
use domain::models::event::Event;
use picpeak_admin::{AdminContext, Config, Session};

/// Fixed "now" so classifications are deterministic.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 10, 15, 30, 0).unwrap()
}

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let config = Config::load_for_test(overrides).expect("Failed to load test config");
    config.validate().expect("Test config should be valid");
    config
}

pub fn staff(id: i64, role: AdminRole) -> AdminUser {
    AdminUser {
        id,
        username: format!("staff{}", id),
        email: format!("staff{}@studio.test", id),
        role,
        is_active: true,
        last_login: None,
    }
}

pub fn test_context(role: AdminRole) -> AdminContext {
    AdminContext::from_config(
        &test_config(&[]),
        Session {
            user: staff(1, role),
        },
    )
}

/// Backend record for an active event expiring `days` from [`now`].
pub fn event_record(id: i64, days: i64) -> serde_json::Value {
    json!({
        "id": id,
        "slug": format!("wedding-{}", id),
        "event_name": "Anna & Ben",
        "event_type": "wedding",
        "event_date": "2024-08-31",
        "customer_email": "anna@example.com",
        "is_active": 1,
        "is_archived": 0,
        "require_password": "true",
        "share_link": format!("share{}", id),
        "color_theme": "wedding",
        "expires_at": (now() + Duration::days(days)).format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

pub fn event(id: i64, days: i64) -> Event {
    serde_json::from_value(event_record(id, days)).expect("Fixture should decode")
}
