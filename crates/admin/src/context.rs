//! Explicit admin context.
//!
//! Policies, the theme registry and the signed-in session are passed in at
//! construction; nothing is read from global state.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use domain::models::admin_user::AdminUser;
use domain::models::event::Event;
use domain::services::access::ShareLinkPolicy;
use domain::services::autosave::AutoSaveSettings;
use domain::services::expiration::{self, Classification, ExpirationPolicy, ExpirationStatus};
use domain::services::lifecycle::{self, Transition};
use domain::services::theme::{self, ResolvedTheme, ThemeError};
use domain::models::theme::ThemeRegistry;

use crate::config::Config;
use crate::error::AdminError;
use crate::overview::{EventOverview, PolicyWarning};

/// The signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: AdminUser,
}

/// Everything admin pages need to apply gallery policy.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub expiration: ExpirationPolicy,
    pub share_links: ShareLinkPolicy,
    pub extension_days: i64,
    pub autosave: AutoSaveSettings,
    pub themes: ThemeRegistry,
    pub session: Session,
}

impl AdminContext {
    pub fn from_config(config: &Config, session: Session) -> Self {
        Self {
            expiration: config.expiration_policy(),
            share_links: config.share_link_policy(),
            extension_days: config.gallery.default_extension_days,
            autosave: config.autosave_settings(),
            themes: config.theme_registry(),
            session,
        }
    }

    /// Resolves an event's stored theme, never failing.
    pub fn resolve_theme(&self, stored: Option<&str>) -> (ResolvedTheme, Option<PolicyWarning>) {
        let (resolved, error) = theme::resolve_or_default(stored, &self.themes);
        let warning = error.map(|e| match e {
            ThemeError::Parse(err) => PolicyWarning::MalformedTheme {
                message: err.to_string(),
            },
            ThemeError::UnknownPreset(name) => PolicyWarning::UnknownThemePreset { name },
        });
        (resolved, warning)
    }

    /// Builds the overview of an already decoded event.
    pub fn event_overview(&self, event: &Event, now: DateTime<Utc>) -> EventOverview {
        let classification = self
            .expiration
            .classify(event.expires_at, now, event.is_archived);
        self.build_overview(event, classification, Vec::new(), now)
    }

    /// Builds the overview straight from a backend JSON record.
    ///
    /// Unlike [`AdminContext::event_overview`], a malformed `expires_at`
    /// is reported as a warning instead of being silently dropped.
    pub fn event_overview_from_json(
        &self,
        record: &serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<EventOverview, serde_json::Error> {
        let event = Event::deserialize(record)?;
        let mut warnings = Vec::new();

        let raw_expiry = match record.get("expires_at") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(raw)) => Some(raw.as_str()),
            Some(other) => {
                tracing::warn!(event_id = event.id, value = %other, "Non-string expires_at");
                warnings.push(PolicyWarning::MalformedExpiry {
                    message: format!("expected a date string, got {}", other),
                });
                None
            }
        };
        let (classification, parse_error) =
            expiration::classify_raw(raw_expiry, now, event.is_archived, &self.expiration);

        warnings.extend(parse_error.map(|e| PolicyWarning::MalformedExpiry {
            message: e.to_string(),
        }));
        Ok(self.build_overview(&event, classification, warnings, now))
    }

    fn build_overview(
        &self,
        event: &Event,
        classification: Classification,
        mut warnings: Vec<PolicyWarning>,
        now: DateTime<Utc>,
    ) -> EventOverview {
        let (theme, theme_warning) = self.resolve_theme(event.color_theme.as_deref());
        warnings.extend(theme_warning);

        let may_edit = self.session.user.role.can_edit_events();

        EventOverview {
            event_id: event.id,
            status: lifecycle::display_status(event, now, &self.expiration),
            expiration: classification.status,
            days_remaining: classification.days_remaining,
            show_expiring_banner: classification.status == ExpirationStatus::Expiring,
            can_extend: may_edit && expiration::can_extend(&classification),
            extension_days: self.extension_days,
            can_archive: may_edit && !event.is_archived,
            is_public: !event.require_password,
            share_url: self.share_links.resolve(&event.share_link),
            theme,
            warnings,
        }
    }

    /// Extends `event` by the configured number of days.
    pub fn extend_event(&self, event: &Event) -> Result<Transition, AdminError> {
        self.ensure_can_edit()?;
        Ok(lifecycle::extend(event, self.extension_days)?)
    }

    /// Archives `event` at `now`.
    pub fn archive_event(&self, event: &Event, now: DateTime<Utc>) -> Result<Transition, AdminError> {
        self.ensure_can_edit()?;
        Ok(lifecycle::archive(event, now))
    }

    /// Deactivates another staff account on behalf of the session user.
    pub fn deactivate_user(&self, target: &AdminUser) -> Result<AdminUser, AdminError> {
        let updated = self.session.user.deactivate(target)?;
        tracing::info!(
            actor_id = self.session.user.id,
            target_id = target.id,
            "Deactivated admin user"
        );
        Ok(updated)
    }

    fn ensure_can_edit(&self) -> Result<(), AdminError> {
        let role = self.session.user.role;
        if role.can_edit_events() {
            Ok(())
        } else {
            Err(AdminError::Forbidden(role))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use domain::models::admin_user::AdminRole;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn context(role: AdminRole) -> AdminContext {
        let config = Config::load_for_test(&[]).expect("Failed to load config");
        AdminContext::from_config(
            &config,
            Session {
                user: AdminUser {
                    id: 1,
                    username: "studio".to_string(),
                    email: "studio@example.com".to_string(),
                    role,
                    is_active: true,
                    last_login: None,
                },
            },
        )
    }

    fn event() -> Event {
        serde_json::from_value(json!({
            "id": 5,
            "slug": "gala",
            "event_name": "Gala",
            "is_active": true,
            "require_password": "1",
            "share_link": "tok123",
            "color_theme": "dark",
            "expires_at": (now() + Duration::days(3)).to_rfc3339(),
        }))
        .unwrap()
    }

    #[test]
    fn test_overview_combines_policies() {
        let overview = context(AdminRole::Admin).event_overview(&event(), now());

        assert_eq!(overview.expiration, ExpirationStatus::Expiring);
        assert_eq!(overview.days_remaining, Some(3));
        assert!(overview.show_expiring_banner);
        assert!(overview.can_extend);
        assert!(!overview.is_public);
        assert_eq!(overview.share_url, "/gallery/tok123");
        assert_eq!(overview.theme.preset_name, "dark");
        assert!(overview.warnings.is_empty());
    }

    #[test]
    fn test_viewer_cannot_extend_or_archive() {
        let ctx = context(AdminRole::Viewer);
        let overview = ctx.event_overview(&event(), now());
        assert!(!overview.can_extend);
        assert!(!overview.can_archive);

        assert!(matches!(
            ctx.extend_event(&event()),
            Err(AdminError::Forbidden(AdminRole::Viewer))
        ));
        assert!(matches!(
            ctx.archive_event(&event(), now()),
            Err(AdminError::Forbidden(AdminRole::Viewer))
        ));
    }

    #[test]
    fn test_unknown_theme_warns() {
        let mut event = event();
        event.color_theme = Some("retro".to_string());
        let overview = context(AdminRole::Admin).event_overview(&event, now());
        assert_eq!(overview.theme.preset_name, "default");
        assert_eq!(
            overview.warnings,
            vec![PolicyWarning::UnknownThemePreset {
                name: "retro".to_string()
            }]
        );
    }

    #[test]
    fn test_overview_from_json_reports_bad_expiry() {
        let record = json!({
            "id": 9,
            "slug": "x",
            "event_name": "X",
            "is_active": true,
            "share_link": "",
            "expires_at": "soon",
            "color_theme": "{not json"
        });
        let overview = context(AdminRole::Admin)
            .event_overview_from_json(&record, now())
            .unwrap();

        assert_eq!(overview.expiration, ExpirationStatus::Active);
        assert_eq!(overview.days_remaining, None);
        assert_eq!(overview.share_url, "#");
        assert!(overview.is_public);
        assert_eq!(overview.warnings.len(), 2);
        assert!(matches!(overview.warnings[0], PolicyWarning::MalformedExpiry { .. }));
        assert!(matches!(overview.warnings[1], PolicyWarning::MalformedTheme { .. }));
    }

    #[test]
    fn test_overview_from_json_reports_non_string_expiry() {
        let ctx = context(AdminRole::Admin);
        let mut record = json!({
            "id": 11,
            "slug": "y",
            "event_name": "Y",
            "is_active": true,
            "expires_at": 42
        });

        let overview = ctx.event_overview_from_json(&record, now()).unwrap();
        assert_eq!(overview.expiration, ExpirationStatus::Active);
        assert_eq!(overview.days_remaining, None);
        assert_eq!(
            overview.warnings,
            vec![PolicyWarning::MalformedExpiry {
                message: "expected a date string, got 42".to_string()
            }]
        );

        record["expires_at"] = serde_json::Value::Null;
        let overview = ctx.event_overview_from_json(&record, now()).unwrap();
        assert!(overview.warnings.is_empty());
    }

    #[test]
    fn test_deactivate_user_uses_session() {
        let ctx = context(AdminRole::Admin);
        let target = AdminUser {
            id: 2,
            username: "helper".to_string(),
            email: "helper@example.com".to_string(),
            role: AdminRole::Editor,
            is_active: true,
            last_login: None,
        };
        assert!(!ctx.deactivate_user(&target).unwrap().is_active);

        let me = ctx.session.user.clone();
        assert!(matches!(ctx.deactivate_user(&me), Err(AdminError::User(_))));
    }
}
