//! Render-ready view of one event, combining every gallery policy.

use serde::Serialize;

use domain::services::expiration::ExpirationStatus;
use domain::services::lifecycle::DisplayStatus;
use domain::services::theme::ResolvedTheme;

/// Non-fatal problem found while building a view. Shown as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyWarning {
    MalformedExpiry { message: String },
    MalformedTheme { message: String },
    UnknownThemePreset { name: String },
}

impl std::fmt::Display for PolicyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyWarning::MalformedExpiry { message } => {
                write!(f, "Expiration date could not be read ({})", message)
            }
            PolicyWarning::MalformedTheme { message } => {
                write!(f, "Theme settings are damaged, showing default theme ({})", message)
            }
            PolicyWarning::UnknownThemePreset { name } => {
                write!(f, "Theme '{}' no longer exists, showing default theme", name)
            }
        }
    }
}

/// Everything an event page needs to render its header, banners and links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOverview {
    pub event_id: i64,
    pub status: DisplayStatus,
    pub expiration: ExpirationStatus,
    pub days_remaining: Option<i64>,
    pub show_expiring_banner: bool,
    pub can_extend: bool,
    pub extension_days: i64,
    pub can_archive: bool,
    pub is_public: bool,
    pub share_url: String,
    pub theme: ResolvedTheme,
    pub warnings: Vec<PolicyWarning>,
}
