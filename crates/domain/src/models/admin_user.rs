//! Admin (staff) account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::loose::deserialize_flag;

/// Role assigned to a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Editor,
    Viewer,
}

impl AdminRole {
    /// Whether this role may manage other staff accounts.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, AdminRole::SuperAdmin | AdminRole::Admin)
    }

    /// Whether this role may change events (extend, archive, edit settings).
    pub fn can_edit_events(&self) -> bool {
        !matches!(self, AdminRole::Viewer)
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::SuperAdmin => write!(f, "super_admin"),
            AdminRole::Admin => write!(f, "admin"),
            AdminRole::Editor => write!(f, "editor"),
            AdminRole::Viewer => write!(f, "viewer"),
        }
    }
}

/// Errors from staff account actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminUserError {
    #[error("You cannot deactivate your own account")]
    SelfDeactivation,
    #[error("User {0} is already inactive")]
    AlreadyInactive(i64),
    #[error("Role {0} may not manage users")]
    Forbidden(AdminRole),
}

/// A staff account. Never hard-deleted; deactivation flips `is_active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "shared::time::deserialize_lenient")]
    pub last_login: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// Returns the deactivated copy of `target`, performed by `self`.
    pub fn deactivate(&self, target: &AdminUser) -> Result<AdminUser, AdminUserError> {
        if !self.role.can_manage_users() {
            return Err(AdminUserError::Forbidden(self.role));
        }
        if self.id == target.id {
            return Err(AdminUserError::SelfDeactivation);
        }
        if !target.is_active {
            return Err(AdminUserError::AlreadyInactive(target.id));
        }

        Ok(AdminUser {
            is_active: false,
            ..target.clone()
        })
    }
}
