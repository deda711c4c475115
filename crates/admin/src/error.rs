use thiserror::Error;

use domain::models::admin_user::{AdminRole, AdminUserError};
use domain::services::autosave::AutoSaveError;
use domain::services::concurrency::ConflictError;
use domain::services::feedback::ConfigError;
use domain::services::lifecycle::LifecycleError;

/// Errors surfaced to admin pages.
///
/// None of these are fatal; pages render a message and keep the last good
/// state.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Forbidden: role {0} cannot perform this action")]
    Forbidden(AdminRole),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error("Invalid settings: {0}")]
    Validation(#[from] ConfigError),

    #[error(transparent)]
    User(#[from] AdminUserError),

    #[error("Backend request failed: {0}")]
    Backend(String),
}

impl From<AdminError> for AutoSaveError {
    fn from(err: AdminError) -> Self {
        match err {
            // Retrying cannot fix a stale or invalid value
            AdminError::Conflict(_) | AdminError::Validation(_) | AdminError::Forbidden(_) => {
                AutoSaveError::Rejected(err.to_string())
            }
            other => AutoSaveError::Commit(other.to_string()),
        }
    }
}
