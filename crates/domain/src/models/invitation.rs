//! Staff invitation models.
//!
//! Invitations are single-use tokens with an expiry. Status is derived from
//! timestamps rather than stored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use super::admin_user::AdminRole;

/// Default expiration days for invitations.
pub const DEFAULT_EXPIRATION_DAYS: i32 = 7;

/// Maximum expiration days for invitations.
pub const MAX_EXPIRATION_DAYS: i32 = 30;

/// Invitation status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
}

/// Errors from accepting an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvitationError {
    #[error("Invitation has already been accepted")]
    AlreadyAccepted,
    #[error("Invitation expired at {0}")]
    Expired(DateTime<Utc>),
}

/// Request to invite a new staff member.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInvitationRequest {
    /// Email address of the invitee.
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    /// Role to assign when accepted. Cannot be super_admin.
    #[validate(custom(function = "validate_invitable_role"))]
    pub role: AdminRole,

    /// Days until expiration (1-30, default: 7).
    #[validate(range(min = 1, max = 30, message = "Expiration must be between 1 and 30 days"))]
    pub expires_in_days: Option<i32>,
}

fn validate_invitable_role(role: &AdminRole) -> Result<(), validator::ValidationError> {
    if *role == AdminRole::SuperAdmin {
        let mut err = validator::ValidationError::new("role");
        err.message = Some("Super admins cannot be invited".into());
        return Err(err);
    }
    Ok(())
}

impl CreateInvitationRequest {
    /// Materializes the invitation with a fresh token.
    pub fn into_invitation(self, id: i64, now: DateTime<Utc>) -> AdminInvitation {
        let days = self.expires_in_days.unwrap_or(DEFAULT_EXPIRATION_DAYS);
        AdminInvitation {
            id,
            email: self.email,
            role: self.role,
            token: shared::crypto::generate_token(shared::crypto::TOKEN_LENGTH),
            expires_at: now + Duration::days(i64::from(days)),
            accepted_at: None,
            created_at: now,
        }
    }
}

/// A pending or settled staff invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminInvitation {
    pub id: i64,
    pub email: String,
    pub role: AdminRole,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AdminInvitation {
    /// Status at `now`. Acceptance wins over expiry.
    pub fn status(&self, now: DateTime<Utc>) -> InvitationStatus {
        if self.accepted_at.is_some() {
            InvitationStatus::Accepted
        } else if self.expires_at <= now {
            InvitationStatus::Expired
        } else {
            InvitationStatus::Pending
        }
    }

    /// Returns the accepted copy of this invitation.
    pub fn accept(&self, now: DateTime<Utc>) -> Result<AdminInvitation, InvitationError> {
        match self.status(now) {
            InvitationStatus::Accepted => Err(InvitationError::AlreadyAccepted),
            InvitationStatus::Expired => Err(InvitationError::Expired(self.expires_at)),
            InvitationStatus::Pending => Ok(AdminInvitation {
                accepted_at: Some(now),
                ..self.clone()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn request(expires_in_days: Option<i32>) -> CreateInvitationRequest {
        CreateInvitationRequest {
            email: SafeEmail().fake(),
            role: AdminRole::Editor,
            expires_in_days,
        }
    }

    #[test]
    fn test_create_invitation_request_validation() {
        assert!(request(Some(7)).validate().is_ok());
        assert!(request(None).validate().is_ok());
        assert!(request(Some(0)).validate().is_err());
        assert!(request(Some(31)).validate().is_err());

        let mut super_admin = request(None);
        super_admin.role = AdminRole::SuperAdmin;
        assert!(super_admin.validate().is_err());

        let mut bad_email = request(None);
        bad_email.email = "nope".to_string();
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_into_invitation_defaults() {
        let invitation = request(None).into_invitation(1, now());
        assert_eq!(invitation.expires_at, now() + Duration::days(7));
        assert_eq!(invitation.token.len(), shared::crypto::TOKEN_LENGTH);
        assert_eq!(invitation.status(now()), InvitationStatus::Pending);
    }

    #[test]
    fn test_status_transitions() {
        let invitation = request(Some(1)).into_invitation(1, now());
        assert_eq!(invitation.status(now()), InvitationStatus::Pending);
        assert_eq!(
            invitation.status(now() + Duration::days(1)),
            InvitationStatus::Expired
        );

        let accepted = invitation.accept(now()).unwrap();
        assert_eq!(accepted.status(now()), InvitationStatus::Accepted);
        // Acceptance is final even after the expiry passes
        assert_eq!(
            accepted.status(now() + Duration::days(30)),
            InvitationStatus::Accepted
        );
    }

    #[test]
    fn test_accept_is_single_use() {
        let invitation = request(None).into_invitation(1, now());
        let accepted = invitation.accept(now()).unwrap();
        assert_eq!(
            accepted.accept(now()),
            Err(InvitationError::AlreadyAccepted)
        );
    }

    #[test]
    fn test_accept_expired() {
        let invitation = request(Some(2)).into_invitation(1, now());
        let later = now() + Duration::days(3);
        assert_eq!(
            invitation.accept(later),
            Err(InvitationError::Expired(invitation.expires_at))
        );
    }
}
