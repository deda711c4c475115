//! Domain models for the PicPeak admin.

pub mod admin_user;
pub mod event;
pub mod event_type;
pub mod feedback;
pub mod invitation;
pub mod theme;

pub use admin_user::{AdminRole, AdminUser, AdminUserError};
pub use event::{Event, EventDraft, EventPatch};
pub use event_type::{EventType, EventTypeError};
pub use feedback::FeedbackSettings;
pub use invitation::{AdminInvitation, CreateInvitationRequest, InvitationError, InvitationStatus};
pub use theme::{ThemeConfig, ThemeRegistry};
