//! Domain services for the PicPeak admin.
//!
//! Services hold the policy logic that operates on domain models. All of
//! them are synchronous and clock-free except the auto-saver.

pub mod access;
pub mod autosave;
pub mod concurrency;
pub mod expiration;
pub mod feedback;
pub mod lifecycle;
pub mod theme;

pub use access::{is_public, requires_password, resolve_share_link, ShareLinkPolicy};
pub use autosave::{spawn_autosaver, AutoSaveError, AutoSaveHandle, AutoSaveSettings, CommitSink, Debouncer};
pub use concurrency::{ensure_fresh, ConflictError, VersionToken};
pub use expiration::{can_extend, classify, Classification, ExpirationPolicy, ExpirationStatus};
pub use feedback::{ConfigError, FeedbackValidation};
pub use lifecycle::{display_status, DisplayStatus, LifecycleError, Transition};
pub use theme::{resolve_or_default, to_stored_value, ResolvedTheme, ThemeError};
