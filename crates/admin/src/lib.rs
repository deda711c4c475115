//! Admin-side host for the PicPeak gallery policies.
//!
//! Wires configuration, logging and the signed-in session into an
//! [`AdminContext`] that admin pages query for event overviews and
//! lifecycle actions.

pub mod config;
pub mod context;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod overview;

pub use config::Config;
pub use context::{AdminContext, Session};
pub use error::AdminError;
pub use feedback::{FeedbackSettingsApi, FeedbackSettingsSaver};
pub use overview::{EventOverview, PolicyWarning};

/// Loads `.env`, configuration and logging, then builds the context for
/// `session`.
pub fn bootstrap(session: Session) -> anyhow::Result<AdminContext> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    if logging::init_logging(&config.logging).is_err() {
        tracing::debug!("Global subscriber already installed, keeping it");
    }

    tracing::info!(
        expiring_soon_days = config.gallery.expiring_soon_days,
        presets = config.theme_registry().len(),
        "PicPeak admin context ready"
    );
    Ok(AdminContext::from_config(&config, session))
}
