//! Auto-saving of per-event feedback settings.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use domain::models::feedback::FeedbackSettings;
use domain::services::autosave::{AutoSaveError, CommitSink};
use domain::services::concurrency::{ensure_fresh, VersionToken};
use domain::services::feedback;

use crate::error::AdminError;

/// Backend endpoints for an event's feedback settings.
#[async_trait]
pub trait FeedbackSettingsApi: Send + Sync {
    async fn fetch(&self, event_id: i64) -> Result<FeedbackSettings, AdminError>;
    async fn save(&self, event_id: i64, settings: &FeedbackSettings) -> Result<(), AdminError>;
}

/// Commits edited settings, refusing invalid values and stale overwrites.
pub struct FeedbackSettingsSaver<A> {
    api: Arc<A>,
    event_id: i64,
    loaded: Mutex<VersionToken>,
}

impl<A: FeedbackSettingsApi> FeedbackSettingsSaver<A> {
    /// Loads the current settings and remembers their version.
    pub async fn load(api: Arc<A>, event_id: i64) -> Result<(Self, FeedbackSettings), AdminError> {
        let settings = api.fetch(event_id).await?;
        let saver = Self {
            api,
            event_id,
            loaded: Mutex::new(VersionToken::of(&settings)),
        };
        Ok((saver, settings))
    }

    fn loaded_version(&self) -> Result<VersionToken, AdminError> {
        self.loaded
            .lock()
            .map(|token| token.clone())
            .map_err(|_| AdminError::Backend("version lock poisoned".to_string()))
    }

    fn set_loaded_version(&self, token: VersionToken) -> Result<(), AdminError> {
        let mut guard = self
            .loaded
            .lock()
            .map_err(|_| AdminError::Backend("version lock poisoned".to_string()))?;
        *guard = token;
        Ok(())
    }

    async fn save(&self, settings: &FeedbackSettings) -> Result<(), AdminError> {
        let inactive = feedback::validate(settings).into_result()?;
        if !inactive.is_empty() {
            tracing::debug!(event_id = self.event_id, ?inactive, "Saving with inert toggles");
        }

        let current = self.api.fetch(self.event_id).await?;
        ensure_fresh(&self.loaded_version()?, &current)?;

        self.api.save(self.event_id, settings).await?;
        self.set_loaded_version(VersionToken::of(settings))?;
        tracing::info!(event_id = self.event_id, "Feedback settings saved");
        Ok(())
    }
}

#[async_trait]
impl<A: FeedbackSettingsApi + 'static> CommitSink<FeedbackSettings> for FeedbackSettingsSaver<A> {
    async fn commit(&self, value: &FeedbackSettings) -> Result<(), AutoSaveError> {
        self.save(value).await.map_err(AutoSaveError::from)
    }
}
