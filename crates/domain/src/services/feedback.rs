//! Feedback settings validation.

use serde::Serialize;
use thiserror::Error;

use shared::validation::validate_positive;

use crate::models::feedback::FeedbackSettings;

/// A field-level configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

/// Outcome of validating feedback settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackValidation {
    /// Inconsistencies that block saving.
    pub errors: Vec<ConfigError>,
    /// Toggles that are on but inert because feedback is disabled.
    pub inactive: Vec<&'static str>,
}

impl FeedbackValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First error, or the inactive-toggle hints when valid.
    pub fn into_result(self) -> Result<Vec<&'static str>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.inactive),
        }
    }
}

/// Validates the internal consistency of `settings`. Does not mutate.
pub fn validate(settings: &FeedbackSettings) -> FeedbackValidation {
    let mut result = FeedbackValidation::default();

    if settings.enable_rate_limiting {
        let limits = [
            ("rate_limit_window_minutes", settings.rate_limit_window_minutes),
            ("rate_limit_max_requests", settings.rate_limit_max_requests),
        ];
        for (field, value) in limits {
            if let Err(e) = validate_positive(value) {
                let message = e
                    .message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                result.errors.push(ConfigError { field, message });
            }
        }
    }

    if !settings.feedback_enabled {
        result.inactive = settings
            .dependent_toggles()
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(field, _)| field)
            .collect();
    }

    result
}
