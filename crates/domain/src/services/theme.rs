//! Theme resolution.
//!
//! An event's `color_theme` holds either a preset key or a serialized
//! [`ThemeConfig`]. Resolution maps it back to a config and the name of the
//! preset it corresponds to (or `"custom"`).

use serde::Serialize;
use thiserror::Error;

use crate::models::theme::{ThemeConfig, ThemeRegistry, CUSTOM_PRESET, DEFAULT_PRESET};

/// Error type for theme resolution.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Malformed theme JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown theme preset: {0}")]
    UnknownPreset(String),
}

/// A resolved theme and the preset it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTheme {
    pub config: ThemeConfig,
    pub preset_name: String,
}

impl ResolvedTheme {
    fn default_from(registry: &ThemeRegistry) -> Self {
        Self {
            config: registry.default_config().clone(),
            preset_name: DEFAULT_PRESET.to_string(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.preset_name == CUSTOM_PRESET
    }
}

/// Resolves a stored theme value against the preset registry.
pub fn resolve(stored: Option<&str>, registry: &ThemeRegistry) -> Result<ResolvedTheme, ThemeError> {
    let stored = match stored.map(str::trim) {
        None | Some("") => return Ok(ResolvedTheme::default_from(registry)),
        Some(s) => s,
    };

    if stored.starts_with('{') {
        let config: ThemeConfig = serde_json::from_str(stored)?;
        let preset_name = registry
            .find_matching(&config)
            .unwrap_or(CUSTOM_PRESET)
            .to_string();
        return Ok(ResolvedTheme {
            config,
            preset_name,
        });
    }

    registry
        .get(stored)
        .map(|config| ResolvedTheme {
            config: config.clone(),
            preset_name: stored.to_string(),
        })
        .ok_or_else(|| ThemeError::UnknownPreset(stored.to_string()))
}

/// Resolves a stored theme, falling back to the `default` preset on error.
///
/// The error (if any) is returned so the caller can surface a warning;
/// rendering always gets a usable theme.
pub fn resolve_or_default(
    stored: Option<&str>,
    registry: &ThemeRegistry,
) -> (ResolvedTheme, Option<ThemeError>) {
    match resolve(stored, registry) {
        Ok(resolved) => (resolved, None),
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to default theme");
            (ResolvedTheme::default_from(registry), Some(e))
        }
    }
}

/// The value to persist for `config`: its preset key when it matches one,
/// otherwise its canonical JSON.
pub fn to_stored_value(config: &ThemeConfig, registry: &ThemeRegistry) -> String {
    match registry.find_matching(config) {
        Some(name) => name.to_string(),
        None => config.canonical_json(),
    }
}
