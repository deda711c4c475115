use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use validator::Validate;

use domain::models::theme::{ThemeConfig, ThemeRegistry};
use domain::services::access::ShareLinkPolicy;
use domain::services::autosave::AutoSaveSettings;
use domain::services::expiration::ExpirationPolicy;
use domain::services::lifecycle::MAX_EXTENSION_DAYS;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub logging: LoggingConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub autosave: AutoSaveConfig,
    /// Extra presets merged over the built-in registry
    #[serde(default)]
    pub themes: BTreeMap<String, ThemePresetConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_share_path_prefix")]
    pub share_path_prefix: String,

    #[serde(default = "default_placeholder_link")]
    pub placeholder_link: String,

    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,

    #[serde(default = "default_extension_days")]
    pub default_extension_days: i64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            share_path_prefix: default_share_path_prefix(),
            placeholder_link: default_placeholder_link(),
            expiring_soon_days: default_expiring_soon_days(),
            default_extension_days: default_extension_days(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutoSaveConfig {
    #[serde(default = "default_quiet_secs")]
    pub quiet_secs: u64,

    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            quiet_secs: default_quiet_secs(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

/// Theme preset as written in config files.
///
/// Keys are snake_case because config sources are case-insensitive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemePresetConfig {
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub border_radius: Option<String>,
    pub font_family: Option<String>,
    pub header_style: Option<String>,
    pub gallery_layout: Option<String>,
    pub logo_url: Option<String>,
}

impl From<ThemePresetConfig> for ThemeConfig {
    fn from(preset: ThemePresetConfig) -> Self {
        ThemeConfig {
            primary_color: preset.primary_color,
            accent_color: preset.accent_color,
            background_color: preset.background_color,
            text_color: preset.text_color,
            border_radius: preset.border_radius,
            font_family: preset.font_family,
            header_style: preset.header_style,
            gallery_layout: preset.gallery_layout,
            logo_url: preset.logo_url,
            extra: BTreeMap::new(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_share_path_prefix() -> String {
    "/gallery".to_string()
}
fn default_placeholder_link() -> String {
    "#".to_string()
}
fn default_expiring_soon_days() -> i64 {
    7
}
fn default_extension_days() -> i64 {
    7
}
fn default_quiet_secs() -> u64 {
    2
}
fn default_max_wait_secs() -> u64 {
    10
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Invalid theme preset '{name}': {reason}")]
    InvalidPreset { name: String, reason: String },
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with PICPEAK__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("PICPEAK").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Defaults are embedded so tests do not depend on the working directory.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r##"
            [logging]
            level = "debug"
            format = "compact"

            [gallery]
            share_path_prefix = "/gallery"
            placeholder_link = "#"
            expiring_soon_days = 7
            default_extension_days = 7

            [autosave]
            quiet_secs = 2
            max_wait_secs = 10
        "##;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.gallery.expiring_soon_days < 1 {
            return Err(ConfigValidationError::InvalidValue(
                "gallery.expiring_soon_days must be at least 1".to_string(),
            ));
        }

        if !(1..=MAX_EXTENSION_DAYS).contains(&self.gallery.default_extension_days) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "gallery.default_extension_days must be between 1 and {}",
                MAX_EXTENSION_DAYS
            )));
        }

        if !self.gallery.share_path_prefix.starts_with('/') {
            return Err(ConfigValidationError::InvalidValue(
                "gallery.share_path_prefix must start with '/'".to_string(),
            ));
        }

        if self.autosave.quiet_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "autosave.quiet_secs cannot be 0".to_string(),
            ));
        }

        if self.autosave.max_wait_secs < self.autosave.quiet_secs {
            return Err(ConfigValidationError::InvalidValue(
                "autosave.max_wait_secs cannot be less than autosave.quiet_secs".to_string(),
            ));
        }

        for (name, preset) in &self.themes {
            ThemeConfig::from(preset.clone())
                .validate()
                .map_err(|e| ConfigValidationError::InvalidPreset {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }

    pub fn expiration_policy(&self) -> ExpirationPolicy {
        ExpirationPolicy {
            expiring_soon_days: self.gallery.expiring_soon_days,
        }
    }

    pub fn share_link_policy(&self) -> ShareLinkPolicy {
        ShareLinkPolicy {
            path_prefix: self.gallery.share_path_prefix.clone(),
            placeholder: self.gallery.placeholder_link.clone(),
        }
    }

    pub fn autosave_settings(&self) -> AutoSaveSettings {
        AutoSaveSettings {
            quiet: Duration::from_secs(self.autosave.quiet_secs),
            max_wait: Duration::from_secs(self.autosave.max_wait_secs),
        }
    }

    /// Built-in presets with configured presets layered on top.
    pub fn theme_registry(&self) -> ThemeRegistry {
        self.themes
            .iter()
            .fold(ThemeRegistry::builtin(), |registry, (name, preset)| {
                registry.with_preset(name.clone(), preset.clone().into())
            })
    }
}
