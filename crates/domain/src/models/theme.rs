//! Gallery theme configuration and the preset registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::validation::{validate_css_length, validate_hex_color};

/// Name of the preset every registry must contain.
pub const DEFAULT_PRESET: &str = "default";

/// Preset name reported for configurations matching no preset.
pub const CUSTOM_PRESET: &str = "custom";

/// Structured colour/layout configuration for a gallery.
///
/// All fields are optional so partial configurations stored by older admin
/// versions still deserialize. Unrecognized keys are kept in `extra` so a
/// config survives a decode/encode cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_hex_color"))]
    pub primary_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_hex_color"))]
    pub accent_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_hex_color"))]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_hex_color"))]
    pub text_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_css_length"))]
    pub border_radius: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_layout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2048, message = "Logo URL must be at most 2048 characters"))]
    pub logo_url: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ThemeConfig {
    /// Deterministic JSON encoding used for storage and structural comparison.
    pub fn canonical_json(&self) -> String {
        // Struct fields serialize in declaration order, `extra` in key order.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Returns a new config with every field set in `patch` taking precedence.
    pub fn merged_with(&self, patch: &ThemeConfig) -> ThemeConfig {
        fn pick(base: &Option<String>, over: &Option<String>) -> Option<String> {
            over.clone().or_else(|| base.clone())
        }

        let mut extra = self.extra.clone();
        extra.extend(patch.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        ThemeConfig {
            primary_color: pick(&self.primary_color, &patch.primary_color),
            accent_color: pick(&self.accent_color, &patch.accent_color),
            background_color: pick(&self.background_color, &patch.background_color),
            text_color: pick(&self.text_color, &patch.text_color),
            border_radius: pick(&self.border_radius, &patch.border_radius),
            font_family: pick(&self.font_family, &patch.font_family),
            header_style: pick(&self.header_style, &patch.header_style),
            gallery_layout: pick(&self.gallery_layout, &patch.gallery_layout),
            logo_url: pick(&self.logo_url, &patch.logo_url),
            extra,
        }
    }
}

fn preset(
    primary: &str,
    accent: &str,
    background: &str,
    text: &str,
    radius: &str,
    font: &str,
    layout: &str,
) -> ThemeConfig {
    ThemeConfig {
        primary_color: Some(primary.to_string()),
        accent_color: Some(accent.to_string()),
        background_color: Some(background.to_string()),
        text_color: Some(text.to_string()),
        border_radius: Some(radius.to_string()),
        font_family: Some(font.to_string()),
        header_style: Some("standard".to_string()),
        gallery_layout: Some(layout.to_string()),
        logo_url: None,
        extra: BTreeMap::new(),
    }
}

/// Registry of named theme presets.
///
/// Always contains [`DEFAULT_PRESET`]; iteration is in key order.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeRegistry {
    presets: BTreeMap<String, ThemeConfig>,
}

impl ThemeRegistry {
    /// The presets shipped with the product.
    pub fn builtin() -> Self {
        let presets = [
            ("default", preset("#5C8762", "#22c55e", "#fafafa", "#171717", "8px", "Inter, sans-serif", "grid")),
            ("elegant", preset("#8B7355", "#D4AF37", "#FAF9F6", "#2C2C2C", "4px", "Playfair Display, serif", "masonry")),
            ("modern", preset("#2563EB", "#F59E0B", "#FFFFFF", "#111827", "12px", "Inter, sans-serif", "grid")),
            ("minimal", preset("#000000", "#666666", "#FFFFFF", "#000000", "0", "Helvetica, sans-serif", "grid")),
            ("dark", preset("#A78BFA", "#F472B6", "#111111", "#F5F5F5", "8px", "Inter, sans-serif", "masonry")),
            ("wedding", preset("#B76E79", "#F7E7CE", "#FFF9F5", "#3D3D3D", "16px", "Cormorant Garamond, serif", "masonry")),
            ("birthday", preset("#EC4899", "#FACC15", "#FFFBEB", "#1F2937", "16px", "Poppins, sans-serif", "grid")),
            ("corporate", preset("#1E3A8A", "#0EA5E9", "#F8FAFC", "#0F172A", "4px", "Roboto, sans-serif", "grid")),
        ];

        Self {
            presets: presets
                .into_iter()
                .map(|(name, config)| (name.to_string(), config))
                .collect(),
        }
    }

    /// Builds a registry from host-supplied presets.
    ///
    /// A missing `default` entry is filled from the built-in one.
    pub fn from_presets(presets: BTreeMap<String, ThemeConfig>) -> Self {
        let mut registry = Self { presets };
        if !registry.presets.contains_key(DEFAULT_PRESET) {
            let fallback = Self::builtin().default_config().clone();
            registry.presets.insert(DEFAULT_PRESET.to_string(), fallback);
        }
        registry
    }

    /// Adds or replaces a preset, returning the updated registry.
    pub fn with_preset(mut self, name: impl Into<String>, config: ThemeConfig) -> Self {
        self.presets.insert(name.into(), config);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ThemeConfig> {
        self.presets.get(name)
    }

    /// The `default` preset.
    pub fn default_config(&self) -> &ThemeConfig {
        // Every constructor guarantees the entry.
        &self.presets[DEFAULT_PRESET]
    }

    /// First preset (in key order) structurally equal to `config`.
    pub fn find_matching(&self, config: &ThemeConfig) -> Option<&str> {
        self.presets
            .iter()
            .find(|(_, preset)| *preset == config)
            .map(|(name, _)| name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
