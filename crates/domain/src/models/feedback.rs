//! Guest feedback settings for an event.

use serde::{Deserialize, Serialize};

use shared::loose::deserialize_flag;

/// Per-event configuration of guest ratings, likes, comments and favorites.
///
/// Edited as a whole and persisted atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackSettings {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub feedback_enabled: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub allow_ratings: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub allow_likes: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub allow_comments: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub allow_favorites: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub require_name_email: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub moderate_comments: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub show_feedback_count: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub enable_rate_limiting: bool,
    #[serde(default)]
    pub rate_limit_window_minutes: Option<i64>,
    #[serde(default)]
    pub rate_limit_max_requests: Option<i64>,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            feedback_enabled: false,
            allow_ratings: true,
            allow_likes: true,
            allow_comments: true,
            allow_favorites: true,
            require_name_email: false,
            moderate_comments: true,
            show_feedback_count: true,
            enable_rate_limiting: false,
            rate_limit_window_minutes: Some(60),
            rate_limit_max_requests: Some(10),
        }
    }
}

impl FeedbackSettings {
    /// Names and values of toggles that only take effect while feedback is on.
    pub fn dependent_toggles(&self) -> [(&'static str, bool); 5] {
        [
            ("allow_ratings", self.allow_ratings),
            ("allow_likes", self.allow_likes),
            ("allow_comments", self.allow_comments),
            ("allow_favorites", self.allow_favorites),
            ("moderate_comments", self.moderate_comments),
        ]
    }
}
