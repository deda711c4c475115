//! Event type (category) models.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use shared::loose::deserialize_flag;
use shared::validation::validate_slug;

/// Errors from event type management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventTypeError {
    #[error("System event type '{0}' cannot be deleted, only deactivated")]
    SystemTypeProtected(String),
    #[error("Event type '{0}' is already inactive")]
    AlreadyInactive(String),
}

/// A named, orderable event category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct EventType {
    pub id: i64,

    #[validate(custom(function = "validate_slug"))]
    pub slug_prefix: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 16, message = "Emoji must be at most 16 characters"))]
    pub emoji: Option<String>,

    /// Preset applied to new events of this type.
    pub theme_preset: Option<String>,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_system: bool,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_active: bool,
}

impl EventType {
    /// Checks whether this type may be hard-deleted.
    pub fn ensure_deletable(&self) -> Result<(), EventTypeError> {
        if self.is_system {
            Err(EventTypeError::SystemTypeProtected(self.name.clone()))
        } else {
            Ok(())
        }
    }

    /// Returns the deactivated copy of this type.
    pub fn deactivate(&self) -> Result<EventType, EventTypeError> {
        if !self.is_active {
            return Err(EventTypeError::AlreadyInactive(self.name.clone()));
        }
        Ok(EventType {
            is_active: false,
            ..self.clone()
        })
    }
}

/// Sorts types for display: `display_order` ascending, then name.
pub fn sort_for_display(types: &mut [EventType]) {
    types.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_type(id: i64, name: &str, order: i32, is_system: bool) -> EventType {
        EventType {
            id,
            slug_prefix: name.to_lowercase(),
            name: name.to_string(),
            emoji: None,
            theme_preset: None,
            display_order: order,
            is_system,
            is_active: true,
        }
    }

    #[test]
    fn test_system_type_cannot_be_deleted() {
        let wedding = event_type(1, "Wedding", 1, true);
        assert_eq!(
            wedding.ensure_deletable(),
            Err(EventTypeError::SystemTypeProtected("Wedding".to_string()))
        );

        let deactivated = wedding.deactivate().unwrap();
        assert!(!deactivated.is_active);
        assert!(deactivated.is_system);
    }

    #[test]
    fn test_custom_type_can_be_deleted() {
        assert!(event_type(9, "Gala", 5, false).ensure_deletable().is_ok());
    }

    #[test]
    fn test_deactivate_twice() {
        let inactive = event_type(2, "Birthday", 2, true).deactivate().unwrap();
        assert_eq!(
            inactive.deactivate(),
            Err(EventTypeError::AlreadyInactive("Birthday".to_string()))
        );
    }

    #[test]
    fn test_sort_for_display() {
        let mut types = vec![
            event_type(1, "Wedding", 2, true),
            event_type(2, "corporate", 1, true),
            event_type(3, "Birthday", 2, true),
        ];
        sort_for_display(&mut types);
        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["corporate", "Birthday", "Wedding"]);
    }

    #[test]
    fn test_validation() {
        assert!(event_type(1, "Wedding", 1, true).validate().is_ok());

        let mut bad = event_type(1, "Wedding", 1, true);
        bad.slug_prefix = "Bad Prefix".to_string();
        assert!(bad.validate().is_err());
    }
}
