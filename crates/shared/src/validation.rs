//! Common validation utilities.

use validator::ValidationError;

lazy_static::lazy_static! {
    static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
    static ref CSS_LENGTH_REGEX: regex::Regex =
        regex::Regex::new(r"^(?:0|\d+(?:\.\d+)?(?:px|rem|em|%))$").unwrap();
    static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Minimum length of a gallery password.
pub const MIN_GALLERY_PASSWORD_LENGTH: usize = 6;

/// Validates a `#rgb` or `#rrggbb` colour value.
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be a hex value like #fff or #1a2b3c".into());
        Err(err)
    }
}

/// Validates a CSS length such as `8px`, `0.5rem` or `0`.
pub fn validate_css_length(value: &str) -> Result<(), ValidationError> {
    if CSS_LENGTH_REGEX.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("css_length");
        err.message = Some("Length must be a number with px, rem, em or % unit".into());
        Err(err)
    }
}

/// Validates a lowercase, hyphen-separated slug.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if SLUG_REGEX.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug");
        err.message = Some("Slug may only contain lowercase letters, digits and hyphens".into());
        Err(err)
    }
}

/// Validates that an optional count is present and strictly positive.
pub fn validate_positive(value: Option<i64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v > 0 => Ok(()),
        Some(_) => {
            let mut err = ValidationError::new("positive");
            err.message = Some("Value must be a positive integer".into());
            Err(err)
        }
        None => {
            let mut err = ValidationError::new("required");
            err.message = Some("Value is required".into());
            Err(err)
        }
    }
}

/// Validates a gallery password's minimum length.
pub fn validate_gallery_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() >= MIN_GALLERY_PASSWORD_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_length");
        err.message = Some(
            format!(
                "Password must be at least {} characters",
                MIN_GALLERY_PASSWORD_LENGTH
            )
            .into(),
        );
        Err(err)
    }
}
