//! Gallery access policy: password protection and share links.

use shared::loose::LooseFlag;

/// Path prefix for galleries addressed by bare token.
pub const GALLERY_PATH_PREFIX: &str = "/gallery";

/// Link rendered when an event has no share link.
pub const PLACEHOLDER_LINK: &str = "#";

/// Canonical value of a possibly loosely typed `require_password` flag.
pub fn requires_password(flag: impl Into<LooseFlag>) -> bool {
    flag.into().normalize()
}

/// Whether a gallery is reachable without a password.
pub fn is_public(require_password: impl Into<LooseFlag>) -> bool {
    !requires_password(require_password)
}

/// How raw share tokens are turned into links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinkPolicy {
    pub path_prefix: String,
    pub placeholder: String,
}

impl Default for ShareLinkPolicy {
    fn default() -> Self {
        Self {
            path_prefix: GALLERY_PATH_PREFIX.to_string(),
            placeholder: PLACEHOLDER_LINK.to_string(),
        }
    }
}

impl ShareLinkPolicy {
    /// Resolves a raw share link.
    ///
    /// - empty or whitespace-only → placeholder
    /// - absolute URL (`scheme:...`) or root-relative path → unchanged
    /// - anything else → `{path_prefix}/{token}`
    ///
    /// Non-blank input is never trimmed, so distinct tokens give distinct
    /// links.
    pub fn resolve(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return self.placeholder.clone();
        }
        if raw.starts_with('/') || has_scheme(raw) {
            return raw.to_string();
        }
        format!("{}/{}", self.path_prefix.trim_end_matches('/'), raw)
    }
}

/// Resolves a share link with the default gallery prefix.
pub fn resolve_share_link(raw: &str) -> String {
    ShareLinkPolicy::default().resolve(raw)
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`,
/// terminated by `:`.
fn has_scheme(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}
