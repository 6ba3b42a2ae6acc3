//! Slug normalization and validation for reference entities.
//!
//! Categories are addressed by slug in catalog URLs; colors and sizes
//! carry a slug-like `value` field that must stay unique and URL-safe.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

/// Lowercase alphanumeric segments joined by single hyphens.
fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap())
}

/// Validate that `value` is a well-formed slug.
pub fn validate_slug(value: &str) -> Result<(), CoreError> {
    if slug_pattern().is_match(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{value}' is not a valid slug (lowercase letters, digits and hyphens only)"
        )))
    }
}

/// Derive a slug from a display name.
///
/// Lowercases, maps whitespace and underscores to hyphens, drops every
/// other non-alphanumeric character, and collapses hyphen runs.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;

    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
