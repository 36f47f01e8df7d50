//! Intent filter patterns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The implicit default category.
///
/// Every filter is matched with this category, so declaring it in a role
/// definition is rejected as a schema violation.
pub const CATEGORY_DEFAULT: &str = "android.intent.category.DEFAULT";

/// An action plus optional categories and data matcher, used both as a
/// structural requirement on a component and as a default-handler binding
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntentFilterPattern {
    /// The action to match.
    pub action: String,

    /// The categories to match, in declaration order, unique. Never
    /// contains [`CATEGORY_DEFAULT`].
    pub categories: Vec<String>,

    /// The data scheme to match, if any.
    pub data_scheme: Option<String>,

    /// The data MIME type to match, if any.
    pub data_mime_type: Option<String>,
}

impl fmt::Display for IntentFilterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action '{}'", self.action)?;

        if !self.categories.is_empty() {
            write!(f, " categories [{}]", self.categories.join(", "))?;
        }

        if let Some(scheme) = &self.data_scheme {
            write!(f, " scheme '{}'", scheme)?;
        }

        if let Some(mime_type) = &self.data_mime_type {
            write!(f, " type '{}'", mime_type)?;
        }

        Ok(())
    }
}

/// Check a MIME type against the minimal syntactic contract of the
/// consuming platform's MIME parser: non-empty type, a `/` separator, and
/// a subtype of at least one character.
///
/// Accepting anything looser here would defer the failure to
/// role-application time, where it surfaces as a malformed-type error far
/// from the offending definition.
pub fn is_valid_mime_type(value: &str) -> bool {
    match value.find('/') {
        Some(slash_index) => slash_index > 0 && value.len() >= slash_index + 2,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_validation() {
        assert!(is_valid_mime_type("text/plain"));
        assert!(is_valid_mime_type("application/*"));
        assert!(is_valid_mime_type("a/b"));

        assert!(!is_valid_mime_type("textplain"));
        assert!(!is_valid_mime_type("/plain"));
        assert!(!is_valid_mime_type("text/"));
        assert!(!is_valid_mime_type(""));
    }

    #[test]
    fn test_display() {
        let pattern = IntentFilterPattern {
            action: "android.intent.action.VIEW".to_string(),
            categories: vec!["android.intent.category.BROWSABLE".to_string()],
            data_scheme: Some("https".to_string()),
            data_mime_type: Some("text/html".to_string()),
        };

        let display = pattern.to_string();
        assert!(display.contains("android.intent.action.VIEW"));
        assert!(display.contains("android.intent.category.BROWSABLE"));
        assert!(display.contains("https"));
        assert!(display.contains("text/html"));
    }
}
