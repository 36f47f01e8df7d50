//! Required component patterns.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::IntentFilterPattern;

/// The four kinds of component a role can require.
///
/// The mapping to element names is the single point of dispatch for the
/// polymorphic component construct; both directions are exhaustively
/// matched so a new kind cannot be added without updating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// An activity.
    Activity,

    /// A content provider.
    ContentProvider,

    /// A broadcast receiver.
    BroadcastReceiver,

    /// A service.
    Service,
}

impl ComponentKind {
    /// The kind introduced by the given element name, if any.
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "activity" => Some(Self::Activity),
            "provider" => Some(Self::ContentProvider),
            "receiver" => Some(Self::BroadcastReceiver),
            "service" => Some(Self::Service),
            _ => None,
        }
    }

    /// The element name introducing this kind.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::ContentProvider => "provider",
            Self::BroadcastReceiver => "receiver",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_name())
    }
}

/// A structural pattern a candidate holder of a role must expose to
/// qualify.
///
/// Equality is structural over all three fields; duplicate detection and
/// preferred-activity binding both rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequiredComponent {
    /// The component kind.
    pub kind: ComponentKind,

    /// The permission the component must be protected by, if any.
    pub permission: Option<String>,

    /// The intent filter the component must handle.
    pub intent_filter: IntentFilterPattern,
}

impl fmt::Display for RequiredComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> with {}", self.kind, self.intent_filter)?;

        if let Some(permission) = &self.permission {
            write!(f, " permission '{}'", permission)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_element_mapping() {
        for kind in [
            ComponentKind::Activity,
            ComponentKind::ContentProvider,
            ComponentKind::BroadcastReceiver,
            ComponentKind::Service,
        ] {
            assert_eq!(ComponentKind::from_element(kind.element_name()), Some(kind));
        }
        assert_eq!(ComponentKind::from_element("widget"), None);
    }

    #[test]
    fn test_structural_equality() {
        let filter = IntentFilterPattern {
            action: "android.intent.action.DIAL".to_string(),
            categories: Vec::new(),
            data_scheme: None,
            data_mime_type: None,
        };

        let a = RequiredComponent {
            kind: ComponentKind::Activity,
            permission: None,
            intent_filter: filter.clone(),
        };
        let b = RequiredComponent {
            kind: ComponentKind::Activity,
            permission: None,
            intent_filter: filter.clone(),
        };
        let c = RequiredComponent {
            kind: ComponentKind::Service,
            permission: None,
            intent_filter: filter,
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
