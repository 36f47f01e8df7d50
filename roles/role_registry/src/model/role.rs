//! Role definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AppOp, IntentFilterPattern, RequiredComponent};

/// A named bundle of permission grants, app op settings, structural
/// requirements, and default-handler bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The name of this role, the primary key of the registry.
    pub name: String,

    /// Whether at most one holder may have this role at a time.
    pub exclusive: bool,

    /// The components a candidate holder must expose to qualify, in
    /// declaration order, unique.
    pub required_components: Vec<RequiredComponent>,

    /// The permissions this role grants, in declaration order, unique.
    pub permissions: Vec<String>,

    /// The app ops this role sets, in declaration order, unique by
    /// operation name.
    pub app_ops: Vec<AppOp>,

    /// The default-handler bindings this role carries, in declaration
    /// order, unique.
    pub preferred_activities: Vec<PreferredActivity>,
}

/// A binding declaring that one of the role's required activities should
/// be the default handler for a set of intent filter patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredActivity {
    /// The activity component to prefer. The validator guarantees this is
    /// structurally equal to one of the owning role's required components.
    pub activity: RequiredComponent,

    /// The patterns to bind the activity to, non-empty, unique.
    pub intent_filters: Vec<IntentFilterPattern>,
}

impl fmt::Display for PreferredActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} for {} filter(s)",
            self.activity,
            self.intent_filters.len()
        )
    }
}
