//! Named, reusable groups of permissions.

use serde::{Deserialize, Serialize};

/// A named, reusable group of permission names.
///
/// Permission sets exist only while a document is being parsed and
/// validated; roles reference them by name and expand them into their own
/// permission lists, after which the sets are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    /// The name of this set, unique within one document.
    pub name: String,

    /// The permissions in this set, in declaration order, unique.
    pub permissions: Vec<String>,
}

impl PermissionSet {
    /// Create a new permission set.
    pub fn new(name: impl Into<String>, permissions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            permissions,
        }
    }
}
