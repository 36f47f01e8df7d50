//! The external permission authority consulted during validation.
//!
//! The parser and validator never talk to the platform directly; they go
//! through [`PermissionAuthority`] so that the whole pipeline can be
//! exercised against a fake authority in tests.

use std::collections::{HashMap, HashSet};

/// Answers name-space questions about permissions and app ops.
pub trait PermissionAuthority: Send + Sync {
    /// Whether a permission with the given name exists.
    fn permission_exists(&self, name: &str) -> bool;

    /// Whether an app op with the given name exists.
    fn operation_exists(&self, name: &str) -> bool;

    /// The permission backing the given app op, if any.
    ///
    /// Returns `None` both for ops without a backing permission and for
    /// unknown ops; use [`Self::operation_exists`] to tell them apart.
    fn operation_permission(&self, name: &str) -> Option<&str>;
}

/// A map-backed [`PermissionAuthority`].
///
/// Used by tests and by the CLI, where the real platform authority is not
/// available. The permissive variant accepts every name, which turns the
/// name-space checks into no-ops while keeping structural validation.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthority {
    permissions: HashSet<String>,
    operations: HashMap<String, Option<String>>,
    permissive: bool,
}

impl StaticAuthority {
    /// Create an empty authority that recognizes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an authority that recognizes every permission and every op,
    /// and backs no op with a permission.
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Self::default()
        }
    }

    /// Register a known permission name.
    pub fn with_permission(mut self, name: impl Into<String>) -> Self {
        self.permissions.insert(name.into());
        self
    }

    /// Register a known app op, optionally backed by a permission.
    pub fn with_operation(
        mut self,
        name: impl Into<String>,
        backing_permission: Option<&str>,
    ) -> Self {
        self.operations
            .insert(name.into(), backing_permission.map(str::to_string));
        self
    }
}

impl PermissionAuthority for StaticAuthority {
    fn permission_exists(&self, name: &str) -> bool {
        self.permissive || self.permissions.contains(name)
    }

    fn operation_exists(&self, name: &str) -> bool {
        self.permissive || self.operations.contains_key(name)
    }

    fn operation_permission(&self, name: &str) -> Option<&str> {
        self.operations.get(name)?.as_deref()
    }
}
