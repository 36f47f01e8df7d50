//! Second-pass cross-reference validation.
//!
//! Runs only after a document has fully parsed. The three rules here need
//! the whole document (or the external authority) in view, which is why
//! they cannot run inside the single-pass parser.

use crate::authority::PermissionAuthority;
use crate::error::{Result, RoleError};
use crate::parser::ParsedRoles;
use crate::report::Reporter;

/// Checks a parsed document against the external permission authority and
/// against itself.
pub struct Validator<'v> {
    authority: &'v dyn PermissionAuthority,
    reporter: &'v mut Reporter,
}

impl<'v> Validator<'v> {
    /// Create a validator over the given authority and failure policy.
    pub fn new(authority: &'v dyn PermissionAuthority, reporter: &'v mut Reporter) -> Self {
        Self {
            authority,
            reporter,
        }
    }

    /// Validate a fully parsed document.
    ///
    /// 1. Every permission named anywhere must exist in the authority.
    /// 2. No app op may be backed by a permission in the authority.
    /// 3. Every preferred activity must be one of its role's required
    ///    components.
    pub fn validate(&mut self, parsed: &ParsedRoles) -> Result<()> {
        for set in parsed.permission_sets.values() {
            for permission in &set.permissions {
                self.check_permission(permission)?;
            }
        }

        for role in parsed.roles.values() {
            for component in &role.required_components {
                if let Some(permission) = &component.permission {
                    self.check_permission(permission)?;
                }
            }

            for permission in &role.permissions {
                self.check_permission(permission)?;
            }

            for app_op in &role.app_ops {
                if self.authority.operation_permission(&app_op.name).is_some() {
                    self.reporter
                        .report(RoleError::OperationHasPermission(app_op.name.clone()))?;
                }
            }

            for preferred_activity in &role.preferred_activities {
                if !role
                    .required_components
                    .contains(&preferred_activity.activity)
                {
                    self.reporter.report(RoleError::UnboundPreferredActivity {
                        role: role.name.clone(),
                        activity: preferred_activity.activity.to_string(),
                    })?;
                }
            }
        }

        Ok(())
    }

    fn check_permission(&mut self, permission: &str) -> Result<()> {
        if !self.authority.permission_exists(permission) {
            self.reporter
                .report(RoleError::UnknownPermission(permission.to_string()))?;
        }
        Ok(())
    }
}
