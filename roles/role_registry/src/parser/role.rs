//! Parsing of one `<role>` and its optional sections.

use std::collections::HashMap;

use crate::error::{Result, RoleError};
use crate::model::{
    AppOp, AppOpMode, ComponentKind, IntentFilterPattern, PermissionSet, PreferredActivity,
    RequiredComponent, Role,
};

use super::cursor::Event;
use super::document::RolesParser;
use super::{
    ATTR_EXCLUSIVE, ATTR_MODE, ATTR_NAME, TAG_ACTIVITY, TAG_APP_OP, TAG_APP_OPS,
    TAG_INTENT_FILTER, TAG_PERMISSION, TAG_PERMISSIONS, TAG_PERMISSION_SET,
    TAG_PREFERRED_ACTIVITIES, TAG_PREFERRED_ACTIVITY, TAG_REQUIRED_COMPONENTS, TAG_ROLE,
};

impl<'p, 'a, 'input: 'a> RolesParser<'p, 'a, 'input> {
    /// Parse one `<role>`: its two required attributes and at most one of
    /// each optional section. Missing sections default to empty.
    pub(crate) fn parse_role(
        &mut self,
        permission_sets: &HashMap<String, PermissionSet>,
    ) -> Result<Option<Role>> {
        let name = match self.require_attribute(TAG_ROLE, ATTR_NAME)? {
            Some(name) => name,
            None => {
                self.cursor.skip_subtree();
                return Ok(None);
            }
        };

        let exclusive_value = match self.require_attribute(TAG_ROLE, ATTR_EXCLUSIVE)? {
            Some(value) => value,
            None => {
                self.cursor.skip_subtree();
                return Ok(None);
            }
        };
        let exclusive = match exclusive_value.as_str() {
            "true" => true,
            "false" => false,
            _ => {
                self.reporter.report(RoleError::InvalidAttributeValue {
                    element: TAG_ROLE,
                    attribute: ATTR_EXCLUSIVE,
                    value: exclusive_value,
                })?;
                self.cursor.skip_subtree();
                return Ok(None);
            }
        };

        let mut required_components: Option<Vec<RequiredComponent>> = None;
        let mut permissions: Option<Vec<String>> = None;
        let mut app_ops: Option<Vec<AppOp>> = None;
        let mut preferred_activities: Option<Vec<PreferredActivity>> = None;

        let outer_depth = self.cursor.depth();
        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => match self.cursor.name() {
                    TAG_REQUIRED_COMPONENTS => {
                        if required_components.is_some() {
                            self.duplicate(format!(
                                "<{}> in role: {}",
                                TAG_REQUIRED_COMPONENTS, name
                            ))?;
                            self.cursor.skip_subtree();
                        } else {
                            required_components = Some(self.parse_required_components(&name)?);
                        }
                    }
                    TAG_PERMISSIONS => {
                        if permissions.is_some() {
                            self.duplicate(format!("<{}> in role: {}", TAG_PERMISSIONS, name))?;
                            self.cursor.skip_subtree();
                        } else {
                            permissions = Some(self.parse_permissions(permission_sets)?);
                        }
                    }
                    TAG_APP_OPS => {
                        if app_ops.is_some() {
                            self.duplicate(format!("<{}> in role: {}", TAG_APP_OPS, name))?;
                            self.cursor.skip_subtree();
                        } else {
                            app_ops = Some(self.parse_app_ops()?);
                        }
                    }
                    TAG_PREFERRED_ACTIVITIES => {
                        if preferred_activities.is_some() {
                            self.duplicate(format!(
                                "<{}> in role: {}",
                                TAG_PREFERRED_ACTIVITIES, name
                            ))?;
                            self.cursor.skip_subtree();
                        } else {
                            preferred_activities = Some(self.parse_preferred_activities()?);
                        }
                    }
                    _ => {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                },
            }
        }

        Ok(Some(Role {
            name,
            exclusive,
            required_components: required_components.unwrap_or_default(),
            permissions: permissions.unwrap_or_default(),
            app_ops: app_ops.unwrap_or_default(),
            preferred_activities: preferred_activities.unwrap_or_default(),
        }))
    }

    /// Parse a `<permissions>` section: inline permissions and
    /// permission-set references.
    ///
    /// A set reference expands with set-union semantics: a permission
    /// already present is silently not added again, so overlap between
    /// sets is tolerated. An inline entry repeating an already-present
    /// permission is a duplicate definition.
    fn parse_permissions(
        &mut self,
        permission_sets: &HashMap<String, PermissionSet>,
    ) -> Result<Vec<String>> {
        let mut permissions: Vec<String> = Vec::new();

        let outer_depth = self.cursor.depth();
        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => match self.cursor.name() {
                    TAG_PERMISSION_SET => {
                        if let Some(set_name) =
                            self.require_attribute(TAG_PERMISSION_SET, ATTR_NAME)?
                        {
                            match permission_sets.get(&set_name) {
                                Some(set) => {
                                    for permission in &set.permissions {
                                        if !permissions.contains(permission) {
                                            permissions.push(permission.clone());
                                        }
                                    }
                                }
                                None => {
                                    self.reporter
                                        .report(RoleError::UnresolvedReference(set_name))?;
                                }
                            }
                        }
                    }
                    TAG_PERMISSION => {
                        if let Some(permission) =
                            self.require_attribute(TAG_PERMISSION, ATTR_NAME)?
                        {
                            if permissions.contains(&permission) {
                                self.duplicate(format!("permission: {}", permission))?;
                            } else {
                                permissions.push(permission);
                            }
                        }
                    }
                    _ => {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                },
            }
        }

        Ok(permissions)
    }

    /// Parse an `<app-ops>` section.
    ///
    /// The op name is checked against the external authority's name space
    /// in strict mode only; production documents may legitimately name
    /// ops the running platform does not know yet.
    fn parse_app_ops(&mut self) -> Result<Vec<AppOp>> {
        let mut names: Vec<String> = Vec::new();
        let mut app_ops: Vec<AppOp> = Vec::new();

        let outer_depth = self.cursor.depth();
        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => {
                    if self.cursor.name() != TAG_APP_OP {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                        continue;
                    }

                    let Some(name) = self.require_attribute(TAG_APP_OP, ATTR_NAME)? else {
                        continue;
                    };
                    if self.reporter.mode().is_strict() && !self.authority.operation_exists(&name)
                    {
                        return Err(RoleError::UnknownOperation(name));
                    }
                    if names.contains(&name) {
                        self.duplicate(format!("app op: {}", name))?;
                        continue;
                    }
                    names.push(name.clone());

                    let Some(mode_value) = self.require_attribute(TAG_APP_OP, ATTR_MODE)? else {
                        continue;
                    };
                    match mode_value.parse::<AppOpMode>() {
                        Ok(mode) => app_ops.push(AppOp { name, mode }),
                        Err(()) => {
                            self.reporter.report(RoleError::InvalidAttributeValue {
                                element: TAG_APP_OP,
                                attribute: ATTR_MODE,
                                value: mode_value,
                            })?;
                        }
                    }
                }
            }
        }

        Ok(app_ops)
    }

    /// Parse a `<preferred-activities>` section.
    fn parse_preferred_activities(&mut self) -> Result<Vec<PreferredActivity>> {
        let mut preferred_activities: Vec<PreferredActivity> = Vec::new();

        let outer_depth = self.cursor.depth();
        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => {
                    if self.cursor.name() == TAG_PREFERRED_ACTIVITY {
                        if let Some(preferred_activity) = self.parse_preferred_activity()? {
                            if preferred_activities.contains(&preferred_activity) {
                                self.duplicate(format!(
                                    "preferred activity: {}",
                                    preferred_activity
                                ))?;
                            } else {
                                preferred_activities.push(preferred_activity);
                            }
                        }
                    } else {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                }
            }
        }

        Ok(preferred_activities)
    }

    /// Parse one `<preferred-activity>`: exactly one nested `<activity>`
    /// component plus one or more intent filter patterns.
    fn parse_preferred_activity(&mut self) -> Result<Option<PreferredActivity>> {
        let mut activity: Option<RequiredComponent> = None;
        let mut intent_filters: Vec<IntentFilterPattern> = Vec::new();

        let outer_depth = self.cursor.depth();
        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => match self.cursor.name() {
                    TAG_ACTIVITY => {
                        if activity.is_some() {
                            self.duplicate(format!(
                                "<{}> in <{}>",
                                TAG_ACTIVITY, TAG_PREFERRED_ACTIVITY
                            ))?;
                            self.cursor.skip_subtree();
                        } else {
                            activity = self.parse_required_component(ComponentKind::Activity)?;
                        }
                    }
                    TAG_INTENT_FILTER => {
                        if let Some(intent_filter) = self.parse_intent_filter()? {
                            if intent_filters.contains(&intent_filter) {
                                self.duplicate(format!(
                                    "<{}> in <{}>",
                                    TAG_INTENT_FILTER, TAG_PREFERRED_ACTIVITY
                                ))?;
                            } else {
                                intent_filters.push(intent_filter);
                            }
                        }
                    }
                    _ => {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                },
            }
        }

        let Some(activity) = activity else {
            self.reporter.report(RoleError::MissingChild {
                element: TAG_PREFERRED_ACTIVITY,
                child: TAG_ACTIVITY,
            })?;
            return Ok(None);
        };
        if intent_filters.is_empty() {
            self.reporter.report(RoleError::MissingChild {
                element: TAG_PREFERRED_ACTIVITY,
                child: TAG_INTENT_FILTER,
            })?;
            return Ok(None);
        }

        Ok(Some(PreferredActivity {
            activity,
            intent_filters,
        }))
    }
}
