//! Top-level document parsing.

use std::collections::HashMap;

use crate::authority::PermissionAuthority;
use crate::error::{Result, RoleError};
use crate::model::{PermissionSet, Role};
use crate::report::Reporter;

use super::cursor::{ElementCursor, Event};
use super::{ATTR_NAME, TAG_PERMISSION, TAG_PERMISSION_SET, TAG_ROLE, TAG_ROLES};

/// The two maps produced by a full parse of one document.
///
/// The permission sets are only needed by the validator; consumers of the
/// registry see the roles alone.
#[derive(Debug, Default)]
pub struct ParsedRoles {
    /// Permission sets by name.
    pub permission_sets: HashMap<String, PermissionSet>,

    /// Roles by name.
    pub roles: HashMap<String, Role>,
}

/// Parse a complete role definition document.
///
/// A document that is not well-formed fails with
/// [`RoleError::MalformedDocument`] regardless of mode; schema violations
/// inside a well-formed document go through the reporter.
pub fn parse_document(
    document: &str,
    authority: &dyn PermissionAuthority,
    reporter: &mut Reporter,
) -> Result<ParsedRoles> {
    let tree = roxmltree::Document::parse(document)?;
    let mut parser = RolesParser {
        cursor: ElementCursor::new(&tree),
        reporter,
        authority,
    };
    parser.parse()
}

/// Single-pass parser state: the cursor, the failure policy, and the
/// external authority consulted for strict-mode app op name checks.
pub(crate) struct RolesParser<'p, 'a, 'input: 'a> {
    pub(crate) cursor: ElementCursor<'a, 'input>,
    pub(crate) reporter: &'p mut Reporter,
    pub(crate) authority: &'p dyn PermissionAuthority,
}

impl<'p, 'a, 'input: 'a> RolesParser<'p, 'a, 'input> {
    /// Parse from the document root: exactly one `<roles>` element.
    fn parse(&mut self) -> Result<ParsedRoles> {
        let outer_depth = self.cursor.depth();
        let mut parsed: Option<ParsedRoles> = None;

        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => {
                    if self.cursor.name() == TAG_ROLES {
                        if parsed.is_some() {
                            self.duplicate("<roles> root element".to_string())?;
                            self.cursor.skip_subtree();
                        } else {
                            parsed = Some(self.parse_roles()?);
                        }
                    } else {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                }
            }
        }

        match parsed {
            Some(parsed) => Ok(parsed),
            None => {
                self.reporter.report(RoleError::MissingRoot)?;
                Ok(ParsedRoles::default())
            }
        }
    }

    /// Parse the children of `<roles>`: permission sets and roles,
    /// interleaved in any order.
    fn parse_roles(&mut self) -> Result<ParsedRoles> {
        let mut permission_sets: HashMap<String, PermissionSet> = HashMap::new();
        let mut roles: HashMap<String, Role> = HashMap::new();

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
                        if let Some(set) = self.parse_permission_set()? {
                            if permission_sets.contains_key(&set.name) {
                                self.duplicate(format!("permission set: {}", set.name))?;
                            } else {
                                permission_sets.insert(set.name.clone(), set);
                            }
                        }
                    }
                    TAG_ROLE => {
                        if let Some(role) = self.parse_role(&permission_sets)? {
                            if roles.contains_key(&role.name) {
                                self.duplicate(format!("role: {}", role.name))?;
                            } else {
                                roles.insert(role.name.clone(), role);
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

        Ok(ParsedRoles {
            permission_sets,
            roles,
        })
    }

    /// Parse one `<permission-set>` and its `<permission>` children.
    fn parse_permission_set(&mut self) -> Result<Option<PermissionSet>> {
        let name = match self.require_attribute(TAG_PERMISSION_SET, ATTR_NAME)? {
            Some(name) => name,
            None => {
                self.cursor.skip_subtree();
                return Ok(None);
            }
        };

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
                Event::Start => {
                    if self.cursor.name() == TAG_PERMISSION {
                        if let Some(permission) =
                            self.require_attribute(TAG_PERMISSION, ATTR_NAME)?
                        {
                            if permissions.contains(&permission) {
                                self.duplicate(format!(
                                    "permission in permission set {}: {}",
                                    name, permission
                                ))?;
                            } else {
                                permissions.push(permission);
                            }
                        }
                    } else {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                }
            }
        }

        Ok(Some(PermissionSet::new(name, permissions)))
    }

    /// Look up an optional attribute on the current element.
    pub(crate) fn attribute(&self, name: &str) -> Option<String> {
        self.cursor.attribute(name).map(str::to_string)
    }

    /// Look up a required attribute on the current element.
    ///
    /// Reports [`RoleError::MissingAttribute`] when absent; in lenient
    /// mode the caller decides whether to skip the element or carry on
    /// without the value.
    pub(crate) fn require_attribute(
        &mut self,
        element: &'static str,
        attribute: &'static str,
    ) -> Result<Option<String>> {
        match self.attribute(attribute) {
            Some(value) => Ok(Some(value)),
            None => {
                self.reporter
                    .report(RoleError::MissingAttribute { element, attribute })?;
                Ok(None)
            }
        }
    }

    /// Report the current element as unknown at this position. The caller
    /// is expected to skip its subtree.
    pub(crate) fn unknown_element(&mut self) -> Result<()> {
        let name = self.cursor.name().to_string();
        self.reporter.report(RoleError::UnknownElement(name))
    }

    /// Report a duplicate definition.
    pub(crate) fn duplicate(&mut self, what: String) -> Result<()> {
        self.reporter.report(RoleError::DuplicateDefinition(what))
    }
}
