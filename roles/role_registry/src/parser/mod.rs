//! Recursive-descent parser over the role definition schema.
//!
//! The schema is fixed and purpose-built for role definitions; this is not
//! a general validation language. Each parse function consumes exactly its
//! own subtree via the depth-tracked [`ElementCursor`] and leaves the
//! cursor at its own closing boundary, so the whole document is read in a
//! single top-to-bottom pass with no backtracking.

mod component;
pub mod cursor;
mod document;
mod role;

pub use cursor::{ElementCursor, Event};
pub use document::{parse_document, ParsedRoles};

pub(crate) const TAG_ROLES: &str = "roles";
pub(crate) const TAG_PERMISSION_SET: &str = "permission-set";
pub(crate) const TAG_ROLE: &str = "role";
pub(crate) const TAG_REQUIRED_COMPONENTS: &str = "required-components";
pub(crate) const TAG_ACTIVITY: &str = "activity";
pub(crate) const TAG_INTENT_FILTER: &str = "intent-filter";
pub(crate) const TAG_ACTION: &str = "action";
pub(crate) const TAG_CATEGORY: &str = "category";
pub(crate) const TAG_DATA: &str = "data";
pub(crate) const TAG_PERMISSIONS: &str = "permissions";
pub(crate) const TAG_PERMISSION: &str = "permission";
pub(crate) const TAG_APP_OPS: &str = "app-ops";
pub(crate) const TAG_APP_OP: &str = "app-op";
pub(crate) const TAG_PREFERRED_ACTIVITIES: &str = "preferred-activities";
pub(crate) const TAG_PREFERRED_ACTIVITY: &str = "preferred-activity";

pub(crate) const ATTR_NAME: &str = "name";
pub(crate) const ATTR_EXCLUSIVE: &str = "exclusive";
pub(crate) const ATTR_PERMISSION: &str = "permission";
pub(crate) const ATTR_SCHEME: &str = "scheme";
pub(crate) const ATTR_MIME_TYPE: &str = "mimeType";
pub(crate) const ATTR_MODE: &str = "mode";
