//! The immutable role definition model.
//!
//! Every type here is constructed once by the parser and never mutated
//! afterward. Structural equality (`PartialEq`/`Eq`/`Hash` derives) drives
//! both duplicate detection during parsing and the preferred-activity
//! binding check during validation.

mod app_op;
mod component;
mod intent_filter;
mod permission_set;
mod role;

pub use app_op::{AppOp, AppOpMode};
pub use component::{ComponentKind, RequiredComponent};
pub use intent_filter::{is_valid_mime_type, IntentFilterPattern, CATEGORY_DEFAULT};
pub use permission_set::PermissionSet;
pub use role::{PreferredActivity, Role};
