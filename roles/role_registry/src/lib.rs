//! # Role Registry
//!
//! `role_registry` loads a declarative XML document describing named
//! roles — reusable bundles of permission grants, app op settings,
//! structural component requirements, and default-handler bindings — and
//! turns it into a validated, immutable in-memory registry.
//!
//! Key concepts:
//!
//! 1. **Role**: a named, exclusive-or-shared bundle of permissions, app op
//!    modes, required components and preferred activities.
//!
//! 2. **Permission Set**: a named, reusable group of permission names that
//!    roles expand into their own permission lists.
//!
//! 3. **Strict / Lenient mode**: an explicit, caller-supplied switch
//!    deciding whether schema and validation violations abort parsing or
//!    are recorded as diagnostics while parsing continues.
//!
//! 4. **Permission Authority**: an injected interface answering whether a
//!    permission or app op exists, so validation is testable without the
//!    real platform.
//!
//! The pipeline is a single top-to-bottom pass: a depth-tracked
//! [`parser::ElementCursor`] feeds the recursive-descent parser, the
//! [`validate::Validator`] cross-checks the parsed maps, and the
//! [`RoleRegistry`] caches the final result for the life of the process.

pub mod authority;
pub mod error;
pub mod model;
pub mod parser;
pub mod registry;
pub mod report;
pub mod validate;

// Re-export key types for convenience
pub use authority::{PermissionAuthority, StaticAuthority};
pub use error::{Result, RoleError};
pub use model::{
    AppOp, AppOpMode, ComponentKind, IntentFilterPattern, PermissionSet, PreferredActivity,
    RequiredComponent, Role,
};
pub use registry::{load_roles, LoadedRoles, RoleRegistry};
pub use report::{ParseMode, Reporter};
