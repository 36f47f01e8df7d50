//! Error types for role definition parsing and validation.
//!
//! Every schema or consistency violation maps to exactly one variant of
//! [`RoleError`]. Whether a violation aborts parsing or is merely recorded
//! as a diagnostic is decided by the parse mode, not by the variant itself;
//! see [`crate::report`].

use thiserror::Error;

/// A schema or cross-reference violation in a role definition document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// The underlying document is not well-formed. Always fatal, since no
    /// recovery point is defined for a broken reader.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// An element name that is not part of the schema at this position.
    #[error("Unknown element: <{0}>")]
    UnknownElement(String),

    /// A required attribute is absent.
    #[error("Missing attribute \"{attribute}\" on <{element}>")]
    MissingAttribute {
        /// The element carrying the attribute.
        element: &'static str,
        /// The absent attribute.
        attribute: &'static str,
    },

    /// An attribute carries a value outside its accepted set.
    #[error("Invalid value \"{value}\" for attribute \"{attribute}\" on <{element}>")]
    InvalidAttributeValue {
        /// The element carrying the attribute.
        element: &'static str,
        /// The offending attribute.
        attribute: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A required child element is absent.
    #[error("Missing <{child}> in <{element}>")]
    MissingChild {
        /// The enclosing element.
        element: &'static str,
        /// The absent child element.
        child: &'static str,
    },

    /// A definition, section or entry occurs more than once where the
    /// schema requires uniqueness.
    #[error("Duplicate {0}")]
    DuplicateDefinition(String),

    /// A role references a permission set that was never defined.
    #[error("Unknown permission set: {0}")]
    UnresolvedReference(String),

    /// A permission name the external authority does not recognize.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// An app op name the external authority does not recognize.
    #[error("Unknown app op: {0}")]
    UnknownOperation(String),

    /// An app op whose name is backed by a permission in the external
    /// authority. Such operations must be granted as permissions instead.
    #[error("App op has an associated permission: {0}")]
    OperationHasPermission(String),

    /// A preferred activity whose component is not listed among the owning
    /// role's required components.
    #[error("Preferred activity not required by role {role}: {activity}")]
    UnboundPreferredActivity {
        /// The owning role.
        role: String,
        /// Display form of the unbound activity component.
        activity: String,
    },

    /// The document has no root grouping element.
    #[error("Missing <roles> root element")]
    MissingRoot,
}

impl From<roxmltree::Error> for RoleError {
    fn from(e: roxmltree::Error) -> Self {
        RoleError::MalformedDocument(e.to_string())
    }
}

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, RoleError>;
