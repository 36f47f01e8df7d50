//! App op settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The enforcement mode of an app op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppOpMode {
    /// The operation is allowed.
    Allowed,

    /// The operation is silently ignored.
    Ignored,

    /// The operation fails with an error.
    Errored,

    /// The operation uses its default behavior.
    Default,

    /// The operation is allowed only while the holder is in the
    /// foreground.
    Foreground,
}

impl AppOpMode {
    /// The document token for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Ignored => "ignored",
            Self::Errored => "errored",
            Self::Default => "default",
            Self::Foreground => "foreground",
        }
    }
}

impl FromStr for AppOpMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allowed" => Ok(Self::Allowed),
            "ignored" => Ok(Self::Ignored),
            "errored" => Ok(Self::Errored),
            "default" => Ok(Self::Default),
            "foreground" => Ok(Self::Foreground),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AppOpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An app op granted by a role, with its enforcement mode.
///
/// The validator guarantees that the named operation has no backing
/// permission in the external authority; operations that do must be
/// expressed as permissions instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppOp {
    /// The operation name.
    pub name: String,

    /// The mode to set the operation to.
    pub mode: AppOpMode,
}
