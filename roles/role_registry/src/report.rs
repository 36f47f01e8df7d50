//! Strict/lenient failure policy and the diagnostic stream.
//!
//! Every validation rule in the crate is expressed as "fails with a
//! [`RoleError`] when a condition holds". Whether that failure aborts the
//! whole pass or is merely recorded is decided here, once, by the parse
//! mode the caller passed in.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoleError};

/// How schema and validation violations are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// The first violation aborts the pass. Used during development and in
    /// validation builds, where a broken definition must not ship.
    Strict,

    /// Violations are logged and collected, the offending construct is
    /// skipped, and parsing continues. Used in production, trading
    /// completeness for availability.
    Lenient,
}

impl ParseMode {
    /// Whether this mode aborts on the first violation.
    pub fn is_strict(self) -> bool {
        matches!(self, ParseMode::Strict)
    }
}

/// Applies the failure policy and accumulates lenient-mode diagnostics.
#[derive(Debug)]
pub struct Reporter {
    mode: ParseMode,
    diagnostics: Vec<RoleError>,
}

impl Reporter {
    /// Create a reporter for the given mode.
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            diagnostics: Vec::new(),
        }
    }

    /// The mode this reporter was created with.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Handle a violation according to the mode.
    ///
    /// In strict mode the error is returned and the caller is expected to
    /// propagate it with `?`. In lenient mode it is logged, recorded, and
    /// the caller continues past the offending construct.
    pub fn report(&mut self, error: RoleError) -> Result<()> {
        match self.mode {
            ParseMode::Strict => Err(error),
            ParseMode::Lenient => {
                log::warn!("{}", error);
                self.diagnostics.push(error);
                Ok(())
            }
        }
    }

    /// The diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[RoleError] {
        &self.diagnostics
    }

    /// Consume the reporter, yielding the recorded diagnostics.
    pub fn into_diagnostics(self) -> Vec<RoleError> {
        self.diagnostics
    }
}
