//! The lazily built, immutable role registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::authority::PermissionAuthority;
use crate::error::{Result, RoleError};
use crate::model::Role;
use crate::parser::parse_document;
use crate::report::{ParseMode, Reporter};
use crate::validate::Validator;

/// The outcome of one successful registry build.
///
/// The permission sets used during expansion are already discarded at this
/// point; consumers see roles and, in lenient mode, the diagnostics that
/// were recorded along the way.
#[derive(Debug)]
pub struct LoadedRoles {
    /// Roles by name.
    pub roles: HashMap<String, Role>,

    /// Diagnostics recorded in lenient mode. Empty in strict mode, where
    /// the first violation aborts the build instead.
    pub diagnostics: Vec<RoleError>,
}

/// Parse and validate a role definition document in one pass.
///
/// This is the uncached building block behind [`RoleRegistry`]; call it
/// directly when caching is not wanted.
pub fn load_roles(
    document: &str,
    authority: &dyn PermissionAuthority,
    mode: ParseMode,
) -> Result<LoadedRoles> {
    let mut reporter = Reporter::new(mode);
    let parsed = parse_document(document, authority, &mut reporter)?;
    Validator::new(authority, &mut reporter).validate(&parsed)?;
    Ok(LoadedRoles {
        roles: parsed.roles,
        diagnostics: reporter.into_diagnostics(),
    })
}

/// Process-wide registry of role definitions, built at most once.
///
/// The first caller of [`roles`](Self::roles) blocks all others until
/// construction completes or fails; subsequent callers observe the cached
/// immutable result with no further locking. A failed strict-mode build
/// leaves the registry uninitialized, so the next call retries from
/// scratch. There is no negative caching: the document is static, so
/// repeated identical failures are expected and acceptable.
pub struct RoleRegistry {
    document: String,
    authority: Arc<dyn PermissionAuthority>,
    mode: ParseMode,
    init: Mutex<()>,
    loaded: OnceLock<Arc<LoadedRoles>>,
}

impl RoleRegistry {
    /// Create a registry over a document, an authority and a mode.
    ///
    /// Nothing is parsed until the first [`roles`](Self::roles) call.
    pub fn new(
        document: impl Into<String>,
        authority: Arc<dyn PermissionAuthority>,
        mode: ParseMode,
    ) -> Self {
        Self {
            document: document.into(),
            authority,
            mode,
            init: Mutex::new(()),
            loaded: OnceLock::new(),
        }
    }

    /// The mode this registry builds with.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Get the roles, building the registry on first use.
    ///
    /// Idempotent: every successful call returns the same `Arc`.
    pub fn roles(&self) -> Result<Arc<LoadedRoles>> {
        if let Some(loaded) = self.loaded.get() {
            return Ok(loaded.clone());
        }

        let _guard = self
            .init
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished the build while we waited.
        if let Some(loaded) = self.loaded.get() {
            return Ok(loaded.clone());
        }

        let loaded = Arc::new(load_roles(
            &self.document,
            self.authority.as_ref(),
            self.mode,
        )?);
        let _ = self.loaded.set(loaded.clone());
        log::info!("Built role registry with {} role(s)", loaded.roles.len());
        Ok(loaded)
    }
}
