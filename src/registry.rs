//! Lifecycle of the merged builtins database.
//!
//! One [`BuiltinsRegistry`] exists per VM execution context: an explicit
//! handle the bootstrap threads through, never shared across concurrently
//! scheduled instances, so no locking is involved. The slot holds at most
//! one merged database; re-initializing tears down the previous instance
//! before parsing the new sources.
//!
//! ## Notes
//! - Teardown precedes the new parse, so a failed re-initialize leaves the
//!   slot empty rather than half-built. That edge is documented behavior;
//!   lookups simply miss until the next successful initialize.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use lsl_decls::{constants, overlay, OverlayType, ValueView};
use tracing::info;

use crate::defaults;
use crate::errors::BuiltinsError;
use crate::resolve::{BuiltinsDb, GlobalRepr, VectorWidth};
use crate::vm::VmGlobals;

/// Per-execution-context slot holding at most one merged database.
#[derive(Debug, Default)]
pub struct BuiltinsRegistry {
    current: Option<BuiltinsDb>,
    width: VectorWidth,
}

impl BuiltinsRegistry {
    /// Registry for a four-wide numeric-vector build (the SLua default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry targeting a specific numeric-vector width.
    pub fn with_vector_width(width: VectorWidth) -> Self {
        Self {
            current: None,
            width,
        }
    }

    /// Build and install the merged database.
    ///
    /// Each source is either a file path or, if omitted, the embedded
    /// default. Any existing instance is torn down first; on failure the
    /// slot stays empty.
    pub fn initialize(
        &mut self,
        constants_path: Option<&Path>,
        overlay_path: Option<&Path>,
    ) -> Result<(), BuiltinsError> {
        self.current = None;

        let constants_text = read_source(constants_path, defaults::LSL_CONSTANTS)?;
        let overlay_text = read_source(overlay_path, defaults::SLUA_TYPES)?;

        let constants_db = constants::parse(&constants_text)?;
        let overlay_db = overlay::parse(&overlay_text);

        info!(
            constants = constants_db.len(),
            dropped = constants_db.skipped_lines(),
            overlay = overlay_db.len(),
            "builtins database initialized"
        );

        self.current = Some(BuiltinsDb::new(constants_db, overlay_db, self.width));
        Ok(())
    }

    /// Release the current instance and both of its arenas. Idempotent.
    pub fn teardown(&mut self) {
        self.current = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// The installed merged database, if any.
    pub fn database(&self) -> Option<&BuiltinsDb> {
        self.current.as_ref()
    }

    /// Constant lookup for compile-time folding and diagnostics.
    pub fn lookup_constant(&self, name: &str) -> Option<ValueView<'_>> {
        self.current.as_ref()?.constants().get(name)
    }

    /// Overlay-type lookup for diagnostics.
    pub fn lookup_overlay_type(&self, name: &str) -> Option<OverlayType> {
        self.current.as_ref()?.overlay().get(name)
    }

    /// Resolve one constant's publish representation.
    pub fn resolve(&self, name: &str) -> Option<GlobalRepr<'_>> {
        self.current.as_ref()?.resolve(name)
    }

    /// Publish all constants into `vm`; no-op returning 0 when the slot is
    /// empty.
    pub fn publish_globals<V: VmGlobals>(&self, vm: &mut V) -> usize {
        self.current
            .as_ref()
            .map_or(0, |db| db.publish_globals(vm))
    }
}

fn read_source<'a>(
    path: Option<&Path>,
    fallback: &'a str,
) -> Result<Cow<'a, str>, BuiltinsError> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| BuiltinsError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }),
        None => Ok(Cow::Borrowed(fallback)),
    }
}
