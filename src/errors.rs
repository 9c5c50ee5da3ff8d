//! Error surface of the builtins subsystem.
//!
//! Per-line parse problems never reach this module; they are skips inside
//! the declaration frontend. What surfaces here is what genuinely aborts an
//! operation: an unreadable declaration source, or arena exhaustion while
//! copying declaration text.

use std::path::PathBuf;

use lsl_decls::ArenaFull;
use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced by [`BuiltinsRegistry::initialize`](crate::registry::BuiltinsRegistry::initialize).
#[derive(Debug, Error, Diagnostic)]
pub enum BuiltinsError {
    /// A caller-supplied declaration path could not be opened or read.
    ///
    /// The previous database instance has already been torn down by the time
    /// this is raised, so the slot is left empty (documented behavior, not
    /// silently recovered).
    #[error("cannot read declarations from '{path}'")]
    #[diagnostic(
        code(slua_builtins::source_unavailable),
        help("omit the path to fall back to the embedded default declarations")
    )]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Resource exhaustion while copying declaration text; aborts the parse.
    #[error("declaration parse aborted: {0}")]
    #[diagnostic(code(slua_builtins::resource_exhausted))]
    Resource(#[from] ArenaFull),
}
