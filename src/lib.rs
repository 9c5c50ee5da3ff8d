#![forbid(unsafe_code)]
//! Builtin-constant resolution for the SLua scripting VM
//!
//! The VM supports a legacy, weakly-typed dialect (LSL) and a modern
//! statically-typed dialect (SLua) that reuses LSL's constant values but
//! may assign them different host-native types. This crate merges the two
//! machine-generated declaration sources - constant values and type
//! overlay - into one name-indexed database, publishes correctly-typed
//! globals into a VM instance, and answers compile-time constant-fold
//! lookups.
//!
//! Parsing and storage live in the `lsl_decls` crate; this crate owns the
//! merged resolver, the per-context lifecycle, the VM capability boundary,
//! and the embedded default sources.
//!
//! ## Panic Policy
//!
//! Production code returns `Result` (or an explicit `Option` miss) and
//! propagates with `?`; `.unwrap()`/`.expect()` are reserved for tests.
//! Malformed declaration lines are never errors at all: the sources are
//! machine-generated, and the parsers skip what they do not model.

pub mod cli;
pub mod defaults;
pub mod errors;
pub mod registry;
pub mod resolve;
pub mod vm;

pub use errors::BuiltinsError;
pub use registry::BuiltinsRegistry;
pub use resolve::{BuiltinsDb, GlobalRepr, VectorWidth};
pub use vm::{SetGlobalError, VmGlobals};

pub use lsl_decls::{ConstantsDb, OverlayDb, OverlayType, ValueView};
