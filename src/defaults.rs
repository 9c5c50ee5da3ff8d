//! Embedded default declaration sources.
//!
//! `initialize` falls back to these when the caller supplies no path: the
//! stock LSL constant set and the SLua type overlay, bundled so a VM can
//! bootstrap without any files on disk.

/// Stock LSL constant declarations (`const <type> <NAME> = <value>`).
pub const LSL_CONSTANTS: &str = include_str!("defaults/lsl_constants.decl");

/// SLua type overlay for the stock constants (`declare NAME: type`).
pub const SLUA_TYPES: &str = include_str!("defaults/slua_types.d.luau");
