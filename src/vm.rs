//! VM capability boundary consumed by builtin publication.
//!
//! The resolver never touches the VM directly; it pushes one value and binds
//! it under a name through this trait. Keeping the boundary trait-based lets
//! the tests record publications and keeps the actual interpreter glue (the
//! `lua_State` push/setglobal calls) out of this crate.

use thiserror::Error;

/// A single global binding was rejected by the VM. Bulk publication skips
/// the entry and continues.
#[derive(Debug, Error)]
#[error("global binding rejected by the VM")]
pub struct SetGlobalError;

/// Push-and-bind surface of a VM instance's global namespace.
///
/// Each `push_*` call leaves exactly one value pending; the following
/// [`set_global`](Self::set_global) consumes it.
pub trait VmGlobals {
    fn push_number(&mut self, value: f64);
    fn push_text(&mut self, text: &str);
    fn push_uuid(&mut self, uuid: &str);
    fn push_vector(&mut self, xyz: [f32; 3]);
    fn push_quaternion(&mut self, xyzs: [f32; 4]);

    /// Bind the pending value under `name`.
    fn set_global(&mut self, name: &str) -> Result<(), SetGlobalError>;
}
