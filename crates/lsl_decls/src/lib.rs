//! Declaration-file frontend for the SLua builtins database: string arena,
//! constant-file parser, and type-overlay parser.
//!
//! This crate is dependency-light and intended for reuse by the VM bootstrap
//! and by compiler tooling (constant folding, diagnostics). It only parses
//! and stores; merging the two databases and choosing publish representations
//! belongs to the `slua-builtins` driver crate.
//!
//! ## Notes
//! - Both parsers are lenient by contract: the inputs are machine-generated
//!   and may contain syntax from a newer generator, so malformed lines are
//!   per-line skips, never parse failures.
//! - Each database owns its string storage and releases it in one step on
//!   drop; entries never track individual allocations.
//!
//! ## Examples
//! ```rust
//! use lsl_decls::{constants, overlay, OverlayType, ValueView};
//!
//! let db = constants::parse("const integer HEX_TEST = 0xFF\n").unwrap();
//! assert_eq!(db.get("HEX_TEST"), Some(ValueView::Integer(255)));
//!
//! let types = overlay::parse("declare NULL_KEY: uuid\n");
//! assert_eq!(types.get("NULL_KEY"), Some(OverlayType::Uuid));
//! ```

pub mod arena;
pub mod constants;
pub mod overlay;

pub use arena::{ArenaFull, StrArena, StrSpan};
pub use constants::{ConstValue, ConstantsDb, ValueView};
pub use overlay::{OverlayDb, OverlayType};
