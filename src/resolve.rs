//! Merged resolver: one constant database plus one type overlay, combined
//! under the coercion rules that let a single constant-value source serve
//! both dialects.
//!
//! Resolution is two-tier. With no overlay entry, a constant publishes
//! using its native kind. With an overlay entry, the matching coercion is
//! attempted first (`uuid` from key/string, `number` from integer/float,
//! and so on); a kind mismatch or an `unknown` tag falls back to the
//! native-kind publication. The untyped VM mode simply never supplies an
//! overlay, and the typed mode gets uuid-tagged keys without duplicating
//! any constant data.

use lsl_decls::{ConstantsDb, OverlayDb, OverlayType, ValueView};

use crate::vm::VmGlobals;

/// Numeric-vector width of the target VM build.
///
/// Quaternions need four lanes; a three-wide build publishes them degraded
/// to a vector by dropping the scalar part. That loss is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorWidth {
    Three,
    #[default]
    Four,
}

/// Representation chosen for publishing one constant into the VM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobalRepr<'a> {
    Number(f64),
    Text(&'a str),
    Uuid(&'a str),
    Vector([f32; 3]),
    Quaternion([f32; 4]),
}

impl std::fmt::Display for GlobalRepr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlobalRepr::Number(n) => write!(f, "number {n}"),
            GlobalRepr::Text(s) => write!(f, "string {s:?}"),
            GlobalRepr::Uuid(u) => write!(f, "uuid {u}"),
            GlobalRepr::Vector([x, y, z]) => write!(f, "vector <{x}, {y}, {z}>"),
            GlobalRepr::Quaternion([x, y, z, s]) => {
                write!(f, "quaternion <{x}, {y}, {z}, {s}>")
            }
        }
    }
}

/// The merged builtins database. References the two sub-databases without
/// copying their entries; dropping it releases both arenas.
#[derive(Debug)]
pub struct BuiltinsDb {
    constants: ConstantsDb,
    overlay: OverlayDb,
    width: VectorWidth,
}

impl BuiltinsDb {
    pub fn new(constants: ConstantsDb, overlay: OverlayDb, width: VectorWidth) -> Self {
        Self {
            constants,
            overlay,
            width,
        }
    }

    pub fn constants(&self) -> &ConstantsDb {
        &self.constants
    }

    pub fn overlay(&self) -> &OverlayDb {
        &self.overlay
    }

    /// Resolve one constant's publish representation, or `None` if the name
    /// is unknown or its kind is unpublishable (`null`, `error`, `list`).
    pub fn resolve(&self, name: &str) -> Option<GlobalRepr<'_>> {
        let value = self.constants.get(name)?;
        self.representation(value, self.overlay.get(name))
    }

    /// Publish every constant as a VM global under its original name.
    ///
    /// Returns the number of bindings written. A binding the VM rejects is
    /// skipped and the batch continues; entry order is immaterial.
    pub fn publish_globals<V: VmGlobals>(&self, vm: &mut V) -> usize {
        let mut bound = 0;

        for (name, value) in self.constants.iter() {
            let Some(repr) = self.representation(value, self.overlay.get(name)) else {
                tracing::debug!(name, kind = value.kind(), "constant has no publishable form");
                continue;
            };

            match repr {
                GlobalRepr::Number(n) => vm.push_number(n),
                GlobalRepr::Text(s) => vm.push_text(s),
                GlobalRepr::Uuid(u) => vm.push_uuid(u),
                GlobalRepr::Vector(v) => vm.push_vector(v),
                GlobalRepr::Quaternion(q) => vm.push_quaternion(q),
            }

            match vm.set_global(name) {
                Ok(()) => bound += 1,
                Err(err) => tracing::debug!(name, %err, "skipping global binding"),
            }
        }

        tracing::debug!(bound, "published builtin globals");
        bound
    }

    fn representation<'a>(
        &self,
        value: ValueView<'a>,
        overlay: Option<OverlayType>,
    ) -> Option<GlobalRepr<'a>> {
        if let Some(tag) = overlay {
            match (tag, value) {
                (OverlayType::Uuid, ValueView::Key(s) | ValueView::Text(s)) => {
                    return Some(GlobalRepr::Uuid(s));
                }
                (OverlayType::Quaternion, ValueView::Quaternion(q)) => {
                    return Some(GlobalRepr::Quaternion(q));
                }
                (OverlayType::Vector, ValueView::Vector(v)) => {
                    return Some(GlobalRepr::Vector(v));
                }
                (OverlayType::Number, ValueView::Integer(i)) => {
                    return Some(GlobalRepr::Number(f64::from(i)));
                }
                (OverlayType::Number, ValueView::Float(x)) => {
                    return Some(GlobalRepr::Number(f64::from(x)));
                }
                (OverlayType::Text, ValueView::Text(s) | ValueView::Key(s)) => {
                    return Some(GlobalRepr::Text(s));
                }
                // Unknown tag, or the requested coercion does not match the
                // stored kind: fall back to native-kind publication.
                _ => {}
            }
        }
        self.native(value)
    }

    fn native<'a>(&self, value: ValueView<'a>) -> Option<GlobalRepr<'a>> {
        match value {
            ValueView::Integer(i) => Some(GlobalRepr::Number(f64::from(i))),
            ValueView::Float(x) => Some(GlobalRepr::Number(f64::from(x))),
            ValueView::Text(s) | ValueView::Key(s) => Some(GlobalRepr::Text(s)),
            ValueView::Vector(v) => Some(GlobalRepr::Vector(v)),
            ValueView::Quaternion(q) => Some(match self.width {
                VectorWidth::Four => GlobalRepr::Quaternion(q),
                // Three-wide build: drop the scalar part.
                VectorWidth::Three => GlobalRepr::Vector([q[0], q[1], q[2]]),
            }),
            ValueView::Null | ValueView::Error | ValueView::List => None,
        }
    }
}
