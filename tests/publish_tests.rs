//! Bulk publication tests against a recording VM.
//!
//! The recording VM captures every push/bind pair, so these tests pin down
//! exactly what the resolver hands the interpreter: which representation a
//! constant publishes under, and how the batch behaves when the VM rejects
//! a binding.

use std::collections::{HashMap, HashSet};

use slua_builtins::{
    BuiltinsDb, SetGlobalError, VectorWidth, VmGlobals,
};

#[derive(Debug, Clone, PartialEq)]
enum Published {
    Number(f64),
    Text(String),
    Uuid(String),
    Vector([f32; 3]),
    Quaternion([f32; 4]),
}

/// Test double for the VM's push/bind surface.
#[derive(Debug, Default)]
struct RecordingVm {
    pending: Option<Published>,
    globals: HashMap<String, Published>,
    rejected: HashSet<String>,
}

impl RecordingVm {
    fn rejecting(names: &[&str]) -> Self {
        Self {
            rejected: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl VmGlobals for RecordingVm {
    fn push_number(&mut self, value: f64) {
        self.pending = Some(Published::Number(value));
    }

    fn push_text(&mut self, text: &str) {
        self.pending = Some(Published::Text(text.to_string()));
    }

    fn push_uuid(&mut self, uuid: &str) {
        self.pending = Some(Published::Uuid(uuid.to_string()));
    }

    fn push_vector(&mut self, xyz: [f32; 3]) {
        self.pending = Some(Published::Vector(xyz));
    }

    fn push_quaternion(&mut self, xyzs: [f32; 4]) {
        self.pending = Some(Published::Quaternion(xyzs));
    }

    fn set_global(&mut self, name: &str) -> Result<(), SetGlobalError> {
        let value = self.pending.take().expect("set_global without pending push");
        if self.rejected.contains(name) {
            return Err(SetGlobalError);
        }
        self.globals.insert(name.to_string(), value);
        Ok(())
    }
}

fn merged(constants_src: &str, overlay_src: &str, width: VectorWidth) -> BuiltinsDb {
    BuiltinsDb::new(
        lsl_decls::constants::parse(constants_src).unwrap(),
        lsl_decls::overlay::parse(overlay_src),
        width,
    )
}

const NULL_KEY_LINE: &str = "const key NULL_KEY = \"00000000-0000-0000-0000-000000000000\"\n";

#[test]
fn overlay_selects_uuid_publication() {
    let db = merged(NULL_KEY_LINE, "declare NULL_KEY: uuid\n", VectorWidth::Four);
    let mut vm = RecordingVm::default();

    assert_eq!(db.publish_globals(&mut vm), 1);
    assert_eq!(
        vm.globals.get("NULL_KEY"),
        Some(&Published::Uuid(
            "00000000-0000-0000-0000-000000000000".to_string()
        ))
    );
}

#[test]
fn same_constant_publishes_plain_text_without_overlay() {
    let db = merged(NULL_KEY_LINE, "", VectorWidth::Four);
    let mut vm = RecordingVm::default();

    assert_eq!(db.publish_globals(&mut vm), 1);
    assert_eq!(
        vm.globals.get("NULL_KEY"),
        Some(&Published::Text(
            "00000000-0000-0000-0000-000000000000".to_string()
        ))
    );
}

#[test]
fn geometric_kinds_publish_with_their_components() {
    let db = merged(
        "const vector ZERO_VECTOR = <0.0, 0.0, 0.0>\n\
         const rotation ZERO_ROTATION = <0.0, 0.0, 0.0, 1.0>\n",
        "",
        VectorWidth::Four,
    );
    let mut vm = RecordingVm::default();

    assert_eq!(db.publish_globals(&mut vm), 2);
    assert_eq!(
        vm.globals.get("ZERO_VECTOR"),
        Some(&Published::Vector([0.0, 0.0, 0.0]))
    );
    assert_eq!(
        vm.globals.get("ZERO_ROTATION"),
        Some(&Published::Quaternion([0.0, 0.0, 0.0, 1.0]))
    );
}

#[test]
fn three_wide_build_publishes_degraded_quaternions() {
    let db = merged(
        "const rotation ZERO_ROTATION = <0.0, 0.0, 0.0, 1.0>\n",
        "",
        VectorWidth::Three,
    );
    let mut vm = RecordingVm::default();

    db.publish_globals(&mut vm);
    assert_eq!(
        vm.globals.get("ZERO_ROTATION"),
        Some(&Published::Vector([0.0, 0.0, 0.0]))
    );
}

#[test]
fn rejected_binding_skips_only_that_entry() {
    let db = merged(
        "const integer A = 1\n\
         const integer B = 2\n\
         const integer C = 3\n",
        "",
        VectorWidth::Four,
    );
    let mut vm = RecordingVm::rejecting(&["B"]);

    assert_eq!(db.publish_globals(&mut vm), 2);
    assert_eq!(vm.globals.get("A"), Some(&Published::Number(1.0)));
    assert_eq!(vm.globals.get("B"), None);
    assert_eq!(vm.globals.get("C"), Some(&Published::Number(3.0)));
}

#[test]
fn unpublishable_kinds_are_skipped() {
    let db = merged(
        "const list EMPTY_LIST = []\n\
         const integer KEEP = 1\n",
        "",
        VectorWidth::Four,
    );
    let mut vm = RecordingVm::default();

    assert_eq!(db.publish_globals(&mut vm), 1);
    assert!(!vm.globals.contains_key("EMPTY_LIST"));
}

#[test]
fn uninitialized_registry_publishes_nothing() {
    let registry = slua_builtins::BuiltinsRegistry::new();
    let mut vm = RecordingVm::default();

    assert_eq!(registry.publish_globals(&mut vm), 0);
    assert!(vm.globals.is_empty());
}
