//! Lifecycle tests: file-backed initialize, re-initialize, teardown.

use std::io::Write;

use slua_builtins::{BuiltinsError, BuiltinsRegistry, GlobalRepr, OverlayType, ValueView};
use tempfile::NamedTempFile;

fn decl_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp declaration file");
    file.write_all(contents.as_bytes()).expect("write temp declaration file");
    file
}

#[test]
fn initialize_from_files() {
    let constants = decl_file(
        "const integer HEX_TEST = 0xFF\n\
         const key NULL_KEY = \"00000000-0000-0000-0000-000000000000\"\n",
    );
    let overlay = decl_file("declare NULL_KEY: uuid\n");

    let mut registry = BuiltinsRegistry::new();
    registry
        .initialize(Some(constants.path()), Some(overlay.path()))
        .unwrap();

    assert_eq!(registry.lookup_constant("HEX_TEST"), Some(ValueView::Integer(255)));
    assert_eq!(registry.lookup_overlay_type("NULL_KEY"), Some(OverlayType::Uuid));
    assert_eq!(
        registry.resolve("NULL_KEY"),
        Some(GlobalRepr::Uuid("00000000-0000-0000-0000-000000000000"))
    );
}

#[test]
fn reinitialize_replaces_all_content() {
    let first = decl_file("const integer ONLY_IN_A = 1\n");
    let second = decl_file("const integer ONLY_IN_B = 2\n");
    let empty_overlay = decl_file("");

    let mut registry = BuiltinsRegistry::new();
    registry
        .initialize(Some(first.path()), Some(empty_overlay.path()))
        .unwrap();
    assert!(registry.lookup_constant("ONLY_IN_A").is_some());

    registry
        .initialize(Some(second.path()), Some(empty_overlay.path()))
        .unwrap();
    assert_eq!(registry.lookup_constant("ONLY_IN_A"), None);
    assert_eq!(registry.lookup_constant("ONLY_IN_B"), Some(ValueView::Integer(2)));
}

#[test]
fn bad_path_fails_and_empties_the_slot() {
    let mut registry = BuiltinsRegistry::new();
    registry.initialize(None, None).unwrap();
    assert!(registry.is_initialized());

    let missing = std::path::Path::new("/nonexistent/decls/lsl_constants.decl");
    let err = registry.initialize(Some(missing), None).unwrap_err();
    assert!(matches!(err, BuiltinsError::SourceUnavailable { .. }));

    // Teardown of the old instance precedes the failed parse; the slot is
    // empty, not half-built.
    assert!(!registry.is_initialized());
    assert_eq!(registry.lookup_constant("PI"), None);
}

#[test]
fn overlay_unknown_tag_is_distinct_from_a_miss() {
    let constants = decl_file("const integer N = 1\n");
    let overlay = decl_file("declare N: buffer\n");

    let mut registry = BuiltinsRegistry::new();
    registry
        .initialize(Some(constants.path()), Some(overlay.path()))
        .unwrap();

    assert_eq!(registry.lookup_overlay_type("N"), Some(OverlayType::Unknown));
    assert_eq!(registry.lookup_overlay_type("MISSING"), None);
}

#[test]
fn teardown_releases_everything_and_is_idempotent() {
    let mut registry = BuiltinsRegistry::new();
    registry.initialize(None, None).unwrap();

    registry.teardown();
    assert!(!registry.is_initialized());
    assert_eq!(registry.lookup_constant("ZERO_VECTOR"), None);

    // Second teardown is a no-op.
    registry.teardown();
}

#[test]
fn embedded_defaults_cover_the_stock_set() {
    let mut registry = BuiltinsRegistry::new();
    registry.initialize(None, None).unwrap();

    assert_eq!(
        registry.lookup_constant("ZERO_VECTOR"),
        Some(ValueView::Vector([0.0, 0.0, 0.0]))
    );
    assert_eq!(
        registry.lookup_constant("ZERO_ROTATION"),
        Some(ValueView::Quaternion([0.0, 0.0, 0.0, 1.0]))
    );
    assert_eq!(registry.lookup_constant("EOF"), Some(ValueView::Text("\n\n\n")));
    // Booleans never enter the database, even though the generated source
    // declares them.
    assert_eq!(registry.lookup_constant("TRUE"), None);
    assert_eq!(registry.lookup_constant("FALSE"), None);
}
