//! Type-overlay parser and database.
//!
//! The typed dialect ships a generated declaration file assigning host
//! types to the legacy constant names:
//!
//! ```text
//! declare NULL_KEY: uuid
//! ```
//!
//! `--` marks a comment. Function signatures and compound declarations are
//! not modeled: any line containing `function`, `extern`, `(`, or `{` is
//! skipped outright, as is anything without the `declare ` prefix. An
//! unrecognized type label is still recorded, tagged [`OverlayType::Unknown`],
//! so "declaration present but unrecognized" stays distinguishable from a
//! plain lookup miss.

use std::collections::HashMap;

// ============================================================================
// Type tags
// ============================================================================

/// Host-type tag assigned to a constant name by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayType {
    Number,
    Text,
    Uuid,
    Vector,
    Quaternion,
    /// Declaration present, label unrecognized. Selects no coercion.
    Unknown,
}

impl OverlayType {
    /// Label as spelled in the declaration file (canonical spelling for
    /// `Quaternion`, which also accepts `rotation`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayType::Number => "number",
            OverlayType::Text => "string",
            OverlayType::Uuid => "uuid",
            OverlayType::Vector => "vector",
            OverlayType::Quaternion => "quaternion",
            OverlayType::Unknown => "unknown",
        }
    }

    fn from_label(label: &str) -> Self {
        match label {
            "number" => OverlayType::Number,
            "string" => OverlayType::Text,
            "uuid" => OverlayType::Uuid,
            "vector" => OverlayType::Vector,
            "quaternion" | "rotation" => OverlayType::Quaternion,
            _ => OverlayType::Unknown,
        }
    }
}

// ============================================================================
// Database
// ============================================================================

/// Name → type-tag table. An entry whose name has no matching constant is
/// inert; the merged resolver never consults it.
#[derive(Debug, Default)]
pub struct OverlayDb {
    entries: HashMap<Box<str>, OverlayType>,
    skipped: usize,
}

impl OverlayDb {
    pub fn get(&self, name: &str) -> Option<OverlayType> {
        self.entries.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, OverlayType)> {
        self.entries.iter().map(|(name, tag)| (name.as_ref(), *tag))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-comment lines the parse did not model. Diagnostic only.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Parse a type-overlay source into a fresh database. Every line-level
/// problem is a skip; this parse cannot fail.
pub fn parse(source: &str) -> OverlayDb {
    let mut db = OverlayDb::default();

    for raw in source.split(['\r', '\n']) {
        // Strip a trailing `--` comment; a full-line comment degenerates to
        // an empty line.
        let line = raw.split_once("--").map_or(raw, |(head, _)| head).trim();
        if line.is_empty() {
            continue;
        }
        match parse_decl(line) {
            Some((name, tag)) => {
                db.entries.insert(name.into(), tag);
            }
            None => {
                tracing::debug!(line, "dropped overlay declaration");
                db.skipped += 1;
            }
        }
    }

    db
}

fn parse_decl(line: &str) -> Option<(&str, OverlayType)> {
    // Function signatures and compound declarations are out of scope.
    if line.contains("function")
        || line.contains("extern")
        || line.contains('(')
        || line.contains('{')
    {
        return None;
    }

    let rest = line.strip_prefix("declare ")?;
    let (name, label) = rest.split_once(':')?;

    let name = name.trim();
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if !valid {
        return None;
    }

    Some((name, OverlayType::from_label(label.trim())))
}
