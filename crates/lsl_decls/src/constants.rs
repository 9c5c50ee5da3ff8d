//! Constant-file parser and database.
//!
//! Parses the machine-generated LSL constant declarations, one per line:
//!
//! ```text
//! const <type> <NAME> = <value>
//! ```
//!
//! Blank lines and `//` comments are ignored. The source is generated by an
//! external tool and may contain syntax this parser does not model, so a
//! malformed line is always a per-line skip, never a parse failure: only
//! arena exhaustion aborts the whole call.
//!
//! ## Notes
//! - `TRUE` and `FALSE` are filtered out regardless of declared type; the VM
//!   publishes booleans through its own mechanism.
//! - A `string` value shaped like a canonical UUID is promoted to the `Key`
//!   kind so the typed dialect can pick it up as a uuid without a separate
//!   declaration pass.
//! - `list` constants are recorded but have no payload and are never
//!   publishable.

use std::collections::HashMap;

use crate::arena::{ArenaFull, StrArena, StrSpan};

// ============================================================================
// Value kinds
// ============================================================================

/// Stored form of one constant: the kind union of the legacy dialect.
///
/// `Null`, `Error`, and `List` are recorded-only kinds: no declaration
/// syntax produces the first two, and `List` carries no payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Integer(i32),
    Float(f32),
    Text(StrSpan),
    Key(StrSpan),
    Vector([f32; 3]),
    Quaternion([f32; 4]),
    Null,
    Error,
    List,
}

/// Borrowed view of a constant, with text payloads resolved against the
/// owning database's arena. This is the lookup currency for constant
/// folding and publication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueView<'a> {
    Integer(i32),
    Float(f32),
    Text(&'a str),
    Key(&'a str),
    Vector([f32; 3]),
    Quaternion([f32; 4]),
    Null,
    Error,
    List,
}

impl ValueView<'_> {
    /// Kind name as spelled in the declaration grammar.
    pub fn kind(&self) -> &'static str {
        match self {
            ValueView::Integer(_) => "integer",
            ValueView::Float(_) => "float",
            ValueView::Text(_) => "string",
            ValueView::Key(_) => "key",
            ValueView::Vector(_) => "vector",
            ValueView::Quaternion(_) => "rotation",
            ValueView::Null => "null",
            ValueView::Error => "error",
            ValueView::List => "list",
        }
    }
}

// ============================================================================
// Database
// ============================================================================

/// Name-indexed constant database.
///
/// Populated once per [`parse`] call; the last definition wins for a
/// duplicate name. All payload text lives in one arena released when the
/// database drops.
#[derive(Debug, Default)]
pub struct ConstantsDb {
    arena: StrArena,
    entries: HashMap<Box<str>, ConstValue>,
    skipped: usize,
}

impl ConstantsDb {
    /// Look up a constant by name.
    pub fn get(&self, name: &str) -> Option<ValueView<'_>> {
        self.entries.get(name).map(|value| self.view(value))
    }

    /// Iterate all entries. Order is unspecified (flat table).
    pub fn iter(&self) -> impl Iterator<Item = (&str, ValueView<'_>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_ref(), self.view(value)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidate lines the parse dropped (malformed, unknown type keyword,
    /// or the `TRUE`/`FALSE` filter). Diagnostic only.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    fn view(&self, value: &ConstValue) -> ValueView<'_> {
        match *value {
            ConstValue::Integer(i) => ValueView::Integer(i),
            ConstValue::Float(f) => ValueView::Float(f),
            ConstValue::Text(span) => ValueView::Text(self.arena.resolve(span)),
            ConstValue::Key(span) => ValueView::Key(self.arena.resolve(span)),
            ConstValue::Vector(v) => ValueView::Vector(v),
            ConstValue::Quaternion(q) => ValueView::Quaternion(q),
            ConstValue::Null => ValueView::Null,
            ConstValue::Error => ValueView::Error,
            ConstValue::List => ValueView::List,
        }
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Parse a constant declaration source into a fresh database.
///
/// CR, LF, and CRLF line endings are all accepted. The only error is arena
/// exhaustion; every line-level problem is a skip.
pub fn parse(source: &str) -> Result<ConstantsDb, ArenaFull> {
    let mut db = ConstantsDb::default();

    for raw in source.split(['\r', '\n']) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        match parse_decl(line, &mut db.arena)? {
            Some((name, value)) => {
                // Last definition wins; the generator owns conflict hygiene.
                db.entries.insert(name.into(), value);
            }
            None => {
                tracing::debug!(line, "dropped constant declaration");
                db.skipped += 1;
            }
        }
    }

    Ok(db)
}

/// Parse one candidate declaration line.
///
/// Returns `Ok(None)` for a skip; that outcome is deliberately distinct
/// from the resource error, which aborts the caller.
fn parse_decl<'a>(
    line: &'a str,
    arena: &mut StrArena,
) -> Result<Option<(&'a str, ConstValue)>, ArenaFull> {
    // Header tokens are whitespace-delimited; the value is everything after
    // the first `=`.
    let Some((head, value)) = line.split_once('=') else {
        return Ok(None);
    };

    let mut tokens = head.split_whitespace();
    if tokens.next() != Some("const") {
        return Ok(None);
    }
    let (Some(type_kw), Some(name), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Ok(None);
    };

    // Booleans go through a separate VM mechanism.
    if name == "TRUE" || name == "FALSE" {
        return Ok(None);
    }

    let value = value.trim();
    let parsed = match type_kw {
        "integer" => parse_integer(value).map(ConstValue::Integer),
        "float" => value.parse::<f32>().ok().map(ConstValue::Float),
        "string" => match unquote(value) {
            Some(text) if is_uuid_shaped(&text) => Some(ConstValue::Key(arena.alloc(&text)?)),
            Some(text) => Some(ConstValue::Text(arena.alloc(&text)?)),
            None => None,
        },
        "key" => match unquote(value) {
            Some(text) => Some(ConstValue::Key(arena.alloc(&text)?)),
            None => None,
        },
        "vector" => parse_vector(value).map(ConstValue::Vector),
        "rotation" => parse_rotation(value).map(ConstValue::Quaternion),
        // Recorded but unusable: list constants have no publishable payload.
        "list" => Some(ConstValue::List),
        // Unknown type keyword: future syntax, drop this line only.
        _ => None,
    };

    Ok(parsed.map(|value| (name, value)))
}

/// Signed 32-bit integer literal: decimal first, then `0x`-prefixed hex.
fn parse_integer(text: &str) -> Option<i32> {
    if let Ok(value) = text.parse::<i32>() {
        return Some(value);
    }
    let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))?;
    // Flag masks use the full 32-bit range; wrap like the VM's integers do.
    u32::from_str_radix(digits, 16).ok().map(|v| v as i32)
}

/// Strip a double-quoted literal and process its escapes.
///
/// `\n \t \r \\ \"` map to their characters; any other escaped character
/// passes through literally. Unterminated or trailing-junk literals are
/// malformed.
fn unquote(text: &str) -> Option<String> {
    let rest = text.strip_prefix('"')?;
    let mut out = String::with_capacity(rest.len());
    let mut chars = rest.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                // The closing quote must end the value.
                return chars.as_str().is_empty().then_some(out);
            }
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                other => out.push(other),
            },
            other => out.push(other),
        }
    }

    // Never saw the closing quote.
    None
}

/// Canonical UUID shape: 36 characters, hyphens at 8/13/18/23, hex elsewhere.
pub fn is_uuid_shaped(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// `<a, b, c>` with exactly three float components.
fn parse_vector(text: &str) -> Option<[f32; 3]> {
    let inner = text.strip_prefix('<')?.strip_suffix('>')?;
    let mut vec = [0.0f32; 3];
    let mut read = 0;
    for (i, part) in inner.split(',').enumerate() {
        if i >= 3 {
            return None;
        }
        vec[i] = part.trim().parse().ok()?;
        read += 1;
    }
    (read == 3).then_some(vec)
}

/// `<a, b, c, d>` with exactly four float components.
fn parse_rotation(text: &str) -> Option<[f32; 4]> {
    let inner = text.strip_prefix('<')?.strip_suffix('>')?;
    // Unread components default to the identity rotation. The count check
    // below still drops short forms, so the fill is never observable; it is
    // kept to match the upstream intermediate construction.
    let mut quat = [0.0, 0.0, 0.0, 1.0f32];
    let mut read = 0;
    for (i, part) in inner.split(',').enumerate() {
        if i >= 4 {
            return None;
        }
        quat[i] = part.trim().parse().ok()?;
        read += 1;
    }
    (read == 4).then_some(quat)
}
