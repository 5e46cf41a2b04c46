//! Schema document model and key normalization

use codec_ir::Value;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// The single supported schema document version.
pub const SCHEMA_VERSION: i64 = 2;

/// Separator joining normalized ancestor names in flattened keys.
pub const KEY_SEPARATOR: &str = "__";

/// Modifier keywords recognized in decoder schemas.
const DECODER_KEYWORDS: &[&str] = &[
    "$key", "$div", "$mul", "$add", "$sub", "$fpp", "$tso", "$tsp", "$enum", "$mbus",
];

/// Modifier keywords recognized in encoder schemas.
const ENCODER_KEYWORDS: &[&str] = &["$div", "$mul", "$add", "$sub", "$fpp", "$enum", "$type"];

/// Values accepted for the `$type` modifier.
pub const TYPE_WORDS: &[&str] = &["int", "float", "bool", "string"];

/// The two schema kinds, each with its own modifier vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Cloud-side decoder schema (device-to-cloud payloads)
    Decoder,
    /// Cloud-side encoder schema (cloud-to-device payloads)
    Encoder,
}

impl SchemaKind {
    /// Modifier keywords recognized for this kind.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SchemaKind::Decoder => DECODER_KEYWORDS,
            SchemaKind::Encoder => ENCODER_KEYWORDS,
        }
    }

    /// The kind name as it appears in schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Decoder => "decoder",
            SchemaKind::Encoder => "encoder",
        }
    }

    /// Parse a kind name from a schema document.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "decoder" => Some(SchemaKind::Decoder),
            "encoder" => Some(SchemaKind::Encoder),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated schema document.
///
/// `raw` keeps the complete parsed document, because the fingerprint is
/// computed over the canonical serialization of the whole document rather
/// than the flattened keys.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Identifying name, carried through unchanged
    pub name: String,

    /// Declared kind, immutable once loaded
    pub kind: SchemaKind,

    /// The ordered field declarations (the `schema` sequence)
    pub fields: Vec<Value>,

    /// The entire parsed document
    pub raw: Value,
}

static NON_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Z0-9]").expect("static pattern"));

/// Normalize a field name for the flattened key namespace.
///
/// Upper-cases the name and replaces every character outside `[A-Z0-9]`
/// with an underscore. Pure and total over any input string.
pub fn normalize_key(key: &str) -> String {
    NON_KEY_CHARS
        .replace_all(&key.to_uppercase(), "_")
        .into_owned()
}
