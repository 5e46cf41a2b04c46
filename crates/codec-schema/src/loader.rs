//! Schema document loading and shape validation

use crate::model::{SCHEMA_VERSION, SchemaDocument, SchemaKind};
use crate::{Error, Result};
use codec_ir::{Value, from_yaml};
use std::path::Path;
use tracing::{debug, trace};

/// Load and validate a schema document from a file.
///
/// The caller states which kind it expects; a well-formed document of the
/// other kind fails with [`Error::KindMismatch`]. Whether a missing file
/// is acceptable is the caller's decision, so a read failure is reported
/// as an error here.
pub fn load_file(path: &Path, expected: SchemaKind) -> Result<SchemaDocument> {
    let origin = path.display().to_string();
    trace!(path = %origin, %expected, "loading schema file");
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        origin: origin.clone(),
        source,
    })?;
    load_str(&content, expected, &origin)
}

/// Load and validate a schema document from a string.
///
/// `origin` names the source in error messages (a file path, or a label
/// for in-memory documents).
pub fn load_str(content: &str, expected: SchemaKind, origin: &str) -> Result<SchemaDocument> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|source| Error::Parse {
            origin: origin.to_string(),
            source,
        })?;
    let raw = from_yaml(&yaml)?;
    validate(raw, expected, origin)
}

fn validate(raw: Value, expected: SchemaKind, origin: &str) -> Result<SchemaDocument> {
    let invalid = |reason: &str| Error::InvalidSchema {
        origin: origin.to_string(),
        reason: reason.to_string(),
    };

    if raw.as_map().is_none() {
        return Err(invalid("document is not a mapping"));
    }

    let version = raw.get("version").ok_or_else(|| invalid("missing version"))?;
    if version.as_int() != Some(SCHEMA_VERSION) {
        return Err(Error::InvalidVersion {
            origin: origin.to_string(),
            found: describe(version),
        });
    }

    let kind_value = raw.get("type").ok_or_else(|| invalid("missing type"))?;
    let kind = kind_value
        .as_str()
        .and_then(SchemaKind::parse)
        .ok_or_else(|| Error::InvalidKind {
            origin: origin.to_string(),
            found: describe(kind_value),
        })?;
    if kind != expected {
        return Err(Error::KindMismatch {
            origin: origin.to_string(),
            expected,
            found: kind,
        });
    }

    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing name"))?
        .to_string();

    let fields = raw
        .get("schema")
        .ok_or_else(|| invalid("missing schema"))?
        .as_seq()
        .ok_or_else(|| invalid("schema is not a sequence"))?
        .to_vec();

    debug!(%origin, %kind, name = %name, field_count = fields.len(), "loaded schema document");

    Ok(SchemaDocument {
        name,
        kind,
        fields,
        raw,
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.kind_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_DECODER: &str = "\
version: 2
type: decoder
name: test
schema:
  - temperature:
";

    #[test]
    fn loads_minimal_decoder() {
        let doc = load_str(MINIMAL_DECODER, SchemaKind::Decoder, "test").unwrap();
        assert_eq!(doc.name, "test");
        assert_eq!(doc.kind, SchemaKind::Decoder);
        assert_eq!(doc.fields.len(), 1);
    }

    #[test]
    fn raw_document_keeps_top_level_entries() {
        let doc = load_str(MINIMAL_DECODER, SchemaKind::Decoder, "test").unwrap();
        assert_eq!(doc.raw.get("version"), Some(&Value::Int(2)));
        assert!(doc.raw.get("schema").unwrap().as_seq().is_some());
    }

    #[test]
    fn rejects_missing_version() {
        let err = load_str("type: decoder\nname: x\nschema: []", SchemaKind::Decoder, "t")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { .. }));
    }

    #[test]
    fn rejects_wrong_version() {
        let err = load_str(
            "version: 1\ntype: decoder\nname: x\nschema: []",
            SchemaKind::Decoder,
            "t",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = load_str(
            "version: 2\ntype: transcoder\nname: x\nschema: []",
            SchemaKind::Decoder,
            "t",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidKind { .. }));
    }

    #[test]
    fn rejects_kind_mismatch() {
        let err = load_str(MINIMAL_DECODER, SchemaKind::Encoder, "t").unwrap_err();
        match err {
            Error::KindMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected, SchemaKind::Encoder);
                assert_eq!(found, SchemaKind::Decoder);
            }
            other => panic!("expected KindMismatch, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_sequence_schema() {
        let err = load_str(
            "version: 2\ntype: decoder\nname: x\nschema: 42",
            SchemaKind::Decoder,
            "t",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { .. }));
    }

    #[test]
    fn rejects_missing_name() {
        let err = load_str(
            "version: 2\ntype: decoder\nschema: []",
            SchemaKind::Decoder,
            "t",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { .. }));
    }

    #[test]
    fn rejects_invalid_yaml() {
        let err = load_str("name: [", SchemaKind::Decoder, "t").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
