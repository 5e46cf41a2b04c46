//! Schema compilation pipeline and output bundle assembly

use crate::{Error, Result, canonical, fingerprint};
use codec_ir::Value;
use codec_schema::{SchemaDocument, SchemaKind, flatten, load_file};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// The compiled form of one schema document.
///
/// Immutable once produced; consumed by code emission.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    /// Schema name, carried through unchanged
    pub name: String,

    /// Declared kind
    pub kind: SchemaKind,

    /// Flattened keys in declaration order
    pub key_list: Vec<String>,

    /// Flattened key to raw field value
    pub key_map: HashMap<String, Value>,

    /// 64-bit fingerprint of the canonical blob
    pub fingerprint: u64,

    /// Canonical CBOR serialization of the whole document
    pub blob: Vec<u8>,
}

/// Compile a validated schema document.
///
/// Flattens the field tree, then serializes the *entire* parsed document
/// (not the flattened keys) into the canonical blob the fingerprint is
/// derived from.
pub fn compile_document(doc: &SchemaDocument) -> Result<CompiledSchema> {
    let flat = flatten(&doc.fields, doc.kind)?;
    let blob = canonical::encode(&doc.raw)?;
    let fingerprint = fingerprint::fingerprint(&blob);

    debug!(
        name = %doc.name,
        kind = %doc.kind,
        key_count = flat.key_list.len(),
        blob_len = blob.len(),
        fingerprint,
        "compiled schema"
    );

    Ok(CompiledSchema {
        name: doc.name.clone(),
        kind: doc.kind,
        key_list: flat.key_list,
        key_map: flat.key_map,
        fingerprint,
        blob,
    })
}

/// Compile the schema file at `path` for the expected kind.
///
/// A missing file means the side is simply absent and yields `Ok(None)`;
/// any other failure aborts the compilation.
pub fn compile_file(path: &Path, expected: SchemaKind) -> Result<Option<CompiledSchema>> {
    if !path.is_file() {
        debug!(path = %path.display(), %expected, "schema file absent, skipping side");
        return Ok(None);
    }
    let doc = load_file(path, expected)?;
    info!(path = %path.display(), name = %doc.name, %expected, "loaded schema");
    compile_document(&doc).map(Some)
}

/// The emission-ready pair of compiled schemas.
#[derive(Debug, Clone)]
pub struct CodecBundle {
    /// Compiled decoder schema, if present
    pub decoder: Option<CompiledSchema>,

    /// Compiled encoder schema, if present
    pub encoder: Option<CompiledSchema>,
}

impl CodecBundle {
    /// Assemble a bundle from the two independently compiled sides.
    ///
    /// At least one side must be present.
    pub fn assemble(
        decoder: Option<CompiledSchema>,
        encoder: Option<CompiledSchema>,
    ) -> Result<Self> {
        if decoder.is_none() && encoder.is_none() {
            return Err(Error::NoSchemaProvided);
        }
        Ok(Self { decoder, encoder })
    }

    /// Compile both sides from their file paths and assemble the bundle.
    pub fn from_paths(decoder_path: &Path, encoder_path: &Path) -> Result<Self> {
        let decoder = compile_file(decoder_path, SchemaKind::Decoder)?;
        let encoder = compile_file(encoder_path, SchemaKind::Encoder)?;
        Self::assemble(decoder, encoder)
    }

    /// The decoder fingerprint, zero when the side is absent.
    pub fn decoder_fingerprint(&self) -> u64 {
        self.decoder.as_ref().map_or(0, |c| c.fingerprint)
    }

    /// The encoder fingerprint, zero when the side is absent.
    pub fn encoder_fingerprint(&self) -> u64 {
        self.encoder.as_ref().map_or(0, |c| c.fingerprint)
    }

    /// Both present sides in decoder-then-encoder order.
    pub fn sides(&self) -> impl Iterator<Item = &CompiledSchema> {
        self.decoder.iter().chain(self.encoder.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec_schema::load_str;

    const DECODER: &str = "\
version: 2
type: decoder
name: x
schema:
  - temperature:
";

    fn compile_str(input: &str, kind: SchemaKind) -> CompiledSchema {
        let doc = load_str(input, kind, "test").unwrap();
        compile_document(&doc).unwrap()
    }

    #[test]
    fn single_field_document_compiles() {
        let compiled = compile_str(DECODER, SchemaKind::Decoder);
        assert_eq!(compiled.key_list, vec!["TEMPERATURE"]);
        assert_ne!(compiled.fingerprint, 0);
        assert!(!compiled.blob.is_empty());
    }

    #[test]
    fn compilation_is_deterministic() {
        let a = compile_str(DECODER, SchemaKind::Decoder);
        let b = compile_str(DECODER, SchemaKind::Decoder);
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_eq!(a.blob, b.blob);
    }

    #[test]
    fn sibling_reorder_changes_fingerprint() {
        let forward = "version: 2\ntype: decoder\nname: x\nschema:\n  - a:\n  - b:\n";
        let reversed = "version: 2\ntype: decoder\nname: x\nschema:\n  - b:\n  - a:\n";
        let a = compile_str(forward, SchemaKind::Decoder);
        let b = compile_str(reversed, SchemaKind::Decoder);
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn assemble_requires_at_least_one_side() {
        let err = CodecBundle::assemble(None, None).unwrap_err();
        assert!(matches!(err, Error::NoSchemaProvided));
    }

    #[test]
    fn absent_sides_report_zero_fingerprints() {
        let compiled = compile_str(DECODER, SchemaKind::Decoder);
        let bundle = CodecBundle::assemble(Some(compiled), None).unwrap();
        assert_ne!(bundle.decoder_fingerprint(), 0);
        assert_eq!(bundle.encoder_fingerprint(), 0);
        assert_eq!(bundle.sides().count(), 1);
    }
}
