//! C header rendering for compiled codec bundles

use crate::{Error, Result};
use codec_compiler::{CodecBundle, CompiledSchema};
use codec_schema::SchemaKind;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

const INCLUDE_GUARD: &str = "CODEC_H_";

/// Writes a codec bundle as a C header artifact.
///
/// The layout mirrors what firmware build tooling consumes: two
/// fingerprint constants, one key enum per present schema, an options
/// macro bundling buffers and hashes, and the canonical blobs rendered
/// as byte-array initializers.
pub struct HeaderWriter;

impl HeaderWriter {
    /// Create a new header writer
    pub fn new() -> Self {
        Self
    }

    /// Write the header for `bundle` to `path`.
    pub fn write_to_path(&self, path: &Path, bundle: &CodecBundle) -> Result<()> {
        let map_err = |source| Error::Io {
            path: path.display().to_string(),
            source,
        };
        let mut file = std::fs::File::create(path).map_err(map_err)?;
        self.write(&mut file, bundle).map_err(map_err)?;
        info!(path = %path.display(), "wrote codec header");
        Ok(())
    }

    /// Write the header for `bundle` into `writer`.
    pub fn write<W: Write>(&self, writer: &mut W, bundle: &CodecBundle) -> std::io::Result<()> {
        writeln!(writer, "#ifndef {INCLUDE_GUARD}")?;
        writeln!(writer, "#define {INCLUDE_GUARD}")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "/* This file has been generated by codecgen; do not edit. */"
        )?;
        writeln!(writer)?;
        writeln!(writer, "#ifdef __cplusplus")?;
        writeln!(writer, "extern \"C\" {{")?;
        writeln!(writer, "#endif")?;
        writeln!(writer)?;

        writeln!(
            writer,
            "#define CODEC_CLOUD_DECODER_HASH ((uint64_t)0x{:016x})",
            bundle.decoder_fingerprint()
        )?;
        writeln!(
            writer,
            "#define CODEC_CLOUD_ENCODER_HASH ((uint64_t)0x{:016x})",
            bundle.encoder_fingerprint()
        )?;
        writeln!(writer)?;

        for side in bundle.sides() {
            self.write_key_enum(writer, side)?;
        }

        self.write_options_macro(writer, bundle)?;

        for side in bundle.sides() {
            self.write_buffer_macro(writer, side)?;
        }

        writeln!(writer, "#ifdef __cplusplus")?;
        writeln!(writer, "}}")?;
        writeln!(writer, "#endif")?;
        writeln!(writer)?;
        writeln!(writer, "#endif /* {INCLUDE_GUARD} */")?;
        Ok(())
    }

    /// Emit the key enum for one schema side.
    ///
    /// Roles reverse across the link: the cloud decoder's keys are the
    /// device encoder's symbols and vice versa, so the decoder schema
    /// produces `codec_key_e` and the encoder schema `codec_key_d`.
    fn write_key_enum<W: Write>(
        &self,
        writer: &mut W,
        side: &CompiledSchema,
    ) -> std::io::Result<()> {
        let (enum_name, prefix) = match side.kind {
            SchemaKind::Decoder => ("codec_key_e", "CODEC_KEY_E_"),
            SchemaKind::Encoder => ("codec_key_d", "CODEC_KEY_D_"),
        };
        debug!(kind = %side.kind, enum_name, keys = side.key_list.len(), "emitting key enum");

        writeln!(writer, "enum {enum_name} {{")?;
        for (index, key) in side.key_list.iter().enumerate() {
            writeln!(writer, "\t{prefix}{key} = {index},")?;
        }
        writeln!(writer, "}};")?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_options_macro<W: Write>(
        &self,
        writer: &mut W,
        bundle: &CodecBundle,
    ) -> std::io::Result<()> {
        writeln!(writer, "#define CODEC_CLOUD_OPTIONS_STATIC(_name) \\")?;
        if bundle.decoder.is_some() {
            writeln!(
                writer,
                "\tstatic const uint8_t _name##_cloud_decoder[] = CLOUD_DECODER_BUFFER; \\"
            )?;
        }
        if bundle.encoder.is_some() {
            writeln!(
                writer,
                "\tstatic const uint8_t _name##_cloud_encoder[] = CLOUD_ENCODER_BUFFER; \\"
            )?;
        }
        writeln!(writer, "\tstatic struct ctr_cloud_options _name = {{ \\")?;
        writeln!(writer, "\t\t.decoder_hash = CODEC_CLOUD_DECODER_HASH, \\")?;
        writeln!(writer, "\t\t.encoder_hash = CODEC_CLOUD_ENCODER_HASH, \\")?;
        writeln!(
            writer,
            "\t\t.decoder_buf = {}, \\",
            if bundle.decoder.is_some() {
                "_name##_cloud_decoder"
            } else {
                "NULL"
            }
        )?;
        writeln!(
            writer,
            "\t\t.decoder_len = {}, \\",
            bundle.decoder.as_ref().map_or(0, |c| c.blob.len())
        )?;
        writeln!(
            writer,
            "\t\t.encoder_buf = {}, \\",
            if bundle.encoder.is_some() {
                "_name##_cloud_encoder"
            } else {
                "NULL"
            }
        )?;
        writeln!(
            writer,
            "\t\t.encoder_len = {}, \\",
            bundle.encoder.as_ref().map_or(0, |c| c.blob.len())
        )?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;
        Ok(())
    }

    /// Emit one canonical blob as a byte-array initializer, eight bytes
    /// per line.
    fn write_buffer_macro<W: Write>(
        &self,
        writer: &mut W,
        side: &CompiledSchema,
    ) -> std::io::Result<()> {
        writeln!(
            writer,
            "#define CLOUD_{}_BUFFER {{ \\",
            side.kind.as_str().to_uppercase()
        )?;
        for line in side.blob.chunks(8) {
            write!(writer, "\t")?;
            for byte in line {
                write!(writer, "0x{byte:02x}, ")?;
            }
            writeln!(writer, "\\")?;
        }
        writeln!(writer, "}}")?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for HeaderWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec_compiler::{CodecBundle, compile_document};
    use codec_schema::load_str;

    const DECODER: &str = "\
version: 2
type: decoder
name: x
schema:
  - temperature:
  - channel:
      - voltage:
";

    const ENCODER: &str = "\
version: 2
type: encoder
name: x
schema:
  - interval:
      - $type: int
";

    fn render(bundle: &CodecBundle) -> String {
        let mut out = Vec::new();
        HeaderWriter::new().write(&mut out, bundle).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn bundle(decoder: Option<&str>, encoder: Option<&str>) -> CodecBundle {
        let decoder = decoder.map(|input| {
            compile_document(&load_str(input, SchemaKind::Decoder, "test").unwrap()).unwrap()
        });
        let encoder = encoder.map(|input| {
            compile_document(&load_str(input, SchemaKind::Encoder, "test").unwrap()).unwrap()
        });
        CodecBundle::assemble(decoder, encoder).unwrap()
    }

    #[test]
    fn header_has_guard_and_both_hash_constants() {
        let header = render(&bundle(Some(DECODER), Some(ENCODER)));
        assert!(header.starts_with("#ifndef CODEC_H_\n#define CODEC_H_\n"));
        assert!(header.contains("#define CODEC_CLOUD_DECODER_HASH ((uint64_t)0x"));
        assert!(header.contains("#define CODEC_CLOUD_ENCODER_HASH ((uint64_t)0x"));
        assert!(header.trim_end().ends_with("#endif /* CODEC_H_ */"));
    }

    #[test]
    fn enums_are_role_reversed_and_zero_based() {
        let header = render(&bundle(Some(DECODER), Some(ENCODER)));
        assert!(header.contains("enum codec_key_e {"));
        assert!(header.contains("\tCODEC_KEY_E_TEMPERATURE = 0,"));
        assert!(header.contains("\tCODEC_KEY_E_CHANNEL = 1,"));
        assert!(header.contains("\tCODEC_KEY_E_CHANNEL__VOLTAGE = 2,"));
        assert!(header.contains("enum codec_key_d {"));
        assert!(header.contains("\tCODEC_KEY_D_INTERVAL = 0,"));
    }

    #[test]
    fn absent_encoder_renders_null_and_zero() {
        let header = render(&bundle(Some(DECODER), None));
        assert!(header.contains("#define CODEC_CLOUD_ENCODER_HASH ((uint64_t)0x0000000000000000)"));
        assert!(header.contains(".encoder_buf = NULL, \\"));
        assert!(header.contains(".encoder_len = 0, \\"));
        assert!(!header.contains("CLOUD_ENCODER_BUFFER"));
        assert!(!header.contains("enum codec_key_d"));
    }

    #[test]
    fn buffer_macro_lists_blob_bytes() {
        let compiled_bundle = bundle(Some(DECODER), None);
        let blob_len = compiled_bundle.decoder.as_ref().unwrap().blob.len();
        let header = render(&compiled_bundle);

        assert!(header.contains("#define CLOUD_DECODER_BUFFER { \\"));
        assert!(header.contains(&format!(".decoder_len = {blob_len}, \\")));
        let byte_count = header.matches("0x").count();
        // every blob byte plus the two 64-bit hash constants
        assert_eq!(byte_count, blob_len + 2);
    }

    #[test]
    fn rendering_is_deterministic() {
        let b = bundle(Some(DECODER), Some(ENCODER));
        assert_eq!(render(&b), render(&b));
    }

    #[test]
    fn write_to_path_round_trips_through_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("app_codec.h");
        let b = bundle(Some(DECODER), Some(ENCODER));
        HeaderWriter::new().write_to_path(&path, &b).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, render(&b));
    }
}
