//! Canonical CBOR encoding of schema document values

use crate::{Error, Result};
use codec_ir::Value;
use minicbor::Encoder;
use minicbor::encode::Write;

/// Encode a value tree as canonical CBOR bytes.
///
/// The encoding is the load-bearing invariant of the whole generator:
/// identical value trees must produce identical bytes on every run, and
/// mapping keys are written in declaration order, never sorted. All items
/// are definite-length, integers use their minimal width, and floats are
/// written as 64-bit. Nothing decodes the blob at generation time, so the
/// encoding is one-way.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::new());
    encode_value(&mut encoder, value).map_err(|e| Error::Encode(e.to_string()))?;
    Ok(encoder.into_writer())
}

fn encode_value<W: Write>(
    encoder: &mut Encoder<W>,
    value: &Value,
) -> std::result::Result<(), minicbor::encode::Error<W::Error>> {
    match value {
        Value::Null => {
            encoder.null()?;
        }
        Value::Bool(b) => {
            encoder.bool(*b)?;
        }
        Value::Int(i) => {
            encoder.i64(*i)?;
        }
        Value::UInt(u) => {
            encoder.u64(*u)?;
        }
        Value::Float(f) => {
            encoder.f64(*f)?;
        }
        Value::Str(s) => {
            encoder.str(s)?;
        }
        Value::Seq(items) => {
            encoder.array(items.len() as u64)?;
            for item in items {
                encode_value(encoder, item)?;
            }
        }
        Value::Map(entries) => {
            encoder.map(entries.len() as u64)?;
            for (key, val) in entries {
                encode_value(encoder, key)?;
                encode_value(encoder, val)?;
            }
        }
    }
    Ok(())
}
