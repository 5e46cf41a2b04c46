//! # codec-compiler
//!
//! Canonical serialization, fingerprinting, and the schema compilation
//! pipeline.
//!
//! One invocation compiles up to two schema documents (a decoder and an
//! encoder side, each optional) into [`CompiledSchema`] bundles: the
//! flattened key namespace, a canonical CBOR blob of the whole document,
//! and a 64-bit fingerprint derived from that blob. The fingerprint is
//! compared for exact equality against a counterpart computed by the same
//! algorithm on the other end of the link, so both the blob encoding and
//! the digest splitting convention are compatibility contracts.

pub mod canonical;
pub mod compile;
pub mod fingerprint;

pub use canonical::encode;
pub use compile::{CodecBundle, CompiledSchema, compile_document, compile_file};
pub use fingerprint::fingerprint;

use thiserror::Error;

/// Errors that can occur while compiling schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] codec_schema::Error),

    #[error("canonical encoding failed: {0}")]
    Encode(String),

    #[error("no decoder or encoder schema provided")]
    NoSchemaProvided,
}

/// Crate-local result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;
