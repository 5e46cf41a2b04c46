//! # codec-schema
//!
//! Schema document model, loader/validator, and key flattener.
//!
//! A codec schema is a YAML document declaring a hierarchical set of named
//! fields plus sigil-prefixed modifier keywords. This crate validates the
//! document shape, checks the modifier vocabulary for the declared kind,
//! and flattens the field tree into a stable, declaration-ordered key
//! namespace.

pub mod flatten;
pub mod loader;
pub mod model;

pub use flatten::{FlattenedSchema, flatten};
pub use loader::{load_file, load_str};
pub use model::{KEY_SEPARATOR, SCHEMA_VERSION, SchemaDocument, SchemaKind, normalize_key};

use thiserror::Error;

/// Errors that can occur when loading or flattening schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid schema version {found} in {origin} (supported: {})", SCHEMA_VERSION)]
    InvalidVersion { origin: String, found: String },

    #[error("invalid schema kind {found} in {origin}")]
    InvalidKind { origin: String, found: String },

    #[error("invalid schema in {origin}: {reason}")]
    InvalidSchema { origin: String, reason: String },

    #[error("expected {expected} schema in {origin}, found {found}")]
    KindMismatch {
        origin: String,
        expected: SchemaKind,
        found: SchemaKind,
    },

    #[error("field node is not a singleton mapping: {found}")]
    InvalidFieldNode { found: String },

    #[error("unknown modifier {keyword} for {kind} schema")]
    UnknownModifier { keyword: String, kind: SchemaKind },

    #[error("invalid $type value {found} (expected one of: int, float, bool, string)")]
    InvalidTypeTag { found: String },

    #[error("duplicate flattened key {key}")]
    DuplicateKey { key: String },

    #[error("failed to read {origin}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Ir(#[from] codec_ir::Error),
}

/// Crate-local result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;
