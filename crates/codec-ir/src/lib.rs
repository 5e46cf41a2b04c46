#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # codec-ir
//!
//! Order-preserving value model for parsed codec schema documents.
//!
//! Schema files are loosely-typed YAML trees. This crate re-expresses them
//! as a closed tagged-variant [`Value`] so that the flattener and the
//! canonical serializer can match exhaustively instead of type-checking
//! ad hoc. Mappings keep their declaration order; nothing in the pipeline
//! ever sorts keys.

/// Core tagged-variant value type.
pub mod value;
/// Conversion from parsed YAML into the value model.
pub mod yaml;

/// Tagged-variant value used throughout the compiler.
pub use value::Value;
/// Bridge from `serde_yaml` values.
pub use yaml::from_yaml;

use thiserror::Error;

/// Errors that can occur when building the value model
#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported value in {context}: {found}")]
    Unsupported { context: String, found: String },
}

impl Error {
    /// Build an unsupported-value error with source context.
    pub fn unsupported(context: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Unsupported {
            context: context.into(),
            found: found.into(),
        }
    }
}

/// Crate-local result type for value-model operations.
pub type Result<T> = std::result::Result<T, Error>;
