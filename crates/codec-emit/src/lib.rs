//! # codec-emit
//!
//! Renders a compiled codec bundle as a C header: fingerprint constants,
//! key enumerations, an options-construction macro, and the canonical
//! blobs as byte-array initializers. The rendering is a faithful,
//! deterministic projection of the bundle; all semantic decisions happen
//! upstream in the compiler.

pub mod header;

pub use header::HeaderWriter;

use thiserror::Error;

/// Errors that can occur during emission
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to write {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Crate-local result type for emission.
pub type Result<T> = std::result::Result<T, Error>;
