//! Error types for description loading and Thing interactions.

use std::path::PathBuf;
use thiserror::Error;

use crate::description::OperationKind;

/// Errors while loading or parsing a Thing Description.
#[derive(Debug, Error)]
pub enum DescriptionError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Thing Description: {message}")]
    InvalidDescription { message: String },

    #[error("unknown data schema type \"{value}\" at {path}")]
    UnknownSchemaType { path: String, value: String },
}

impl DescriptionError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } | Self::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            Self::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors raised by a Thing interaction.
///
/// This is the single "operation failed" channel of the [`Consumer`]: every
/// resolution, validation, shape, coercion, and transport failure surfaces
/// here and aborts the invocation.
///
/// [`Consumer`]: crate::Consumer
#[derive(Debug, Error)]
pub enum InteractionError {
    // Resolution errors
    #[error("unknown property: {semantic_type}")]
    UnknownProperty { semantic_type: String },

    #[error("unknown action: {semantic_type}")]
    UnknownAction { semantic_type: String },

    #[error("invalid TD: no form for operation {operation}")]
    MissingForm { operation: OperationKind },

    // Validation errors
    #[error("illegal arguments: the lists of tags and payload values should have equal length ({tags} tags, {values} values)")]
    TagArityMismatch { tags: usize, values: usize },

    #[error("the payload used when writing a property cannot be empty")]
    EmptyPayload,

    #[error("this type of action does not take any input: {semantic_type}")]
    NoInput { semantic_type: String },

    // Shape errors
    #[error("could not determine the payload shape (primitive, object, or array)")]
    UndeterminedShape,

    #[error("TD mismatch: illegal arguments, this affordance uses a data schema of type {declared}")]
    SchemaMismatch { declared: &'static str },

    #[error("cannot serialize a {actual} value against a data schema of type {declared}")]
    PrimitiveMismatch {
        declared: &'static str,
        actual: &'static str,
    },

    #[error("unable to detect the primitive datatype of payload: {actual}")]
    UnsupportedPrimitive { actual: &'static str },

    // Response decoding errors
    #[error("unexpected response payload: expected {expected}, got {actual}")]
    DecodeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("something went wrong with the read property request: no response")]
    MissingResponse,

    // Transport errors
    #[error("status code: {code}")]
    Status { code: u16 },

    #[cfg(feature = "remote")]
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl InteractionError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            #[cfg(feature = "remote")]
            Self::Network { .. } => 3,
            _ => 1,
        }
    }
}
