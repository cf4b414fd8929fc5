//! Error types
//!
//! Library-level failures. Application glue (CLI, bundle writing) wraps
//! these in `anyhow::Error` with context.

use thiserror::Error;

/// Font resolution and parsing failures
#[derive(Debug, Error)]
pub enum FontError {
    /// Family/weight cannot be resolved. Callers render with the placeholder face.
    #[error("font unavailable: {family} weight {weight}")]
    Unavailable { family: String, weight: u16 },

    /// Bytes were fetched but are not a usable TrueType/OpenType font
    #[error("font parse error: {0}")]
    Parse(String),

    /// Font bytes could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Remote/local asset fetch failures. Never fatal for an export.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("font file not found for {family} weight {weight}")]
    NotFound { family: String, weight: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Truncated or error-page response instead of font data
    #[error("font file too small ({len} bytes) - likely an error response")]
    TooSmall { len: usize },
}

/// Persisted record that cannot be interpreted at all
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed persisted config: {0}")]
    Malformed(String),

    #[error("failed to encode persisted config: {0}")]
    Encode(String),
}

/// Encoding failures while producing an output blob
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("surface size must be non-zero")]
    EmptySurface,
}

impl From<png::EncodingError> for RenderError {
    fn from(e: png::EncodingError) -> Self {
        RenderError::Encode(e.to_string())
    }
}
