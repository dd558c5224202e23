//! Core error types for streaming SARIF import.

use std::io;

/// Main error type for import operations.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The token stream did not match an expected shape. Fatal for the
    /// current document; `offset` is the byte position of the offending
    /// token.
    #[error("structural parse error at byte {offset}: {message}")]
    Structural { message: String, offset: u64 },

    /// The document declares a schema version other than the single
    /// supported literal. Surfaced before any records are emitted.
    #[error("unsupported input file version: {0}")]
    UnsupportedVersion(String),

    /// Mapping a captured JSON value into a typed record failed.
    #[error("record mapping failed at byte {offset}: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
        offset: u64,
    },

    /// I/O failure on the underlying stream. Aborts the in-progress pass.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

impl ImportError {
    pub fn structural(message: impl Into<String>, offset: u64) -> Self {
        Self::Structural {
            message: message.into(),
            offset,
        }
    }

    pub fn mapping(source: serde_json::Error, offset: u64) -> Self {
        Self::Json { source, offset }
    }

    #[must_use]
    pub fn unexpected_end(offset: u64) -> Self {
        Self::structural("unexpected end of input", offset)
    }

    #[must_use]
    pub fn unexpected_byte(byte: u8, offset: u64) -> Self {
        Self::structural(
            format!("unexpected byte '{}'", byte.escape_ascii()),
            offset,
        )
    }
}
