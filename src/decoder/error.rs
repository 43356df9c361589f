//! Error type shared by payload decoders.

use thiserror::Error;

/// Errors produced while decoding a complete payload.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload's first line, which carries the header metadata, was
    /// blank or missing entirely.
    #[error("payload is missing its header line")]
    MissingHeader,
    /// A line could not be interpreted by the decoder.
    ///
    /// The quotes decoder accepts any non-empty line, so this variant is
    /// produced by decoders whose formats constrain line contents.
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// One-based line number within the payload.
        line: usize,
        /// Human-readable description of the defect.
        reason: String,
    },
    /// The payload is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
