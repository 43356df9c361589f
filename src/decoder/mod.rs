//! Payload decoding traits.
//!
//! This module defines the [`Decoder`] trait enabling applications to plug
//! in a domain decoder per payload kind. The pipeline never embeds decode
//! logic itself; it invokes the registered decoder for a message's declared
//! kind exactly once per completed logical message and captures the result.
//!
//! Two implementations are provided: [`QuotesDecoder`] for the line-oriented
//! quotes format and [`RawBytes`], which passes payload bytes through
//! untouched.

pub mod error;
pub mod quotes;

pub use error::DecodeError;
pub use quotes::{Quotes, QuotesDecoder};

use bytes::Bytes;

/// Pure mapping from a complete payload to a domain value.
///
/// Decoders see a logical message only after its terminal fragment arrived,
/// and exactly once. An empty payload is a legal input; each decoder decides
/// its own policy for it ([`QuotesDecoder`] reports
/// [`DecodeError::MissingHeader`], [`RawBytes`] yields empty bytes).
pub trait Decoder {
    /// Domain value produced on success.
    type Value;

    /// Decode a complete assembled payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the payload cannot be interpreted.
    /// Failures never propagate past the pipeline boundary; they are
    /// delivered through the result channel instead.
    fn decode(&self, payload: &[u8]) -> Result<Self::Value, DecodeError>;
}

/// Identity decoder handing payload bytes through as-is.
///
/// Used as the default binary decoder, mirroring trackers that queue owned
/// copies of binary traffic without interpreting it.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawBytes;

impl Decoder for RawBytes {
    type Value = Bytes;

    fn decode(&self, payload: &[u8]) -> Result<Bytes, DecodeError> {
        Ok(Bytes::copy_from_slice(payload))
    }
}
