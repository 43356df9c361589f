//! Channel item produced by the decode-completion path.
//!
//! A [`Decoded`] value carries either the decoder's domain value or the
//! failure that prevented one, tagged with the payload kind it belongs to.
//! Failures travel through the same channel as successes so a polling
//! consumer observes them deterministically instead of timing out.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::{decoder::DecodeError, kind::PayloadKind};

/// Why a completed logical message produced no domain value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The decoder ran and rejected the payload.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The message overflowed the assembly cap; the decoder never ran.
    #[error("payload too large: {attempted} bytes exceeds limit of {limit}")]
    PayloadTooLarge {
        /// Total bytes the message would have held.
        attempted: usize,
        /// Configured maximum assembled payload size.
        limit: NonZeroUsize,
    },
}

/// Outcome of one completed logical message, immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded<T> {
    kind: PayloadKind,
    result: Result<T, DecodeFailure>,
}

impl<T> Decoded<T> {
    /// Wrap a successfully decoded value.
    #[must_use]
    pub const fn ok(kind: PayloadKind, value: T) -> Self {
        Self {
            kind,
            result: Ok(value),
        }
    }

    /// Wrap a decode or assembly failure.
    #[must_use]
    pub const fn failed(kind: PayloadKind, failure: DecodeFailure) -> Self {
        Self {
            kind,
            result: Err(failure),
        }
    }

    /// Payload kind this outcome belongs to.
    #[must_use]
    pub const fn kind(&self) -> PayloadKind { self.kind }

    /// Borrow the decode outcome.
    #[must_use]
    pub fn result(&self) -> Result<&T, &DecodeFailure> { self.result.as_ref() }

    /// Borrow the domain value, if decoding succeeded.
    #[must_use]
    pub fn value(&self) -> Option<&T> { self.result.as_ref().ok() }

    /// Borrow the failure, if decoding failed.
    #[must_use]
    pub fn failure(&self) -> Option<&DecodeFailure> { self.result.as_ref().err() }

    /// Consume the wrapper, returning the underlying result.
    ///
    /// # Errors
    ///
    /// Returns the [`DecodeFailure`] the message was delivered with.
    pub fn into_result(self) -> Result<T, DecodeFailure> { self.result }
}
