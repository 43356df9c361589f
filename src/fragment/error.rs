//! Error types emitted by the reassembly layer.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::kind::PayloadKind;

/// Errors produced by [`FragmentAssembler`](crate::fragment::FragmentAssembler).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AssemblyError {
    /// The accumulated payload would exceed the configured cap.
    ///
    /// The in-flight logical message is discarded and the decoder is never
    /// invoked for it.
    #[error("{kind} payload too large: {attempted} bytes exceeds limit of {limit}")]
    PayloadTooLarge {
        /// Kind of the logical message that overflowed.
        kind: PayloadKind,
        /// Total bytes the message would have held after the fragment.
        attempted: usize,
        /// Configured maximum assembled payload size.
        limit: NonZeroUsize,
    },
}
