//! Error types for result channel producers and consumers.

use thiserror::Error;

/// Errors reported to producers by
/// [`ResultChannel::offer`](crate::channel::ResultChannel::offer).
///
/// Neither variant is fatal: the frame-delivery path logs and continues.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum OfferError {
    /// The channel was closed; the item was dropped.
    #[error("result channel closed")]
    Closed,
    /// The channel was at capacity; the item was dropped.
    #[error("result channel full")]
    Full,
}

/// Outcomes reported to consumers by
/// [`ResultChannel::poll`](crate::channel::ResultChannel::poll).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PollError {
    /// No item arrived within the supplied timeout.
    #[error("poll timed out")]
    Timeout,
    /// The channel is closed and all pending items have been drained.
    #[error("result channel closed")]
    Closed,
}
