//! Inbound helper that stitches fragment chunks back into complete payloads.
//!
//! [`FragmentAssembler`] buffers partial payload chunks per [`PayloadKind`]
//! until a terminal fragment arrives, then hands the accumulated payload back
//! to the caller exactly once. Fragments for one session arrive strictly in
//! wire order from a single producer context, so the assembler needs no
//! internal locking; it guards against unbounded allocation with an optional
//! size cap instead.

use std::{num::NonZeroUsize, time::Instant};

use super::AssemblyError;
use crate::kind::{PayloadKind, PerKind};

/// Partial logical message being accumulated for one kind.
#[derive(Debug)]
struct LogicalMessage {
    buffer: Vec<u8>,
    started_at: Instant,
}

impl LogicalMessage {
    fn new(started_at: Instant) -> Self {
        Self {
            buffer: Vec::new(),
            started_at,
        }
    }

    fn push(&mut self, chunk: &[u8]) { self.buffer.extend_from_slice(chunk); }

    fn len(&self) -> usize { self.buffer.len() }

    fn into_buffer(self) -> Vec<u8> { self.buffer }
}

/// Stateful per-session fragment accumulator.
///
/// Holds at most one in-flight logical message per kind; interleaving two
/// partial messages of the same kind on one session cannot occur because the
/// transport delivers fragments in wire order.
///
/// # Examples
///
/// ```
/// use restitch::{FragmentAssembler, PayloadKind};
///
/// let mut assembler = FragmentAssembler::unbounded();
/// assert!(
///     assembler
///         .push(PayloadKind::Text, b"hel", false)
///         .expect("chunk accepted")
///         .is_none()
/// );
/// let payload = assembler
///     .push(PayloadKind::Text, b"lo", true)
///     .expect("chunk accepted")
///     .expect("terminal fragment completes the message");
/// assert_eq!(payload, b"hello");
/// ```
#[derive(Debug, Default)]
pub struct FragmentAssembler {
    max_payload_sizes: PerKind<Option<NonZeroUsize>>,
    in_flight: PerKind<Option<LogicalMessage>>,
    skip_until_final: PerKind<bool>,
    discarded_partials: usize,
}

impl FragmentAssembler {
    /// Create an assembler enforcing one cap across all payload kinds.
    #[must_use]
    pub fn new(max_payload_size: NonZeroUsize) -> Self {
        Self::with_limits(PerKind::from_fn(|_| Some(max_payload_size)))
    }

    /// Create an assembler with an independent cap per payload kind.
    #[must_use]
    pub fn with_limits(max_payload_sizes: PerKind<Option<NonZeroUsize>>) -> Self {
        Self {
            max_payload_sizes,
            ..Self::default()
        }
    }

    /// Create an assembler without payload size caps.
    #[must_use]
    pub fn unbounded() -> Self { Self::default() }

    /// Process one fragment.
    ///
    /// Returns `Ok(Some(payload))` when the fragment terminates the logical
    /// message, `Ok(None)` while more fragments are expected. A terminal
    /// fragment with an empty chunk and an empty buffer completes an
    /// empty-payload message; decoders handle that case explicitly.
    ///
    /// After a message fails with [`AssemblyError::PayloadTooLarge`], the
    /// remaining fragments of that same logical message are swallowed with
    /// `Ok(None)` until its terminal fragment is observed; only the fragment
    /// after that starts a fresh message. The tail of a failed message is
    /// therefore never mistaken for a new one.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::PayloadTooLarge`] when appending the chunk
    /// would push the accumulated payload past the configured cap. The
    /// in-flight message is discarded and no decode happens. The error is
    /// reported once per failed message, on the overflowing fragment.
    pub fn push(
        &mut self,
        kind: PayloadKind,
        chunk: &[u8],
        is_final: bool,
    ) -> Result<Option<Vec<u8>>, AssemblyError> {
        self.push_at(kind, chunk, is_final, Instant::now())
    }

    /// Process one fragment with an explicit clock reading.
    ///
    /// Accepting `now` keeps assembly timestamps deterministic in tests.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::PayloadTooLarge`] when the chunk would push
    /// the accumulated payload past the configured cap.
    pub fn push_at(
        &mut self,
        kind: PayloadKind,
        chunk: &[u8],
        is_final: bool,
        now: Instant,
    ) -> Result<Option<Vec<u8>>, AssemblyError> {
        if *self.skip_until_final.get(kind) {
            if is_final {
                *self.skip_until_final.get_mut(kind) = false;
            }
            return Ok(None);
        }

        let limit = *self.max_payload_sizes.get(kind);
        let slot = self.in_flight.get_mut(kind);
        let message = slot.get_or_insert_with(|| LogicalMessage::new(now));

        let attempted = message.len().saturating_add(chunk.len());
        if let Some(limit) = limit {
            if attempted > limit.get() {
                *slot = None;
                // Later fragments still belong to the failed message.
                if !is_final {
                    *self.skip_until_final.get_mut(kind) = true;
                }
                return Err(AssemblyError::PayloadTooLarge {
                    kind,
                    attempted,
                    limit,
                });
            }
        }

        message.push(chunk);
        if is_final {
            let complete = slot.take().map(LogicalMessage::into_buffer);
            return Ok(complete);
        }
        Ok(None)
    }

    /// Whether a partial logical message is buffered for `kind`.
    #[must_use]
    pub fn is_assembling(&self, kind: PayloadKind) -> bool {
        self.in_flight.get(kind).is_some()
    }

    /// Whether fragments of `kind` are being swallowed because an earlier
    /// fragment of the same logical message overflowed the cap.
    #[must_use]
    pub fn is_discarding(&self, kind: PayloadKind) -> bool {
        *self.skip_until_final.get(kind)
    }

    /// Bytes buffered for the in-flight message of `kind`, if any.
    #[must_use]
    pub fn buffered_len(&self, kind: PayloadKind) -> usize {
        self.in_flight.get(kind).as_ref().map_or(0, LogicalMessage::len)
    }

    /// Instant at which assembly started for `kind`, if a partial exists.
    #[must_use]
    pub fn started_at(&self, kind: PayloadKind) -> Option<Instant> {
        self.in_flight.get(kind).as_ref().map(|message| message.started_at)
    }

    /// Discard all partial messages, typically on session teardown.
    ///
    /// Partial messages dropped this way never reach a decoder and produce
    /// no channel item. Returns the number of partials discarded.
    pub fn discard_all(&mut self) -> usize {
        let mut dropped = 0;
        for (_, slot) in self.in_flight.iter_mut() {
            if slot.take().is_some() {
                dropped += 1;
            }
        }
        for (_, flag) in self.skip_until_final.iter_mut() {
            *flag = false;
        }
        self.discarded_partials += dropped;
        dropped
    }

    /// Total partial messages discarded over the assembler's lifetime.
    #[must_use]
    pub const fn discarded_partials(&self) -> usize { self.discarded_partials }
}
