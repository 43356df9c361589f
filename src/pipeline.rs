//! Inbound wiring from fragment arrival to channel delivery.
//!
//! [`MessagePipeline`] is the boundary the transport drives: it feeds
//! fragments into the [`FragmentAssembler`], runs the registered decoder for
//! the message's kind once a terminal fragment completes a logical message,
//! and offers the outcome to the matching [`EventTracker`] channel. Decode
//! and size failures become channel items rather than propagating out of the
//! frame-delivery path, so that path is never left in an inconsistent state
//! and consumers never hang on a message that silently failed.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{debug, warn};

use crate::{
    channel::{DEFAULT_CHANNEL_CAPACITY, ResultChannel},
    decoder::{Decoder, RawBytes},
    delivery::{Decoded, DecodeFailure},
    fragment::{AssemblyError, Fragment, FragmentAssembler},
    kind::{PayloadKind, PerKind},
    session::{CloseReason, Session},
    tracker::{ChannelRef, EventTracker},
};

/// Construction-time settings for a pipeline.
///
/// Configuration is limited to per-kind assembly caps and the channel
/// capacity; everything else about the pipeline's behaviour is fixed by
/// contract.
#[derive(Clone, Copy, Debug)]
pub struct PipelineConfig {
    /// Maximum assembled payload size per kind; `None` disables the cap.
    pub max_payload_sizes: PerKind<Option<NonZeroUsize>>,
    /// Pending-item capacity of each result channel.
    pub channel_capacity: NonZeroUsize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_payload_sizes: PerKind::from_fn(|_| None),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl PipelineConfig {
    /// Apply one assembly cap uniformly across all payload kinds.
    #[must_use]
    pub fn with_uniform_cap(max_payload_size: NonZeroUsize) -> Self {
        Self {
            max_payload_sizes: PerKind::from_fn(|_| Some(max_payload_size)),
            ..Self::default()
        }
    }
}

/// Reassembly-and-decode pipeline for one session.
///
/// `D` decodes completed text payloads, `B` completed binary payloads
/// (default: [`RawBytes`] pass-through). Pong payloads always bypass
/// decoding and land on the pong channel as raw bytes.
pub struct MessagePipeline<D: Decoder, B: Decoder = RawBytes> {
    assembler: FragmentAssembler,
    text_decoder: D,
    binary_decoder: B,
    tracker: EventTracker<D::Value, B::Value>,
}

impl<D: Decoder> MessagePipeline<D> {
    /// Create a pipeline delivering binary payloads as raw bytes.
    #[must_use]
    pub fn new(label: impl Into<String>, text_decoder: D) -> Self {
        Self::with_config(label, text_decoder, RawBytes, PipelineConfig::default())
    }
}

impl<D: Decoder, B: Decoder> MessagePipeline<D, B> {
    /// Create a pipeline with explicit decoders and configuration.
    #[must_use]
    pub fn with_config(
        label: impl Into<String>,
        text_decoder: D,
        binary_decoder: B,
        config: PipelineConfig,
    ) -> Self {
        Self {
            assembler: FragmentAssembler::with_limits(config.max_payload_sizes),
            text_decoder,
            binary_decoder,
            tracker: EventTracker::with_channel_capacity(label, config.channel_capacity),
        }
    }

    /// Bind the pipeline's tracker to an opened session.
    pub fn on_open(&mut self, session: &Arc<Session>) { self.tracker.on_open(session); }

    /// Tear down the session: discard half-assembled messages silently and
    /// record the close reason.
    ///
    /// Partial messages dropped here never reach a decoder and produce no
    /// channel item. Tracker state stays queryable afterwards.
    pub fn on_close(&mut self, reason: CloseReason) {
        let dropped = self.assembler.discard_all();
        if dropped > 0 {
            debug!(
                label = %self.tracker.label(),
                dropped,
                "discarded partial messages at session close",
            );
        }
        self.tracker.on_close(reason);
    }

    /// Process one already-demultiplexed fragment.
    ///
    /// Never panics and never surfaces an error to the caller: decode and
    /// size failures are delivered through the kind's channel, and delivery
    /// failures are logged and counted.
    pub fn on_fragment(&mut self, kind: PayloadKind, chunk: &[u8], is_final: bool) {
        #[cfg(feature = "metrics")]
        crate::metrics::inc_fragments(kind);

        match self.assembler.push(kind, chunk, is_final) {
            Ok(None) => {}
            Ok(Some(payload)) => self.complete(kind, &payload),
            Err(AssemblyError::PayloadTooLarge {
                kind,
                attempted,
                limit,
            }) => {
                warn!(
                    label = %self.tracker.label(),
                    %kind,
                    attempted,
                    limit = limit.get(),
                    "logical message exceeded assembly cap",
                );
                #[cfg(feature = "metrics")]
                crate::metrics::inc_decode_failures(kind);
                let failure = DecodeFailure::PayloadTooLarge { attempted, limit };
                match self.tracker.channel_for(kind) {
                    ChannelRef::Text(channel) => {
                        Self::deliver(self.tracker.label(), channel, Decoded::failed(kind, failure));
                    }
                    ChannelRef::Binary(channel) => {
                        Self::deliver(self.tracker.label(), channel, Decoded::failed(kind, failure));
                    }
                    ChannelRef::Pong(channel) => {
                        Self::deliver(self.tracker.label(), channel, Decoded::failed(kind, failure));
                    }
                }
            }
        }
    }

    /// Record the raw traffic for a fragment, then process it.
    ///
    /// Raw hooks fire per fragment, before assembly, so tests can assert
    /// wire traffic independent of decoding.
    pub fn feed(&mut self, fragment: Fragment) {
        let (kind, payload, is_final) = fragment.into_parts();
        match kind {
            PayloadKind::Text => self.tracker.on_raw_text(&payload),
            PayloadKind::Binary => self.tracker.on_raw_binary(&payload),
            PayloadKind::Pong => self.tracker.on_raw_pong(&payload),
        }
        self.on_fragment(kind, &payload, is_final);
    }

    /// Borrow the tracker for lifecycle queries and channel handles.
    #[must_use]
    pub const fn tracker(&self) -> &EventTracker<D::Value, B::Value> { &self.tracker }

    /// Mutably borrow the tracker, for explicit resets between reconnects.
    pub const fn tracker_mut(&mut self) -> &mut EventTracker<D::Value, B::Value> {
        &mut self.tracker
    }

    /// Borrow the assembler for diagnostics.
    #[must_use]
    pub const fn assembler(&self) -> &FragmentAssembler { &self.assembler }

    fn complete(&mut self, kind: PayloadKind, payload: &[u8]) {
        match self.tracker.channel_for(kind) {
            ChannelRef::Text(channel) => {
                let item = decode_item(&self.text_decoder, kind, payload);
                Self::deliver(self.tracker.label(), channel, item);
            }
            ChannelRef::Binary(channel) => {
                let item = decode_item(&self.binary_decoder, kind, payload);
                Self::deliver(self.tracker.label(), channel, item);
            }
            ChannelRef::Pong(channel) => {
                let item = decode_item(&RawBytes, kind, payload);
                Self::deliver(self.tracker.label(), channel, item);
            }
        }
    }

    fn deliver<V>(label: &str, channel: &ResultChannel<Decoded<V>>, item: Decoded<V>) {
        let kind = item.kind();
        if let Err(err) = channel.offer(item) {
            warn!(label, %kind, %err, "dropping completed message delivery");
            #[cfg(feature = "metrics")]
            crate::metrics::inc_dropped(kind);
        }
    }
}

/// Run the decoder exactly once for a completed payload, capturing failure
/// as a channel item instead of propagating it.
fn decode_item<D: Decoder>(decoder: &D, kind: PayloadKind, payload: &[u8]) -> Decoded<D::Value> {
    match decoder.decode(payload) {
        Ok(value) => {
            #[cfg(feature = "metrics")]
            crate::metrics::inc_decoded(kind);
            Decoded::ok(kind, value)
        }
        Err(err) => {
            debug!(%kind, %err, "decode failed");
            #[cfg(feature = "metrics")]
            crate::metrics::inc_decode_failures(kind);
            Decoded::failed(kind, err.into())
        }
    }
}
