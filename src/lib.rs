//! Public API for the `restitch` library.
//!
//! This crate provides a message-reassembly and decoding pipeline for
//! streaming, frame-based transports: fragments of one logical message are
//! accumulated until a terminal fragment arrives, the complete payload is
//! decoded into a typed domain value by a pluggable [`Decoder`], and the
//! outcome is handed to consumers through ordered, timeout-pollable
//! [`ResultChannel`]s owned by a per-session [`EventTracker`].
//!
//! Transport concerns, such as handshakes, byte-level framing, and network
//! I/O, live outside this crate; the pipeline receives already-demultiplexed
//! fragment events and lifecycle notifications from the transport.

pub mod channel;
pub mod decoder;
pub mod delivery;
pub mod fragment;
pub mod kind;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod pipeline;
pub mod session;
pub mod tracker;

pub use channel::{DEFAULT_CHANNEL_CAPACITY, OfferError, PollError, ResultChannel};
pub use decoder::{DecodeError, Decoder, Quotes, QuotesDecoder, RawBytes};
pub use delivery::{DecodeFailure, Decoded};
pub use fragment::{AssemblyError, Fragment, FragmentAssembler, fragment_lines};
pub use kind::{PayloadKind, PerKind};
pub use pipeline::{MessagePipeline, PipelineConfig};
pub use session::{CloseReason, Session, SessionId};
pub use tracker::EventTracker;
