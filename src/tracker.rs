//! Per-session recorder of lifecycle events and owner of result channels.
//!
//! An [`EventTracker`] is created before a connection is established, bound
//! to a [`Session`] on open, and unbound on close. It records raw traffic
//! counts independently of decoding so tests can assert what arrived on the
//! wire, and it owns one [`ResultChannel`] per payload kind for consumers to
//! poll. Sessions never share trackers; concurrent sessions are simply
//! independent tracker instances.

use std::{num::NonZeroUsize, sync::Arc, sync::Weak};

use bytes::Bytes;
use tracing::debug;

use crate::{
    channel::ResultChannel,
    delivery::Decoded,
    kind::PayloadKind,
    session::{CloseReason, Session},
};

/// Records open/close/raw-traffic events for one session and owns that
/// session's result channels.
///
/// `T` is the domain value produced for text payloads, `B` for binary
/// payloads; pong payloads are always delivered as raw [`Bytes`].
///
/// Lifecycle notifications arrive from the session's single producer
/// context, so mutators take `&mut self`; channel handles cloned out of the
/// tracker remain usable from any number of consumer tasks.
#[derive(Debug)]
pub struct EventTracker<T, B = Bytes> {
    label: String,
    session: Weak<Session>,
    opened: bool,
    close_reason: Option<CloseReason>,
    text: ResultChannel<Decoded<T>>,
    binary: ResultChannel<Decoded<B>>,
    pong: ResultChannel<Decoded<Bytes>>,
    raw_text: u64,
    raw_binary: u64,
    raw_pong: u64,
}

impl<T, B> EventTracker<T, B> {
    /// Create a tracker with the default channel capacity.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_channel_capacity(label, crate::channel::DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a tracker whose channels hold at most `capacity` items each.
    #[must_use]
    pub fn with_channel_capacity(label: impl Into<String>, capacity: NonZeroUsize) -> Self {
        Self {
            label: label.into(),
            session: Weak::new(),
            opened: false,
            close_reason: None,
            text: ResultChannel::bounded(capacity),
            binary: ResultChannel::bounded(capacity),
            pong: ResultChannel::bounded(capacity),
            raw_text: 0,
            raw_binary: 0,
            raw_pong: 0,
        }
    }

    /// Identity label used in diagnostics.
    #[must_use]
    pub fn label(&self) -> &str { &self.label }

    /// Bind the tracker to an opened session.
    ///
    /// Only a weak reference is held; the tracker never keeps the transport
    /// alive.
    pub fn on_open(&mut self, session: &Arc<Session>) {
        debug!(label = %self.label, session = %session.id(), "session opened");
        self.session = Arc::downgrade(session);
        self.opened = true;
    }

    /// Record the close reason and unbind the session.
    ///
    /// All owned channels are closed, waking blocked pollers; items already
    /// delivered remain retrievable until drained.
    pub fn on_close(&mut self, reason: CloseReason) {
        debug!(label = %self.label, %reason, "session closed");
        self.close_reason = Some(reason);
        self.session = Weak::new();
        self.text.close();
        self.binary.close();
        self.pong.close();
    }

    /// Record receipt of raw text traffic.
    pub fn on_raw_text(&mut self, payload: &[u8]) {
        debug!(label = %self.label, len = payload.len(), "raw text fragment");
        self.raw_text += 1;
    }

    /// Record receipt of raw binary traffic.
    pub fn on_raw_binary(&mut self, payload: &[u8]) {
        debug!(label = %self.label, len = payload.len(), "raw binary fragment");
        self.raw_binary += 1;
    }

    /// Record receipt of a raw pong payload.
    pub fn on_raw_pong(&mut self, payload: &[u8]) {
        debug!(label = %self.label, len = payload.len(), "raw pong");
        self.raw_pong += 1;
    }

    /// Whether an open notification has been observed.
    #[must_use]
    pub const fn was_opened(&self) -> bool { self.opened }

    /// Close reason recorded by [`on_close`](Self::on_close), if any.
    #[must_use]
    pub const fn close_reason(&self) -> Option<&CloseReason> { self.close_reason.as_ref() }

    /// Upgrade the bound session reference, if the session is still alive.
    #[must_use]
    pub fn session(&self) -> Option<Arc<Session>> { self.session.upgrade() }

    /// Raw text fragments observed, independent of decoding.
    #[must_use]
    pub const fn raw_text_count(&self) -> u64 { self.raw_text }

    /// Raw binary fragments observed, independent of decoding.
    #[must_use]
    pub const fn raw_binary_count(&self) -> u64 { self.raw_binary }

    /// Raw pongs observed, independent of decoding.
    #[must_use]
    pub const fn raw_pong_count(&self) -> u64 { self.raw_pong }

    /// Consumer handle for decoded text messages.
    #[must_use]
    pub fn text_channel(&self) -> ResultChannel<Decoded<T>> { self.text.clone() }

    /// Consumer handle for decoded binary messages.
    #[must_use]
    pub fn binary_channel(&self) -> ResultChannel<Decoded<B>> { self.binary.clone() }

    /// Consumer handle for pong payloads.
    #[must_use]
    pub fn pong_channel(&self) -> ResultChannel<Decoded<Bytes>> { self.pong.clone() }

    /// Producer-side channel lookup used by the pipeline.
    pub(crate) fn channel_for(&self, kind: PayloadKind) -> ChannelRef<'_, T, B> {
        match kind {
            PayloadKind::Text => ChannelRef::Text(&self.text),
            PayloadKind::Binary => ChannelRef::Binary(&self.binary),
            PayloadKind::Pong => ChannelRef::Pong(&self.pong),
        }
    }

    /// Prepare the tracker for reuse across a reconnect.
    ///
    /// Clears open/close state and raw counters and replaces the channels
    /// with fresh open ones. Consumer handles cloned before the reset stay
    /// bound to the old, closed channels; callers re-acquire handles after
    /// resetting.
    pub fn reset(&mut self) {
        debug!(label = %self.label, "tracker reset");
        let capacity = self.text.capacity();
        self.session = Weak::new();
        self.opened = false;
        self.close_reason = None;
        self.text = ResultChannel::bounded(capacity);
        self.binary = ResultChannel::bounded(capacity);
        self.pong = ResultChannel::bounded(capacity);
        self.raw_text = 0;
        self.raw_binary = 0;
        self.raw_pong = 0;
    }
}

/// Borrowed per-kind channel, preserving each kind's item type.
pub(crate) enum ChannelRef<'a, T, B> {
    Text(&'a ResultChannel<Decoded<T>>),
    Binary(&'a ResultChannel<Decoded<B>>),
    Pong(&'a ResultChannel<Decoded<Bytes>>),
}
