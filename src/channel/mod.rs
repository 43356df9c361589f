//! Ordered, timeout-pollable hand-off queue between producer and consumers.
//!
//! [`ResultChannel`] carries decoded values from the frame-delivery path to
//! consumers that retrieve them with a bounded wait. The producer side never
//! blocks; the consumer side suspends at most for the timeout it supplies.
//! Cloning a channel yields another handle to the same queue, so a tracker
//! can hand out consumer handles while the pipeline keeps the producer side.
//!
//! Items are delivered in strict FIFO order. Closing the channel stops new
//! items from being accepted and wakes blocked pollers, but items already
//! enqueued remain retrievable until drained.

pub mod error;

pub use error::{OfferError, PollError};

use std::{
    collections::VecDeque,
    num::NonZeroUsize,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::sync::Notify;

/// Default queue capacity used when a tracker builds its own channels.
pub const DEFAULT_CHANNEL_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

#[derive(Debug)]
struct State<T> {
    queue: VecDeque<T>,
    closed: bool,
}

#[derive(Debug)]
struct Inner<T> {
    state: Mutex<State<T>>,
    notify: Notify,
    capacity: NonZeroUsize,
}

impl<T> Inner<T> {
    /// Lock the queue state, recovering from a poisoned mutex.
    ///
    /// Producers and consumers only push/pop the queue under the lock, so a
    /// panicking holder cannot leave the state half-updated.
    fn lock_state(&self) -> std::sync::MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ordered, capacity-bounded hand-off queue.
///
/// Safe for one producer and any number of concurrent consumers; FIFO order
/// holds for the order in which `offer` calls complete.
#[derive(Debug)]
pub struct ResultChannel<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ResultChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> ResultChannel<T> {
    /// Create a channel that holds at most `capacity` pending items.
    #[must_use]
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    queue: VecDeque::new(),
                    closed: false,
                }),
                notify: Notify::new(),
                capacity,
            }),
        }
    }

    /// Append an item to the tail without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::Closed`] after [`close`](Self::close) and
    /// [`OfferError::Full`] when the queue is at capacity. The item is
    /// dropped in both cases; nothing propagates to the frame-delivery path.
    pub fn offer(&self, item: T) -> Result<(), OfferError> {
        let mut state = self.inner.lock_state();
        if state.closed {
            return Err(OfferError::Closed);
        }
        if state.queue.len() >= self.inner.capacity.get() {
            return Err(OfferError::Full);
        }
        state.queue.push_back(item);
        drop(state);
        self.inner.notify.notify_one();
        Ok(())
    }

    /// Retrieve the head item, waiting at most `timeout` for one to arrive.
    ///
    /// Consumers observe items in the exact order the producer offered them.
    /// The wait is always bounded: callers must pass a finite timeout, and
    /// closing the channel wakes blocked pollers immediately.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Timeout`] when no item arrives within `timeout`
    /// and [`PollError::Closed`] once the channel is closed and drained.
    pub async fn poll(&self, timeout: Duration) -> Result<T, PollError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            // Register for wakeups before inspecting state so a concurrent
            // offer or close between the check and the await is not lost.
            let notified = self.inner.notify.notified();
            {
                let mut state = self.inner.lock_state();
                if let Some(item) = state.queue.pop_front() {
                    if !state.queue.is_empty() {
                        // Pass the wakeup on to the next waiting consumer.
                        self.inner.notify.notify_one();
                    }
                    return Ok(item);
                }
                if state.closed {
                    return Err(PollError::Closed);
                }
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return Err(PollError::Timeout);
            }
        }
    }

    /// Retrieve the head item if one is already pending, without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Timeout`] when the queue is empty but open, and
    /// [`PollError::Closed`] once the channel is closed and drained.
    pub fn try_poll(&self) -> Result<T, PollError> {
        let mut state = self.inner.lock_state();
        if let Some(item) = state.queue.pop_front() {
            return Ok(item);
        }
        if state.closed {
            return Err(PollError::Closed);
        }
        Err(PollError::Timeout)
    }

    /// Stop accepting new items and wake all blocked pollers.
    ///
    /// Pending items remain retrievable until drained; only then does
    /// [`poll`](Self::poll) surface [`PollError::Closed`].
    pub fn close(&self) {
        let mut state = self.inner.lock_state();
        state.closed = true;
        drop(state);
        self.inner.notify.notify_waiters();
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool { self.inner.lock_state().closed }

    /// Number of items currently pending.
    #[must_use]
    pub fn len(&self) -> usize { self.inner.lock_state().queue.len() }

    /// Whether no items are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Maximum number of pending items the channel accepts.
    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize { self.inner.capacity }
}

impl<T> Default for ResultChannel<T> {
    fn default() -> Self { Self::bounded(DEFAULT_CHANNEL_CAPACITY) }
}
