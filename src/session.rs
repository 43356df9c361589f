//! Session identity shared between the transport and the tracker.
//!
//! The transport owns session lifecycle; this crate only observes it. A
//! tracker therefore holds a [`Weak`](std::sync::Weak) reference to the
//! [`Session`] it is bound to, never keeping the transport alive on its own.

/// Identifier assigned to a transport session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl From<u64> for SessionId {
    fn from(value: u64) -> Self { Self(value) }
}

impl SessionId {
    /// Create a new [`SessionId`] with the provided value.
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Return the inner `u64` representation.
    #[must_use]
    pub const fn as_u64(&self) -> u64 { self.0 }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

/// Minimal handle for an established transport session.
///
/// The transport creates and owns the [`std::sync::Arc`] for this; trackers
/// downgrade it on open and drop their weak reference on close.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
}

impl Session {
    /// Create a session handle with the given identifier.
    #[must_use]
    pub const fn new(id: SessionId) -> Self { Self { id } }

    /// Identifier of this session.
    #[must_use]
    pub const fn id(&self) -> SessionId { self.id }
}

/// Reason reported when a session closes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseReason {
    code: u16,
    reason: String,
}

impl CloseReason {
    /// Normal-closure status code.
    pub const NORMAL: u16 = 1000;

    /// Construct a close reason from a status code and description.
    #[must_use]
    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    /// Normal closure with no description.
    #[must_use]
    pub fn normal() -> Self { Self::new(Self::NORMAL, "") }

    /// Status code carried by the close event.
    #[must_use]
    pub const fn code(&self) -> u16 { self.code }

    /// Human-readable close description, possibly empty.
    #[must_use]
    pub fn reason(&self) -> &str { &self.reason }
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.reason.is_empty() {
            write!(f, "close({})", self.code)
        } else {
            write!(f, "close({}): {}", self.code, self.reason)
        }
    }
}
