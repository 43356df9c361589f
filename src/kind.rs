//! Payload kind tagging for inbound traffic.
//!
//! The transport demultiplexes frames before they reach this crate, so every
//! event arrives tagged with a [`PayloadKind`]. The tag selects which
//! assembler slot, decoder, and result channel handle the event, replacing
//! runtime signature matching with explicit variant dispatch.

/// Category of an inbound payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// UTF-8 text message data.
    Text,
    /// Opaque binary message data.
    Binary,
    /// Pong control payload.
    Pong,
}

impl PayloadKind {
    /// All kinds, in a fixed order matching [`PerKind`] storage.
    pub const ALL: [Self; 3] = [Self::Text, Self::Binary, Self::Pong];

    /// Stable lowercase name used in logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
            Self::Pong => "pong",
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-size storage holding one value per [`PayloadKind`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PerKind<T> {
    text: T,
    binary: T,
    pong: T,
}

impl<T> PerKind<T> {
    /// Build storage by invoking `init` once per kind.
    pub fn from_fn(mut init: impl FnMut(PayloadKind) -> T) -> Self {
        Self {
            text: init(PayloadKind::Text),
            binary: init(PayloadKind::Binary),
            pong: init(PayloadKind::Pong),
        }
    }

    /// Borrow the slot for `kind`.
    #[must_use]
    pub const fn get(&self, kind: PayloadKind) -> &T {
        match kind {
            PayloadKind::Text => &self.text,
            PayloadKind::Binary => &self.binary,
            PayloadKind::Pong => &self.pong,
        }
    }

    /// Mutably borrow the slot for `kind`.
    pub const fn get_mut(&mut self, kind: PayloadKind) -> &mut T {
        match kind {
            PayloadKind::Text => &mut self.text,
            PayloadKind::Binary => &mut self.binary,
            PayloadKind::Pong => &mut self.pong,
        }
    }

    /// Iterate over `(kind, value)` pairs in [`PayloadKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PayloadKind, &T)> {
        PayloadKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Iterate mutably over `(kind, value)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PayloadKind, &mut T)> {
        let Self { text, binary, pong } = self;
        [
            (PayloadKind::Text, text),
            (PayloadKind::Binary, binary),
            (PayloadKind::Pong, pong),
        ]
        .into_iter()
    }
}
