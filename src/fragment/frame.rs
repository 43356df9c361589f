//! Inbound fragment representation and send-side fragmentation helpers.
//!
//! A [`Fragment`] is one physical chunk of a logical message as the
//! transport delivers it: a payload, a kind tag, and a terminal flag. The
//! [`fragment_lines`] helper mirrors the server-role convention of emitting
//! one line per non-final fragment followed by an empty terminal fragment,
//! which tests use to drive the pipeline without a real transport.

use bytes::Bytes;

use crate::kind::PayloadKind;

/// One physical chunk of a logical message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    kind: PayloadKind,
    payload: Bytes,
    is_final: bool,
}

impl Fragment {
    /// Construct a fragment with an explicit kind.
    #[must_use]
    pub fn new(kind: PayloadKind, payload: impl Into<Bytes>, is_final: bool) -> Self {
        Self {
            kind,
            payload: payload.into(),
            is_final,
        }
    }

    /// Construct a non-final text fragment.
    #[must_use]
    pub fn text(payload: impl Into<Bytes>) -> Self {
        Self::new(PayloadKind::Text, payload, false)
    }

    /// Construct a non-final binary fragment.
    #[must_use]
    pub fn binary(payload: impl Into<Bytes>) -> Self {
        Self::new(PayloadKind::Binary, payload, false)
    }

    /// Construct a pong fragment. Pong payloads arrive whole, so the
    /// terminal flag is always set.
    #[must_use]
    pub fn pong(payload: impl Into<Bytes>) -> Self {
        Self::new(PayloadKind::Pong, payload, true)
    }

    /// Mark this fragment as the terminal fragment of its logical message.
    #[must_use]
    pub fn fin(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Kind tag carried by the fragment.
    #[must_use]
    pub const fn kind(&self) -> PayloadKind { self.kind }

    /// Borrow the fragment payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] { self.payload.as_ref() }

    /// Whether this fragment terminates its logical message.
    #[must_use]
    pub const fn is_final(&self) -> bool { self.is_final }

    /// Split the fragment into its parts.
    #[must_use]
    pub fn into_parts(self) -> (PayloadKind, Bytes, bool) {
        (self.kind, self.payload, self.is_final)
    }
}

/// Fragment a sequence of text lines into wire-order fragments.
///
/// Each line becomes a non-final text fragment with a trailing newline; an
/// empty final fragment terminates the logical message. An empty terminal
/// fragment is a valid end-of-message marker and decoders must accept it.
#[must_use]
pub fn fragment_lines<I, S>(lines: I) -> Vec<Fragment>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fragments: Vec<Fragment> = lines
        .into_iter()
        .map(|line| Fragment::text(format!("{}\n", line.as_ref())))
        .collect();
    fragments.push(Fragment::text(Bytes::new()).fin());
    fragments
}
