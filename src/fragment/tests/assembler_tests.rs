//! Tests for fragment accumulation, size limits, and teardown discard.

use std::{num::NonZeroUsize, time::Instant};

use proptest::prelude::*;

use crate::{
    fragment::{AssemblyError, FragmentAssembler},
    kind::PayloadKind,
};

#[test]
fn assembler_completes_single_terminal_fragment() {
    let mut assembler = FragmentAssembler::unbounded();

    let payload = assembler
        .push(PayloadKind::Text, b"hello", true)
        .expect("fragment accepted")
        .expect("terminal fragment completes the message");

    assert_eq!(payload, b"hello");
    assert!(!assembler.is_assembling(PayloadKind::Text));
}

#[test]
fn assembler_concatenates_chunks_in_arrival_order() {
    let mut assembler = FragmentAssembler::unbounded();

    for chunk in [&b"Benjamin Franklin\n"[..], b"Quote A\n", b"Quote B\n"] {
        assert!(
            assembler
                .push(PayloadKind::Text, chunk, false)
                .expect("fragment accepted")
                .is_none()
        );
    }
    assert_eq!(assembler.buffered_len(PayloadKind::Text), 34);

    let payload = assembler
        .push(PayloadKind::Text, b"", true)
        .expect("terminal fragment accepted")
        .expect("message should complete");

    assert_eq!(payload, b"Benjamin Franklin\nQuote A\nQuote B\n");
    assert_eq!(assembler.buffered_len(PayloadKind::Text), 0);
}

#[test]
fn assembler_treats_empty_terminal_fragment_as_empty_message() {
    let mut assembler = FragmentAssembler::unbounded();

    let payload = assembler
        .push(PayloadKind::Text, b"", true)
        .expect("fragment accepted")
        .expect("empty terminal fragment completes an empty message");

    assert!(payload.is_empty());
}

#[test]
fn assembler_keeps_kinds_independent() {
    let mut assembler = FragmentAssembler::unbounded();

    assert!(
        assembler
            .push(PayloadKind::Text, b"partial", false)
            .expect("text fragment accepted")
            .is_none()
    );

    let binary = assembler
        .push(PayloadKind::Binary, &[1, 2, 3], true)
        .expect("binary fragment accepted")
        .expect("binary message should complete");

    assert_eq!(binary, [1, 2, 3]);
    assert!(assembler.is_assembling(PayloadKind::Text));
    assert!(!assembler.is_assembling(PayloadKind::Binary));
}

#[test]
fn assembler_enforces_maximum_payload_size() {
    let limit = NonZeroUsize::new(4).expect("non-zero");
    let mut assembler = FragmentAssembler::new(limit);

    assert!(
        assembler
            .push(PayloadKind::Text, b"abc", false)
            .expect("first fragment within limit")
            .is_none()
    );

    let err = assembler
        .push(PayloadKind::Text, b"de", true)
        .expect_err("growth beyond cap must be rejected");
    assert_eq!(
        err,
        AssemblyError::PayloadTooLarge {
            kind: PayloadKind::Text,
            attempted: 5,
            limit,
        }
    );
    assert!(
        !assembler.is_assembling(PayloadKind::Text),
        "overflowing message must be discarded",
    );
}

#[test]
fn assembler_allows_payload_exactly_at_limit() {
    let limit = NonZeroUsize::new(5).expect("non-zero");
    let mut assembler = FragmentAssembler::new(limit);

    assert!(
        assembler
            .push(PayloadKind::Text, b"abc", false)
            .expect("first fragment accepted")
            .is_none()
    );
    let payload = assembler
        .push(PayloadKind::Text, b"de", true)
        .expect("payload at exact limit accepted")
        .expect("message should complete");

    assert_eq!(payload, b"abcde");
}

#[test]
fn assembler_accepts_fresh_message_after_terminal_overflow() {
    let limit = NonZeroUsize::new(4).expect("non-zero");
    let mut assembler = FragmentAssembler::new(limit);

    // Overflow on a terminal fragment ends the failed message outright.
    assembler
        .push(PayloadKind::Text, b"toolarge", true)
        .expect_err("oversized fragment rejected");
    assert!(!assembler.is_discarding(PayloadKind::Text));

    let payload = assembler
        .push(PayloadKind::Text, b"ok", true)
        .expect("next message accepted")
        .expect("message should complete");
    assert_eq!(payload, b"ok");
}

#[test]
fn assembler_swallows_the_tail_of_a_message_that_overflowed_mid_stream() {
    let limit = NonZeroUsize::new(4).expect("non-zero");
    let mut assembler = FragmentAssembler::new(limit);

    assert!(
        assembler
            .push(PayloadKind::Text, b"abc", false)
            .expect("first fragment within limit")
            .is_none()
    );
    assembler
        .push(PayloadKind::Text, b"de", false)
        .expect_err("overflow reported once, on the overflowing fragment");
    assert!(assembler.is_discarding(PayloadKind::Text));

    // Continuations of the failed message never start a new one.
    assert!(
        assembler
            .push(PayloadKind::Text, b"fgh", false)
            .expect("tail fragment swallowed")
            .is_none()
    );
    assert!(!assembler.is_assembling(PayloadKind::Text));

    // The terminal fragment of the failed message completes nothing.
    assert!(
        assembler
            .push(PayloadKind::Text, b"i", true)
            .expect("terminal tail fragment swallowed")
            .is_none()
    );
    assert!(!assembler.is_discarding(PayloadKind::Text));

    // Only the next logical message assembles again.
    let payload = assembler
        .push(PayloadKind::Text, b"ok", true)
        .expect("next message accepted")
        .expect("message should complete");
    assert_eq!(payload, b"ok");
}

#[test]
fn assembler_keeps_discarding_scoped_to_the_failed_kind() {
    let limit = NonZeroUsize::new(4).expect("non-zero");
    let mut assembler = FragmentAssembler::new(limit);

    assembler
        .push(PayloadKind::Text, b"toolarge", false)
        .expect_err("oversized fragment rejected");
    assert!(assembler.is_discarding(PayloadKind::Text));

    let payload = assembler
        .push(PayloadKind::Binary, &[1, 2], true)
        .expect("binary fragment accepted")
        .expect("binary message should complete");
    assert_eq!(payload, [1, 2]);
}

#[test]
fn discard_all_clears_the_overflow_skip_state() {
    let limit = NonZeroUsize::new(4).expect("non-zero");
    let mut assembler = FragmentAssembler::new(limit);

    assembler
        .push(PayloadKind::Text, b"toolarge", false)
        .expect_err("oversized fragment rejected");
    assert!(assembler.is_discarding(PayloadKind::Text));

    assembler.discard_all();
    assert!(!assembler.is_discarding(PayloadKind::Text));

    let payload = assembler
        .push(PayloadKind::Text, b"ok", true)
        .expect("fragment accepted after teardown")
        .expect("message should complete");
    assert_eq!(payload, b"ok");
}

#[test]
fn discard_all_drops_partials_without_completing_them() {
    let mut assembler = FragmentAssembler::unbounded();

    assert!(
        assembler
            .push(PayloadKind::Text, b"half", false)
            .expect("fragment accepted")
            .is_none()
    );
    assert!(
        assembler
            .push(PayloadKind::Binary, &[7], false)
            .expect("fragment accepted")
            .is_none()
    );

    assert_eq!(assembler.discard_all(), 2);
    assert_eq!(assembler.discarded_partials(), 2);
    assert!(!assembler.is_assembling(PayloadKind::Text));
    assert!(!assembler.is_assembling(PayloadKind::Binary));

    // A discarded partial must not leak into the next message.
    let payload = assembler
        .push(PayloadKind::Text, b"next", true)
        .expect("fragment accepted")
        .expect("message should complete");
    assert_eq!(payload, b"next");
}

#[test]
fn started_at_reflects_first_fragment_clock_reading() {
    let mut assembler = FragmentAssembler::unbounded();
    let now = Instant::now();

    assert!(
        assembler
            .push_at(PayloadKind::Text, b"x", false, now)
            .expect("fragment accepted")
            .is_none()
    );

    assert_eq!(assembler.started_at(PayloadKind::Text), Some(now));
    assert_eq!(assembler.started_at(PayloadKind::Binary), None);
}

proptest! {
    /// The payload handed back on the terminal fragment equals the
    /// concatenation of all chunks in arrival order.
    #[test]
    fn assembled_payload_is_concatenation_of_chunks(
        chunks in proptest::collection::vec(
            proptest::collection::vec(any::<u8>(), 0..32),
            1..8,
        ),
    ) {
        let mut assembler = FragmentAssembler::unbounded();
        let last = chunks.len() - 1;

        let mut completed = None;
        for (index, chunk) in chunks.iter().enumerate() {
            let result = assembler
                .push(PayloadKind::Binary, chunk, index == last)
                .expect("fragment accepted");
            if index < last {
                prop_assert!(result.is_none());
            } else {
                completed = result;
            }
        }

        let expected: Vec<u8> = chunks.concat();
        prop_assert_eq!(completed.expect("terminal fragment completes"), expected);
        prop_assert!(!assembler.is_assembling(PayloadKind::Binary));
    }
}
