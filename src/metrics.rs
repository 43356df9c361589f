//! Metric helpers for `restitch`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate.

use metrics::counter;

use crate::kind::PayloadKind;

/// Name of the counter tracking processed fragments.
pub const FRAGMENTS_PROCESSED: &str = "restitch_fragments_processed_total";
/// Name of the counter tracking completed message decodes.
pub const MESSAGES_DECODED: &str = "restitch_messages_decoded_total";
/// Name of the counter tracking decode and assembly failures.
pub const DECODE_FAILURES: &str = "restitch_decode_failures_total";
/// Name of the counter tracking deliveries dropped at the channel.
pub const DELIVERIES_DROPPED: &str = "restitch_deliveries_dropped_total";

/// Record a processed fragment for the given kind.
pub fn inc_fragments(kind: PayloadKind) {
    counter!(FRAGMENTS_PROCESSED, "kind" => kind.as_str()).increment(1);
}

/// Record a successfully decoded message for the given kind.
pub fn inc_decoded(kind: PayloadKind) {
    counter!(MESSAGES_DECODED, "kind" => kind.as_str()).increment(1);
}

/// Record a decode or assembly failure for the given kind.
pub fn inc_decode_failures(kind: PayloadKind) {
    counter!(DECODE_FAILURES, "kind" => kind.as_str()).increment(1);
}

/// Record a delivery dropped because the channel was closed or full.
pub fn inc_dropped(kind: PayloadKind) {
    counter!(DELIVERIES_DROPPED, "kind" => kind.as_str()).increment(1);
}
