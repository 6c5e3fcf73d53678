//! Metric helpers for `dgramfrag`.
//!
//! Thin wrappers around the [`metrics`](https://docs.rs/metrics) crate. With
//! the `metrics` feature disabled every helper compiles to a no-op.

#[cfg(feature = "metrics")]
use metrics::counter;

/// Name of the counter tracking fragments produced by encoders.
pub const FRAGMENTS_ENCODED: &str = "dgramfrag_fragments_encoded_total";
/// Name of the counter tracking fragments stored by decoders.
pub const FRAGMENTS_ACCEPTED: &str = "dgramfrag_fragments_accepted_total";
/// Name of the counter tracking fully reassembled messages.
pub const MESSAGES_COMPLETED: &str = "dgramfrag_messages_completed_total";
/// Name of the counter tracking messages preempted before completion.
pub const MESSAGES_ABANDONED: &str = "dgramfrag_messages_abandoned_total";
/// Name of the counter tracking reported decoder errors, labelled by kind.
pub const ERRORS_TOTAL: &str = "dgramfrag_errors_total";

/// Record `count` fragments produced by an encoder.
pub fn inc_fragments_encoded(count: u64) {
    #[cfg(feature = "metrics")]
    {
        counter!(FRAGMENTS_ENCODED).increment(count);
    }
    #[cfg(not(feature = "metrics"))]
    {
        let _ = count;
    }
}

/// Record a fragment stored towards a message.
pub fn inc_fragments_accepted() {
    #[cfg(feature = "metrics")]
    {
        counter!(FRAGMENTS_ACCEPTED).increment(1);
    }
}

/// Record a completed reassembly.
pub fn inc_messages_completed() {
    #[cfg(feature = "metrics")]
    {
        counter!(MESSAGES_COMPLETED).increment(1);
    }
}

/// Record a message abandoned in favour of a newer one.
pub fn inc_messages_abandoned() {
    #[cfg(feature = "metrics")]
    {
        counter!(MESSAGES_ABANDONED).increment(1);
    }
}

/// Record a reported decoder error of the given kind.
pub fn inc_errors(kind: &'static str) {
    #[cfg(feature = "metrics")]
    {
        counter!(ERRORS_TOTAL, "kind" => kind).increment(1);
    }
    #[cfg(not(feature = "metrics"))]
    {
        let _ = kind;
    }
}
