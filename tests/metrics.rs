#![cfg(feature = "metrics")]
//! Tests for `dgramfrag` metrics helpers.
//!
//! Counters are captured with `metrics_util::debugging::DebuggingRecorder`.
use dgramfrag::{
    fragment::{Decoder, Encoder},
    metrics,
};
use dgramfrag_testing::{datagrams_for, raw_datagram};
use metrics_util::{
    CompositeKey,
    debugging::{DebugValue, DebuggingRecorder, Snapshotter},
};
use rstest::rstest;

const SOURCE: u32 = 5;

/// Creates a debugging recorder and snapshotter for metrics testing.
fn debugging_recorder_setup() -> (Snapshotter, DebuggingRecorder) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    (snapshotter, recorder)
}

/// Take one snapshot; the debugging recorder resets counters on every read.
fn counters(snapshotter: &Snapshotter) -> Vec<(CompositeKey, DebugValue)> {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(key, _, _, value)| (key, value))
        .collect()
}

fn assert_counter_eq(snapshot: &[(CompositeKey, DebugValue)], name: &str, expected: u64) {
    assert!(
        snapshot.iter().any(|(key, value)| {
            key.key().name() == name && matches!(value, DebugValue::Counter(c) if *c == expected)
        }),
        "expected {name} == {expected}, got {snapshot:#?}"
    );
}

#[test]
fn round_trip_updates_counters() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    ::metrics::with_local_recorder(&recorder, || {
        let mut encoder = Encoder::new(SOURCE);
        let mut decoder = Decoder::new(SOURCE);
        let payload = vec![1_u8; 3000];
        for datagram in datagrams_for(&mut encoder, &payload, 3) {
            decoder.accept(datagram);
        }
    });

    let snapshot = counters(&snapshotter);
    assert_counter_eq(&snapshot, metrics::FRAGMENTS_ENCODED, 3);
    assert_counter_eq(&snapshot, metrics::FRAGMENTS_ACCEPTED, 3);
    assert_counter_eq(&snapshot, metrics::MESSAGES_COMPLETED, 1);
}

#[test]
fn errors_are_labelled_by_kind() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    ::metrics::with_local_recorder(&recorder, || {
        let mut decoder = Decoder::new(SOURCE);
        decoder.accept(raw_datagram(SOURCE, 1, 0, 0, 2, b"a"));
        decoder.accept(raw_datagram(SOURCE, 1, 0, 0, 2, b"a"));
    });

    let snapshot = snapshotter.snapshot().into_vec();
    let found = snapshot.iter().any(|(k, _, _, v)| {
        k.key().name() == metrics::ERRORS_TOTAL
            && k
                .key()
                .labels()
                .any(|l| l.key() == "kind" && l.value() == "duplicate_fragment")
            && matches!(v, DebugValue::Counter(c) if *c == 1)
    });
    assert!(found, "duplicate fragment error not recorded");
}

#[rstest]
#[case(1)]
#[case(3)]
fn abandoned_messages_are_counted(#[case] expected: u64) {
    let (snapshotter, recorder) = debugging_recorder_setup();
    ::metrics::with_local_recorder(&recorder, || {
        let mut decoder = Decoder::new(SOURCE);
        for id in 0..=expected {
            let raw_id = u16::try_from(id).expect("small id");
            decoder.accept(raw_datagram(SOURCE, 4, raw_id, 0, 2, b"p"));
        }
    });

    assert_counter_eq(&counters(&snapshotter), metrics::MESSAGES_ABANDONED, expected);
}
