//! Tests for cooperative bulk acceptance.

use std::num::NonZeroUsize;

use bytes::Bytes;
use dgramfrag::fragment::{
    BatchSummary,
    DEFAULT_YIELD_EVERY,
    Decoder,
    DecoderEvent,
    Encoder,
    FragmentationConfig,
    MessageTypeSet,
    accept_batch,
    accept_stream,
};
use dgramfrag_testing::{datagrams_for, raw_datagram, reorder};
use futures::stream;
use rstest::{fixture, rstest};

const SOURCE: u32 = 42;

fn config() -> FragmentationConfig {
    FragmentationConfig::with_max_payload_size(NonZeroUsize::new(16).expect("non-zero"))
}

fn decoder() -> Decoder { Decoder::with_config(SOURCE, MessageTypeSet::all(), config()) }

/// Two interleaved messages, a foreign packet and a duplicate.
#[fixture]
fn traffic() -> Vec<Bytes> {
    let mut encoder = Encoder::with_config(SOURCE, config());
    let first = datagrams_for(&mut encoder, &[1_u8; 40], 1);
    let second = datagrams_for(&mut encoder, &[2_u8; 20], 2);

    let mut datagrams = reorder(first.clone(), &[2, 0]);
    datagrams.extend(second);
    datagrams.push(Bytes::from_static(b"not a fragment"));
    datagrams.push(first[0].clone());
    datagrams.push(first[1].clone());
    datagrams.push(Bytes::from(raw_datagram(SOURCE + 1, 1, 0, 0, 1, b"x")));
    datagrams
}

fn sequential_events(datagrams: &[Bytes]) -> (Vec<bool>, Vec<DecoderEvent>) {
    let mut decoder = decoder();
    let results = datagrams.iter().map(|d| decoder.accept(d)).collect();
    (results, decoder.drain_events().collect())
}

#[rstest]
#[case(NonZeroUsize::MIN)]
#[case(NonZeroUsize::new(3).expect("non-zero"))]
#[case(DEFAULT_YIELD_EVERY)]
#[tokio::test]
async fn batch_matches_sequential_accept(traffic: Vec<Bytes>, #[case] yield_every: NonZeroUsize) {
    let (results, expected) = sequential_events(&traffic);

    let mut decoder = decoder();
    let summary = accept_batch(&mut decoder, &traffic, yield_every).await;
    let events: Vec<_> = decoder.drain_events().collect();

    assert_eq!(events, expected);
    assert_eq!(summary.accepted, results.iter().filter(|&&ok| ok).count());
    assert_eq!(summary.total(), traffic.len());
    assert_eq!(summary.yields, traffic.len() / yield_every.get());
}

#[rstest]
#[tokio::test]
async fn stream_matches_sequential_accept(traffic: Vec<Bytes>) {
    let (_, expected) = sequential_events(&traffic);

    let mut decoder = decoder();
    let summary = accept_stream(
        &mut decoder,
        stream::iter(traffic.clone()),
        NonZeroUsize::new(2).expect("non-zero"),
    )
    .await;

    assert_eq!(decoder.drain_events().collect::<Vec<_>>(), expected);
    assert_eq!(summary.total(), traffic.len());
    assert_eq!(summary.accepted, 5);
    assert_eq!(summary.dropped, 3);
}

#[tokio::test]
async fn empty_batch_does_nothing() {
    let mut decoder = decoder();
    let summary = accept_batch(&mut decoder, Vec::<Bytes>::new(), DEFAULT_YIELD_EVERY).await;
    assert_eq!(summary, BatchSummary::default());
    assert!(!decoder.has_events());
}
