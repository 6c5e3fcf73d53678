//! Tests for fragmentation settings.

use std::num::NonZeroUsize;

use bincode::{config, serde::decode_from_slice, serde::encode_to_vec};
use rstest::rstest;

use crate::fragment::*;

#[rstest]
#[case(FragmentationConfig::default())]
#[case(
    FragmentationConfig::with_max_payload_size(NonZeroUsize::new(512).expect("non-zero"))
        .in_flight_limit(NonZeroUsize::new(4096).expect("non-zero"))
)]
fn config_survives_serde(#[case] original: FragmentationConfig) {
    let bytes = encode_to_vec(original, config::standard()).expect("serialise config");
    let (decoded, read): (FragmentationConfig, usize) =
        decode_from_slice(&bytes, config::standard()).expect("deserialise config");

    assert_eq!(decoded, original);
    assert_eq!(read, bytes.len());
}

#[test]
fn default_config_matches_documented_limits() {
    let config = FragmentationConfig::default();
    assert_eq!(config.max_payload_size, DEFAULT_MAX_PAYLOAD_SIZE);
    assert_eq!(config.max_payload_size.get(), 1200);
    assert!(config.max_in_flight_bytes.is_none());
    assert_eq!(config.max_datagram_len(), 1200 + HEADER_LEN);
}

#[rstest]
#[case(HEADER_LEN + 1, Some(1))]
#[case(1500, Some(1488))]
#[case(HEADER_LEN, None)]
#[case(0, None)]
fn datagram_budget_reserves_header(#[case] budget: usize, #[case] payload: Option<usize>) {
    assert_eq!(
        FragmentationConfig::for_datagram_budget(budget).map(|c| c.max_payload_size.get()),
        payload
    );
}
