//! Datagram builders and delivery helpers.

use bytes::Bytes;
use dgramfrag::fragment::{
    CompletedMessage,
    Decoder,
    DecoderEvent,
    Encoder,
    FragmentHeader,
    FragmentIndex,
    MessageId,
    MessageType,
    ReassemblyError,
};

/// Fragment `payload` and return the datagrams in transmission order.
///
/// # Panics
///
/// Panics if the encoder rejects the payload or message type.
pub fn datagrams_for(encoder: &mut Encoder, payload: &[u8], message_type: u8) -> Vec<Bytes> {
    encoder
        .fragment(payload, message_type)
        .expect("test payload should fragment")
        .to_datagrams()
}

/// Rearrange `datagrams` following `order`, a list of positions.
///
/// Positions may repeat to simulate duplication and may be omitted to
/// simulate loss.
///
/// # Panics
///
/// Panics if a position is out of range.
#[must_use]
pub fn reorder(datagrams: Vec<Bytes>, order: &[usize]) -> Vec<Bytes> {
    order
        .iter()
        .map(|&position| datagrams[position].clone())
        .collect()
}

/// Build a datagram from raw header fields and a payload.
///
/// # Panics
///
/// Panics if `message_type` exceeds the six-bit range.
#[must_use]
pub fn raw_datagram(
    source_id: u32,
    message_type: u8,
    message_id: u16,
    fragment_index: u16,
    fragment_count: u16,
    payload: &[u8],
) -> Vec<u8> {
    let header = FragmentHeader::new(
        MessageType::new(message_type).expect("message type within range"),
        MessageId::new(message_id),
        FragmentIndex::new(fragment_index),
        fragment_count,
        source_id,
    );
    let mut datagram = header.encode().to_vec();
    datagram.extend_from_slice(payload);
    datagram
}

/// Events collected after feeding a decoder.
#[derive(Debug, Default)]
pub struct DeliveryOutcome {
    pub accepted: usize,
    pub completed: Vec<CompletedMessage>,
    pub incomplete: usize,
    pub errors: Vec<ReassemblyError>,
}

/// Feed every datagram to `decoder` and sort the resulting events.
pub fn deliver<D: AsRef<[u8]>>(decoder: &mut Decoder, datagrams: &[D]) -> DeliveryOutcome {
    let mut outcome = DeliveryOutcome::default();
    for datagram in datagrams {
        if decoder.accept(datagram) {
            outcome.accepted += 1;
        }
    }
    for event in decoder.drain_events() {
        match event {
            DecoderEvent::MessageComplete(message) => outcome.completed.push(message),
            DecoderEvent::MessageIncomplete { .. } => outcome.incomplete += 1,
            DecoderEvent::Error(error) => outcome.errors.push(error),
            DecoderEvent::MessageStart { .. } | DecoderEvent::FragmentReceived { .. } => {}
        }
    }
    outcome
}
