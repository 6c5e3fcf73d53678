//! Notifications emitted by encoders and decoders.
//!
//! Both state machines queue events instead of invoking callbacks directly,
//! so they stay synchronous and testable. Hosts drain the queues themselves
//! or route them through [`hooks`](crate::fragment::hooks).

use bytes::Bytes;
use bincode::error::DecodeError;

use super::{FragmentIndex, MessageId, MessageType, ReassemblyError};
use crate::message::Message;

/// Lifecycle notification produced by a [`Decoder`](crate::fragment::Decoder).
///
/// For each message the decoder emits `MessageStart`, zero or more
/// `FragmentReceived`, then exactly one of `MessageComplete` or
/// `MessageIncomplete`. `Error` events are out of band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoderEvent {
    /// The first fragment of a new message arrived.
    MessageStart {
        message_type: MessageType,
        message_id: MessageId,
        fragment_count: u16,
    },
    /// A fragment was stored.
    FragmentReceived {
        message_type: MessageType,
        message_id: MessageId,
        fragment_index: FragmentIndex,
        fragment_count: u16,
        fragments_received: u16,
    },
    /// Every fragment arrived and the payload was rebuilt.
    MessageComplete(CompletedMessage),
    /// A newer message preempted this one before it completed.
    MessageIncomplete {
        message_type: MessageType,
        message_id: MessageId,
        fragments_received: u16,
        fragment_count: u16,
    },
    /// A malformed or invalid fragment was dropped.
    Error(ReassemblyError),
}

/// Fully reassembled payload with its metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedMessage {
    message_type: MessageType,
    message_id: MessageId,
    fragment_count: u16,
    payload: Bytes,
}

impl CompletedMessage {
    /// Construct a new [`CompletedMessage`].
    #[must_use]
    pub fn new(
        message_type: MessageType,
        message_id: MessageId,
        fragment_count: u16,
        payload: Bytes,
    ) -> Self {
        Self {
            message_type,
            message_id,
            fragment_count,
            payload,
        }
    }

    /// Type tag the message was sent under.
    #[must_use]
    pub const fn message_type(&self) -> MessageType { self.message_type }

    /// Identifier shared by the fragments that formed this message.
    #[must_use]
    pub const fn message_id(&self) -> MessageId { self.message_id }

    /// Number of fragments the message arrived in.
    #[must_use]
    pub const fn fragment_count(&self) -> u16 { self.fragment_count }

    /// Length of the reassembled payload.
    #[must_use]
    pub fn total_bytes(&self) -> usize { self.payload.len() }

    /// Borrow the reassembled payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Consume the message, returning the payload.
    #[must_use]
    pub fn into_payload(self) -> Bytes { self.payload }

    /// Decode the payload into a typed message.
    ///
    /// # Errors
    ///
    /// Returns any [`DecodeError`] raised while deserialising the payload.
    pub fn decode<M: Message>(&self) -> Result<M, DecodeError> { M::from_bytes(&self.payload) }
}

/// Summary emitted once an encoder has produced every fragment of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedSummary {
    pub message_id: MessageId,
    pub message_type: MessageType,
    pub fragment_count: u16,
    pub total_bytes: usize,
}

/// Notification produced by an [`Encoder`](crate::fragment::Encoder).
///
/// Each message yields one `FragmentProduced` per fragment followed by one
/// `MessageEncoded`. Encoder errors are returned to the caller and never
/// queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderEvent {
    /// A fragment left the encoder.
    FragmentProduced {
        message_type: MessageType,
        message_id: MessageId,
        fragment_index: FragmentIndex,
        fragment_count: u16,
        payload_len: usize,
    },
    /// The last fragment of a message was produced.
    MessageEncoded(EncodedSummary),
}
