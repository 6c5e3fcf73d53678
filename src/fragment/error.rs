//! Error and disposition types emitted by the fragmentation layer.
//!
//! Encoder failures are returned directly to the caller. Decoder failures
//! never escape [`Decoder::accept`](crate::fragment::Decoder::accept); they
//! are either dropped silently ([`IgnoreReason`]) or reported through the
//! decoder's event queue ([`ReassemblyError`]).

use std::num::NonZeroUsize;

use bincode::error::EncodeError;
use thiserror::Error;

use super::{FragmentIndex, HEADER_LEN, MessageId, MessageType};

/// A message type outside `0..=63`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("message type {0} outside 0..=63")]
pub struct InvalidMessageType(pub u8);

/// Errors produced while decoding a raw fragment header.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Fewer bytes than a full header were supplied.
    #[error("fragment header needs {} bytes, found {len}", HEADER_LEN)]
    TooShort { len: usize },
}

/// Errors produced while fragmenting outbound messages.
///
/// None of these consume a message identifier.
#[derive(Debug, Error)]
pub enum FragmentationError {
    /// The requested message type does not fit in six bits.
    #[error(transparent)]
    InvalidMessageType(#[from] InvalidMessageType),
    /// The value could not be serialised into a byte payload.
    #[error("failed to encode message: {0}")]
    InvalidInput(#[from] EncodeError),
    /// Splitting the payload would need more than `u16::MAX` fragments.
    #[error("payload of {len} bytes needs {required} fragments, limit is {}", u16::MAX)]
    MessageTooLarge { len: usize, required: usize },
}

/// Protocol violations reported by the decoder.
///
/// Each error is local to the fragment that triggered it; accumulators for
/// other message types are never affected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    /// The datagram carried the magic byte but not a full header.
    #[error("packet too short: {len} bytes, header needs {}", HEADER_LEN)]
    PacketTooShort { len: usize },
    /// The header announced a protocol version this decoder does not speak.
    #[error("unsupported protocol version {found}, expected {expected}")]
    UnsupportedVersion { found: u8, expected: u8 },
    /// Index, count or payload length are inconsistent.
    #[error(
        "invalid fragment {fragment_index}/{fragment_count} for type {message_type} message \
         {message_id} with {payload_len} payload bytes"
    )]
    InvalidFragment {
        message_type: MessageType,
        message_id: MessageId,
        fragment_index: FragmentIndex,
        fragment_count: u16,
        payload_len: usize,
    },
    /// The fragment index was already stored for this message.
    #[error("duplicate fragment {fragment_index} for type {message_type} message {message_id}")]
    DuplicateFragment {
        message_type: MessageType,
        message_id: MessageId,
        fragment_index: FragmentIndex,
    },
    /// More fragments were stored than the message declared.
    #[error(
        "type {message_type} message {message_id} received {received} fragments, expected \
         {expected}"
    )]
    FragmentCountExceeded {
        message_type: MessageType,
        message_id: MessageId,
        received: usize,
        expected: u16,
    },
    /// A slot was empty when concatenation ran.
    #[error("type {message_type} message {message_id} is missing fragment {missing}")]
    ReassemblyFailed {
        message_type: MessageType,
        message_id: MessageId,
        missing: FragmentIndex,
    },
    /// Buffered payload for one message exceeded the configured cap.
    #[error(
        "type {message_type} message {message_id} buffered {buffered} bytes, limit is {limit}"
    )]
    InFlightBudgetExceeded {
        message_type: MessageType,
        message_id: MessageId,
        buffered: usize,
        limit: NonZeroUsize,
    },
}

impl ReassemblyError {
    /// Stable label used for logging and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PacketTooShort { .. } => "packet_too_short",
            Self::UnsupportedVersion { .. } => "unsupported_version",
            Self::InvalidFragment { .. } => "invalid_fragment",
            Self::DuplicateFragment { .. } => "duplicate_fragment",
            Self::FragmentCountExceeded { .. } => "fragment_count_exceeded",
            Self::ReassemblyFailed { .. } => "reassembly_failed",
            Self::InFlightBudgetExceeded { .. } => "in_flight_budget_exceeded",
        }
    }
}

/// Why a datagram was dropped without reporting an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Empty datagram or wrong magic byte.
    NotProtocol,
    /// Fragment from another source sharing the transport.
    WrongSource,
    /// Message type outside the decoder's accepted set.
    FilteredType,
    /// Message identifier older than the one being assembled.
    StaleMessage,
}

/// Outcome of feeding one datagram to a decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The fragment was stored towards a message.
    Accepted,
    /// The datagram was dropped silently.
    Ignored(IgnoreReason),
    /// The datagram was dropped and a [`ReassemblyError`] was reported.
    Rejected,
}

impl Disposition {
    /// Whether the fragment counted towards a message.
    #[must_use]
    pub const fn is_accepted(self) -> bool { matches!(self, Self::Accepted) }
}
