//! Fixed 12-byte fragment header.
//!
//! Layout, little-endian:
//!
//! | offset | size | field                                      |
//! |--------|------|--------------------------------------------|
//! | 0      | 1    | magic ([`MAGIC`])                          |
//! | 1      | 1    | version (bits 6–7) and message type (0–5)  |
//! | 2      | 2    | message id                                 |
//! | 4      | 2    | fragment index                             |
//! | 6      | 2    | fragment count                             |
//! | 8      | 4    | source id                                  |

use super::{FragmentIndex, HeaderError, MessageId, MessageType};
use crate::byte_order::{read_wire_u16, read_wire_u32, write_wire_u16, write_wire_u32};

/// Encoded header length in bytes.
pub const HEADER_LEN: usize = 12;

/// Sentinel first byte identifying a fragment datagram.
pub const MAGIC: u8 = 0xF7;

/// Protocol version written by encoders and required by decoders.
pub const PROTOCOL_VERSION: u8 = 0;

const VERSION_SHIFT: u8 = 6;
const VERSION_MASK: u8 = 0b11;

/// Whether `datagram` starts with the protocol's magic byte.
///
/// This is the cheapest possible filter for foreign traffic sharing the
/// transport.
#[must_use]
pub fn has_magic(datagram: &[u8]) -> bool { datagram.first() == Some(&MAGIC) }

/// Header describing a single fragment.
///
/// # Examples
///
/// ```
/// use dgramfrag::fragment::{FragmentHeader, FragmentIndex, MessageId, MessageType};
/// let message_type = MessageType::new(5).expect("valid type");
/// let header = FragmentHeader::new(
///     message_type,
///     MessageId::new(7),
///     FragmentIndex::zero(),
///     1,
///     0x1234_5678,
/// );
/// let bytes = header.encode();
/// assert_eq!(bytes[1], 5);
/// assert_eq!(FragmentHeader::decode(&bytes), Ok(header));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FragmentHeader {
    version: u8,
    message_type: MessageType,
    message_id: MessageId,
    fragment_index: FragmentIndex,
    fragment_count: u16,
    source_id: u32,
}

impl FragmentHeader {
    /// Create a header for the current [`PROTOCOL_VERSION`].
    #[must_use]
    pub const fn new(
        message_type: MessageType,
        message_id: MessageId,
        fragment_index: FragmentIndex,
        fragment_count: u16,
        source_id: u32,
    ) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            message_type,
            message_id,
            fragment_index,
            fragment_count,
            source_id,
        }
    }

    /// Replace the protocol version, keeping only its low two bits.
    #[must_use]
    pub const fn with_version(mut self, version: u8) -> Self {
        self.version = version & VERSION_MASK;
        self
    }

    /// Replace the fragment index.
    #[must_use]
    pub const fn with_fragment_index(mut self, fragment_index: FragmentIndex) -> Self {
        self.fragment_index = fragment_index;
        self
    }

    /// Return the protocol version.
    #[must_use]
    pub const fn version(&self) -> u8 { self.version }

    /// Return the message type.
    #[must_use]
    pub const fn message_type(&self) -> MessageType { self.message_type }

    /// Return the logical message identifier.
    #[must_use]
    pub const fn message_id(&self) -> MessageId { self.message_id }

    /// Return the fragment position within the message.
    #[must_use]
    pub const fn fragment_index(&self) -> FragmentIndex { self.fragment_index }

    /// Return the number of fragments in the message.
    #[must_use]
    pub const fn fragment_count(&self) -> u16 { self.fragment_count }

    /// Return the sender's source identifier.
    #[must_use]
    pub const fn source_id(&self) -> u32 { self.source_id }

    /// Whether index and count describe a real slot.
    #[must_use]
    pub const fn has_valid_position(&self) -> bool {
        self.fragment_count != 0 && self.fragment_index.fits(self.fragment_count)
    }

    /// Pack the header into its wire representation.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let [id_lo, id_hi] = write_wire_u16(self.message_id.get());
        let [index_lo, index_hi] = write_wire_u16(self.fragment_index.get());
        let [count_lo, count_hi] = write_wire_u16(self.fragment_count);
        let [s0, s1, s2, s3] = write_wire_u32(self.source_id);
        let packed =
            ((self.version & VERSION_MASK) << VERSION_SHIFT) | self.message_type.get();
        [
            MAGIC, packed, id_lo, id_hi, index_lo, index_hi, count_lo, count_hi, s0, s1, s2, s3,
        ]
    }

    /// Unpack a header from the first [`HEADER_LEN`] bytes of `bytes`.
    ///
    /// The magic byte is not checked; callers filter on [`has_magic`] first.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::TooShort`] when fewer than [`HEADER_LEN`]
    /// bytes are available.
    pub fn decode(bytes: &[u8]) -> Result<Self, HeaderError> {
        let Some(raw) = bytes.first_chunk::<HEADER_LEN>() else {
            return Err(HeaderError::TooShort { len: bytes.len() });
        };
        let [
            _magic,
            packed,
            id_lo,
            id_hi,
            index_lo,
            index_hi,
            count_lo,
            count_hi,
            s0,
            s1,
            s2,
            s3,
        ] = *raw;
        Ok(Self {
            version: (packed >> VERSION_SHIFT) & VERSION_MASK,
            message_type: MessageType::from_masked(packed),
            message_id: MessageId::new(read_wire_u16([id_lo, id_hi])),
            fragment_index: FragmentIndex::new(read_wire_u16([index_lo, index_hi])),
            fragment_count: read_wire_u16([count_lo, count_hi]),
            source_id: read_wire_u32([s0, s1, s2, s3]),
        })
    }
}
