//! Helpers for the little-endian integers carried in fragment headers.
//!
//! The fragment wire format fixes every multi-byte field as little-endian.
//! Keeping the conversions here scopes the Clippy expectations to a single
//! place so header code can stay explicit about byte order.

/// Serialise a `u16` in wire byte order (little-endian).
///
/// # Examples
///
/// ```
/// use dgramfrag::byte_order::write_wire_u16;
///
/// assert_eq!(write_wire_u16(0x1234), [0x34, 0x12]);
/// ```
#[must_use]
pub fn write_wire_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::little_endian_bytes,
        reason = "The fragment header is little-endian on the wire."
    )]
    value.to_le_bytes()
}

/// Parse a wire-order `u16`.
///
/// # Examples
///
/// ```
/// use dgramfrag::byte_order::read_wire_u16;
///
/// assert_eq!(read_wire_u16([0x34, 0x12]), 0x1234);
/// ```
#[must_use]
pub fn read_wire_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::little_endian_bytes,
        reason = "The fragment header is little-endian on the wire."
    )]
    u16::from_le_bytes(bytes)
}

/// Serialise a `u32` in wire byte order (little-endian).
///
/// # Examples
///
/// ```
/// use dgramfrag::byte_order::write_wire_u32;
///
/// assert_eq!(write_wire_u32(0x1234_5678), [0x78, 0x56, 0x34, 0x12]);
/// ```
#[must_use]
pub fn write_wire_u32(value: u32) -> [u8; 4] {
    #[expect(
        clippy::little_endian_bytes,
        reason = "The fragment header is little-endian on the wire."
    )]
    value.to_le_bytes()
}

/// Parse a wire-order `u32`.
#[must_use]
pub fn read_wire_u32(bytes: [u8; 4]) -> u32 {
    #[expect(
        clippy::little_endian_bytes,
        reason = "The fragment header is little-endian on the wire."
    )]
    u32::from_le_bytes(bytes)
}
