//! Typed payloads carried through the fragment codec.
//!
//! The codec itself moves opaque bytes. [`Message`] lets callers hand a
//! structured value to [`Encoder::fragment_message`](crate::fragment::Encoder::fragment_message)
//! and read it back from a
//! [`CompletedMessage`](crate::fragment::CompletedMessage) using bincode's
//! standard configuration on both ends.

use bincode::{
    BorrowDecode,
    Encode,
    borrow_decode_from_slice,
    config,
    encode_to_vec,
    error::{DecodeError, EncodeError},
};

/// Structured value that can travel as a fragmented payload.
///
/// Implemented for every type deriving [`Encode`] and [`BorrowDecode`].
pub trait Message: Encode + for<'de> BorrowDecode<'de, ()> {
    /// Serialise the value into the bytes handed to the encoder.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if bincode rejects the value.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> { encode_to_vec(self, config::standard()) }

    /// Rebuild the value from a reassembled payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the payload is not a valid encoding.
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError>
    where
        Self: Sized,
    {
        let (value, _) = borrow_decode_from_slice(bytes, config::standard())?;
        Ok(value)
    }
}

impl<T> Message for T where for<'de> T: Encode + BorrowDecode<'de, ()> {}
