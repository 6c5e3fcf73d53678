//! Wrapping 16-bit message identifiers.
//!
//! Identifiers live in a circular space of 65 536 values. Ordering is
//! decided by forward distance: `a` is newer than `b` when stepping forward
//! from `b` reaches `a` in fewer than half the space.

use derive_more::{Display, From, Into};

/// Identifier shared by every fragment of one logical message.
///
/// # Examples
///
/// ```
/// use dgramfrag::fragment::MessageId;
/// let last = MessageId::new(u16::MAX);
/// assert_eq!(last.wrapping_next(), MessageId::new(0));
/// assert!(MessageId::new(0).is_newer_than(last));
/// assert!(!last.is_newer_than(MessageId::new(0)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, From, Into)]
#[display("{_0}")]
pub struct MessageId(u16);

impl MessageId {
    /// Half of the identifier space. Forward distances at or beyond this
    /// value are read as "older".
    pub const HALF_RANGE: u16 = 0x8000;

    /// Create an identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self { Self(value) }

    /// Return the numeric value.
    #[must_use]
    pub const fn get(self) -> u16 { self.0 }

    /// The identifier following `self`, wrapping from `u16::MAX` to zero.
    #[must_use]
    pub const fn wrapping_next(self) -> Self { Self(self.0.wrapping_add(1)) }

    /// Steps needed to walk forward from `earlier` to `self`, modulo 65 536.
    #[must_use]
    pub const fn forward_distance_from(self, earlier: Self) -> u16 { self.0.wrapping_sub(earlier.0) }

    /// Whether `self` was issued after `other`.
    ///
    /// Equal identifiers are neither newer nor older. A forward distance of
    /// exactly [`Self::HALF_RANGE`] counts as older.
    #[must_use]
    pub const fn is_newer_than(self, other: Self) -> bool {
        let distance = self.forward_distance_from(other);
        distance != 0 && distance < Self::HALF_RANGE
    }
}
