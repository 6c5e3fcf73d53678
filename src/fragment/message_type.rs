//! Six-bit message type tags and sets of accepted types.

use derive_more::Display;

use super::InvalidMessageType;

/// Tag partitioning independent message streams within one source.
///
/// Only the low six bits travel on the wire, so valid values are `0..=63`.
///
/// # Examples
///
/// ```
/// use dgramfrag::fragment::MessageType;
/// assert_eq!(MessageType::new(5).map(MessageType::get), Ok(5));
/// assert!(MessageType::new(64).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct MessageType(u8);

impl MessageType {
    /// Largest encodable message type.
    pub const MAX: u8 = 0x3F;

    /// Validate and wrap a message type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMessageType`] when `value` exceeds [`Self::MAX`].
    pub const fn new(value: u8) -> Result<Self, InvalidMessageType> {
        if value > Self::MAX {
            return Err(InvalidMessageType(value));
        }
        Ok(Self(value))
    }

    /// Keep only the low six bits of `bits`.
    #[must_use]
    pub(crate) const fn from_masked(bits: u8) -> Self { Self(bits & Self::MAX) }

    /// Return the numeric tag.
    #[must_use]
    pub const fn get(self) -> u8 { self.0 }
}

impl TryFrom<u8> for MessageType {
    type Error = InvalidMessageType;

    fn try_from(value: u8) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<MessageType> for u8 {
    fn from(value: MessageType) -> Self { value.0 }
}

/// Compact set of message types, one bit per type.
///
/// # Examples
///
/// ```
/// use dgramfrag::fragment::{MessageType, MessageTypeSet};
/// let set: MessageTypeSet = [1, 2]
///     .into_iter()
///     .filter_map(|value| MessageType::new(value).ok())
///     .collect();
/// assert!(set.contains(MessageType::new(2).expect("valid type")));
/// assert!(!set.contains(MessageType::new(5).expect("valid type")));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageTypeSet(u64);

impl MessageTypeSet {
    /// Set containing no types.
    #[must_use]
    pub const fn empty() -> Self { Self(0) }

    /// Set containing every type `0..=63`.
    #[must_use]
    pub const fn all() -> Self { Self(u64::MAX) }

    /// Add `message_type` to the set.
    pub fn insert(&mut self, message_type: MessageType) { self.0 |= Self::bit(message_type); }

    /// Remove `message_type` from the set.
    pub fn remove(&mut self, message_type: MessageType) { self.0 &= !Self::bit(message_type); }

    /// Whether `message_type` is a member.
    #[must_use]
    pub const fn contains(self, message_type: MessageType) -> bool {
        self.0 & Self::bit(message_type) != 0
    }

    /// Number of member types.
    #[must_use]
    pub const fn len(self) -> usize { self.0.count_ones() as usize }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    /// Iterate over the members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = MessageType> {
        (0..=MessageType::MAX)
            .map(MessageType::from_masked)
            .filter(move |message_type| self.contains(*message_type))
    }

    const fn bit(message_type: MessageType) -> u64 { 1 << message_type.0 }
}

impl Default for MessageTypeSet {
    fn default() -> Self { Self::all() }
}

impl FromIterator<MessageType> for MessageTypeSet {
    fn from_iter<I: IntoIterator<Item = MessageType>>(iter: I) -> Self {
        let mut set = Self::empty();
        for message_type in iter {
            set.insert(message_type);
        }
        set
    }
}

impl Extend<MessageType> for MessageTypeSet {
    fn extend<I: IntoIterator<Item = MessageType>>(&mut self, iter: I) {
        for message_type in iter {
            self.insert(message_type);
        }
    }
}
