//! Outbound helper that splits payloads into wire fragments.
//!
//! [`Encoder`] owns the message identifier counter for one source. Each
//! successful call consumes exactly one identifier, before any fragment is
//! produced, so lazily pulled fragments never re-run state changes.

use std::{collections::VecDeque, iter::FusedIterator};

use bytes::{BufMut, Bytes, BytesMut};
use log::{debug, trace};

use super::{
    EncodedSummary,
    EncoderEvent,
    FragmentHeader,
    FragmentIndex,
    FragmentationConfig,
    FragmentationError,
    HEADER_LEN,
    MessageId,
    MessageType,
};
use crate::{message::Message, metrics};

/// Splits payloads into header-prefixed fragments for one source.
///
/// # Examples
///
/// ```
/// use dgramfrag::fragment::Encoder;
/// let mut encoder = Encoder::new(0x1234_5678);
/// let batch = encoder.fragment(b"Hello, World!", 5).expect("fragment payload");
/// assert_eq!(batch.len(), 1);
/// assert_eq!(batch.fragments()[0].header().fragment_count(), 1);
/// ```
#[derive(Debug)]
pub struct Encoder {
    source_id: u32,
    config: FragmentationConfig,
    next_message_id: MessageId,
    events: VecDeque<EncoderEvent>,
}

impl Encoder {
    /// Create an encoder with the default [`FragmentationConfig`].
    #[must_use]
    pub fn new(source_id: u32) -> Self { Self::with_config(source_id, FragmentationConfig::default()) }

    /// Create an encoder with an explicit configuration.
    #[must_use]
    pub fn with_config(source_id: u32, config: FragmentationConfig) -> Self {
        Self::with_starting_id(source_id, config, MessageId::new(0))
    }

    /// Create an encoder whose first message uses `start_at`.
    #[must_use]
    pub fn with_starting_id(
        source_id: u32,
        config: FragmentationConfig,
        start_at: MessageId,
    ) -> Self {
        Self {
            source_id,
            config,
            next_message_id: start_at,
            events: VecDeque::new(),
        }
    }

    /// Return the source identifier stamped on every fragment.
    #[must_use]
    pub const fn source_id(&self) -> u32 { self.source_id }

    /// Return the active configuration.
    #[must_use]
    pub const fn config(&self) -> &FragmentationConfig { &self.config }

    /// Identifier the next successful call will use.
    #[must_use]
    pub const fn peek_message_id(&self) -> MessageId { self.next_message_id }

    /// Number of fragments needed for a payload of `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentationError::MessageTooLarge`] above `u16::MAX`
    /// fragments.
    pub fn fragment_count_for(&self, len: usize) -> Result<u16, FragmentationError> {
        let required = len.div_ceil(self.config.max_payload_size.get()).max(1);
        u16::try_from(required).map_err(|_| FragmentationError::MessageTooLarge { len, required })
    }

    /// Split `payload` into fragments tagged with `message_type`.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentationError::InvalidMessageType`] when
    /// `message_type > 63` and [`FragmentationError::MessageTooLarge`] when
    /// more than `u16::MAX` fragments are needed. Errors leave the encoder
    /// untouched.
    pub fn fragment(
        &mut self,
        payload: impl AsRef<[u8]>,
        message_type: u8,
    ) -> Result<FragmentBatch, FragmentationError> {
        let fragments = self.fragments(payload.as_ref(), message_type)?;
        let message_id = fragments.message_id();
        let message_type = fragments.message_type();
        Ok(FragmentBatch::new(message_id, message_type, fragments.collect()))
    }

    /// Serialise `message` with bincode and split the bytes into fragments.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentationError::InvalidInput`] when serialisation fails,
    /// plus every error [`fragment`](Self::fragment) can return.
    pub fn fragment_message<M: Message>(
        &mut self,
        message: &M,
        message_type: u8,
    ) -> Result<FragmentBatch, FragmentationError> {
        MessageType::new(message_type)?;
        let bytes = message.to_bytes()?;
        self.fragment(bytes, message_type)
    }

    /// Lazily split `payload`, yielding one fragment per call to `next`.
    ///
    /// The message identifier is consumed before this returns. The
    /// completion summary is queued once the iterator is exhausted.
    ///
    /// # Errors
    ///
    /// Same as [`fragment`](Self::fragment).
    pub fn fragments<'a>(
        &'a mut self,
        payload: &'a [u8],
        message_type: u8,
    ) -> Result<Fragments<'a>, FragmentationError> {
        let message_type = MessageType::new(message_type)?;
        let fragment_count = self.fragment_count_for(payload.len())?;
        let message_id = self.claim_message_id();
        debug!(
            "fragmenting message: type={message_type}, id={message_id}, len={}, \
             fragments={fragment_count}",
            payload.len()
        );
        let template = FragmentHeader::new(
            message_type,
            message_id,
            FragmentIndex::zero(),
            fragment_count,
            self.source_id,
        );
        Ok(Fragments {
            template,
            payload,
            max_payload_size: self.config.max_payload_size.get(),
            next_index: 0,
            finished: false,
            events: &mut self.events,
        })
    }

    /// Remove and return the oldest queued event.
    pub fn pop_event(&mut self) -> Option<EncoderEvent> { self.events.pop_front() }

    /// Remove and return every queued event in emission order.
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, EncoderEvent> {
        self.events.drain(..)
    }

    fn claim_message_id(&mut self) -> MessageId {
        let current = self.next_message_id;
        self.next_message_id = current.wrapping_next();
        current
    }
}

/// Lazy fragment producer returned by [`Encoder::fragments`].
#[derive(Debug)]
pub struct Fragments<'a> {
    template: FragmentHeader,
    payload: &'a [u8],
    max_payload_size: usize,
    next_index: u32,
    finished: bool,
    events: &'a mut VecDeque<EncoderEvent>,
}

impl Fragments<'_> {
    /// Identifier shared by every fragment of this message.
    #[must_use]
    pub const fn message_id(&self) -> MessageId { self.template.message_id() }

    /// Type tag carried by every fragment of this message.
    #[must_use]
    pub const fn message_type(&self) -> MessageType { self.template.message_type() }

    /// Total fragments this iterator yields.
    #[must_use]
    pub const fn fragment_count(&self) -> u16 { self.template.fragment_count() }

    fn remaining(&self) -> usize {
        usize::from(self.fragment_count()).saturating_sub(self.next_index as usize)
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        let summary = EncodedSummary {
            message_id: self.message_id(),
            message_type: self.message_type(),
            fragment_count: self.fragment_count(),
            total_bytes: self.payload.len(),
        };
        self.events.push_back(EncoderEvent::MessageEncoded(summary));
        metrics::inc_fragments_encoded(u64::from(self.fragment_count()));
    }
}

impl Iterator for Fragments<'_> {
    type Item = FragmentFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let Ok(raw_index) = u16::try_from(self.next_index) else {
            self.finish();
            return None;
        };
        if raw_index >= self.fragment_count() {
            self.finish();
            return None;
        }
        let offset = usize::from(raw_index).saturating_mul(self.max_payload_size);
        let end = offset
            .saturating_add(self.max_payload_size)
            .min(self.payload.len());
        let chunk = self.payload.get(offset..end).unwrap_or_default();
        let index = FragmentIndex::new(raw_index);
        let header = self.template.with_fragment_index(index);
        trace!(
            "produced fragment: type={}, id={}, index={index}/{}, len={}",
            header.message_type(),
            header.message_id(),
            header.fragment_count(),
            chunk.len()
        );
        self.events.push_back(EncoderEvent::FragmentProduced {
            message_type: header.message_type(),
            message_id: header.message_id(),
            fragment_index: index,
            fragment_count: header.fragment_count(),
            payload_len: chunk.len(),
        });
        self.next_index += 1;
        Some(FragmentFrame::new(header, Bytes::copy_from_slice(chunk)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Fragments<'_> {}

impl FusedIterator for Fragments<'_> {}

/// Header and payload for a single outbound fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentFrame {
    header: FragmentHeader,
    payload: Bytes,
}

impl FragmentFrame {
    /// Construct a new fragment frame.
    #[must_use]
    pub fn new(header: FragmentHeader, payload: Bytes) -> Self { Self { header, payload } }

    /// Return the fragment header.
    #[must_use]
    pub fn header(&self) -> &FragmentHeader { &self.header }

    /// Return the fragment payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Length of the encoded datagram, header included.
    #[must_use]
    pub fn wire_len(&self) -> usize { HEADER_LEN + self.payload.len() }

    /// Encode header and payload into one datagram.
    #[must_use]
    pub fn to_datagram(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        buf.put_slice(&self.header.encode());
        buf.put_slice(&self.payload);
        buf.freeze()
    }

    /// Consume the frame, returning its components.
    #[must_use]
    pub fn into_parts(self) -> (FragmentHeader, Bytes) { (self.header, self.payload) }
}

/// Every fragment produced for one logical message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentBatch {
    message_id: MessageId,
    message_type: MessageType,
    fragments: Vec<FragmentFrame>,
}

impl FragmentBatch {
    fn new(message_id: MessageId, message_type: MessageType, fragments: Vec<FragmentFrame>) -> Self {
        debug_assert!(!fragments.is_empty(), "fragment batches must not be empty");
        Self {
            message_id,
            message_type,
            fragments,
        }
    }

    /// Return the [`MessageId`] shared by all fragments.
    #[must_use]
    pub const fn message_id(&self) -> MessageId { self.message_id }

    /// Return the type tag shared by all fragments.
    #[must_use]
    pub const fn message_type(&self) -> MessageType { self.message_type }

    /// Return the fragments in index order.
    #[must_use]
    pub fn fragments(&self) -> &[FragmentFrame] { &self.fragments }

    /// Number of fragments in the batch.
    #[expect(
        clippy::len_without_is_empty,
        reason = "batches are guaranteed non-empty"
    )]
    #[must_use]
    pub fn len(&self) -> usize { self.fragments.len() }

    /// Whether the message needed more than one fragment.
    #[must_use]
    pub fn is_fragmented(&self) -> bool { self.len() > 1 }

    /// Sum of payload bytes across fragments.
    #[must_use]
    pub fn total_bytes(&self) -> usize { self.fragments.iter().map(|f| f.payload.len()).sum() }

    /// Encode every fragment into a datagram, in index order.
    #[must_use]
    pub fn to_datagrams(&self) -> Vec<Bytes> {
        self.fragments.iter().map(FragmentFrame::to_datagram).collect()
    }

    /// Consume the batch, returning all fragments.
    #[must_use]
    pub fn into_fragments(self) -> Vec<FragmentFrame> { self.fragments }
}

impl IntoIterator for FragmentBatch {
    type Item = FragmentFrame;
    type IntoIter = std::vec::IntoIter<FragmentFrame>;

    fn into_iter(self) -> Self::IntoIter { self.fragments.into_iter() }
}
