//! Inbound state machine that rebuilds messages from fragments.
//!
//! [`Decoder`] keeps at most one [`Accumulator`] per message type. A datagram
//! passes through a fixed sequence of filters, cheapest first, and each
//! filter either drops it silently, reports a [`ReassemblyError`], or hands
//! it to the next stage. Nothing escapes [`Decoder::accept`]: outcomes are
//! queued as [`DecoderEvent`]s for the host to drain.

use std::collections::{HashMap, VecDeque};

use log::{debug, trace, warn};

use super::{
    AccumulatorStatus,
    CompletedMessage,
    DecoderEvent,
    Disposition,
    FragmentHeader,
    FragmentationConfig,
    HEADER_LEN,
    HeaderError,
    IgnoreReason,
    MessageType,
    MessageTypeSet,
    PROTOCOL_VERSION,
    ReassemblyError,
    accumulator::Accumulator,
    header::has_magic,
};
use crate::metrics;

/// Stateful fragment reassembler for one source.
///
/// # Examples
///
/// ```
/// use dgramfrag::fragment::{Decoder, DecoderEvent, Encoder};
/// let mut encoder = Encoder::new(7);
/// let mut decoder = Decoder::new(7);
/// for datagram in encoder.fragment(b"ping", 3).expect("fragment").to_datagrams() {
///     assert!(decoder.accept(&datagram));
/// }
/// let completed = decoder.drain_events().find_map(|event| match event {
///     DecoderEvent::MessageComplete(message) => Some(message),
///     _ => None,
/// });
/// assert_eq!(completed.expect("message completes").payload(), b"ping");
/// ```
#[derive(Debug)]
pub struct Decoder {
    source_id: u32,
    accepted_types: MessageTypeSet,
    config: FragmentationConfig,
    accumulators: HashMap<MessageType, Accumulator>,
    events: VecDeque<DecoderEvent>,
}

impl Decoder {
    /// Create a decoder accepting every message type from `source_id`.
    #[must_use]
    pub fn new(source_id: u32) -> Self {
        Self::with_config(source_id, MessageTypeSet::all(), FragmentationConfig::default())
    }

    /// Create a decoder restricted to `accepted_types`.
    #[must_use]
    pub fn with_accepted_types(source_id: u32, accepted_types: MessageTypeSet) -> Self {
        Self::with_config(source_id, accepted_types, FragmentationConfig::default())
    }

    /// Create a decoder with an explicit type filter and configuration.
    #[must_use]
    pub fn with_config(
        source_id: u32,
        accepted_types: MessageTypeSet,
        config: FragmentationConfig,
    ) -> Self {
        Self {
            source_id,
            accepted_types,
            config,
            accumulators: HashMap::new(),
            events: VecDeque::new(),
        }
    }

    /// Return the source identifier fragments must carry.
    #[must_use]
    pub const fn source_id(&self) -> u32 { self.source_id }

    /// Return the accepted message types.
    #[must_use]
    pub const fn accepted_types(&self) -> MessageTypeSet { self.accepted_types }

    /// Return the active configuration.
    #[must_use]
    pub const fn config(&self) -> &FragmentationConfig { &self.config }

    /// Feed one datagram to the decoder.
    ///
    /// Returns `true` when the fragment was stored towards a message and
    /// `false` when it was ignored or rejected.
    pub fn accept(&mut self, datagram: impl AsRef<[u8]>) -> bool {
        self.process(datagram.as_ref()).is_accepted()
    }

    /// Feed one datagram and report what happened to it.
    pub fn process(&mut self, datagram: &[u8]) -> Disposition {
        if !has_magic(datagram) {
            trace!("ignoring non-protocol datagram: len={}", datagram.len());
            return Disposition::Ignored(IgnoreReason::NotProtocol);
        }

        let header = match FragmentHeader::decode(datagram) {
            Ok(header) => header,
            Err(HeaderError::TooShort { len }) => {
                return self.reject(ReassemblyError::PacketTooShort { len });
            }
        };

        if header.version() != PROTOCOL_VERSION {
            return self.reject(ReassemblyError::UnsupportedVersion {
                found: header.version(),
                expected: PROTOCOL_VERSION,
            });
        }

        if header.source_id() != self.source_id {
            trace!(
                "ignoring fragment from source {:#010x}, expected {:#010x}",
                header.source_id(),
                self.source_id
            );
            return Disposition::Ignored(IgnoreReason::WrongSource);
        }

        if !self.accepted_types.contains(header.message_type()) {
            trace!("ignoring filtered message type {}", header.message_type());
            return Disposition::Ignored(IgnoreReason::FilteredType);
        }

        let payload = datagram.get(HEADER_LEN..).unwrap_or_default();
        if !header.has_valid_position() || payload.len() > self.config.max_payload_size.get() {
            return self.reject(ReassemblyError::InvalidFragment {
                message_type: header.message_type(),
                message_id: header.message_id(),
                fragment_index: header.fragment_index(),
                fragment_count: header.fragment_count(),
                payload_len: payload.len(),
            });
        }

        if !self.refresh_accumulator(&header) {
            debug!(
                "ignoring stale fragment: type={}, id={}",
                header.message_type(),
                header.message_id()
            );
            return Disposition::Ignored(IgnoreReason::StaleMessage);
        }

        self.store_fragment(&header, payload)
    }

    /// Drop in-flight state for `message_type`, or for every type when
    /// `None`. No events are emitted.
    pub fn reset(&mut self, message_type: Option<MessageType>) {
        match message_type {
            Some(message_type) => {
                self.accumulators.remove(&message_type);
            }
            None => self.accumulators.clear(),
        }
    }

    /// Snapshot of the message being assembled for `message_type`.
    #[must_use]
    pub fn in_flight(&self, message_type: MessageType) -> Option<AccumulatorStatus> {
        self.accumulators.get(&message_type).map(Accumulator::status)
    }

    /// Number of message types with a reassembly in progress.
    #[must_use]
    pub fn in_flight_len(&self) -> usize { self.accumulators.len() }

    /// Remove and return the oldest queued event.
    pub fn pop_event(&mut self) -> Option<DecoderEvent> { self.events.pop_front() }

    /// Remove and return every queued event in emission order.
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, DecoderEvent> {
        self.events.drain(..)
    }

    /// Whether any events are waiting to be drained.
    #[must_use]
    pub fn has_events(&self) -> bool { !self.events.is_empty() }

    /// Make sure the accumulator for the header's type tracks its message.
    ///
    /// Returns `false` when the fragment belongs to an older message.
    fn refresh_accumulator(&mut self, header: &FragmentHeader) -> bool {
        let message_type = header.message_type();
        let message_id = header.message_id();
        if let Some(current) = self.accumulators.get(&message_type) {
            if current.message_id() == message_id {
                return true;
            }
            if !message_id.is_newer_than(current.message_id()) {
                return false;
            }
        }

        let fresh = Accumulator::new(message_id, header.fragment_count());
        if let Some(previous) = self.accumulators.insert(message_type, fresh) {
            debug!(
                "abandoning incomplete message: type={message_type}, id={}, received={}/{}",
                previous.message_id(),
                previous.fragments_received(),
                previous.fragment_count()
            );
            metrics::inc_messages_abandoned();
            self.events.push_back(DecoderEvent::MessageIncomplete {
                message_type,
                message_id: previous.message_id(),
                fragments_received: saturating_u16(previous.fragments_received()),
                fragment_count: previous.fragment_count(),
            });
        }
        self.events.push_back(DecoderEvent::MessageStart {
            message_type,
            message_id,
            fragment_count: header.fragment_count(),
        });
        true
    }

    fn store_fragment(&mut self, header: &FragmentHeader, payload: &[u8]) -> Disposition {
        let message_type = header.message_type();
        let message_id = header.message_id();
        let fragment_index = header.fragment_index();
        let Some(accumulator) = self.accumulators.get_mut(&message_type) else {
            return Disposition::Ignored(IgnoreReason::StaleMessage);
        };

        if accumulator.contains(fragment_index) {
            return self.reject(ReassemblyError::DuplicateFragment {
                message_type,
                message_id,
                fragment_index,
            });
        }

        accumulator.store(fragment_index, payload);
        let status = accumulator.status();

        if accumulator.is_overfull() {
            self.accumulators.remove(&message_type);
            return self.reject(ReassemblyError::FragmentCountExceeded {
                message_type,
                message_id,
                received: status.fragments_received,
                expected: status.fragment_count,
            });
        }

        if let Some(limit) = self.config.max_in_flight_bytes {
            if status.total_bytes > limit.get() {
                self.accumulators.remove(&message_type);
                return self.reject(ReassemblyError::InFlightBudgetExceeded {
                    message_type,
                    message_id,
                    buffered: status.total_bytes,
                    limit,
                });
            }
        }

        metrics::inc_fragments_accepted();
        self.events.push_back(DecoderEvent::FragmentReceived {
            message_type,
            message_id,
            fragment_index,
            fragment_count: status.fragment_count,
            fragments_received: saturating_u16(status.fragments_received),
        });

        let complete = self
            .accumulators
            .get(&message_type)
            .is_some_and(Accumulator::is_complete);
        if complete {
            if let Some(finished) = self.accumulators.remove(&message_type) {
                return self.complete(message_type, finished);
            }
        }
        Disposition::Accepted
    }

    fn complete(&mut self, message_type: MessageType, accumulator: Accumulator) -> Disposition {
        let message_id = accumulator.message_id();
        let fragment_count = accumulator.fragment_count();
        match accumulator.assemble() {
            Ok(payload) => {
                debug!(
                    "message complete: type={message_type}, id={message_id}, \
                     fragments={fragment_count}, len={}",
                    payload.len()
                );
                metrics::inc_messages_completed();
                self.events
                    .push_back(DecoderEvent::MessageComplete(CompletedMessage::new(
                        message_type,
                        message_id,
                        fragment_count,
                        payload,
                    )));
                Disposition::Accepted
            }
            Err(missing) => self.reject(ReassemblyError::ReassemblyFailed {
                message_type,
                message_id,
                missing,
            }),
        }
    }

    fn reject(&mut self, error: ReassemblyError) -> Disposition {
        warn!("rejecting fragment: kind={}, error={error}", error.kind());
        metrics::inc_errors(error.kind());
        self.events.push_back(DecoderEvent::Error(error));
        Disposition::Rejected
    }
}

fn saturating_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }
