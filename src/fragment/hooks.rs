//! Callback registration layered over the encoder and decoder event queues.
//!
//! [`DecoderHooks`] and [`EncoderHooks`] store optional callbacks and replay
//! queued events into them in emission order. The state machines never call
//! these directly; hosts decide when to [`pump`](DecoderHooks::pump).

use super::{
    CompletedMessage,
    Decoder,
    DecoderEvent,
    EncodedSummary,
    Encoder,
    EncoderEvent,
    FragmentIndex,
    MessageId,
    MessageType,
    ReassemblyError,
};

/// Type alias for the `on_message_start` callback.
type MessageStartHook = Box<dyn FnMut(MessageType, MessageId, u16) + Send + 'static>;

/// Type alias for the `on_fragment_received` callback.
type FragmentReceivedHook =
    Box<dyn FnMut(MessageType, MessageId, FragmentIndex, u16, u16) + Send + 'static>;

/// Type alias for the `on_message_complete` callback.
type MessageCompleteHook = Box<dyn FnMut(CompletedMessage) + Send + 'static>;

/// Type alias for the `on_message_incomplete` callback.
type MessageIncompleteHook = Box<dyn FnMut(MessageType, MessageId, u16, u16) + Send + 'static>;

/// Type alias for the `on_error` callback.
type ErrorHook = Box<dyn FnMut(ReassemblyError) + Send + 'static>;

/// Callbacks fed from a [`Decoder`]'s event queue.
#[derive(Default)]
pub struct DecoderHooks {
    /// Invoked with `(type, id, fragment_count)` when a message starts.
    pub on_message_start: Option<MessageStartHook>,
    /// Invoked with `(type, id, index, fragment_count, fragments_received)`.
    pub on_fragment_received: Option<FragmentReceivedHook>,
    /// Invoked with the rebuilt message.
    pub on_message_complete: Option<MessageCompleteHook>,
    /// Invoked with `(type, id, fragments_received, fragment_count)`.
    pub on_message_incomplete: Option<MessageIncompleteHook>,
    /// Invoked for every reported protocol error.
    pub on_error: Option<ErrorHook>,
}

impl DecoderHooks {
    /// Run the callback matching `event`, if registered.
    pub fn dispatch(&mut self, event: DecoderEvent) {
        match event {
            DecoderEvent::MessageStart {
                message_type,
                message_id,
                fragment_count,
            } => {
                if let Some(hook) = &mut self.on_message_start {
                    hook(message_type, message_id, fragment_count);
                }
            }
            DecoderEvent::FragmentReceived {
                message_type,
                message_id,
                fragment_index,
                fragment_count,
                fragments_received,
            } => {
                if let Some(hook) = &mut self.on_fragment_received {
                    hook(
                        message_type,
                        message_id,
                        fragment_index,
                        fragment_count,
                        fragments_received,
                    );
                }
            }
            DecoderEvent::MessageComplete(message) => {
                if let Some(hook) = &mut self.on_message_complete {
                    hook(message);
                }
            }
            DecoderEvent::MessageIncomplete {
                message_type,
                message_id,
                fragments_received,
                fragment_count,
            } => {
                if let Some(hook) = &mut self.on_message_incomplete {
                    hook(message_type, message_id, fragments_received, fragment_count);
                }
            }
            DecoderEvent::Error(error) => {
                if let Some(hook) = &mut self.on_error {
                    hook(error);
                }
            }
        }
    }

    /// Drain `decoder`'s queue through the registered callbacks.
    ///
    /// Returns the number of events dispatched.
    pub fn pump(&mut self, decoder: &mut Decoder) -> usize {
        let mut dispatched = 0;
        while let Some(event) = decoder.pop_event() {
            self.dispatch(event);
            dispatched += 1;
        }
        dispatched
    }

    /// Accept `datagram` and immediately dispatch the resulting events.
    pub fn accept(&mut self, decoder: &mut Decoder, datagram: impl AsRef<[u8]>) -> bool {
        let accepted = decoder.accept(datagram);
        self.pump(decoder);
        accepted
    }
}

/// Type alias for the `on_fragment_produced` callback.
type FragmentProducedHook =
    Box<dyn FnMut(MessageType, MessageId, FragmentIndex, u16, usize) + Send + 'static>;

/// Type alias for the `on_message_encoded` callback.
type MessageEncodedHook = Box<dyn FnMut(EncodedSummary) + Send + 'static>;

/// Callbacks fed from an [`Encoder`]'s event queue.
#[derive(Default)]
pub struct EncoderHooks {
    /// Invoked with `(type, id, index, fragment_count, payload_len)`.
    pub on_fragment_produced: Option<FragmentProducedHook>,
    /// Invoked once per message after its last fragment.
    pub on_message_encoded: Option<MessageEncodedHook>,
}

impl EncoderHooks {
    /// Run the callback matching `event`, if registered.
    pub fn dispatch(&mut self, event: EncoderEvent) {
        match event {
            EncoderEvent::FragmentProduced {
                message_type,
                message_id,
                fragment_index,
                fragment_count,
                payload_len,
            } => {
                if let Some(hook) = &mut self.on_fragment_produced {
                    hook(
                        message_type,
                        message_id,
                        fragment_index,
                        fragment_count,
                        payload_len,
                    );
                }
            }
            EncoderEvent::MessageEncoded(summary) => {
                if let Some(hook) = &mut self.on_message_encoded {
                    hook(summary);
                }
            }
        }
    }

    /// Drain `encoder`'s queue through the registered callbacks.
    ///
    /// Returns the number of events dispatched.
    pub fn pump(&mut self, encoder: &mut Encoder) -> usize {
        let mut dispatched = 0;
        while let Some(event) = encoder.pop_event() {
            self.dispatch(event);
            dispatched += 1;
        }
        dispatched
    }
}
