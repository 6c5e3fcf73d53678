#![doc(html_root_url = "https://docs.rs/dgramfrag/latest")]
//! Public API for the `dgramfrag` library.
//!
//! This crate splits byte payloads into bounded fragments for datagram
//! transports and reassembles them on the receiving side. It performs no
//! socket I/O, retransmission or encryption; hosts move the datagrams.

pub mod byte_order;
pub mod fragment;
pub mod message;
pub mod metrics;

pub use fragment::{
    CompletedMessage,
    Decoder,
    DecoderEvent,
    DecoderHooks,
    Disposition,
    EncodedSummary,
    Encoder,
    EncoderEvent,
    EncoderHooks,
    FragmentBatch,
    FragmentFrame,
    FragmentHeader,
    FragmentIndex,
    FragmentationConfig,
    FragmentationError,
    HEADER_LEN,
    IgnoreReason,
    MAGIC,
    MessageId,
    MessageType,
    MessageTypeSet,
    ReassemblyError,
};
pub use message::Message;
pub use metrics::{
    ERRORS_TOTAL,
    FRAGMENTS_ACCEPTED,
    FRAGMENTS_ENCODED,
    MESSAGES_ABANDONED,
    MESSAGES_COMPLETED,
};
