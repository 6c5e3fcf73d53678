//! Datagram fragmentation and per-type reassembly.
//!
//! [`Encoder`] splits payloads into fragments carrying a fixed 12-byte
//! [`FragmentHeader`]; [`Decoder`] accepts those fragments in any order and
//! rebuilds the payloads, keeping one in-flight message per
//! [`MessageType`]. Each sub-module focuses on a single concept; the
//! public surface is re-exported here.

mod accumulator;
pub mod batch;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod event;
pub mod header;
pub mod hooks;
pub mod id;
pub mod index;
pub mod message_type;

pub use accumulator::AccumulatorStatus;
pub use batch::{BatchSummary, DEFAULT_YIELD_EVERY, accept_batch, accept_stream};
pub use config::{DEFAULT_MAX_PAYLOAD_SIZE, FragmentationConfig};
pub use decoder::Decoder;
pub use encoder::{Encoder, FragmentBatch, FragmentFrame, Fragments};
pub use error::{
    Disposition,
    FragmentationError,
    HeaderError,
    IgnoreReason,
    InvalidMessageType,
    ReassemblyError,
};
pub use event::{CompletedMessage, DecoderEvent, EncodedSummary, EncoderEvent};
pub use header::{FragmentHeader, HEADER_LEN, MAGIC, PROTOCOL_VERSION, has_magic};
pub use hooks::{DecoderHooks, EncoderHooks};
pub use id::MessageId;
pub use index::FragmentIndex;
pub use message_type::{MessageType, MessageTypeSet};

#[cfg(test)]
mod tests;
