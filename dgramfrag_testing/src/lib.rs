//! Shared helpers for exercising `dgramfrag` encoders and decoders in tests.
//!
//! ```rust
//! use dgramfrag::fragment::{Decoder, Encoder};
//! use dgramfrag_testing::{datagrams_for, deliver, reorder};
//!
//! let mut encoder = Encoder::new(1);
//! let mut decoder = Decoder::new(1);
//! let datagrams = reorder(datagrams_for(&mut encoder, b"abc", 2), &[0]);
//! let outcome = deliver(&mut decoder, &datagrams);
//! assert_eq!(outcome.completed.len(), 1);
//! ```

pub mod datagram;
pub mod logging;

pub use datagram::{DeliveryOutcome, datagrams_for, deliver, raw_datagram, reorder};
pub use logging::{LoggerHandle, logger};
