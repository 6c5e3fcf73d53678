//! Configuration shared by encoders and decoders.
//!
//! Neither value is negotiated on the wire; both ends must agree on
//! `max_payload_size` out of band.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use super::HEADER_LEN;

/// Default cap on payload bytes carried by one fragment. Sized to keep a
/// fragment plus UDP/IP headers below common path MTUs.
pub const DEFAULT_MAX_PAYLOAD_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(1199);

/// Settings that bound fragment sizes and reassembly resource usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentationConfig {
    /// Maximum number of payload bytes carried by a single fragment,
    /// excluding the [`HEADER_LEN`]-byte header.
    pub max_payload_size: NonZeroUsize,
    /// Optional cap on payload bytes buffered for one in-flight message.
    ///
    /// `None` trusts the sender, matching a cooperative deployment.
    pub max_in_flight_bytes: Option<NonZeroUsize>,
}

impl Default for FragmentationConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            max_in_flight_bytes: None,
        }
    }
}

impl FragmentationConfig {
    /// Configuration with the given per-fragment payload cap.
    #[must_use]
    pub const fn with_max_payload_size(max_payload_size: NonZeroUsize) -> Self {
        Self {
            max_payload_size,
            max_in_flight_bytes: None,
        }
    }

    /// Derive the payload cap from the largest datagram the transport will
    /// carry.
    ///
    /// Returns `None` when `datagram_budget` cannot hold a header plus at
    /// least one payload byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use dgramfrag::fragment::FragmentationConfig;
    /// let config = FragmentationConfig::for_datagram_budget(1212).expect("budget fits header");
    /// assert_eq!(config.max_payload_size.get(), 1200);
    /// assert!(FragmentationConfig::for_datagram_budget(12).is_none());
    /// ```
    #[must_use]
    pub fn for_datagram_budget(datagram_budget: usize) -> Option<Self> {
        let available = datagram_budget.checked_sub(HEADER_LEN)?;
        NonZeroUsize::new(available).map(Self::with_max_payload_size)
    }

    /// Cap the bytes buffered for a single in-flight message.
    #[must_use]
    pub const fn in_flight_limit(mut self, limit: NonZeroUsize) -> Self {
        self.max_in_flight_bytes = Some(limit);
        self
    }

    /// Largest encoded fragment, header included.
    #[must_use]
    pub const fn max_datagram_len(&self) -> usize {
        self.max_payload_size.get().saturating_add(HEADER_LEN)
    }

    /// Largest payload that fits in `u16::MAX` fragments.
    #[must_use]
    pub const fn max_message_len(&self) -> usize {
        self.max_payload_size.get().saturating_mul(u16::MAX as usize)
    }
}
