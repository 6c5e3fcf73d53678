//! Per-type reassembly buffer owned by the decoder.
//!
//! Fragments are stored by index as they arrive, in any order. Storage grows
//! with what was actually received rather than what the first header
//! claimed, so a forged `fragment_count` does not reserve memory up front.

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};

use super::{FragmentIndex, MessageId};

/// Snapshot of an in-flight reassembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccumulatorStatus {
    pub message_id: MessageId,
    pub fragment_count: u16,
    pub fragments_received: usize,
    pub total_bytes: usize,
}

#[derive(Debug)]
pub(crate) struct Accumulator {
    message_id: MessageId,
    fragment_count: u16,
    fragments: HashMap<FragmentIndex, Bytes>,
    fragments_received: usize,
    total_bytes: usize,
}

impl Accumulator {
    pub(crate) fn new(message_id: MessageId, fragment_count: u16) -> Self {
        Self {
            message_id,
            fragment_count,
            fragments: HashMap::new(),
            fragments_received: 0,
            total_bytes: 0,
        }
    }

    pub(crate) const fn message_id(&self) -> MessageId { self.message_id }

    pub(crate) const fn fragment_count(&self) -> u16 { self.fragment_count }

    pub(crate) const fn fragments_received(&self) -> usize { self.fragments_received }

    pub(crate) const fn total_bytes(&self) -> usize { self.total_bytes }

    pub(crate) fn contains(&self, index: FragmentIndex) -> bool {
        self.fragments.contains_key(&index)
    }

    /// Copy `payload` into slot `index`. Callers reject duplicates first.
    pub(crate) fn store(&mut self, index: FragmentIndex, payload: &[u8]) {
        self.fragments.insert(index, Bytes::copy_from_slice(payload));
        self.fragments_received += 1;
        self.total_bytes += payload.len();
    }

    pub(crate) fn is_overfull(&self) -> bool {
        self.fragments_received > usize::from(self.fragment_count)
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.fragments_received == usize::from(self.fragment_count)
    }

    pub(crate) fn status(&self) -> AccumulatorStatus {
        AccumulatorStatus {
            message_id: self.message_id,
            fragment_count: self.fragment_count,
            fragments_received: self.fragments_received,
            total_bytes: self.total_bytes,
        }
    }

    /// Concatenate slots `0..fragment_count` in index order.
    ///
    /// Returns the first empty slot if any is missing.
    pub(crate) fn assemble(mut self) -> Result<Bytes, FragmentIndex> {
        if self.fragment_count == 1 {
            return self
                .fragments
                .remove(&FragmentIndex::zero())
                .ok_or(FragmentIndex::zero());
        }
        let mut buffer = BytesMut::with_capacity(self.total_bytes);
        for raw in 0..self.fragment_count {
            let index = FragmentIndex::new(raw);
            let Some(part) = self.fragments.get(&index) else {
                return Err(index);
            };
            buffer.extend_from_slice(part);
        }
        Ok(buffer.freeze())
    }
}
