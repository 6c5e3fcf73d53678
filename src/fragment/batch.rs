//! Cooperative bulk acceptance for decoders driven by an async runtime.
//!
//! These helpers call [`Decoder::accept`] for each datagram in the original
//! order and yield to the tokio scheduler every `yield_every` datagrams. The
//! resulting events are identical to calling `accept` in a loop; only the
//! scheduling differs.

use std::num::NonZeroUsize;

use futures::{Stream, StreamExt};
use tracing::debug;

use super::Decoder;

/// Default number of datagrams processed between yields.
pub const DEFAULT_YIELD_EVERY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(63);

/// Counts gathered while processing a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Datagrams stored towards a message.
    pub accepted: usize,
    /// Datagrams ignored or rejected.
    pub dropped: usize,
    /// Times control was handed back to the scheduler.
    pub yields: usize,
}

impl BatchSummary {
    /// Total datagrams seen.
    #[must_use]
    pub const fn total(&self) -> usize { self.accepted + self.dropped }

    async fn record(&mut self, accepted: bool, yield_every: NonZeroUsize) {
        if accepted {
            self.accepted += 1;
        } else {
            self.dropped += 1;
        }
        if self.total() % yield_every.get() == 0 {
            self.yields += 1;
            tokio::task::yield_now().await;
        }
    }
}

/// Accept every datagram from `datagrams`, yielding between groups.
pub async fn accept_batch<I>(
    decoder: &mut Decoder,
    datagrams: I,
    yield_every: NonZeroUsize,
) -> BatchSummary
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut summary = BatchSummary::default();
    for datagram in datagrams {
        let accepted = decoder.accept(datagram);
        summary.record(accepted, yield_every).await;
    }
    debug!(
        accepted = summary.accepted,
        dropped = summary.dropped,
        yields = summary.yields,
        "batch processed"
    );
    summary
}

/// Accept datagrams from `stream` until it ends, yielding between groups.
pub async fn accept_stream<S>(
    decoder: &mut Decoder,
    mut stream: S,
    yield_every: NonZeroUsize,
) -> BatchSummary
where
    S: Stream + Unpin,
    S::Item: AsRef<[u8]>,
{
    let mut summary = BatchSummary::default();
    while let Some(datagram) = stream.next().await {
        let accepted = decoder.accept(datagram);
        summary.record(accepted, yield_every).await;
    }
    debug!(
        accepted = summary.accepted,
        dropped = summary.dropped,
        yields = summary.yields,
        "stream drained"
    );
    summary
}
