//! Batch session state

use crate::core::archive::{Archive, Package};
use crate::core::client::RenderOutcome;
use crate::utils::error::Result;
use futures::Stream;
use futures::ready;
use serde::Serialize;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Downstream consumer of settled outcomes, e.g. a display grid
pub trait OutcomeSink {
    fn accept(&mut self, outcome: &RenderOutcome);
}

impl OutcomeSink for Vec<RenderOutcome> {
    fn accept(&mut self, outcome: &RenderOutcome) {
        self.push(outcome.clone());
    }
}

impl<F> OutcomeSink for F
where
    F: FnMut(&RenderOutcome),
{
    fn accept(&mut self, outcome: &RenderOutcome) {
        self(outcome)
    }
}

/// Counts for a batch at the time it was summarized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Tiles dispatched
    pub total: usize,
    /// Tiles rendered
    pub succeeded: usize,
    /// Tiles that failed
    pub failed: usize,
    /// Time since submit
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl BatchSummary {
    /// Tiles not yet settled
    pub fn pending(&self) -> usize {
        self.total - self.succeeded - self.failed
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

/// One submitted batch, owned by whoever called `submit`
///
/// The archive belongs to the session; a new submit means a new session, so
/// results of an older batch can never reach a newer batch's archive.
#[derive(Debug)]
pub struct BatchSession {
    id: Uuid,
    dispatched: usize,
    succeeded: usize,
    failed: usize,
    started: Instant,
    receiver: mpsc::UnboundedReceiver<RenderOutcome>,
    archive: Archive,
}

impl BatchSession {
    pub(super) fn new(
        id: Uuid,
        dispatched: usize,
        receiver: mpsc::UnboundedReceiver<RenderOutcome>,
        archive: Archive,
    ) -> Self {
        Self {
            id,
            dispatched,
            succeeded: 0,
            failed: 0,
            started: Instant::now(),
            receiver,
            archive,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn settled(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn pending(&self) -> usize {
        self.dispatched - self.settled()
    }

    /// Every dispatched tile has settled
    pub fn is_complete(&self) -> bool {
        self.settled() == self.dispatched
    }

    /// Wait for the next tile to settle.
    ///
    /// A success is added to the session archive before it is returned.
    /// Returns `None` once every dispatched tile has been seen.
    pub async fn next_outcome(&mut self) -> Option<RenderOutcome> {
        std::future::poll_fn(|cx| self.poll_outcome(cx)).await
    }

    fn poll_outcome(&mut self, cx: &mut Context<'_>) -> Poll<Option<RenderOutcome>> {
        if self.is_complete() {
            return Poll::Ready(None);
        }

        match ready!(self.receiver.poll_recv(cx)) {
            Some(outcome) => Poll::Ready(Some(self.settle(outcome))),
            None => {
                // Only reachable if a render task panicked.
                warn!(
                    batch_id = %self.id,
                    pending = self.pending(),
                    "Render tasks ended without settling"
                );
                Poll::Ready(None)
            }
        }
    }

    fn settle(&mut self, outcome: RenderOutcome) -> RenderOutcome {
        match &outcome {
            RenderOutcome::Success { identity, blob } => {
                self.succeeded += 1;
                self.archive.add(identity, blob.clone());
            }
            RenderOutcome::Failure { identity, error } => {
                self.failed += 1;
                warn!(batch_id = %self.id, tile = %identity, %error, "Tile failed");
            }
        }

        if self.is_complete() {
            info!(
                batch_id = %self.id,
                succeeded = self.succeeded,
                failed = self.failed,
                elapsed_ms = self.started.elapsed().as_millis() as u64,
                "Batch settled"
            );
        }

        outcome
    }

    /// Feed every remaining outcome to `sink` as it settles
    pub async fn drain<S>(&mut self, sink: &mut S) -> BatchSummary
    where
        S: OutcomeSink + ?Sized,
    {
        while let Some(outcome) = self.next_outcome().await {
            sink.accept(&outcome);
        }
        self.summary()
    }

    /// Wait for every tile and return the outcomes in settlement order
    pub async fn collect(&mut self) -> Vec<RenderOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending());
        self.drain(&mut outcomes).await;
        outcomes
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.dispatched,
            succeeded: self.succeeded,
            failed: self.failed,
            duration: self.started.elapsed(),
        }
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Package the successes seen so far; may be called any number of times
    pub async fn finalize(&self) -> Result<Package> {
        self.archive.finalize().await
    }

    pub fn into_archive(self) -> Archive {
        self.archive
    }
}

/// Outcomes in settlement order, with the same archive routing as
/// [`BatchSession::next_outcome`]
impl Stream for BatchSession {
    type Item = RenderOutcome;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_outcome(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.pending()))
    }
}
