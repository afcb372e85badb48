//! Parallel request manager
//!
//! Collects requests into a batch and runs the whole batch concurrently
//! behind a single blocking call. The manager can be reused: every run
//! takes the current batch and leaves an empty queue for the next one.

use std::sync::Arc;
use tracing::{debug, info};

use super::error::Result;
use super::issuer::{Issuer, Outcome};
use super::multi::{AggregateResult, Multi};
use super::queue::{BatchQueue, WorkItem};
use super::reactor::{Reactor, TokioReactor};
use crate::models::Operation;

/// Runs queued requests concurrently on a reactor
pub struct ParallelManager<A, O, R = TokioReactor> {
    queue: BatchQueue<A, O>,
    reactor: R,
}

impl<A, O> ParallelManager<A, O, TokioReactor>
where
    A: Send + 'static,
    O: Outcome + Send + 'static,
{
    pub fn new() -> Self {
        Self::with_reactor(TokioReactor::new())
    }
}

impl<A, O> Default for ParallelManager<A, O, TokioReactor>
where
    A: Send + 'static,
    O: Outcome + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, O, R> ParallelManager<A, O, R>
where
    A: Send + 'static,
    O: Outcome + Send + 'static,
    R: Reactor,
{
    pub fn with_reactor(reactor: R) -> Self {
        Self {
            queue: BatchQueue::new(),
            reactor,
        }
    }

    pub fn reactor(&self) -> &R {
        &self.reactor
    }

    /// Queue a request for the next run.
    ///
    /// Nothing is validated here; an issuer that cannot handle `operation`
    /// reports that through `on_complete` when the batch runs.
    pub fn add<T>(
        &mut self,
        target: Arc<T>,
        operation: Operation,
        args: Vec<A>,
        on_complete: impl FnOnce(&O) + Send + 'static,
    ) where
        T: Issuer<Arg = A, Output = O> + 'static,
    {
        self.queue
            .push(WorkItem::new(target, operation, args, Box::new(on_complete)));
    }

    /// Number of requests waiting for the next run
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Run the queued batch and block until every request has completed.
    ///
    /// Starts a reactor for the duration of the call when none is running
    /// on this thread; otherwise the batch runs on the active one. On the
    /// thread driving a current-thread runtime this fails with
    /// [`Unsuspendable`](super::ParallelError::Unsuspendable) and leaves the
    /// queue untouched, use [`run_async`](Self::run_async) there.
    ///
    /// A request whose handle never resolves makes this block forever.
    pub fn run(&mut self) -> Result<AggregateResult<O>> {
        if self.queue.is_empty() {
            debug!("Empty batch, nothing to run");
            return Ok(AggregateResult::empty());
        }

        let queue = &mut self.queue;
        self.reactor
            .ensure_running(async move { perform(queue.take()).await })
    }

    /// Run the queued batch on the current reactor.
    ///
    /// For callers that are already async; awaiting this is the one
    /// suspension point of a run.
    pub async fn run_async(&mut self) -> AggregateResult<O> {
        perform(self.queue.take()).await
    }
}

/// Dispatch every item in queue order, then wait for all of them
async fn perform<A, O>(batch: Vec<WorkItem<A, O>>) -> AggregateResult<O>
where
    A: Send + 'static,
    O: Outcome + Send + 'static,
{
    let mut multi = Multi::new();

    for item in batch {
        let operation = item.operation();
        let name = multi.next_name();
        debug!("Dispatching {} as {}", operation, name);
        multi.add(name, operation, item.dispatch());
    }

    let submitted = multi.len();
    let result = multi.perform().await;

    info!(
        "Batch of {} request(s) completed in {}ms - {} succeeded, {} failed",
        submitted,
        result.elapsed.as_millis(),
        result.success_count(),
        result.failure_count()
    );

    result
}
