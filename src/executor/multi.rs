//! Completion aggregation
//!
//! [`Multi`] registers pending handles under generated names and resolves
//! once every one of them has completed, in whatever order they finish.
//! Each handle is driven as its own task on the current runtime, so a
//! completion handler that blocks only holds up its own request.

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt};
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{trace, warn};

use super::issuer::{Outcome, PendingHandle};
use crate::models::Operation;
use crate::utils::timer::Timer;

/// A completed request inside an aggregate
#[derive(Debug)]
pub struct Response<O> {
    /// Generated name, `req_<n>` in submission order
    pub name: String,
    pub operation: Operation,
    pub output: O,
    pub failed: bool,
}

/// Waits on many pending handles at once
pub struct Multi<O> {
    pending: Vec<BoxFuture<'static, Response<O>>>,
    submitted: usize,
    started_at: DateTime<Utc>,
    timer: Timer,
}

impl<O: Outcome + Send + 'static> Multi<O> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            submitted: 0,
            started_at: Utc::now(),
            timer: Timer::start("batch"),
        }
    }

    /// Name for the next registered handle
    pub fn next_name(&self) -> String {
        format!("req_{}", self.submitted)
    }

    /// Register a handle. Nothing is polled until [`perform`](Self::perform).
    pub fn add(&mut self, name: impl Into<String>, operation: Operation, handle: PendingHandle<O>) {
        let name = name.into();
        self.submitted += 1;
        self.pending.push(
            async move {
                let output = handle.wait().await;
                let failed = output.is_failure();
                Response {
                    name,
                    operation,
                    output,
                    failed,
                }
            }
            .boxed(),
        );
    }

    /// Number of handles registered so far
    pub fn len(&self) -> usize {
        self.submitted
    }

    pub fn is_empty(&self) -> bool {
        self.submitted == 0
    }

    /// Spawn every registered handle and wait until none is outstanding.
    ///
    /// Must be awaited inside a tokio runtime. A handle that never resolves
    /// keeps this future pending forever; dropping the future aborts the
    /// handles still in flight. A panicking completion handler is resumed
    /// here once its task has been joined.
    pub async fn perform(self) -> AggregateResult<O> {
        let mut tasks = JoinSet::new();
        for pending in self.pending {
            tasks.spawn(pending);
        }

        let mut responses = Vec::with_capacity(self.submitted);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(response) => {
                    trace!(
                        "{} {} completed ({} outstanding)",
                        response.name,
                        response.operation,
                        tasks.len()
                    );
                    responses.push(response);
                }
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(err) => warn!("Request task cancelled: {}", err),
            }
        }

        AggregateResult {
            submitted: self.submitted,
            responses,
            started_at: self.started_at,
            elapsed: self.timer.stop(),
        }
    }
}

impl<O: Outcome + Send + 'static> Default for Multi<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one batch run
#[derive(Debug)]
pub struct AggregateResult<O> {
    pub submitted: usize,
    /// Responses in completion order
    pub responses: Vec<Response<O>>,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl<O> AggregateResult<O> {
    /// Aggregate of a batch with nothing in it
    pub fn empty() -> Self {
        Self {
            submitted: 0,
            responses: Vec::new(),
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Every submitted request has reported back
    pub fn is_complete(&self) -> bool {
        self.responses.len() == self.submitted
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &Response<O>> {
        self.responses.iter().filter(|r| !r.failed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &Response<O>> {
        self.responses.iter().filter(|r| r.failed)
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    pub fn get(&self, name: &str) -> Option<&Response<O>> {
        self.responses.iter().find(|r| r.name == name)
    }

    /// Names in the order requests finished
    pub fn completion_order(&self) -> Vec<&str> {
        self.responses.iter().map(|r| r.name.as_str()).collect()
    }

    /// Responses re-sorted into submission order
    pub fn into_submission_order(mut self) -> Vec<Response<O>> {
        self.responses.sort_by_key(|r| request_index(&r.name));
        self.responses
    }
}

fn request_index(name: &str) -> usize {
    name.strip_prefix("req_")
        .and_then(|n| n.parse().ok())
        .unwrap_or(usize::MAX)
}
