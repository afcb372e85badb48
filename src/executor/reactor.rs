//! Reactor bridging
//!
//! A [`Reactor`] drives a future to completion from synchronous code. It
//! either starts a reactor for the duration of the call, or parks the
//! caller and drives the future on the reactor that is already running.

use std::future::Future;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tracing::{debug, trace};

use super::error::{ParallelError, Result};

/// Scheduler capability used by [`ParallelManager`](super::ParallelManager)
pub trait Reactor: Send + Sync {
    /// Whether a reactor is already driving the calling thread
    fn is_active(&self) -> bool;

    /// Start a reactor, run `body` until it finishes, then stop the reactor
    fn start_and_run<F: Future>(&self, body: F) -> Result<F::Output>;

    /// Run `body` on the reactor that is already active, suspending the
    /// caller until it finishes
    fn run_on_active<F: Future>(&self, body: F) -> Result<F::Output>;

    /// Run `body` on whichever reactor is appropriate, never starting a
    /// second one
    fn ensure_running<F: Future>(&self, body: F) -> Result<F::Output> {
        if self.is_active() {
            trace!("Reactor already active, reusing it");
            self.run_on_active(body)
        } else {
            self.start_and_run(body)
        }
    }
}

impl<R: Reactor> Reactor for Arc<R> {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn start_and_run<F: Future>(&self, body: F) -> Result<F::Output> {
        (**self).start_and_run(body)
    }

    fn run_on_active<F: Future>(&self, body: F) -> Result<F::Output> {
        (**self).run_on_active(body)
    }
}

/// Reactor backed by the tokio runtime
#[derive(Clone, Debug)]
pub struct TokioReactor {
    worker_threads: usize,
}

impl TokioReactor {
    pub fn new() -> Self {
        Self { worker_threads: 1 }
    }

    /// Worker threads for reactors this instance starts (minimum 1)
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.max(1);
        self
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }
}

impl Default for TokioReactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reactor for TokioReactor {
    fn is_active(&self) -> bool {
        Handle::try_current().is_ok()
    }

    fn start_and_run<F: Future>(&self, body: F) -> Result<F::Output> {
        // Multi-thread so that a nested synchronous run can park this
        // thread with `block_in_place`.
        let runtime = Builder::new_multi_thread()
            .worker_threads(self.worker_threads)
            .thread_name("parallel-manager")
            .enable_all()
            .build()
            .map_err(ParallelError::ReactorStart)?;

        debug!(
            "Started reactor with {} worker thread(s)",
            self.worker_threads
        );

        let output = runtime.block_on(body);
        drop(runtime);

        debug!("Stopped reactor");
        Ok(output)
    }

    fn run_on_active<F: Future>(&self, body: F) -> Result<F::Output> {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => return self.start_and_run(body),
        };

        match handle.runtime_flavor() {
            RuntimeFlavor::CurrentThread if drives_scheduler() => {
                Err(ParallelError::Unsuspendable)
            }
            RuntimeFlavor::CurrentThread => Ok(handle.block_on(body)),
            _ => Ok(tokio::task::block_in_place(|| handle.block_on(body))),
        }
    }
}

/// Whether the calling thread is the one driving a tokio scheduler.
///
/// `yield_now` hands its waker to the scheduler running on this thread and
/// wakes it immediately when there is none, e.g. on a `spawn_blocking`
/// thread that only carries the runtime handle.
fn drives_scheduler() -> bool {
    let flag = Arc::new(WakeFlag::default());
    let waker = Waker::from(flag.clone());
    let mut cx = Context::from_waker(&waker);

    match pin!(tokio::task::yield_now()).poll(&mut cx) {
        Poll::Ready(()) => false,
        Poll::Pending => !flag.0.load(Ordering::SeqCst),
    }
}

#[derive(Default)]
struct WakeFlag(AtomicBool);

impl Wake for WakeFlag {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_not_active_outside_runtime() {
        assert!(!TokioReactor::new().is_active());
    }

    #[test]
    fn test_start_and_run_returns_output() {
        let reactor = TokioReactor::new();
        let output = reactor
            .start_and_run(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                42
            })
            .unwrap();
        assert_eq!(output, 42);
        assert!(!reactor.is_active());
    }

    #[test]
    fn test_worker_threads_minimum() {
        let reactor = TokioReactor::new().with_worker_threads(0);
        assert_eq!(reactor.worker_threads(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run_on_active_multi_thread() {
        let reactor = TokioReactor::new();
        assert!(reactor.is_active());

        let output = reactor.ensure_running(async { "joined" }).unwrap();
        assert_eq!(output, "joined");
    }

    #[tokio::test]
    async fn test_run_on_active_current_thread_is_rejected() {
        let reactor = TokioReactor::new();
        let result = reactor.ensure_running(async {});
        assert!(matches!(result, Err(ParallelError::Unsuspendable)));
    }

    #[tokio::test]
    async fn test_run_on_active_from_blocking_thread_of_current_thread_runtime() {
        let output = tokio::task::spawn_blocking(|| {
            let reactor = TokioReactor::new();
            assert!(reactor.is_active());
            reactor.ensure_running(async {
                tokio::time::sleep(Duration::from_millis(2)).await;
                "blocked"
            })
        })
        .await
        .unwrap();
        assert_eq!(output.unwrap(), "blocked");
    }

    #[test]
    fn test_block_on_harness_is_current_thread() {
        let result =
            tokio_test::block_on(async { TokioReactor::new().ensure_running(async { 1 }) });
        tokio_test::assert_err!(result);
    }

    #[test]
    fn test_nested_ensure_running() {
        let reactor = TokioReactor::new();
        let output = reactor
            .start_and_run(async {
                let inner = TokioReactor::new();
                inner.ensure_running(async { 7 }).unwrap()
            })
            .unwrap();
        assert_eq!(output, 7);
    }
}
