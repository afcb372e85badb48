//! Request issuers and pending handles
//!
//! An [`Issuer`] is the thing that actually performs a request. Issuing
//! returns a [`PendingHandle`] that completion handlers are attached to;
//! the handle fires them once the underlying future resolves.

use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;

use crate::models::Operation;

/// Handler invoked once with the output of a finished request
pub type CompletionHandler<O> = Box<dyn FnOnce(&O) + Send + 'static>;

/// Classifies a request output as success or failure.
///
/// The executor never branches on this; it only feeds the
/// succeeded/failed split of [`AggregateResult`](super::AggregateResult).
pub trait Outcome {
    fn is_failure(&self) -> bool;
}

impl<T, E> Outcome for Result<T, E> {
    fn is_failure(&self) -> bool {
        self.is_err()
    }
}

impl Outcome for () {
    fn is_failure(&self) -> bool {
        false
    }
}

/// Capability to issue an asynchronous request
pub trait Issuer: Send + Sync {
    /// Positional argument type passed through unmodified
    type Arg: Send + 'static;

    /// What a finished request resolves to
    type Output: Outcome + Send + 'static;

    /// Start `operation` with `args` and hand back its pending handle.
    ///
    /// Unsupported operations should resolve to a failed output rather
    /// than panic, so the batch still completes.
    fn issue(&self, operation: Operation, args: Vec<Self::Arg>) -> PendingHandle<Self::Output>;
}

/// An issued request that has not been driven to completion yet
pub struct PendingHandle<O> {
    future: BoxFuture<'static, O>,
    handlers: Vec<CompletionHandler<O>>,
}

impl<O: Send + 'static> PendingHandle<O> {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = O> + Send + 'static,
    {
        Self {
            future: future.boxed(),
            handlers: Vec::new(),
        }
    }

    /// A handle that is already complete
    pub fn ready(output: O) -> Self {
        Self::new(futures::future::ready(output))
    }

    /// Register a handler to run when the request finishes
    pub fn on_complete(mut self, handler: impl FnOnce(&O) + Send + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn on_complete_boxed(mut self, handler: CompletionHandler<O>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Drive the request, then fire every handler in registration order
    pub async fn wait(self) -> O {
        let output = self.future.await;
        for handler in self.handlers {
            handler(&output);
        }
        output
    }
}

impl<O> fmt::Debug for PendingHandle<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingHandle")
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_result_outcome() {
        let ok: Result<u8, String> = Ok(1);
        let err: Result<u8, String> = Err("boom".to_string());
        assert!(!ok.is_failure());
        assert!(err.is_failure());
        assert!(!().is_failure());
    }

    #[tokio::test]
    async fn test_handlers_fire_once_in_order() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let first = seen.clone();
        let second = seen.clone();

        let handle = PendingHandle::ready(7u32)
            .on_complete(move |v| first.lock().unwrap().push(*v))
            .on_complete(move |v| second.lock().unwrap().push(v * 2));
        assert_eq!(handle.handler_count(), 2);

        let output = handle.wait().await;
        assert_eq!(output, 7);
        assert_eq!(*seen.lock().unwrap(), vec![7, 14]);
    }

    #[tokio::test]
    async fn test_handler_waits_for_future() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();

        let handle = PendingHandle::new(async {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            "done"
        })
        .on_complete(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        handle.wait().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
