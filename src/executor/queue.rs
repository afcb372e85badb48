//! Batch queue
//!
//! Work items accumulate here between runs. A run takes the whole queue
//! at once and leaves a fresh empty one behind.

use std::fmt;
use std::sync::Arc;

use super::issuer::{CompletionHandler, Issuer, Outcome, PendingHandle};
use crate::models::Operation;

/// Issuer trait object stored in the queue
pub type Target<A, O> = Arc<dyn Issuer<Arg = A, Output = O>>;

/// One deferred request
pub struct WorkItem<A, O> {
    target: Target<A, O>,
    operation: Operation,
    args: Vec<A>,
    on_complete: CompletionHandler<O>,
}

impl<A, O> WorkItem<A, O>
where
    A: Send + 'static,
    O: Outcome + Send + 'static,
{
    pub fn new(
        target: Target<A, O>,
        operation: Operation,
        args: Vec<A>,
        on_complete: CompletionHandler<O>,
    ) -> Self {
        Self {
            target,
            operation,
            args,
            on_complete,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn args(&self) -> &[A] {
        &self.args
    }

    /// Issue the request and attach the completion handler
    pub fn dispatch(self) -> PendingHandle<O> {
        self.target
            .issue(self.operation, self.args)
            .on_complete_boxed(self.on_complete)
    }
}

impl<A, O> fmt::Debug for WorkItem<A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkItem")
            .field("operation", &self.operation)
            .field("args", &self.args.len())
            .finish_non_exhaustive()
    }
}

/// FIFO of work items waiting for the next run
pub struct BatchQueue<A, O> {
    items: Vec<WorkItem<A, O>>,
}

impl<A, O> BatchQueue<A, O> {
    /// Empty queue; allocates on first push
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: WorkItem<A, O>) {
        self.items.push(item);
    }

    /// Take every queued item, leaving the queue empty
    pub fn take(&mut self) -> Vec<WorkItem<A, O>> {
        std::mem::take(&mut self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkItem<A, O>> {
        self.items.iter()
    }
}

impl<A, O> Default for BatchQueue<A, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, O> fmt::Debug for BatchQueue<A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Issuer for Echo {
        type Arg = u32;
        type Output = Result<u32, String>;

        fn issue(&self, _operation: Operation, args: Vec<u32>) -> PendingHandle<Self::Output> {
            PendingHandle::ready(Ok(args.iter().sum()))
        }
    }

    fn item(operation: Operation, args: Vec<u32>) -> WorkItem<u32, Result<u32, String>> {
        WorkItem::new(
            Arc::new(Echo),
            operation,
            args,
            Box::new(|_: &Result<u32, String>| {}),
        )
    }

    #[test]
    fn test_queue_preserves_insertion_order() {
        let mut queue = BatchQueue::new();
        assert!(queue.is_empty());

        queue.push(item(Operation::Get, vec![1]));
        queue.push(item(Operation::Post, vec![2, 3]));
        queue.push(item(Operation::Delete, vec![]));
        assert_eq!(queue.len(), 3);

        let ops: Vec<_> = queue.iter().map(|i| i.operation()).collect();
        assert_eq!(ops, vec![Operation::Get, Operation::Post, Operation::Delete]);
    }

    #[test]
    fn test_take_leaves_empty_queue() {
        let mut queue = BatchQueue::new();
        queue.push(item(Operation::Get, vec![1]));
        queue.push(item(Operation::Get, vec![2]));

        let batch = queue.take();
        assert_eq!(batch.len(), 2);
        assert!(queue.is_empty());

        queue.push(item(Operation::Put, vec![3]));
        assert_eq!(queue.len(), 1);
        assert_eq!(batch[1].args(), &[2]);
    }

    #[tokio::test]
    async fn test_dispatch_passes_args_through() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let slot = seen.clone();
        let work: WorkItem<u32, Result<u32, String>> = WorkItem::new(
            Arc::new(Echo),
            Operation::Post,
            vec![4, 5],
            Box::new(move |out: &Result<u32, String>| {
                *slot.lock().unwrap() = Some(out.clone());
            }),
        );

        let output = work.dispatch().wait().await;
        assert_eq!(output, Ok(9));
        assert_eq!(*seen.lock().unwrap(), Some(Ok(9)));
    }
}
