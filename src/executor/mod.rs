//! Parallel request execution
//!
//! Queue requests against any [`Issuer`], then run the whole batch
//! concurrently from synchronous or async code.

mod error;
mod issuer;
mod multi;
mod parallel;
mod queue;
mod reactor;

pub use error::{ParallelError, Result};
pub use issuer::{CompletionHandler, Issuer, Outcome, PendingHandle};
pub use multi::{AggregateResult, Multi, Response};
pub use parallel::ParallelManager;
pub use queue::{BatchQueue, Target, WorkItem};
pub use reactor::{Reactor, TokioReactor};
