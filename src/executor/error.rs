//! Executor errors
//!
//! Only reactor lifecycle problems surface here. Per-request transport
//! failures never leave the request's own completion handler.

use thiserror::Error;

/// Errors returned by [`ParallelManager::run`](super::ParallelManager::run)
#[derive(Error, Debug)]
pub enum ParallelError {
    #[error("Failed to start reactor: {0}")]
    ReactorStart(#[source] std::io::Error),

    #[error("Cannot block inside a current-thread reactor; await `run_async` instead")]
    Unsuspendable,
}

pub type Result<T> = std::result::Result<T, ParallelError>;
