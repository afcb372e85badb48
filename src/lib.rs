//! Parallel request manager
//!
//! Queue HTTP requests, then run them all concurrently behind one call
//! that returns when every request has completed.
//!
//! ```no_run
//! use std::sync::Arc;
//! use parallel_manager::executor::ParallelManager;
//! use parallel_manager::http::{Endpoint, HttpClient, HttpOutcome};
//! use parallel_manager::models::Operation;
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = HttpClient::with_timeout(10)?;
//! let mut manager = ParallelManager::new();
//!
//! for url in ["https://example.com/a", "https://example.com/b"] {
//!     let endpoint = Arc::new(Endpoint::new(client.clone(), url));
//!     manager.add(endpoint, Operation::Get, vec![], |out: &HttpOutcome| {
//!         println!("{:?}", out.as_ref().map(|r| r.status_code));
//!     });
//! }
//!
//! let result = manager.run()?;
//! assert!(result.is_complete());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod executor;
pub mod http;
pub mod models;
pub mod output;
pub mod utils;
