//! Data models for request batches
//!
//! Plain data shared by the executor, the HTTP issuer and the CLI.

mod operation;
mod request;

pub use operation::Operation;
pub use request::{BatchFile, RequestOption, RequestSpec};

pub(crate) use request::is_yaml;
