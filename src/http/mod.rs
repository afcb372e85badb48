//! HTTP issuer
//!
//! Concrete transport for the executor: a reqwest-backed client and the
//! per-URL [`Endpoint`] issuer that queued requests target.

mod client;
mod endpoint;

pub use client::{HttpClient, HttpError, HttpRequest, HttpResponse};
pub use endpoint::{Endpoint, HttpOutcome};
