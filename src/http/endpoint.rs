//! Request issuer for a single URL
//!
//! An [`Endpoint`] pairs a shared [`HttpClient`] with a target URL. The
//! queued operation picks the HTTP method and the queued options are
//! applied to the request in order.

use crate::executor::{Issuer, PendingHandle};
use crate::models::{Operation, RequestOption};

use super::client::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Result delivered to completion handlers for HTTP requests
pub type HttpOutcome = Result<HttpResponse, HttpError>;

#[derive(Clone, Debug)]
pub struct Endpoint {
    client: HttpClient,
    url: String,
}

impl Endpoint {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build the request that `issue` would send
    pub fn request(&self, operation: Operation, args: Vec<RequestOption>) -> HttpRequest {
        args.into_iter()
            .fold(HttpRequest::new(operation.as_str(), &self.url), |req, opt| {
                req.option(opt)
            })
    }
}

impl Issuer for Endpoint {
    type Arg = RequestOption;
    type Output = HttpOutcome;

    fn issue(&self, operation: Operation, args: Vec<RequestOption>) -> PendingHandle<HttpOutcome> {
        let request = self.request(operation, args);
        let client = self.client.clone();
        PendingHandle::new(async move { client.send(request).await })
    }
}
