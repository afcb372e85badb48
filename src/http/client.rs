//! HTTP client
//!
//! Thin wrapper over reqwest used as the transport behind [`Endpoint`](super::Endpoint).

use reqwest::{
    header::CONTENT_TYPE,
    Client, Method,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;
use crate::models::RequestOption;

/// HTTP client errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build client: {0}")]
    Client(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// HTTP client shared by every endpoint of a batch
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a new HTTP client with a 30 second timeout
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(30)
    }

    /// Create client with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        Self::build(timeout_secs, None)
    }

    /// Create client from application config
    pub fn from_config(config: &AppConfig) -> Result<Self, HttpError> {
        Self::build(config.timeout_secs, Some(&config.user_agent))
    }

    fn build(timeout_secs: u64, user_agent: Option<&str>) -> Result<Self, HttpError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(true);

        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Send HTTP request
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = request.url.clone();
        debug!("Sending {} request to {}", request.method, url);

        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| HttpError::RequestFailed(format!("invalid method {}", request.method)))?;

        let parsed =
            reqwest::Url::parse(&url).map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;

        let mut req_builder = self.client.request(method, parsed);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let start = Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                HttpError::ConnectionRefused(url.clone())
            } else {
                HttpError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();

        let mut response_headers = HashMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;

        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers: response_headers,
            body,
            duration_ms,
        })
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Apply one passed-through request option
    pub fn option(self, option: RequestOption) -> Self {
        match option {
            RequestOption::Header(k, v) => self.header(k, v),
            RequestOption::Query(k, v) => self.query(k, v),
            RequestOption::Body(b) => self.body(b),
            RequestOption::Json(value) => self
                .header(CONTENT_TYPE.as_str(), "application/json")
                .body(value.to_string()),
        }
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_builder() {
        let req = HttpRequest::get("http://example.com")
            .header("Host", "example.com")
            .header("X-Custom", "value")
            .query("page", "1");

        assert_eq!(req.method, "GET");
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.query, vec![("page".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_json_option_sets_content_type() {
        let req = HttpRequest::new("POST", "http://example.com")
            .option(RequestOption::Json(serde_json::json!({"id": 3})));

        assert_eq!(
            req.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"id":3}"#));
    }

    #[test]
    fn test_http_response() {
        let resp = HttpResponse {
            status_code: 200,
            headers: HashMap::new(),
            body: "Hello World".to_string(),
            duration_ms: 100,
        };

        assert!(resp.is_success());
        assert!(!HttpResponse {
            status_code: 503,
            ..resp
        }
        .is_success());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = HttpClient::new().unwrap();
        let err = client.send(HttpRequest::get("not a url")).await.unwrap_err();
        assert!(matches!(err, HttpError::InvalidUrl(_)));
    }
}
