//! Request descriptors
//!
//! Plain data describing the requests a batch is built from: the options
//! passed through to an issuer, and the on-disk batch file format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::Operation;

/// One positional argument handed to an HTTP issuer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOption {
    Header(String, String),
    Query(String, String),
    Body(String),
    Json(serde_json::Value),
}

impl fmt::Display for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOption::Header(k, v) => write!(f, "header {k}: {v}"),
            RequestOption::Query(k, v) => write!(f, "query {k}={v}"),
            RequestOption::Body(b) => write!(f, "body ({} bytes)", b.len()),
            RequestOption::Json(_) => write!(f, "json body"),
        }
    }
}

/// A single request entry in a batch file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Optional label used in output instead of the generated name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_method")]
    pub method: Operation,

    pub url: String,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub query: BTreeMap<String, String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub json: Option<serde_json::Value>,
}

fn default_method() -> Operation {
    Operation::Get
}

impl RequestSpec {
    pub fn new(method: Operation, url: impl Into<String>) -> Self {
        Self {
            name: None,
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            query: BTreeMap::new(),
            body: None,
            json: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Flatten into the ordered argument list an issuer receives.
    ///
    /// Headers come first, then query pairs, then the body. A JSON body wins
    /// over a raw one when both are set.
    pub fn options(&self) -> Vec<RequestOption> {
        let mut options: Vec<RequestOption> = self
            .headers
            .iter()
            .map(|(k, v)| RequestOption::Header(k.clone(), v.clone()))
            .collect();

        options.extend(
            self.query
                .iter()
                .map(|(k, v)| RequestOption::Query(k.clone(), v.clone())),
        );

        if let Some(json) = &self.json {
            options.push(RequestOption::Json(json.clone()));
        } else if let Some(body) = &self.body {
            options.push(RequestOption::Body(body.clone()));
        }

        options
    }
}

/// A batch of requests loaded from YAML or JSON
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub requests: Vec<RequestSpec>,
}

impl BatchFile {
    /// Load a batch file; `.yaml`/`.yml` parse as YAML, anything else as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file {}", path.display()))?;

        let batch: Self = if is_yaml(path) {
            serde_yaml::from_str(&content).context("Failed to parse YAML batch file")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON batch file")?
        };

        Ok(batch)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
