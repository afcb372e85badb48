//! Batch reports
//!
//! Serializable view of an HTTP batch result, in submission order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::executor::AggregateResult;
use crate::http::HttpOutcome;
use crate::models::{Operation, RequestSpec};

/// One request line of a report
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestReport {
    pub name: String,
    pub label: String,
    pub method: Operation,
    pub url: String,
    pub status_code: Option<u16>,
    pub duration_ms: Option<u64>,
    pub error: Option<String>,
}

/// Report for a whole batch
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub requests: Vec<RequestReport>,
}

impl BatchReport {
    /// Pair each response with the spec it was queued from.
    ///
    /// `specs` must be in the order the requests were added.
    pub fn new(result: AggregateResult<HttpOutcome>, specs: &[RequestSpec]) -> Self {
        let started_at = result.started_at;
        let elapsed_ms = result.elapsed.as_millis() as u64;
        let total = result.submitted;
        let succeeded = result.success_count();
        let failed = result.failure_count();

        let requests = result
            .into_submission_order()
            .into_iter()
            .zip(specs)
            .map(|(response, spec)| {
                let (status_code, duration_ms, error) = match &response.output {
                    Ok(resp) => (Some(resp.status_code), Some(resp.duration_ms), None),
                    Err(e) => (None, None, Some(e.to_string())),
                };
                RequestReport {
                    label: spec.name.clone().unwrap_or_else(|| response.name.clone()),
                    name: response.name,
                    method: response.operation,
                    url: spec.url.clone(),
                    status_code,
                    duration_ms,
                    error,
                }
            })
            .collect();

        Self {
            started_at,
            elapsed_ms,
            total,
            succeeded,
            failed,
            requests,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{Multi, PendingHandle};
    use crate::http::{HttpError, HttpResponse};
    use std::collections::HashMap;

    fn ok(status: u16) -> HttpOutcome {
        Ok(HttpResponse {
            status_code: status,
            headers: HashMap::new(),
            body: String::new(),
            duration_ms: 4,
        })
    }

    #[tokio::test]
    async fn test_report_in_submission_order() {
        let specs = vec![
            RequestSpec::new(Operation::Get, "http://a/"),
            RequestSpec::new(Operation::Post, "http://b/"),
        ];

        let mut multi = Multi::new();
        multi.add(
            "req_0",
            Operation::Get,
            PendingHandle::new(async {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                ok(204)
            }),
        );
        multi.add(
            "req_1",
            Operation::Post,
            PendingHandle::ready(Err(HttpError::Timeout(1))),
        );

        let report = BatchReport::new(multi.perform().await, &specs);
        assert_eq!(report.total, 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.success_rate(), 50.0);

        assert_eq!(report.requests[0].name, "req_0");
        assert_eq!(report.requests[0].status_code, Some(204));
        assert_eq!(report.requests[1].url, "http://b/");
        assert_eq!(
            report.requests[1].error.as_deref(),
            Some("Timeout after 1 seconds")
        );
    }
}
