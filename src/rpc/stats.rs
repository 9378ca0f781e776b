//! Per-endpoint call statistics
//!
//! Every HTTP exchange made by the client is recorded here, retries included.
//! The pipeline prints a summary at the end of a run.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

use super::types::RpcError;
use crate::logger::{self, LogTag};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EndpointStats {
    pub url: String,
    pub requests: u64,
    pub successes: u64,
    pub retryable_failures: u64,
    pub fatal_failures: u64,
    pub rate_limited: u64,
    pub total_latency_ms: u64,
}

impl EndpointStats {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn avg_latency_ms(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.requests as f64
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.successes as f64 / self.requests as f64 * 100.0
        }
    }
}

#[derive(Debug, Default)]
pub struct RpcStats {
    endpoints: Mutex<HashMap<String, EndpointStats>>,
}

impl RpcStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<T>(&self, endpoint: &str, outcome: &Result<T, RpcError>, latency: Duration) {
        let Ok(mut endpoints) = self.endpoints.lock() else {
            return;
        };
        let entry = endpoints
            .entry(endpoint.to_string())
            .or_insert_with(|| EndpointStats::new(endpoint));

        entry.requests += 1;
        entry.total_latency_ms += latency.as_millis() as u64;
        match outcome {
            Ok(_) => entry.successes += 1,
            Err(e) => {
                if e.is_retryable() {
                    entry.retryable_failures += 1;
                } else {
                    entry.fatal_failures += 1;
                }
                if e.is_rate_limit() {
                    entry.rate_limited += 1;
                }
            }
        }
    }

    /// Snapshot sorted by endpoint URL
    pub fn snapshot(&self) -> Vec<EndpointStats> {
        let mut stats: Vec<EndpointStats> = match self.endpoints.lock() {
            Ok(endpoints) => endpoints.values().cloned().collect(),
            Err(_) => Vec::new(),
        };
        stats.sort_by(|a, b| a.url.cmp(&b.url));
        stats
    }

    pub fn total_requests(&self) -> u64 {
        self.snapshot().iter().map(|s| s.requests).sum()
    }

    pub fn log_summary(&self) {
        let stats = self.snapshot();
        if stats.is_empty() {
            logger::info(LogTag::Rpc, "No RPC calls were made");
            return;
        }
        for s in stats {
            logger::info(
                LogTag::Rpc,
                &format!(
                    "{}: {} requests, {:.1}% ok, {} retried, {} fatal, {} rate limited, avg {:.0}ms",
                    s.url,
                    s.requests,
                    s.success_rate(),
                    s.retryable_failures,
                    s.fatal_failures,
                    s.rate_limited,
                    s.avg_latency_ms()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let stats = RpcStats::new();
        let ok: Result<(), RpcError> = Ok(());
        let limited: Result<(), RpcError> = Err(RpcError::Http {
            endpoint: "a".to_string(),
            status: 429,
            body: String::new(),
        });
        let fatal: Result<(), RpcError> = Err(RpcError::malformed("a", "not json", ""));

        stats.record("a", &ok, Duration::from_millis(10));
        stats.record("a", &limited, Duration::from_millis(30));
        stats.record("a", &fatal, Duration::from_millis(20));
        stats.record("b", &ok, Duration::from_millis(5));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.len(), 2);
        let a = &snapshot[0];
        assert_eq!(a.url, "a");
        assert_eq!(a.requests, 3);
        assert_eq!(a.successes, 1);
        assert_eq!(a.retryable_failures, 1);
        assert_eq!(a.fatal_failures, 1);
        assert_eq!(a.rate_limited, 1);
        assert!((a.avg_latency_ms() - 20.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_requests(), 4);
    }
}
