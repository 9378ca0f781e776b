//! RPC endpoint testing utilities
//!
//! Probes every configured endpoint once with `getHealth`, bypassing the
//! retry loop, so misconfigured URLs show up before a long collection run.

use std::time::Instant;

use serde::Serialize;
use serde_json::json;

use super::client::RpcClient;
use crate::logger::{self, LogTag};

/// Outcome of one endpoint probe
#[derive(Debug, Clone, Serialize)]
pub struct EndpointProbeResult {
    pub url: String,
    pub success: bool,
    pub latency_ms: u64,
    pub error: Option<String>,
}

/// Probe all endpoints of the client's pool, in pool order
pub async fn probe_endpoints(client: &RpcClient) -> Vec<EndpointProbeResult> {
    let mut results = Vec::with_capacity(client.pool().len());

    for url in client.pool().endpoints() {
        logger::debug(LogTag::Rpc, &format!("Testing RPC endpoint: {}", url));

        let start = Instant::now();
        let outcome = client.send_once(url, "getHealth", &json!([])).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(_) => EndpointProbeResult {
                url: url.clone(),
                success: true,
                latency_ms,
                error: None,
            },
            Err(e) => EndpointProbeResult {
                url: url.clone(),
                success: false,
                latency_ms,
                error: Some(e.to_string()),
            },
        };

        if result.success {
            logger::info(LogTag::Rpc, &format!("✅ {} healthy ({}ms)", url, latency_ms));
        } else {
            logger::warning(
                LogTag::Rpc,
                &format!(
                    "❌ {} unhealthy: {}",
                    url,
                    result.error.as_deref().unwrap_or("unknown error")
                ),
            );
        }
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::backoff::BackoffPolicy;
    use crate::rpc::pool::EndpointPool;
    use crate::rpc::transport::mock::ScriptedTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_probe_reports_each_endpoint_without_retry() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_result(json!("ok")).push_raw(503, "down");
        let client = RpcClient::new(
            EndpointPool::new(vec!["https://a".to_string(), "https://b".to_string()]).unwrap(),
            transport.clone(),
            BackoffPolicy::default(),
        );

        let results = probe_endpoints(&client).await;
        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert!(results[1].error.as_deref().unwrap().contains("503"));
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(client.pool().current(), "https://a");
    }
}
