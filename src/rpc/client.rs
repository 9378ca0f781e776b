//! JSON-RPC client with endpoint rotation and exponential backoff
//!
//! `call` loops until it gets a result or a non-retryable error. Each retryable
//! failure rotates the pool exactly once and sleeps
//! `min(max_backoff, base_delay * 2^attempt)`. There is no attempt ceiling;
//! the collectors' time budget is what ends a run that keeps failing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};

use super::backoff::BackoffPolicy;
use super::pool::EndpointPool;
use super::stats::RpcStats;
use super::transport::{HttpTransport, RpcTransport};
use super::types::{truncate_body, RawResponse, RpcError, RpcErrorObject};
use crate::config::Settings;
use crate::errors::SwapScopeError;
use crate::logger::{self, LogTag};

/// Warn on the first retry of a call and then every this many attempts
const RETRY_WARN_EVERY: u32 = 5;

pub struct RpcClient {
    pool: EndpointPool,
    transport: Arc<dyn RpcTransport>,
    backoff: BackoffPolicy,
    stats: RpcStats,
    request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(pool: EndpointPool, transport: Arc<dyn RpcTransport>, backoff: BackoffPolicy) -> Self {
        Self {
            pool,
            transport,
            backoff,
            stats: RpcStats::new(),
            request_id: AtomicU64::new(1),
        }
    }

    /// Production client over HTTP built from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self, SwapScopeError> {
        let pool = EndpointPool::new(settings.endpoints.clone())?;
        let transport = HttpTransport::new().map_err(SwapScopeError::configuration_error)?;
        Ok(Self::new(
            pool,
            Arc::new(transport),
            BackoffPolicy::new(settings.base_delay, settings.max_backoff),
        ))
    }

    pub fn pool(&self) -> &EndpointPool {
        &self.pool
    }

    pub fn stats(&self) -> &RpcStats {
        &self.stats
    }

    /// Perform one JSON-RPC call, retrying retryable failures indefinitely
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let mut attempt: u32 = 0;

        loop {
            let endpoint = self.pool.current().to_string();

            match self.send_once(&endpoint, method, &params).await {
                Ok(result) => {
                    if attempt > 0 {
                        logger::debug(
                            LogTag::Rpc,
                            &format!("{} succeeded on {} after {} retries", method, endpoint, attempt),
                        );
                    }
                    return Ok(result);
                }
                Err(e) if e.is_retryable() => {
                    let delay = self.backoff.delay_for(attempt);
                    self.pool.advance();

                    let message = format!(
                        "{} failed (attempt {}): {} - rotating to {} and retrying in {}ms",
                        method,
                        attempt + 1,
                        e,
                        self.pool.current(),
                        delay.as_millis()
                    );
                    if attempt % RETRY_WARN_EVERY == 0 {
                        logger::warning(LogTag::Rpc, &message);
                    } else {
                        logger::debug(LogTag::Rpc, &message);
                    }

                    tokio::time::sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
                Err(e) => {
                    logger::error(LogTag::Rpc, &format!("{} failed permanently: {}", method, e));
                    return Err(e);
                }
            }
        }
    }

    /// Single exchange against a specific endpoint; no retry, no rotation
    pub(crate) async fn send_once(
        &self,
        endpoint: &str,
        method: &str,
        params: &Value,
    ) -> Result<Value, RpcError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": self.request_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        });

        logger::verbose(LogTag::Rpc, &format!("-> {} {}", endpoint, payload));

        let started = Instant::now();
        let outcome = match self.transport.post_json(endpoint, &payload).await {
            Ok(raw) => classify_response(endpoint, raw),
            Err(message) => Err(RpcError::Transport {
                endpoint: endpoint.to_string(),
                message,
            }),
        };
        self.stats.record(endpoint, &outcome, started.elapsed());

        outcome
    }
}

/// Turn an HTTP exchange into a JSON-RPC result or a classified error
pub fn classify_response(endpoint: &str, raw: RawResponse) -> Result<Value, RpcError> {
    if !(200..=299).contains(&raw.status) {
        return Err(RpcError::Http {
            endpoint: endpoint.to_string(),
            status: raw.status,
            body: truncate_body(&raw.body),
        });
    }

    let mut parsed: Value = serde_json::from_str(&raw.body)
        .map_err(|e| RpcError::malformed(endpoint, format!("invalid JSON: {}", e), &raw.body))?;

    let Some(envelope) = parsed.as_object_mut() else {
        return Err(RpcError::malformed(endpoint, "response is not an object", &raw.body));
    };

    if let Some(error) = envelope.remove("error").filter(|e| !e.is_null()) {
        let error: RpcErrorObject = serde_json::from_value(error)
            .map_err(|e| RpcError::malformed(endpoint, format!("invalid error object: {}", e), &raw.body))?;
        return Err(RpcError::Rpc {
            endpoint: endpoint.to_string(),
            code: error.code,
            message: error.message,
        });
    }

    envelope
        .remove("result")
        .ok_or_else(|| RpcError::malformed(endpoint, "missing result", &raw.body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::transport::mock::ScriptedTransport;
    use std::time::Duration;

    fn client_with(transport: Arc<ScriptedTransport>, urls: &[&str]) -> RpcClient {
        let pool = EndpointPool::new(urls.iter().map(|u| u.to_string()).collect()).unwrap();
        RpcClient::new(
            pool,
            transport,
            BackoffPolicy::new(Duration::from_millis(100), Duration::from_millis(1000)),
        )
    }

    #[test]
    fn test_classify_result_and_null_result() {
        let ok = classify_response("e", RawResponse::new(200, r#"{"jsonrpc":"2.0","id":1,"result":5}"#));
        assert_eq!(ok.unwrap(), json!(5));

        let null = classify_response("e", RawResponse::new(200, r#"{"jsonrpc":"2.0","id":1,"result":null}"#));
        assert_eq!(null.unwrap(), Value::Null);
    }

    #[test]
    fn test_classify_errors() {
        let rate_limited = classify_response("e", RawResponse::new(429, "Too Many Requests")).unwrap_err();
        assert!(rate_limited.is_retryable());

        let forbidden = classify_response("e", RawResponse::new(403, "forbidden")).unwrap_err();
        assert!(!forbidden.is_retryable());

        let rpc = classify_response(
            "e",
            RawResponse::new(200, r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32005,"message":"behind"}}"#),
        )
        .unwrap_err();
        assert!(matches!(rpc, RpcError::Rpc { code: -32005, .. }));
        assert!(rpc.is_retryable());

        let garbage = classify_response("e", RawResponse::new(200, "<html>gateway</html>")).unwrap_err();
        match garbage {
            RpcError::Malformed { body, .. } => assert_eq!(body, "<html>gateway</html>"),
            other => panic!("unexpected {:?}", other),
        }

        let missing = classify_response("e", RawResponse::new(200, r#"{"jsonrpc":"2.0","id":1}"#)).unwrap_err();
        assert!(matches!(missing, RpcError::Malformed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_grows_and_rotates_once_per_retry() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_raw(429, "slow down")
            .push_rpc_error(-32005, "node is behind")
            .push_transport_error("connection reset")
            .push_result(json!("ok"));
        let client = client_with(transport.clone(), &["https://a", "https://b", "https://c"]);

        let started = tokio::time::Instant::now();
        let result = client.call("getHealth", json!([])).await.unwrap();
        assert_eq!(result, json!("ok"));

        // 100 + 200 + 400 ms of backoff, all on the paused clock
        assert_eq!(started.elapsed(), Duration::from_millis(700));

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["https://a", "https://b", "https://c", "https://a"]);
        assert_eq!(client.pool().current(), "https://a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_respects_ceiling() {
        let transport = Arc::new(ScriptedTransport::new());
        for _ in 0..6 {
            transport.push_raw(503, "unavailable");
        }
        transport.push_result(json!(1));
        let client = client_with(transport.clone(), &["https://a"]);

        let started = tokio::time::Instant::now();
        client.call("getSlot", json!([])).await.unwrap();
        // 100 + 200 + 400 + 800 + 1000 + 1000
        assert_eq!(started.elapsed(), Duration::from_millis(3500));
        assert_eq!(transport.requests().len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_fails_without_rotation() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_rpc_error(-32602, "Invalid params");
        let client = client_with(transport.clone(), &["https://a", "https://b"]);

        let err = client.call("getTransaction", json!(["x"])).await.unwrap_err();
        assert!(matches!(err, RpcError::Rpc { code: -32602, .. }));
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(client.pool().current(), "https://a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_count_every_attempt() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_raw(429, "").push_result(json!(true));
        let client = client_with(transport, &["https://a", "https://b"]);

        client.call("getHealth", json!([])).await.unwrap();
        let stats = client.stats().snapshot();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].rate_limited, 1);
        assert_eq!(stats[1].successes, 1);
    }
}
