//! HTTP seam under the RPC client
//!
//! `RpcClient` never talks to reqwest directly. It hands a JSON payload and a
//! URL to an `RpcTransport` and gets back a status code plus body text, which
//! keeps retry/rotation logic testable against scripted responses.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use super::types::RawResponse;

#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// POST `payload` to `url`. `Err` means no HTTP response was received.
    async fn post_json(&self, url: &str, payload: &Value) -> Result<RawResponse, String>;
}

/// reqwest-backed transport used in production
///
/// No request timeout is configured here; the overall time budget bounds a run.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("swapscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<RawResponse, String> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;

        Ok(RawResponse { status, body })
    }
}
