use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RPC error codes that mean "try again later" (rate limiting or a server-side
/// fault). Every other JSON-RPC error code is final.
pub const RETRYABLE_RPC_CODES: [i64; 7] = [
    429,    // provider-specific rate limit
    -32429, // rate limit (some gateways)
    -32000, // generic server error
    -32004, // block not available for slot
    -32005, // node is behind / unhealthy
    -32014, // block status not yet available
    -32603, // internal error
];

/// Raw bodies attached to errors are cut to this many characters
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Outcome of one HTTP exchange, before JSON-RPC classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("Transport failure on {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("HTTP {status} from {endpoint}: {body}")]
    Http {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("RPC error {code} from {endpoint}: {message}")]
    Rpc {
        endpoint: String,
        code: i64,
        message: String,
    },

    #[error("Malformed response from {endpoint} ({reason}): {body}")]
    Malformed {
        endpoint: String,
        reason: String,
        body: String,
    },
}

impl RpcError {
    /// Whether the client should rotate endpoints, back off and retry
    pub fn is_retryable(&self) -> bool {
        match self {
            RpcError::Transport { .. } => true,
            RpcError::Http { status, .. } => *status == 429 || (500..=599).contains(status),
            RpcError::Rpc { code, .. } => is_retryable_code(*code),
            RpcError::Malformed { .. } => false,
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        match self {
            RpcError::Http { status, .. } => *status == 429,
            RpcError::Rpc { code, .. } => *code == 429 || *code == -32429,
            _ => false,
        }
    }

    pub fn malformed(endpoint: &str, reason: impl Into<String>, body: &str) -> Self {
        RpcError::Malformed {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
            body: truncate_body(body),
        }
    }
}

pub fn is_retryable_code(code: i64) -> bool {
    RETRYABLE_RPC_CODES.contains(&code)
}

/// Cut a response body down for diagnostics
pub fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> RpcError {
        RpcError::Http {
            endpoint: "e".to_string(),
            status,
            body: String::new(),
        }
    }

    fn rpc(code: i64) -> RpcError {
        RpcError::Rpc {
            endpoint: "e".to_string(),
            code,
            message: String::new(),
        }
    }

    #[test]
    fn test_http_classification() {
        assert!(http(429).is_retryable());
        assert!(http(500).is_retryable());
        assert!(http(503).is_retryable());
        assert!(!http(400).is_retryable());
        assert!(!http(404).is_retryable());
        assert!(http(429).is_rate_limit());
    }

    #[test]
    fn test_rpc_code_classification() {
        assert!(rpc(-32005).is_retryable());
        assert!(rpc(429).is_retryable());
        assert!(rpc(-32603).is_retryable());
        assert!(!rpc(-32602).is_retryable()); // invalid params
        assert!(!rpc(-32601).is_retryable()); // method not found
        assert!(!rpc(-32009).is_retryable()); // slot skipped
    }

    #[test]
    fn test_transport_and_malformed() {
        let transport = RpcError::Transport {
            endpoint: "e".to_string(),
            message: "connection reset".to_string(),
        };
        assert!(transport.is_retryable());
        assert!(!RpcError::malformed("e", "not json", "<html>").is_retryable());
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_CHARS + 10);
        let cut = truncate_body(&long);
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate_body("short"), "short");
    }
}
