//! Ordered endpoint list with a shared rotation cursor
//!
//! The pool is owned by the `RpcClient`; every collector reaches it through
//! the same client reference, so a rotation triggered by one call is seen by
//! all later calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{ConfigurationError, SwapScopeError};

#[derive(Debug)]
pub struct EndpointPool {
    endpoints: Vec<String>,
    cursor: AtomicUsize,
}

impl EndpointPool {
    /// Build a pool; an empty endpoint list is a fatal configuration error
    pub fn new(endpoints: Vec<String>) -> Result<Self, SwapScopeError> {
        if endpoints.is_empty() {
            return Err(ConfigurationError::MissingConfig {
                field: "rpc.urls".to_string(),
            }
            .into());
        }
        Ok(Self {
            endpoints,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Active endpoint
    pub fn current(&self) -> &str {
        &self.endpoints[self.cursor.load(Ordering::SeqCst) % self.endpoints.len()]
    }

    /// Move to the next endpoint, wrapping around
    pub fn advance(&self) {
        let len = self.endpoints.len();
        let _ = self
            .cursor
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |c| Some((c + 1) % len));
    }

    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}
