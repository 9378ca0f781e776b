//! Solana JSON-RPC access
//!
//! - `pool` - ordered endpoint list with a rotation cursor
//! - `client` - call loop with retry, rotation and backoff
//! - `methods` - typed history methods used by the collectors
//! - `transport` - HTTP seam (reqwest in production)
//! - `stats` - per-endpoint call counters
//! - `testing` - one-shot endpoint health probes

pub mod backoff;
pub mod client;
pub mod methods;
pub mod pool;
pub mod stats;
pub mod testing;
pub mod transport;
pub mod types;

pub use backoff::BackoffPolicy;
pub use client::RpcClient;
pub use methods::SignatureInfo;
pub use pool::EndpointPool;
pub use stats::{EndpointStats, RpcStats};
pub use testing::{probe_endpoints, EndpointProbeResult};
pub use transport::{HttpTransport, RpcTransport};
pub use types::{RawResponse, RpcError};
