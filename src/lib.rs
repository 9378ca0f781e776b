pub mod aggregate;
pub mod arguments;
pub mod collector;
pub mod config;
pub mod errors; // Structured error handling
pub mod logger;
pub mod paths;
pub mod pipeline;
pub mod report;
pub mod rpc;
pub mod store;
