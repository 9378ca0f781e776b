/// Structured error handling for swapscope
/// Every fallible library operation surfaces one of these variants
use crate::rpc::RpcError;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone)]
pub enum SwapScopeError {
    // Upstream JSON-RPC failures that escaped the retry loop
    RpcProvider(RpcError),

    // Configuration errors (always fatal, raised before any work starts)
    Configuration(ConfigurationError),

    // Data parsing & validation errors
    Data(DataError),

    // Durable storage errors (checkpoint logs, wallet map, reports)
    Storage(StorageError),
}

impl std::fmt::Display for SwapScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapScopeError::RpcProvider(e) => write!(f, "RPC Provider Error: {}", e),
            SwapScopeError::Configuration(e) => write!(f, "Configuration Error: {}", e),
            SwapScopeError::Data(e) => write!(f, "Data Error: {}", e),
            SwapScopeError::Storage(e) => write!(f, "Storage Error: {}", e),
        }
    }
}

impl std::error::Error for SwapScopeError {}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum ConfigurationError {
    InvalidConfig { field: String, reason: String },
    MissingConfig { field: String },
    FileNotFound { path: String },
    ParseFailed { path: String, error: String },
    Generic { message: String },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::InvalidConfig { field, reason } => {
                write!(f, "Invalid config field '{}': {}", field, reason)
            }
            ConfigurationError::MissingConfig { field } => {
                write!(f, "Missing required config field '{}'", field)
            }
            ConfigurationError::FileNotFound { path } => {
                write!(f, "Config file '{}' not found", path)
            }
            ConfigurationError::ParseFailed { path, error } => {
                write!(f, "Failed to parse config file '{}': {}", path, error)
            }
            ConfigurationError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// DATA ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum DataError {
    ParseError {
        data_type: String,
        error: String,
    },
    CorruptCheckpoint {
        path: String,
        line: usize,
        error: String,
    },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::ParseError { data_type, error } => {
                write!(f, "Failed to parse {}: {}", data_type, error)
            }
            DataError::CorruptCheckpoint { path, line, error } => {
                write!(f, "Corrupt checkpoint {} at line {}: {}", path, line, error)
            }
        }
    }
}

// =============================================================================
// STORAGE ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum StorageError {
    Io { path: String, error: String },
    Export { path: String, error: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io { path, error } => write!(f, "I/O failure on {}: {}", path, error),
            StorageError::Export { path, error } => {
                write!(f, "Failed to export {}: {}", path, error)
            }
        }
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<RpcError> for SwapScopeError {
    fn from(err: RpcError) -> Self {
        SwapScopeError::RpcProvider(err)
    }
}

impl From<ConfigurationError> for SwapScopeError {
    fn from(err: ConfigurationError) -> Self {
        SwapScopeError::Configuration(err)
    }
}

impl From<serde_json::Error> for SwapScopeError {
    fn from(err: serde_json::Error) -> Self {
        SwapScopeError::Data(DataError::ParseError {
            data_type: "JSON".to_string(),
            error: err.to_string(),
        })
    }
}

// =============================================================================
// STRUCTURED ERROR BUILDERS
// =============================================================================

impl SwapScopeError {
    /// Create a configuration error for a specific field
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SwapScopeError::Configuration(ConfigurationError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Create a generic configuration error
    pub fn configuration_error(message: impl Into<String>) -> Self {
        SwapScopeError::Configuration(ConfigurationError::Generic {
            message: message.into(),
        })
    }

    /// Create a parse error for a named data type
    pub fn parse_error(data_type: impl Into<String>, error: impl Into<String>) -> Self {
        SwapScopeError::Data(DataError::ParseError {
            data_type: data_type.into(),
            error: error.into(),
        })
    }

    /// Create an I/O error bound to the path it happened on
    pub fn io_error(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        SwapScopeError::Storage(StorageError::Io {
            path: path.display().to_string(),
            error: error.to_string(),
        })
    }

    /// Create an export error for report artifacts
    pub fn export_error(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        SwapScopeError::Storage(StorageError::Export {
            path: path.display().to_string(),
            error: error.to_string(),
        })
    }

    /// Whether the error was raised by configuration loading or validation
    pub fn is_configuration(&self) -> bool {
        matches!(self, SwapScopeError::Configuration(_))
    }
}
