/// Configuration system
///
/// - `macros`: the `config_struct!` macro (fields + defaults in one place)
/// - `schemas`: every configuration section
/// - `utils`: loading from TOML and validation into resolved `Settings`
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{AggregationConfig, CollectionConfig, Config, ReportConfig, RpcConfig};
pub use utils::{load_config_from_path, Settings};
