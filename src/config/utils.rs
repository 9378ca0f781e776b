/// Configuration utilities - loading and validation
///
/// The configuration is read once at startup, validated, and turned into an
/// immutable `Settings` value that is shared by reference with every phase.
/// Any problem here is fatal: the run aborts before touching the network.
use super::schemas::Config;
use crate::collector::window::TimeWindow;
use crate::errors::{ConfigurationError, SwapScopeError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Encodings accepted by getTransaction that keep token balances readable
const SUPPORTED_ENCODINGS: [&str; 2] = ["json", "jsonParsed"];

/// Upper bound of getSignaturesForAddress `limit`
const MAX_PAGE_LIMIT: usize = 1000;

/// Resolved, validated view of `Config`
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoints: Vec<String>,
    pub base_delay: Duration,
    pub max_backoff: Duration,
    pub throttle: Duration,
    pub program_address: String,
    pub window: TimeWindow,
    pub time_budget: Duration,
    pub page_limit: usize,
    pub transaction_encoding: String,
    pub stable_mint: String,
    pub stable_decimals: u8,
    pub top_n: usize,
    pub console_rows: usize,
}

/// Load and parse a TOML configuration file
///
/// A missing file is an error: there is no usable default for the
/// endpoints or the collection window.
pub fn load_config_from_path(path: &Path) -> Result<Config, SwapScopeError> {
    if !path.exists() {
        return Err(ConfigurationError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigurationError::ParseFailed {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    parse_config(&contents).map_err(|e| match e {
        SwapScopeError::Configuration(ConfigurationError::Generic { message }) => {
            ConfigurationError::ParseFailed {
                path: path.display().to_string(),
                error: message,
            }
            .into()
        }
        other => other,
    })
}

/// Parse configuration from TOML text
pub fn parse_config(contents: &str) -> Result<Config, SwapScopeError> {
    toml::from_str::<Config>(contents)
        .map_err(|e| SwapScopeError::configuration_error(e.to_string()))
}

impl Config {
    /// Validate every field and resolve derived values
    pub fn validate(&self) -> Result<Settings, SwapScopeError> {
        if self.rpc.urls.is_empty() {
            return Err(ConfigurationError::MissingConfig {
                field: "rpc.urls".to_string(),
            }
            .into());
        }
        for url in &self.rpc.urls {
            reqwest::Url::parse(url)
                .map_err(|e| SwapScopeError::invalid_config("rpc.urls", format!("'{}': {}", url, e)))?;
        }

        if self.rpc.base_delay_ms == 0 {
            return Err(SwapScopeError::invalid_config(
                "rpc.base_delay_ms",
                "must be greater than zero",
            ));
        }
        if self.rpc.max_backoff_ms < self.rpc.base_delay_ms {
            return Err(SwapScopeError::invalid_config(
                "rpc.max_backoff_ms",
                "must not be lower than rpc.base_delay_ms",
            ));
        }

        validate_address("collection.program_address", &self.collection.program_address)?;
        validate_address("aggregation.stable_mint", &self.aggregation.stable_mint)?;

        let start = parse_timestamp("collection.start", &self.collection.start)?;
        let end = parse_timestamp("collection.end", &self.collection.end)?;
        if start > end {
            return Err(SwapScopeError::invalid_config(
                "collection.end",
                "window end is before window start",
            ));
        }

        if self.collection.page_limit == 0 || self.collection.page_limit > MAX_PAGE_LIMIT {
            return Err(SwapScopeError::invalid_config(
                "collection.page_limit",
                format!("must be between 1 and {}", MAX_PAGE_LIMIT),
            ));
        }

        if !SUPPORTED_ENCODINGS.contains(&self.collection.transaction_encoding.as_str()) {
            return Err(SwapScopeError::invalid_config(
                "collection.transaction_encoding",
                format!("expected one of {:?}", SUPPORTED_ENCODINGS),
            ));
        }

        if self.report.top_n == 0 {
            return Err(SwapScopeError::invalid_config("report.top_n", "must be at least 1"));
        }

        Ok(Settings {
            endpoints: self.rpc.urls.clone(),
            base_delay: Duration::from_millis(self.rpc.base_delay_ms),
            max_backoff: Duration::from_millis(self.rpc.max_backoff_ms),
            throttle: Duration::from_millis(self.rpc.throttle_ms),
            program_address: self.collection.program_address.clone(),
            window: TimeWindow::new(start, end),
            time_budget: Duration::from_secs(self.collection.time_budget_minutes.saturating_mul(60)),
            page_limit: self.collection.page_limit,
            transaction_encoding: self.collection.transaction_encoding.clone(),
            stable_mint: self.aggregation.stable_mint.clone(),
            stable_decimals: self.aggregation.stable_decimals,
            top_n: self.report.top_n,
            console_rows: self.report.console_rows,
        })
    }
}

fn validate_address(field: &str, value: &str) -> Result<(), SwapScopeError> {
    Pubkey::from_str(value)
        .map(|_| ())
        .map_err(|e| SwapScopeError::invalid_config(field, format!("'{}': {}", value, e)))
}

/// RFC 3339, or a zoneless ISO datetime / plain date read as UTC
/// (a date alone means midnight)
fn parse_timestamp(field: &str, value: &str) -> Result<i64, SwapScopeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigurationError::MissingConfig {
            field: field.to_string(),
        }
        .into());
    }

    let rfc3339_err = match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => return Ok(dt.timestamp()),
        Err(e) => e,
    };
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().timestamp());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().timestamp());
    }

    Err(SwapScopeError::invalid_config(
        field,
        format!("'{}': {}", value, rfc3339_err),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        [rpc]
        urls = ["https://rpc-a.example.com", "https://rpc-b.example.com"]
        base_delay_ms = 250
        max_backoff_ms = 8000

        [collection]
        start = "2025-01-01T00:00:00Z"
        end = "2025-01-02T00:00:00Z"
        time_budget_minutes = 30
        page_limit = 500
    "#;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rpc.urls.is_empty());
        assert_eq!(config.collection.page_limit, 1000);
        assert_eq!(config.aggregation.stable_decimals, 6);
        assert_eq!(config.report.top_n, 100);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[rpc]"));
        assert!(toml_str.contains("[collection]"));
        assert!(toml_str.contains("[aggregation]"));
    }

    #[test]
    fn test_valid_config_resolves_settings() {
        let settings = parse_config(VALID).unwrap().validate().unwrap();
        assert_eq!(settings.endpoints.len(), 2);
        assert_eq!(settings.base_delay, Duration::from_millis(250));
        assert_eq!(settings.max_backoff, Duration::from_millis(8000));
        assert_eq!(settings.window, TimeWindow::new(1_735_689_600, 1_735_776_000));
        assert_eq!(settings.time_budget, Duration::from_secs(30 * 60));
        assert_eq!(settings.page_limit, 500);
        assert_eq!(settings.transaction_encoding, "json");
    }

    #[test]
    fn test_empty_endpoints_is_fatal() {
        let toml = VALID.replace(
            r#"urls = ["https://rpc-a.example.com", "https://rpc-b.example.com"]"#,
            "urls = []",
        );
        let err = parse_config(&toml).unwrap().validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("rpc.urls"));
    }

    #[test]
    fn test_missing_window_is_fatal() {
        let toml = VALID.replace(r#"start = "2025-01-01T00:00:00Z""#, "");
        let err = parse_config(&toml).unwrap().validate().unwrap_err();
        assert!(err.to_string().contains("collection.start"));
    }

    #[test]
    fn test_inverted_window_is_fatal() {
        let toml = VALID.replace("2025-01-02T00:00:00Z", "2024-12-31T00:00:00Z");
        assert!(parse_config(&toml).unwrap().validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = format!("{}\n[report]\ntop_m = 5\n", VALID);
        assert!(parse_config(&toml).is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_config_from_path(Path::new("/nonexistent/swapscope.toml")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_zoneless_and_date_only_bounds_are_utc() {
        assert_eq!(parse_timestamp("start", "2025-01-01").unwrap(), 1_735_689_600);
        assert_eq!(parse_timestamp("start", "2025-01-01T01:00:00").unwrap(), 1_735_693_200);
        assert_eq!(parse_timestamp("start", "2025-01-01 01:00:00").unwrap(), 1_735_693_200);
        assert_eq!(parse_timestamp("start", "2025-01-01T03:00:00+02:00").unwrap(), 1_735_693_200);

        let toml = VALID
            .replace("2025-01-01T00:00:00Z", "2025-01-01")
            .replace("2025-01-02T00:00:00Z", "2025-01-02");
        let settings = parse_config(&toml).unwrap().validate().unwrap();
        assert_eq!(settings.window, TimeWindow::new(1_735_689_600, 1_735_776_000));
    }

    #[test]
    fn test_unparseable_bound_is_fatal() {
        let err = parse_timestamp("collection.end", "01/02/2025").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("collection.end"));
    }

    #[test]
    fn test_page_limit_bounds() {
        let toml = VALID.replace("page_limit = 500", "page_limit = 5000");
        assert!(parse_config(&toml).unwrap().validate().is_err());
    }
}
