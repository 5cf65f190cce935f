use std::path::PathBuf;
use std::time::Duration;

use pharma_client::ClientConfig;
use rust_decimal::Decimal;

use crate::pricing::normalize_number;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | API_BASE_URL | http://localhost:8000/api | Remote pharmacy API root |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP timeout (ms) |
/// | SEARCH_DEBOUNCE_MS | 300 | Medicine / batch search debounce (ms) |
/// | DEFAULT_GST_PERCENT | 5 | GST applied when a line leaves it blank |
/// | DATA_DIR | ./data | Persisted session location |
/// | LOG_LEVEL | info | Logger level |
/// | LOG_DIR | (unset) | Rolling log file directory |
/// | ENVIRONMENT | development | development / production |
///
/// # Example
///
/// ```ignore
/// API_BASE_URL=https://pharmacy.example.com/api LOG_LEVEL=debug pharma-engine invoice.csv
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub search_debounce_ms: u64,
    pub default_gst_percent: Decimal,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            search_debounce_ms: std::env::var("SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            default_gst_percent: std::env::var("DEFAULT_GST_PERCENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_number(&v))
                .unwrap_or(Decimal::from(5)),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// HTTP client settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base_url.clone()).with_timeout_ms(self.request_timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_carries_url_and_timeout() {
        let config = Config {
            api_base_url: "http://pharmacy.test/api".into(),
            request_timeout_ms: 1500,
            search_debounce_ms: 250,
            default_gst_percent: Decimal::from(12),
            data_dir: PathBuf::from("/tmp/pharma"),
            log_level: "debug".into(),
            log_dir: None,
            environment: "production".into(),
        };

        let client = config.client_config();
        assert_eq!(client.base_url, "http://pharmacy.test/api");
        assert_eq!(client.timeout(), Duration::from_millis(1500));
        assert_eq!(config.search_debounce(), Duration::from_millis(250));
        assert!(config.is_production());
    }
}
