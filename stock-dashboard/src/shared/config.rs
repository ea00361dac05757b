/// Dashboard configuration
///
/// Defaults can be overridden from the environment, then adjusted with the
/// builder methods.
use std::path::PathBuf;
use std::time::Duration;

use super::time_range::TimeRange;

/// Default stock price API
pub const DEFAULT_API_BASE_URL: &str = "http://20.244.56.144/evaluation-service";

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the stock price REST API
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Maximum number of stocks shown on the heatmap
    pub max_stocks: usize,
    /// Initial time range
    pub time_range: TimeRange,
    /// UI redraw / input poll interval
    pub tick_rate: Duration,
    /// Log output file (the terminal belongs to the UI)
    pub log_file: PathBuf,
    /// Substitute generated prices when a price fetch fails
    pub mock_fallback: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            max_stocks: 8,
            time_range: TimeRange::default(),
            tick_rate: Duration::from_millis(250),
            log_file: PathBuf::from("stock-dashboard.log"),
            mock_fallback: true,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with custom API URL
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Default::default()
        }
    }

    /// Defaults overridden by `STOCK_API_URL`, `STOCK_API_TIMEOUT_SECS`,
    /// `STOCK_LIMIT`, `STOCK_TIME_RANGE`, `STOCK_MOCK_FALLBACK` and `STOCK_DASHBOARD_LOG`
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("STOCK_API_URL").filter(|s| !s.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup("STOCK_API_TIMEOUT_SECS").and_then(|s| s.trim().parse::<u64>().ok()) {
            if secs > 0 {
                config.request_timeout = Duration::from_secs(secs);
            }
        }
        if let Some(limit) = lookup("STOCK_LIMIT").and_then(|s| s.trim().parse::<usize>().ok()) {
            if limit > 0 {
                config.max_stocks = limit;
            }
        }
        if let Some(range) = lookup("STOCK_TIME_RANGE")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .and_then(TimeRange::from_minutes)
        {
            config.time_range = range;
        }
        if let Some(flag) = lookup("STOCK_MOCK_FALLBACK") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.mock_fallback = true,
                "0" | "false" | "no" | "off" => config.mock_fallback = false,
                _ => {}
            }
        }
        if let Some(path) = lookup("STOCK_DASHBOARD_LOG").filter(|s| !s.trim().is_empty()) {
            config.log_file = PathBuf::from(path);
        }

        config
    }

    /// Set request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set heatmap stock limit
    pub fn with_max_stocks(mut self, max_stocks: usize) -> Self {
        self.max_stocks = max_stocks;
        self
    }

    /// Set initial time range
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    /// Set UI tick rate
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Set log file path
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Enable or disable mock prices on fetch failure
    pub fn with_mock_fallback(mut self, enabled: bool) -> Self {
        self.mock_fallback = enabled;
        self
    }

    /// API base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_stocks, 8);
        assert_eq!(config.time_range, TimeRange::Minutes15);
        assert_eq!(config.tick_rate, Duration::from_millis(250));
        assert!(config.mock_fallback);
    }

    #[test]
    fn test_config_builder() {
        let config = DashboardConfig::new("http://localhost:8080/")
            .with_request_timeout(Duration::from_secs(3))
            .with_max_stocks(4)
            .with_time_range(TimeRange::Hour1)
            .with_tick_rate(Duration::from_millis(100))
            .with_log_file("/tmp/dash.log")
            .with_mock_fallback(false);

        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.max_stocks, 4);
        assert_eq!(config.time_range, TimeRange::Hour1);
        assert_eq!(config.tick_rate, Duration::from_millis(100));
        assert_eq!(config.log_file, PathBuf::from("/tmp/dash.log"));
        assert!(!config.mock_fallback);
    }

    #[test]
    fn test_config_from_env_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STOCK_API_URL", "http://127.0.0.1:3000"),
            ("STOCK_API_TIMEOUT_SECS", "5"),
            ("STOCK_LIMIT", "3"),
            ("STOCK_TIME_RANGE", "30"),
            ("STOCK_MOCK_FALLBACK", "off"),
        ]);
        let config = DashboardConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "http://127.0.0.1:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_stocks, 3);
        assert_eq!(config.time_range, TimeRange::Minutes30);
        assert!(!config.mock_fallback);
    }

    #[test]
    fn test_config_ignores_invalid_env() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STOCK_LIMIT", "0"),
            ("STOCK_TIME_RANGE", "7"),
            ("STOCK_API_TIMEOUT_SECS", "soon"),
        ]);
        let config = DashboardConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.max_stocks, 8);
        assert_eq!(config.time_range, TimeRange::Minutes15);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
