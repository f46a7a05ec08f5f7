use crate::analyzer::monte_carlo::{MAX_HORIZON_DAYS, MAX_PATH_COUNT};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub symbol: String,
    pub interval: String,
    pub limit: u32,
    pub request_timeout_seconds: u64,
    /// Retry once on timeouts, connect errors, 429 and 5xx.
    pub retry_transient: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            symbol: "TONUSDT".to_string(),
            interval: "1d".to_string(),
            limit: 400,
            request_timeout_seconds: 10,
            retry_transient: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub histogram_bins: usize,
    pub chi_square_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 12,
            chi_square_bins: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub path_count: usize,
    pub horizon_days: usize,
    /// Fixed seed for reproducible runs; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            path_count: 10,
            horizon_days: 30,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub decimals: usize,
    pub currency: String,
    pub max_rows: usize,
    pub bar_width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            currency: "$".to_string(),
            max_rows: 20,
            bar_width: 40,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub analysis: AnalysisConfig,
    pub monte_carlo: MonteCarloConfig,
    pub chart: ChartConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.source.symbol.trim().is_empty() {
            return Err("source.symbol must not be empty".into());
        }
        if self.source.limit == 0 {
            return Err("source.limit must be positive".into());
        }
        if self.analysis.histogram_bins == 0 || self.analysis.chi_square_bins == 0 {
            return Err("bin counts must be positive".into());
        }
        if !(1..=MAX_PATH_COUNT).contains(&self.monte_carlo.path_count) {
            return Err(format!("monte_carlo.path_count must be in 1..={}", MAX_PATH_COUNT).into());
        }
        if !(1..=MAX_HORIZON_DAYS).contains(&self.monte_carlo.horizon_days) {
            return Err(format!("monte_carlo.horizon_days must be in 1..={}", MAX_HORIZON_DAYS).into());
        }
        if self.chart.max_rows < 2 {
            return Err("chart.max_rows must be at least 2".into());
        }
        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Reads `path`; a missing file yields the defaults, anything else malformed is an error.
pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file {} not found, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    parse_config(&content)
}
