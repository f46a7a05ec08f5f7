// Core structs: PriceSeries, analysis results, error types
use chrono::{DateTime, Utc};
use thiserror::Error;

/// One kline record reduced to the fields the analyzer cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub open_time: Option<DateTime<Utc>>,
    pub close: f64,
}

/// Chronological closing prices, oldest first.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    pub prices: Vec<f64>,
    pub loaded_at: DateTime<Utc>,
    pub first_open: Option<DateTime<Utc>>,
    pub last_open: Option<DateTime<Utc>>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, prices: Vec<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            prices,
            loaded_at: Utc::now(),
            first_open: None,
            last_open: None,
        }
    }

    pub fn from_candles(symbol: impl Into<String>, candles: &[Candle]) -> Self {
        let mut series = Self::new(symbol, candles.iter().map(|c| c.close).collect());
        series.first_open = candles.first().and_then(|c| c.open_time);
        series.last_open = candles.last().and_then(|c| c.open_time);
        series
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// Percent.
    pub coefficient_of_variation: f64,
}

/// Equal-width partition of `[min, max]` with observed counts per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucketing {
    pub min: f64,
    pub max: f64,
    pub width: f64,
    pub counts: Vec<usize>,
}

impl Bucketing {
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Lower and upper edge of bin `index`.
    pub fn edges(&self, index: usize) -> (f64, f64) {
        let lower = self.min + self.width * index as f64;
        (lower, lower + self.width)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareReport {
    pub statistic: f64,
    /// Uniform expectation per bin; not derived from a normal distribution.
    pub expected_per_bin: f64,
    pub bucketing: Bucketing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionModel {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fitted trend paired with the observed prices, both indexed 1..=n.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionFit {
    pub model: RegressionModel,
    pub actual: Vec<f64>,
    pub trend: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPaths {
    pub start_price: f64,
    pub return_mean: f64,
    pub return_std: f64,
    pub paths: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl SimulatedPaths {
    pub fn horizon(&self) -> usize {
        self.paths.first().map(|p| p.len()).unwrap_or(0)
    }

    /// Min / mean / max of the last simulated price across all paths.
    pub fn terminal_summary(&self) -> Option<TerminalSummary> {
        let terminals: Vec<f64> = self.paths.iter().filter_map(|p| p.last().copied()).collect();
        if terminals.is_empty() {
            return None;
        }
        let min = terminals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = terminals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = terminals.iter().sum::<f64>() / terminals.len() as f64;
        Some(TerminalSummary { min, mean, max })
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (HTTP {status}) [{code}] {msg}")]
    Api { status: u16, code: i64, msg: String },
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed kline payload: {0}")]
    Parse(String),
}

impl FetchError {
    /// Failures worth a single retry: timeouts, refused connections, 5xx and 429.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_timeout() || e.is_connect(),
            FetchError::Api { status, .. } | FetchError::Status(status) => {
                *status == 429 || *status >= 500
            }
            FetchError::Parse(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no price data loaded")]
    EmptySeries,
    #[error("failed to fetch prices: {0}")]
    Fetch(#[from] FetchError),
    #[error("not enough data: need at least {required} prices, have {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}
