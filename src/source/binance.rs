// Binance klines endpoint
use crate::config::SourceConfig;
use crate::model::{Candle, FetchError};
use crate::source::traits::PriceSource;
use crate::utils::millis_to_datetime;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

const RETRY_DELAY: Duration = Duration::from_millis(500);
const CLOSE_INDEX: usize = 4;

#[derive(Debug, Deserialize)]
struct BinanceErrorBody {
    code: i64,
    msg: String,
}

pub struct BinanceSource {
    client: Client,
    config: SourceConfig,
}

impl BinanceSource {
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("ton-stats/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn klines_url(&self) -> String {
        format!("{}/api/v3/klines", self.config.base_url.trim_end_matches('/'))
    }

    async fn request_once(&self) -> Result<Vec<Candle>, FetchError> {
        let url = self.klines_url();
        let limit = self.config.limit.to_string();
        debug!("GET {} symbol={} interval={} limit={}", url, self.config.symbol, self.config.interval, limit);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", self.config.symbol.as_str()),
                ("interval", self.config.interval.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &body));
        }

        parse_klines(&body)
    }
}

#[async_trait::async_trait]
impl PriceSource for BinanceSource {
    fn symbol(&self) -> &str {
        &self.config.symbol
    }

    async fn fetch_candles(&self) -> Result<Vec<Candle>, FetchError> {
        let attempts = if self.config.retry_transient { 2 } else { 1 };
        let mut attempt = 1;

        loop {
            match self.request_once().await {
                Ok(candles) => {
                    info!("Fetched {} klines for {}", candles.len(), self.config.symbol);
                    return Ok(candles);
                }
                Err(e) if attempt < attempts && e.is_transient() => {
                    warn!("Transient fetch error (attempt {}): {}. Retrying...", attempt, e);
                    sleep(RETRY_DELAY).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Decodes Binance's `{"code": .., "msg": ..}` body, falling back to the bare status.
pub fn parse_api_error(status: u16, body: &str) -> FetchError {
    match serde_json::from_str::<BinanceErrorBody>(body) {
        Ok(err) => FetchError::Api {
            status,
            code: err.code,
            msg: err.msg,
        },
        Err(_) => FetchError::Status(status),
    }
}

/// Parses a klines payload: an array of arrays with the open time at index 0
/// and the close price (usually a decimal string) at index 4.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>, FetchError> {
    let rows: Vec<Vec<Value>> =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let close = row
                .get(CLOSE_INDEX)
                .ok_or_else(|| FetchError::Parse(format!("record {} has {} fields", i, row.len())))
                .and_then(|v| parse_price(v).ok_or_else(|| {
                    FetchError::Parse(format!("record {} has invalid close {}", i, v))
                }))?;
            let open_time = row.first().and_then(Value::as_i64).and_then(millis_to_datetime);
            Ok(Candle { open_time, close })
        })
        .collect()
}

/// Close price as a positive finite number.
fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }?;
    (price.is_finite() && price > 0.0).then_some(price)
}
