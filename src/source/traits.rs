use crate::model::{Candle, FetchError};

/// Supplies chronological closing prices, oldest first.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    /// Symbol the prices belong to, used to label the loaded series.
    fn symbol(&self) -> &str;

    /// Candles in chronological order; `Candle::close` carries the closing price.
    async fn fetch_candles(&self) -> Result<Vec<Candle>, FetchError>;
}
