// Price acquisition: the port the analyzer consumes and its Binance adapter.

pub mod binance;
pub mod traits;

pub use binance::BinanceSource;
pub use traits::PriceSource;
