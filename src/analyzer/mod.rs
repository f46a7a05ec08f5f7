// Analyzer module: aggregates the statistical submodules.

pub mod bucketing;
pub mod chi_square;
pub mod descriptive;
pub mod helpers;
pub mod monte_carlo;
pub mod price_analysis;
pub mod regression;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, PriceSeriesAnalyzer};
