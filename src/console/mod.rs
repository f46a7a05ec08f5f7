pub mod command_handler;
pub mod listener;

use crate::analyzer::PriceSeriesAnalyzer;
use crate::config::AppConfig;
use crate::presenter::TextChart;
use crate::source::PriceSource;
use std::time::Instant;

/// Everything a command needs: the analyzer, the price source and the renderer.
pub struct Session {
    pub analyzer: PriceSeriesAnalyzer,
    pub source: Box<dyn PriceSource>,
    pub chart: TextChart,
    pub start_time: Instant,
}

impl Session {
    pub fn new(config: &AppConfig, source: Box<dyn PriceSource>) -> Self {
        Self {
            analyzer: PriceSeriesAnalyzer::new(config.analysis.clone(), config.monte_carlo.clone()),
            source,
            chart: TextChart::new(&config.chart),
            start_time: Instant::now(),
        }
    }
}

/// Outcome of a single console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}
