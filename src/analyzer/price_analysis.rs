use crate::analyzer::bucketing::bucketize;
use crate::analyzer::chi_square::chi_square;
use crate::analyzer::descriptive::describe;
use crate::analyzer::monte_carlo::{master_rng, simulate_paths, SimulationOptions};
use crate::analyzer::regression::fit_trend;
use crate::config::{AnalysisConfig, MonteCarloConfig};
use crate::model::{
    AnalysisError, Bucketing, ChiSquareReport, DescriptiveSummary, PriceSeries, RegressionFit,
    SimulatedPaths,
};
use crate::source::PriceSource;
use tracing::{info, warn};

/// Trait defining the read-only analyses available over the loaded series.
pub trait Analyzer {
    fn describe(&self) -> Result<DescriptiveSummary, AnalysisError>;
    fn histogram(&self) -> Result<Bucketing, AnalysisError>;
    fn chi_square(&self) -> Result<ChiSquareReport, AnalysisError>;
    fn regression(&self) -> Result<RegressionFit, AnalysisError>;
    fn monte_carlo(&self) -> Result<SimulatedPaths, AnalysisError>;
}

/// Owns the current price series. The series is only ever replaced wholesale.
pub struct PriceSeriesAnalyzer {
    series: Option<PriceSeries>,
    analysis: AnalysisConfig,
    monte_carlo: MonteCarloConfig,
}

impl PriceSeriesAnalyzer {
    pub fn new(analysis: AnalysisConfig, monte_carlo: MonteCarloConfig) -> Self {
        Self {
            series: None,
            analysis,
            monte_carlo,
        }
    }

    pub fn series(&self) -> Option<&PriceSeries> {
        self.series.as_ref()
    }

    pub fn monte_carlo_config(&self) -> &MonteCarloConfig {
        &self.monte_carlo
    }

    pub fn set_series(&mut self, series: PriceSeries) {
        self.series = Some(series);
    }

    /// Fetches from `source` and replaces the series only when the fetch
    /// succeeds with at least one price. Returns the number of prices loaded.
    pub async fn load_from(&mut self, source: &dyn PriceSource) -> Result<usize, AnalysisError> {
        let candles = match source.fetch_candles().await {
            Ok(c) => c,
            Err(e) => {
                warn!("Fetch failed, keeping current series: {}", e);
                return Err(e.into());
            }
        };
        if candles.is_empty() {
            warn!("Source returned no prices for {}", source.symbol());
            return Err(AnalysisError::EmptySeries);
        }

        let series = PriceSeries::from_candles(source.symbol(), &candles);
        let count = series.len();
        info!("Loaded {} prices for {}", count, series.symbol);
        self.set_series(series);
        Ok(count)
    }

    fn prices(&self) -> Result<&[f64], AnalysisError> {
        match &self.series {
            Some(series) if !series.is_empty() => Ok(&series.prices),
            _ => Err(AnalysisError::EmptySeries),
        }
    }

    /// Monte Carlo with explicit options and generator, for callers that need
    /// to override the configured path count, horizon or seed.
    pub fn monte_carlo_with<R: rand::Rng>(
        &self,
        options: SimulationOptions,
        rng: &mut R,
    ) -> Result<SimulatedPaths, AnalysisError> {
        simulate_paths(self.prices()?, options, rng)
    }
}

impl Analyzer for PriceSeriesAnalyzer {
    fn describe(&self) -> Result<DescriptiveSummary, AnalysisError> {
        describe(self.prices()?)
    }

    fn histogram(&self) -> Result<Bucketing, AnalysisError> {
        bucketize(self.prices()?, self.analysis.histogram_bins)
    }

    fn chi_square(&self) -> Result<ChiSquareReport, AnalysisError> {
        chi_square(self.prices()?, self.analysis.chi_square_bins)
    }

    fn regression(&self) -> Result<RegressionFit, AnalysisError> {
        fit_trend(self.prices()?)
    }

    fn monte_carlo(&self) -> Result<SimulatedPaths, AnalysisError> {
        let mut rng = master_rng(self.monte_carlo.seed);
        self.monte_carlo_with(SimulationOptions::from(&self.monte_carlo), &mut rng)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Candle, FetchError};
    use std::sync::Mutex;

    /// Source that replays scripted results, one per fetch.
    pub(crate) struct ScriptedSource {
        pub(crate) results: Mutex<Vec<Result<Vec<f64>, FetchError>>>,
    }

    impl ScriptedSource {
        pub(crate) fn new(mut results: Vec<Result<Vec<f64>, FetchError>>) -> Self {
            results.reverse();
            Self { results: Mutex::new(results) }
        }
    }

    #[async_trait::async_trait]
    impl PriceSource for ScriptedSource {
        fn symbol(&self) -> &str {
            "TONUSDT"
        }

        async fn fetch_candles(&self) -> Result<Vec<Candle>, FetchError> {
            let next = self
                .results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(FetchError::Status(500)));
            next.map(|prices| {
                prices
                    .into_iter()
                    .map(|close| Candle { open_time: None, close })
                    .collect()
            })
        }
    }

    fn analyzer() -> PriceSeriesAnalyzer {
        PriceSeriesAnalyzer::new(
            AnalysisConfig::default(),
            MonteCarloConfig { seed: Some(42), ..MonteCarloConfig::default() },
        )
    }

    #[test]
    fn every_analysis_requires_data() {
        let a = analyzer();
        assert!(matches!(a.describe(), Err(AnalysisError::EmptySeries)));
        assert!(matches!(a.histogram(), Err(AnalysisError::EmptySeries)));
        assert!(matches!(a.chi_square(), Err(AnalysisError::EmptySeries)));
        assert!(matches!(a.regression(), Err(AnalysisError::EmptySeries)));
        assert!(matches!(a.monte_carlo(), Err(AnalysisError::EmptySeries)));
    }

    #[tokio::test]
    async fn load_then_describe() {
        let source = ScriptedSource::new(vec![Ok(vec![100.0, 102.0, 98.0, 101.0, 105.0])]);
        let mut a = analyzer();

        assert_eq!(a.load_from(&source).await.unwrap(), 5);
        let s = a.describe().unwrap();
        assert_eq!(s.count, 5);
        assert!((s.mean - 101.2).abs() < 1e-12);
        assert_eq!(s.median, 101.0);
        assert_eq!(a.series().unwrap().symbol, "TONUSDT");
    }

    #[tokio::test]
    async fn failed_fetch_keeps_existing_series() {
        let source = ScriptedSource::new(vec![
            Ok(vec![1.0, 2.0, 3.0]),
            Err(FetchError::Status(503)),
            Ok(vec![]),
        ]);
        let mut a = analyzer();
        a.load_from(&source).await.unwrap();

        let err = a.load_from(&source).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Fetch(FetchError::Status(503))));
        assert_eq!(a.series().unwrap().prices, vec![1.0, 2.0, 3.0]);

        let err = a.load_from(&source).await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptySeries));
        assert_eq!(a.series().unwrap().prices, vec![1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn failed_first_fetch_leaves_nothing_loaded() {
        let source = ScriptedSource::new(vec![Err(FetchError::Parse("bad".into()))]);
        let mut a = analyzer();
        assert!(a.load_from(&source).await.is_err());
        assert!(a.series().is_none());
    }

    #[test]
    fn uses_configured_bins_and_paths() {
        let mut a = analyzer();
        a.set_series(PriceSeries::new("X", (1..=40).map(f64::from).collect()));

        assert_eq!(a.histogram().unwrap().bins(), 12);
        assert_eq!(a.chi_square().unwrap().bucketing.bins(), 10);

        let sim = a.monte_carlo().unwrap();
        assert_eq!(sim.paths.len(), 10);
        assert_eq!(sim.horizon(), 30);
        assert_eq!(sim.start_price, 40.0);
        assert_eq!(sim, a.monte_carlo().unwrap());
    }

    #[test]
    fn single_price_supports_only_single_point_views() {
        let mut a = analyzer();
        a.set_series(PriceSeries::new("X", vec![2.5]));
        assert!(a.describe().is_ok());
        assert!(a.chi_square().is_ok());
        assert!(matches!(a.regression(), Err(AnalysisError::InsufficientData { .. })));
        assert!(matches!(a.monte_carlo(), Err(AnalysisError::InsufficientData { .. })));
    }
}
