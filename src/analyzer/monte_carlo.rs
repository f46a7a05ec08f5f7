use crate::analyzer::helpers::{ensure_min_len, mean, population_variance};
use crate::config::MonteCarloConfig;
use crate::model::{AnalysisError, SimulatedPaths};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

/// Upper bounds on one simulation run; paths are materialised in memory.
pub const MAX_PATH_COUNT: usize = 1_000;
pub const MAX_HORIZON_DAYS: usize = 3_650;

/// Number of trajectories and steps per trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    pub path_count: usize,
    pub horizon_days: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            path_count: 10,
            horizon_days: 30,
        }
    }
}

impl SimulationOptions {
    /// Both counts positive and within `MAX_PATH_COUNT` / `MAX_HORIZON_DAYS`.
    pub fn is_within_limits(&self) -> bool {
        (1..=MAX_PATH_COUNT).contains(&self.path_count)
            && (1..=MAX_HORIZON_DAYS).contains(&self.horizon_days)
    }
}

impl From<&MonteCarloConfig> for SimulationOptions {
    fn from(cfg: &MonteCarloConfig) -> Self {
        Self {
            path_count: cfg.path_count,
            horizon_days: cfg.horizon_days,
        }
    }
}

/// Master generator: fixed seed when given, OS entropy otherwise.
pub fn master_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Simple returns `(p[i] - p[i-1]) / p[i-1]` for consecutive prices.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Geometric random walk from the last observed price.
///
/// Each step multiplies the price by `1 + r` where `r ~ N(mean, std)` of the
/// historical simple returns (population std). Every path draws from its own
/// generator seeded off `rng`, so paths share only the return parameters.
pub fn simulate_paths<R: Rng>(
    prices: &[f64],
    options: SimulationOptions,
    rng: &mut R,
) -> Result<SimulatedPaths, AnalysisError> {
    ensure_min_len(prices, 2)?;
    if !options.is_within_limits() {
        return Err(AnalysisError::DegenerateInput(format!(
            "simulation of {} paths x {} days is outside 1..={} paths and 1..={} days",
            options.path_count, options.horizon_days, MAX_PATH_COUNT, MAX_HORIZON_DAYS
        )));
    }

    let returns = simple_returns(prices);
    let return_mean = mean(&returns);
    let return_std = population_variance(&returns, return_mean).sqrt();
    let start_price = prices[prices.len() - 1];
    debug!(
        "Simulating {} paths x {} days from {} (mean={}, std={})",
        options.path_count, options.horizon_days, start_price, return_mean, return_std
    );

    let paths = (0..options.path_count)
        .map(|_| {
            let mut path_rng = StdRng::seed_from_u64(rng.random());
            let mut price = start_price;
            (0..options.horizon_days)
                .map(|_| {
                    let z: f64 = StandardNormal.sample(&mut path_rng);
                    price *= 1.0 + (return_mean + return_std * z);
                    price
                })
                .collect()
        })
        .collect();

    Ok(SimulatedPaths {
        start_price,
        return_mean,
        return_std,
        paths,
    })
}
