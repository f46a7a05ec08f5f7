// console/command_handler.rs

use crate::analyzer::monte_carlo::{master_rng, SimulationOptions, MAX_HORIZON_DAYS, MAX_PATH_COUNT};
use crate::analyzer::Analyzer;
use crate::console::{Reply, Session};
use crate::model::AnalysisError;
use crate::presenter::summary::{
    chi_square_text, descriptive_text, monte_carlo_text, regression_text, status_text,
};
use crate::presenter::{ChartRenderer, LineSeries};
use tracing::{info, warn};

const HELP: &str = "Available commands:\n\
    load - fetch prices from the exchange\n\
    stats - descriptive statistics\n\
    hist - price histogram\n\
    chi2 - chi-square check (simplified)\n\
    trend - linear regression trend\n\
    mc [paths] [days] - Monte Carlo simulation\n\
    status - loaded data and uptime\n\
    help - this list\n\
    quit - exit";

/// Handles one line of input and produces the reply to show.
pub async fn handle_command(command_text: &str, session: &mut Session) -> Reply {
    let mut words = command_text.split_whitespace();
    let Some(command) = words.next() else {
        return Reply::Text(String::new());
    };
    let args: Vec<&str> = words.collect();
    info!("Handling command: {}", command_text.trim());

    let result = match command.trim_start_matches('/') {
        "load" => load(session).await,
        "stats" => session.analyzer.describe().map(|s| descriptive_text(&s)),
        "hist" => histogram(session),
        "chi2" => session.analyzer.chi_square().map(|r| chi_square_text(&r)),
        "trend" => trend(session),
        "mc" if args.is_empty() => monte_carlo(session, None),
        "mc" => match parse_simulation_args(&args, session) {
            Some(options) => monte_carlo(session, Some(options)),
            None => {
                return Reply::Text(format!(
                    "Usage: mc [paths] [days] (paths 1..={}, days 1..={})",
                    MAX_PATH_COUNT, MAX_HORIZON_DAYS
                ));
            }
        },
        "status" => Ok(status(session)),
        "help" => Ok(HELP.to_string()),
        "quit" | "exit" => return Reply::Quit,
        other => return Reply::Text(format!("Unknown command '{}'. Type 'help'.", other)),
    };

    match result {
        Ok(text) => Reply::Text(text),
        Err(e) => {
            warn!("{} failed: {}", command, e);
            Reply::Text(error_text(&e))
        }
    }
}

/// User-facing wording for an analysis error.
pub fn error_text(error: &AnalysisError) -> String {
    match error {
        AnalysisError::EmptySeries => "Error: no data loaded. Run 'load' first!".to_string(),
        AnalysisError::Fetch(e) => format!("Error: failed to load data\n{}", e),
        other => format!("Error: {}", other),
    }
}

async fn load(session: &mut Session) -> Result<String, AnalysisError> {
    let count = session.analyzer.load_from(session.source.as_ref()).await?;
    Ok(format!(
        "Data loaded: {} prices for {}",
        count,
        session.source.symbol()
    ))
}

fn histogram(session: &Session) -> Result<String, AnalysisError> {
    let bucketing = session.analyzer.histogram()?;
    Ok(session.chart.histogram("Price histogram", &bucketing))
}

fn trend(session: &Session) -> Result<String, AnalysisError> {
    let fit = session.analyzer.regression()?;
    let table = session.chart.lines(
        "Linear regression (trend)",
        "day",
        &[
            LineSeries::new("actual", fit.actual.clone()),
            LineSeries::new("trend", fit.trend.clone()),
        ],
    );
    Ok(format!("{}\n{}", regression_text(&fit.model, &session.chart.format), table))
}

/// Configured run when `options` is `None`, otherwise the overridden size with the configured seed.
fn monte_carlo(session: &Session, options: Option<SimulationOptions>) -> Result<String, AnalysisError> {
    let sim = match options {
        None => session.analyzer.monte_carlo()?,
        Some(options) => {
            let seed = session.analyzer.monte_carlo_config().seed;
            session.analyzer.monte_carlo_with(options, &mut master_rng(seed))?
        }
    };
    let series: Vec<LineSeries> = sim
        .paths
        .iter()
        .enumerate()
        .map(|(i, path)| LineSeries::new(format!("path {}", i + 1), path.clone()))
        .collect();
    let table = session.chart.lines("Monte Carlo simulation", "day", &series);
    Ok(format!("{}\n{}", monte_carlo_text(&sim, &session.chart.format), table))
}

fn status(session: &Session) -> String {
    let uptime = session.start_time.elapsed().as_secs();
    format!(
        "{}\nUptime: {:02}:{:02}:{:02}",
        status_text(session.analyzer.series()),
        uptime / 3600,
        (uptime % 3600) / 60,
        uptime % 60
    )
}

/// `mc` takes up to two integers overriding path count and horizon, both within the simulation limits.
fn parse_simulation_args(args: &[&str], session: &Session) -> Option<SimulationOptions> {
    let mut options = SimulationOptions::from(session.analyzer.monte_carlo_config());
    let mut values = args.iter().map(|a| a.parse::<usize>().ok().filter(|&v| v > 0));
    if args.len() > 2 {
        return None;
    }
    if let Some(paths) = values.next() {
        options.path_count = paths?;
    }
    if let Some(days) = values.next() {
        options.horizon_days = days?;
    }
    options.is_within_limits().then_some(options)
}
