// Text for the results that are shown as a message rather than a chart.
use crate::model::{ChiSquareReport, DescriptiveSummary, PriceSeries, RegressionModel, SimulatedPaths};
use crate::presenter::chart::LabelFormat;
use crate::utils::format_date;

pub fn descriptive_text(summary: &DescriptiveSummary) -> String {
    format!(
        "Descriptive statistics\n\
         Count: {}\n\
         Mean: {:.5}\n\
         Median: {:.5}\n\
         Variance: {:.5}\n\
         Standard deviation: {:.5}\n\
         Coefficient of variation: {:.2}%",
        summary.count,
        summary.mean,
        summary.median,
        summary.variance,
        summary.std_dev,
        summary.coefficient_of_variation
    )
}

pub fn chi_square_text(report: &ChiSquareReport) -> String {
    let counts: Vec<String> = report.bucketing.counts.iter().map(|c| c.to_string()).collect();
    format!(
        "Chi-square value: {:.4}\n\
         Observed per bin: [{}]\n\
         Expected per bin: {:.2}\n\
         (simplified test: uniform expected frequency, no critical value)",
        report.statistic,
        counts.join(", "),
        report.expected_per_bin
    )
}

pub fn regression_text(model: &RegressionModel, format: &LabelFormat) -> String {
    format!(
        "Linear trend: price = {:.6} * day + {}",
        model.slope,
        format.price(model.intercept)
    )
}

pub fn monte_carlo_text(sim: &SimulatedPaths, format: &LabelFormat) -> String {
    let mut text = format!(
        "Monte Carlo: {} paths x {} days from {}\n\
         Daily return mean: {:.6}, std: {:.6}",
        sim.paths.len(),
        sim.horizon(),
        format.price(sim.start_price),
        sim.return_mean,
        sim.return_std
    );
    if let Some(t) = sim.terminal_summary() {
        text.push_str(&format!(
            "\nDay {} price: min {}, mean {}, max {}",
            sim.horizon(),
            format.price(t.min),
            format.price(t.mean),
            format.price(t.max)
        ));
    }
    text
}

pub fn status_text(series: Option<&PriceSeries>) -> String {
    match series {
        None => "No data loaded".to_string(),
        Some(s) => format!(
            "Loaded {} prices for {} ({} .. {}), last close {:.5}, fetched at {}",
            s.len(),
            s.symbol,
            format_date(s.first_open),
            format_date(s.last_open),
            s.last_price().unwrap_or(f64::NAN),
            s.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::chi_square::chi_square;
    use crate::analyzer::descriptive::describe;

    #[test]
    fn descriptive_text_lists_every_field() {
        let s = describe(&[100.0, 102.0, 98.0, 101.0, 105.0]).unwrap();
        let text = descriptive_text(&s);
        assert!(text.contains("Count: 5"));
        assert!(text.contains("Mean: 101.20000"));
        assert!(text.contains("Median: 101.00000"));
        assert!(text.contains("Variance: 5.36000"));
        assert!(text.contains("Coefficient of variation: 2.29%"));
    }

    #[test]
    fn chi_square_text_flags_simplification() {
        let report = chi_square(&[1.0, 2.0, 3.0], 3).unwrap();
        let text = chi_square_text(&report);
        assert!(text.contains("Chi-square value: 0.0000"));
        assert!(text.contains("[1, 1, 1]"));
        assert!(text.contains("simplified"));
    }

    #[test]
    fn status_without_data() {
        assert_eq!(status_text(None), "No data loaded");
        let series = PriceSeries::new("TONUSDT", vec![1.0, 2.0]);
        let text = status_text(Some(&series));
        assert!(text.starts_with("Loaded 2 prices for TONUSDT"));
        assert!(text.contains("last close 2.00000"));
    }
}
