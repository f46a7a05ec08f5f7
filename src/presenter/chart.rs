// Chart adapter: turns chart-ready datasets into text.
use crate::config::ChartConfig;
use crate::model::Bucketing;

/// How numeric axis labels are written.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFormat {
    pub decimals: usize,
    pub currency: String,
}

impl LabelFormat {
    pub fn price(&self, value: f64) -> String {
        format!("{}{:.*}", self.currency, self.decimals, value)
    }
}

impl From<&ChartConfig> for LabelFormat {
    fn from(cfg: &ChartConfig) -> Self {
        Self {
            decimals: cfg.decimals,
            currency: cfg.currency.clone(),
        }
    }
}

/// One named line of a line chart, plotted against x = 1..=len.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<f64>,
}

impl LineSeries {
    pub fn new(name: impl Into<String>, points: Vec<f64>) -> Self {
        Self { name: name.into(), points }
    }
}

pub trait ChartRenderer {
    fn histogram(&self, title: &str, bucketing: &Bucketing) -> String;
    fn lines(&self, title: &str, x_label: &str, series: &[LineSeries]) -> String;
}

/// Terminal renderer: bar histogram and a row-sampled table for line charts.
pub struct TextChart {
    pub format: LabelFormat,
    pub max_rows: usize,
    pub bar_width: usize,
}

impl TextChart {
    pub fn new(cfg: &ChartConfig) -> Self {
        Self {
            format: LabelFormat::from(cfg),
            max_rows: cfg.max_rows.max(2),
            bar_width: cfg.bar_width.max(1),
        }
    }

    /// Evenly spaced row indices, always including the first and the last.
    pub fn sample_rows(&self, len: usize) -> Vec<usize> {
        if len <= self.max_rows {
            return (0..len).collect();
        }
        let last = (len - 1) as f64;
        let steps = (self.max_rows - 1) as f64;
        let mut rows: Vec<usize> = (0..self.max_rows)
            .map(|k| (k as f64 * last / steps).round() as usize)
            .collect();
        rows.dedup();
        rows
    }
}

impl ChartRenderer for TextChart {
    fn histogram(&self, title: &str, bucketing: &Bucketing) -> String {
        let mut out = format!("{}\n", title);
        let peak = bucketing.counts.iter().copied().max().unwrap_or(0);

        for (i, &count) in bucketing.counts.iter().enumerate() {
            let (lower, upper) = bucketing.edges(i);
            let bar_len = if peak == 0 || count == 0 {
                0
            } else {
                (count * self.bar_width).div_ceil(peak)
            };
            out.push_str(&format!(
                "{:>12} - {:<12} | {} {}\n",
                self.format.price(lower),
                self.format.price(upper),
                "#".repeat(bar_len),
                count
            ));
        }
        if bucketing.is_degenerate() {
            out.push_str("(all prices identical: every value counted in the first bin)\n");
        }
        out
    }

    fn lines(&self, title: &str, x_label: &str, series: &[LineSeries]) -> String {
        let mut out = format!("{}\n", title);
        let len = series.iter().map(|s| s.points.len()).max().unwrap_or(0);

        let mut header = format!("{:>6}", x_label);
        for s in series {
            header.push_str(&format!(" {:>12}", s.name));
        }
        out.push_str(&header);
        out.push('\n');

        for row in self.sample_rows(len) {
            let mut line = format!("{:>6}", row + 1);
            for s in series {
                let cell = s
                    .points
                    .get(row)
                    .map(|&v| self.format.price(v))
                    .unwrap_or_default();
                line.push_str(&format!(" {:>12}", cell));
            }
            out.push_str(&line);
            out.push('\n');
        }
        if len > self.max_rows {
            out.push_str(&format!("({} of {} rows shown)\n", self.sample_rows(len).len(), len));
        }
        out
    }
}
