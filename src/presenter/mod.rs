// Presentation boundary: chart adapter and text summaries.

pub mod chart;
pub mod summary;

pub use chart::{ChartRenderer, LineSeries, TextChart};
