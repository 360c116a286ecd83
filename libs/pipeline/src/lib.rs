//! One analysis per user interaction: fetch the page, count its Han words and shape
//! the chosen chart. Nothing is shared between runs except the fetcher and segmenter.
mod fetch;
mod runner;

pub use fetch::{parse_url, DocumentSource, FetchError, Fetcher};
pub use runner::AnalysisRunner;

use std::time::Duration;

use charts::{Chart, ChartKind};
use chrono::{DateTime, Local};
use textstats::Analysis;

/// Everything one interaction controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisRequest {
    pub url: String,
    /// `None` means the lowest threshold.
    pub min_freq: Option<usize>,
    pub chart: ChartKind,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_min_freq(mut self, min_freq: usize) -> Self {
        self.min_freq = Some(min_freq);
        self
    }

    pub fn with_chart(mut self, chart: ChartKind) -> Self {
        self.chart = chart;
        self
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub request: AnalysisRequest,
    pub analysis: Analysis,
    pub chart: Chart,
    pub fetched_at: DateTime<Local>,
    pub elapsed: Duration,
}
