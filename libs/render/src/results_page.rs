use charts::{ChartKind, DEFAULT_HEIGHT};
use pipeline::AnalysisReport;
use textstats::TopWords;

use crate::{
    analysis_query, controls::ControlsForm, escape_html, render_includes, Render, Template,
};

// Room for the chart plus the frame's own margins.
const FRAME_PADDING: u32 = 20;

pub struct ResultsPage<'a> {
    pub report: &'a AnalysisReport,
}

impl<'a> ResultsPage<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self { report }
    }

    fn rows(top_words: &TopWords) -> String {
        if top_words.is_empty() {
            return String::from(r#"<tr class="empty"><td colspan="3">没有符合条件的词汇</td></tr>"#);
        }
        top_words
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td class="count">{}</td></tr>"#,
                    idx + 1,
                    escape_html(&entry.word),
                    entry.count
                )
            })
            .collect::<Vec<String>>()
            .join("")
    }

    fn chart_links(&self) -> String {
        let request = &self.report.request;
        ChartKind::ALL
            .iter()
            .map(|kind| {
                let class = if *kind == request.chart {
                    r#" class="current""#
                } else {
                    ""
                };
                format!(
                    r#"<a href="/analyze?{}"{}>{}</a>"#,
                    escape_html(&analysis_query(request, *kind)),
                    class,
                    kind.label()
                )
            })
            .collect::<Vec<String>>()
            .join("")
    }

    fn summary(&self) -> String {
        let analysis = &self.report.analysis;
        format!(
            "共 {} 个汉字词，{} 个不同词汇；最低词频 {}；抓取于 {}，耗时 {} ms",
            analysis.table.total(),
            analysis.table.len(),
            analysis.min_freq,
            self.report.fetched_at.format("%Y-%m-%d %H:%M:%S"),
            self.report.elapsed.as_millis()
        )
    }
}

impl Render for ResultsPage<'_> {
    fn render(&self) -> String {
        let report = self.report;
        let controls = ControlsForm {
            url: &report.request.url,
            chart: report.request.chart,
            min_freq: report.analysis.min_freq,
            bounds: Some(report.analysis.bounds),
        };
        let chart_href = format!(
            "/chart?{}",
            analysis_query(&report.request, report.request.chart)
        );
        render_includes(Template::Results)
            .replace("<%= rows %>", &Self::rows(&report.analysis.top_words))
            .replace("<%= chart_links %>", &self.chart_links())
            .replace("<%= summary %>", &self.summary())
            .replace("<%= frame_height %>", &(DEFAULT_HEIGHT + FRAME_PADDING).to_string())
            .replace("<%= chart_href %>", &escape_html(&chart_href))
            .replace("<%= title %>", &escape_html(&report.chart.title))
            .replace(
                "<%= chart_doc %>",
                &escape_html(&report.chart.render_embed(DEFAULT_HEIGHT)),
            )
            .replace("<%= controls %>", &controls.render())
    }
}
