use std::{sync::Arc, time::Instant};

use charts::Chart;
use chrono::Local;
use log::{debug, info, warn};
use textstats::{analyze, Segmenter};

use crate::{AnalysisReport, AnalysisRequest, DocumentSource, FetchError};

#[derive(Clone)]
pub struct AnalysisRunner {
    source: Arc<dyn DocumentSource>,
    segmenter: Arc<dyn Segmenter>,
}

impl AnalysisRunner {
    pub fn new(source: Arc<dyn DocumentSource>, segmenter: Arc<dyn Segmenter>) -> Self {
        Self { source, segmenter }
    }

    /// Fetches and analyzes synchronously. The fetch is the only step that can fail.
    pub fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport, FetchError> {
        let now = Instant::now();
        let fetched_at = Local::now();
        let html = self.source.fetch(&request.url).map_err(|e| {
            warn!("[{}] fetch failed: {}", request.url, e);
            e
        })?;
        debug!("[{}] fetch: {:?}", request.url, now.elapsed());
        let mut report = self.analyze_document(&html, request);
        report.fetched_at = fetched_at;
        report.elapsed = now.elapsed();
        info!(
            "[{}] {} words, {} distinct, top {} as {} in {:?}",
            request.url,
            report.analysis.table.total(),
            report.analysis.table.len(),
            report.analysis.top_words.len(),
            request.chart.slug(),
            report.elapsed
        );
        Ok(report)
    }

    /// Runs everything after the fetch over an already retrieved document.
    pub fn analyze_document(&self, html: &str, request: &AnalysisRequest) -> AnalysisReport {
        let now = Instant::now();
        let analysis = analyze(html, request.min_freq, self.segmenter.as_ref());
        debug!("[{}] analyze: {:?}", request.url, now.elapsed());
        let chart = Chart::build(request.chart, &analysis.top_words);
        AnalysisReport {
            request: request.clone(),
            analysis,
            chart,
            fetched_at: Local::now(),
            elapsed: now.elapsed(),
        }
    }

    /// `run` on the blocking pool, for callers inside the async server.
    pub async fn run_blocking(
        &self,
        request: AnalysisRequest,
    ) -> Result<AnalysisReport, FetchError> {
        let runner = self.clone();
        tokio::task::spawn_blocking(move || runner.run(&request))
            .await
            .map_err(|e| {
                warn!("analysis task failed: {}", e);
                FetchError::Aborted
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charts::ChartKind;
    use std::collections::HashMap;
    use textstats::{is_han_token, JiebaSegmenter, TOP_N};

    struct CharSegmenter;

    impl Segmenter for CharSegmenter {
        fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
            text.char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect()
        }
    }

    struct SpaceSegmenter;

    impl Segmenter for SpaceSegmenter {
        fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
            text.split(' ').collect()
        }
    }

    #[derive(Default)]
    struct Pages(HashMap<String, Result<String, u16>>);

    impl Pages {
        fn with(mut self, url: &str, page: Result<&str, u16>) -> Self {
            self.0.insert(url.to_owned(), page.map(str::to_owned));
            self
        }
    }

    impl DocumentSource for Pages {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            match self.0.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(FetchError::Status {
                    url: url.to_owned(),
                    status: *status,
                }),
                None => Err(FetchError::EmptyUrl),
            }
        }
    }

    fn runner(pages: Pages) -> AnalysisRunner {
        AnalysisRunner::new(Arc::new(pages), Arc::new(CharSegmenter))
    }

    #[test]
    fn runs_small_page_end_to_end() {
        let pages = Pages::default().with(
            "http://cats.test/",
            Ok("<html><body>猫和狗。猫爱狗。</body></html>"),
        );
        let report = runner(pages)
            .run(&AnalysisRequest::new("http://cats.test/"))
            .unwrap();
        let top = &report.analysis.top_words;
        assert_eq!(top.labels(), vec!["猫", "狗", "和", "爱"]);
        assert_eq!(top.values(), vec![2, 2, 1, 1]);
        assert_eq!(report.chart.kind, ChartKind::WordCloud);
        assert_eq!(report.chart.title, "词频词云");
    }

    #[test]
    fn fetch_error_halts_the_run() {
        let pages = Pages::default().with("http://gone.test/", Err(404));
        let err = runner(pages)
            .run(&AnalysisRequest::new("http://gone.test/"))
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[test]
    fn empty_page_gives_empty_chart() {
        let pages = Pages::default().with("http://empty.test/", Ok(""));
        let request = AnalysisRequest::new("http://empty.test/").with_chart(ChartKind::Gauge);
        let report = runner(pages).run(&request).unwrap();
        assert!(report.analysis.top_words.is_empty());
        assert_eq!(report.analysis.bounds, (1, 1));
        assert_eq!(report.chart.title, "词频仪表盘");
    }

    #[test]
    fn gauge_uses_top_entry() {
        let html = "<p>测试 测试 测试 测试 测试</p>";
        let report = AnalysisRunner::new(Arc::new(Pages::default()), Arc::new(SpaceSegmenter))
            .analyze_document(html, &AnalysisRequest::new("").with_chart(ChartKind::Gauge));
        assert_eq!(report.analysis.top_words.first().unwrap().word, "测试");
        assert_eq!(report.analysis.top_words.first().unwrap().count, 5);
        assert!(report.chart.title.contains("测试"));
    }

    #[test]
    fn same_document_same_result() {
        let html = "<div>自然语言处理是计算机科学领域与人工智能领域中的一个重要方向。\
                    它研究能实现人与计算机之间用自然语言进行有效通信的各种理论和方法。</div>";
        let runner = AnalysisRunner::new(Arc::new(Pages::default()), Arc::new(JiebaSegmenter));
        let request = AnalysisRequest::new("").with_chart(ChartKind::Bar);
        let first = runner.analyze_document(html, &request);
        let second = runner.analyze_document(html, &request);
        assert_eq!(first.analysis, second.analysis);
        assert_eq!(first.chart, second.chart);
        assert!(first.analysis.top_words.len() <= TOP_N);
        assert!(first
            .analysis
            .top_words
            .iter()
            .all(|e| is_han_token(&e.word)));
    }

    #[test]
    fn raising_threshold_never_grows_result() {
        let html = "<p>北京北京北京上海上海广州深圳深圳深圳深圳</p>";
        let runner = AnalysisRunner::new(Arc::new(Pages::default()), Arc::new(JiebaSegmenter));
        let sizes = (1..=5)
            .map(|min_freq| {
                runner
                    .analyze_document(html, &AnalysisRequest::new("").with_min_freq(min_freq))
                    .analysis
                    .top_words
                    .len()
            })
            .collect::<Vec<usize>>();
        assert!(sizes.windows(2).all(|w| w[1] <= w[0]), "{:?}", sizes);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn runs_on_blocking_pool() {
        let pages = Pages::default().with("http://cats.test/", Ok("<p>猫猫</p>"));
        let report = runner(pages)
            .run_blocking(AnalysisRequest::new("http://cats.test/").with_chart(ChartKind::Pie))
            .await
            .unwrap();
        assert_eq!(report.analysis.table.get("猫"), Some(2));
        assert_eq!(report.chart.kind, ChartKind::Pie);
    }
}
