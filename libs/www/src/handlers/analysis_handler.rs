use std::collections::HashMap;

use charts::{ChartKind, UnknownChartKind, DEFAULT_HEIGHT};
use pipeline::{AnalysisRequest, AnalysisRunner, FetchError};
use render::{
    controls::ControlsForm, error_page::ErrorPage, index_page::IndexPage,
    results_page::ResultsPage, Render,
};
use warp::{filters::BoxedFilter, http::StatusCode, Filter, Reply};

use super::filters::with_runner;

type Query = HashMap<String, String>;

pub struct AnalysisRouter {
    runner: AnalysisRunner,
}

impl AnalysisRouter {
    pub fn new(runner: AnalysisRunner) -> Self {
        Self { runner }
    }

    pub fn routes(&self) -> BoxedFilter<(impl Reply,)> {
        self.index().or(self.analyze()).or(self.chart()).boxed()
    }

    fn index(&self) -> BoxedFilter<(impl Reply,)> {
        warp::get()
            .and(warp::path::end())
            .map(|| warp::reply::html(IndexPage::new().render()))
            .boxed()
    }

    fn analyze(&self) -> BoxedFilter<(impl Reply,)> {
        warp::get()
            .and(warp::path("analyze"))
            .and(warp::path::end())
            .and(warp::query::<Query>())
            .and(with_runner(self.runner.clone()))
            .then(|query: Query, runner: AnalysisRunner| async move {
                let (body, status) = analysis_page(query, runner).await;
                warp::reply::with_status(warp::reply::html(body), status)
            })
            .boxed()
    }

    /// The bare chart document, for opening a chart on its own.
    fn chart(&self) -> BoxedFilter<(impl Reply,)> {
        warp::get()
            .and(warp::path("chart"))
            .and(warp::path::end())
            .and(warp::query::<Query>())
            .and(with_runner(self.runner.clone()))
            .then(|query: Query, runner: AnalysisRunner| async move {
                let (body, status) = chart_document(query, runner).await;
                warp::reply::with_status(warp::reply::html(body), status)
            })
            .boxed()
    }
}

/// Reads the interaction's settings from the query string.
///
/// A missing or unparsable `min_freq` falls back to the lowest threshold.
pub fn parse_request(query: &Query) -> Result<AnalysisRequest, UnknownChartKind> {
    let url = query.get("url").map(|u| u.trim()).unwrap_or_default();
    let min_freq = query
        .get("min_freq")
        .and_then(|v| v.trim().parse::<usize>().ok());
    let chart = match query.get("chart").map(|c| c.trim()) {
        Some(chart) if !chart.is_empty() => chart.parse::<ChartKind>()?,
        _ => ChartKind::default(),
    };
    Ok(AnalysisRequest {
        url: url.to_owned(),
        min_freq,
        chart,
    })
}

fn status_for(err: &FetchError) -> StatusCode {
    match err {
        FetchError::EmptyUrl | FetchError::InvalidUrl { .. } | FetchError::UnsupportedScheme(_) => {
            StatusCode::BAD_REQUEST
        }
        FetchError::Aborted | FetchError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn error_page(query: &Query, msg: String, status: StatusCode) -> (String, StatusCode) {
    let url = query.get("url").map(String::as_str).unwrap_or_default();
    let controls = ControlsForm {
        url,
        ..ControlsForm::empty()
    };
    (ErrorPage::new(msg, controls).render(), status)
}

fn failed_request(request: &AnalysisRequest, err: &FetchError) -> (String, StatusCode) {
    let controls = ControlsForm {
        url: &request.url,
        chart: request.chart,
        min_freq: request.min_freq.unwrap_or(1),
        bounds: None,
    };
    (
        ErrorPage::new(err.to_string(), controls).render(),
        status_for(err),
    )
}

async fn analysis_page(query: Query, runner: AnalysisRunner) -> (String, StatusCode) {
    let request = match parse_request(&query) {
        Ok(request) => request,
        Err(e) => return error_page(&query, e.to_string(), StatusCode::BAD_REQUEST),
    };
    if request.url.is_empty() {
        return (IndexPage::new().render(), StatusCode::OK);
    }
    match runner.run_blocking(request.clone()).await {
        Ok(report) => (ResultsPage::new(&report).render(), StatusCode::OK),
        Err(e) => failed_request(&request, &e),
    }
}

async fn chart_document(query: Query, runner: AnalysisRunner) -> (String, StatusCode) {
    let request = match parse_request(&query) {
        Ok(request) => request,
        Err(e) => return error_page(&query, e.to_string(), StatusCode::BAD_REQUEST),
    };
    match runner.run_blocking(request.clone()).await {
        Ok(report) => (report.chart.render_embed(DEFAULT_HEIGHT), StatusCode::OK),
        Err(e) => failed_request(&request, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle_rejection;
    use pipeline::{parse_url, DocumentSource};
    use std::sync::Arc;
    use textstats::Segmenter;
    use warp::test::request;

    struct CharSegmenter;

    impl Segmenter for CharSegmenter {
        fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
            text.char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect()
        }
    }

    struct Fixtures;

    impl DocumentSource for Fixtures {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            let url = parse_url(url)?;
            match url.path() {
                "/cats" => Ok(String::from("<html><body>猫和狗。猫爱狗。</body></html>")),
                "/test" => Ok(String::from("<p>测试测试测试测试测试</p>")),
                "/empty" => Ok(String::new()),
                _ => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn app() -> impl Filter<Extract = (impl Reply,), Error = std::convert::Infallible> + Clone {
        let runner = AnalysisRunner::new(Arc::new(Fixtures), Arc::new(CharSegmenter));
        AnalysisRouter::new(runner)
            .routes()
            .recover(handle_rejection)
    }

    fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> String {
        String::from_utf8(res.body().to_vec()).unwrap()
    }

    #[test]
    fn parses_query() {
        let mut query = Query::new();
        query.insert("url".into(), " http://a.test/ ".into());
        query.insert("min_freq".into(), "3".into());
        query.insert("chart".into(), "雷达图".into());
        assert_eq!(
            parse_request(&query),
            Ok(AnalysisRequest::new("http://a.test/")
                .with_min_freq(3)
                .with_chart(ChartKind::Radar))
        );
        query.insert("min_freq".into(), "lots".into());
        query.insert("chart".into(), "".into());
        let request = parse_request(&query).unwrap();
        assert_eq!(request.min_freq, None);
        assert_eq!(request.chart, ChartKind::WordCloud);
        query.insert("chart".into(), "histogram".into());
        assert!(parse_request(&query).is_err());
    }

    #[tokio::test]
    async fn serves_index() {
        let res = request().path("/").reply(&app()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body(&res).contains(r#"action="/analyze""#));
    }

    #[tokio::test]
    async fn analyzes_page() {
        let res = request()
            .path("/analyze?url=http%3A%2F%2Fx.test%2Fcats&min_freq=1&chart=bar")
            .reply(&app())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body(&res);
        assert_eq!(html.matches("<tr><td>").count(), 4);
        assert!(html.contains("词频柱状图"));
    }

    #[tokio::test]
    async fn gauge_names_top_word() {
        let res = request()
            .path("/analyze?url=http%3A%2F%2Fx.test%2Ftest&chart=gauge")
            .reply(&app())
            .await;
        let html = body(&res);
        assert!(html.contains("词频仪表盘 - 测"));
    }

    #[tokio::test]
    async fn fetch_error_shows_one_message() {
        let res = request()
            .path("/analyze?url=http%3A%2F%2Fx.test%2Fmissing")
            .reply(&app())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let html = body(&res);
        assert_eq!(html.matches("发生错误: ").count(), 1);
        assert!(html.contains("404"));
        assert!(!html.contains("<table"));
        assert!(!html.contains("<iframe"));
    }

    #[tokio::test]
    async fn bad_url_is_a_client_error() {
        let res = request()
            .path("/analyze?url=ftp%3A%2F%2Fx.test%2Fcats")
            .reply(&app())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body(&res).contains("unsupported URL scheme"));
    }

    #[tokio::test]
    async fn unknown_chart_kind_is_rejected() {
        let res = request()
            .path("/analyze?url=http%3A%2F%2Fx.test%2Fcats&chart=histogram")
            .reply(&app())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body(&res).contains("unknown chart kind: histogram"));
    }

    #[tokio::test]
    async fn missing_url_shows_form() {
        let res = request().path("/analyze").reply(&app()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body(&res);
        assert!(!html.contains("发生错误"));
        assert!(html.contains(r#"action="/analyze""#));
    }

    #[tokio::test]
    async fn empty_page_renders_placeholders() {
        let res = request()
            .path("/analyze?url=http%3A%2F%2Fx.test%2Fempty&min_freq=4&chart=radar")
            .reply(&app())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body(&res);
        assert!(html.contains("没有符合条件的词汇"));
        assert!(html.contains("<iframe"));
    }

    #[tokio::test]
    async fn serves_bare_chart() {
        let res = request()
            .path("/chart?url=http%3A%2F%2Fx.test%2Fcats&chart=pie")
            .reply(&app())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body(&res);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#""type":"pie""#));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let res = request().path("/nowhere").reply(&app()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
