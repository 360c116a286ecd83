use charts::ChartKind;
use pipeline::AnalysisRequest;

pub mod controls;
pub mod error_page;
pub mod index_page;
pub mod results_page;

pub trait Render {
    fn render(&self) -> String;
}

/// Page fragments compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Index,
    Results,
    ErrorPage,
    Controls,
    Styles,
    Nav,
    Footer,
}

impl Template {
    pub fn source(self) -> &'static str {
        match self {
            Template::Index => include_str!("../templates/index.html"),
            Template::Results => include_str!("../templates/results.html"),
            Template::ErrorPage => include_str!("../templates/error_page.html"),
            Template::Controls => include_str!("../templates/controls.html"),
            Template::Styles => include_str!("../templates/styles.html"),
            Template::Nav => include_str!("../templates/nav.html"),
            Template::Footer => include_str!("../templates/footer.html"),
        }
    }

    fn from_include(name: &str) -> Option<Template> {
        match name {
            "styles" => Some(Template::Styles),
            "nav" => Some(Template::Nav),
            "footer" => Some(Template::Footer),
            _ => None,
        }
    }
}

pub fn parse_includes(include_str: &str) -> Option<&str> {
    include_str
        .strip_prefix("<%= include \"")?
        .strip_suffix("\" %>")
}

/// Inlines `<%= include "name" %>` lines; other lines pass through trimmed.
pub fn render_includes(template: Template) -> String {
    let lines = template.source().lines().map(|line| {
        let line = line.trim();
        match parse_includes(line) {
            Some(name) => Template::from_include(name)
                .map(|t| t.source().trim().to_string())
                .unwrap_or_default(),
            None => line.to_string(),
        }
    });
    lines.collect::<Vec<String>>().join(" ")
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Query string that reproduces `request` with a different chart kind.
pub fn analysis_query(request: &AnalysisRequest, chart: ChartKind) -> String {
    let mut query = format!("url={}", urlencoding::encode(&request.url));
    if let Some(min_freq) = request.min_freq {
        query.push_str(&format!("&min_freq={}", min_freq));
    }
    query.push_str(&format!("&chart={}", chart.slug()));
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_includes() {
        let page = render_includes(Template::Index);
        assert!(page.contains("<style>"));
        assert!(page.contains("文章URL文本分析"));
        assert!(!page.contains("include"));
        assert!(page.contains("<%= controls %>"));
    }

    #[test]
    fn parses_include_lines() {
        assert_eq!(parse_includes("<%= include \"nav\" %>"), Some("nav"));
        assert_eq!(parse_includes("<%= controls %>"), None);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn builds_analysis_links() {
        let request = AnalysisRequest::new("https://example.com/a?b=1&c=中").with_min_freq(3);
        assert_eq!(
            analysis_query(&request, ChartKind::Radar),
            "url=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1%26c%3D%E4%B8%AD&min_freq=3&chart=radar"
        );
        let request = AnalysisRequest::new("http://x.test/");
        assert_eq!(
            analysis_query(&request, ChartKind::Bar),
            "url=http%3A%2F%2Fx.test%2F&chart=bar"
        );
    }
}
