//! Turns the top words of an analysis into ECharts options, one layout per chart kind,
//! and wraps them in a standalone HTML document for embedding.
mod kind;
mod options;

pub use kind::{ChartKind, UnknownChartKind};

use serde_json::Value;
use textstats::TopWords;

const ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@5.4.2/dist/echarts.min.js";
const WORDCLOUD_SRC: &str =
    "https://cdn.jsdelivr.net/npm/echarts-wordcloud@2.1.0/dist/echarts-wordcloud.min.js";

/// Display height of an embedded chart, in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    /// ECharts option object.
    pub option: Value,
}

impl Chart {
    /// Shapes `top` for `kind`. Empty input gives a chart with no data rather than an error.
    pub fn build(kind: ChartKind, top: &TopWords) -> Chart {
        let spec = kind.spec();
        (spec.build)(spec, top)
    }

    pub fn option_json(&self) -> String {
        // A literal "</" inside the inline script would end it early.
        self.option.to_string().replace("</", "<\\/")
    }

    /// Standalone HTML page that draws the chart into a div of fixed height.
    pub fn render_embed(&self, height: u32) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{echarts}"></script>
<script src="{wordcloud}"></script>
</head>
<body style="margin:0">
<div id="chart" style="width:100%;height:{height}px;"></div>
<script>
var chart = echarts.init(document.getElementById("chart"));
chart.setOption({option});
window.addEventListener("resize", function () {{ chart.resize(); }});
</script>
</body>
</html>"#,
            title = self.title.replace('&', "&amp;").replace('<', "&lt;"),
            echarts = ECHARTS_SRC,
            wordcloud = WORDCLOUD_SRC,
            height = height,
            option = self.option_json(),
        )
    }
}
