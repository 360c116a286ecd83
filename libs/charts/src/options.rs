use serde_json::{json, Value};
use textstats::TopWords;

use crate::{Chart, ChartKind};

const SERIES_NAME: &str = "词频";
const WORD_SIZE_RANGE: [u32; 2] = [20, 100];
const GAUGE_DEFAULT_MAX: usize = 100;

pub(crate) struct ChartSpec {
    pub kind: ChartKind,
    pub slug: &'static str,
    pub label: &'static str,
    pub build: fn(&ChartSpec, &TopWords) -> Chart,
}

impl ChartSpec {
    fn title(&self) -> String {
        format!("{}{}", SERIES_NAME, self.label)
    }

    fn chart(&self, title: String, option: Value) -> Chart {
        Chart {
            kind: self.kind,
            title,
            option,
        }
    }
}

fn name_value_pairs(top: &TopWords) -> Vec<Value> {
    top.iter()
        .map(|e| json!({ "name": e.word, "value": e.count }))
        .collect()
}

fn base_option(title: &str) -> Value {
    json!({
        "title": { "text": title },
        "tooltip": {},
    })
}

fn with(mut option: Value, extra: Value) -> Value {
    if let (Some(target), Value::Object(extra)) = (option.as_object_mut(), extra) {
        target.extend(extra);
    }
    option
}

pub(crate) fn word_cloud(spec: &ChartSpec, top: &TopWords) -> Chart {
    let title = spec.title();
    let option = with(
        base_option(&title),
        json!({
            "series": [{
                "type": "wordCloud",
                "sizeRange": WORD_SIZE_RANGE,
                "data": name_value_pairs(top),
            }],
        }),
    );
    spec.chart(title, option)
}

pub(crate) fn pie(spec: &ChartSpec, top: &TopWords) -> Chart {
    let title = spec.title();
    let option = with(
        base_option(&title),
        json!({
            "legend": { "type": "scroll", "top": "bottom" },
            "series": [{
                "type": "pie",
                "radius": "60%",
                "data": name_value_pairs(top),
            }],
        }),
    );
    spec.chart(title, option)
}

// Bar, line and scatter share the category x axis layout.
fn category_axis(spec: &ChartSpec, top: &TopWords, series_type: &str) -> Chart {
    let title = spec.title();
    let option = with(
        base_option(&title),
        json!({
            "legend": { "data": [SERIES_NAME] },
            "xAxis": { "type": "category", "data": top.labels() },
            "yAxis": { "type": "value" },
            "series": [{
                "name": SERIES_NAME,
                "type": series_type,
                "data": top.values(),
            }],
        }),
    );
    spec.chart(title, option)
}

pub(crate) fn bar(spec: &ChartSpec, top: &TopWords) -> Chart {
    category_axis(spec, top, "bar")
}

pub(crate) fn line(spec: &ChartSpec, top: &TopWords) -> Chart {
    category_axis(spec, top, "line")
}

pub(crate) fn scatter(spec: &ChartSpec, top: &TopWords) -> Chart {
    category_axis(spec, top, "scatter")
}

pub(crate) fn radar(spec: &ChartSpec, top: &TopWords) -> Chart {
    let title = spec.title();
    let max = top.max_count().unwrap_or(0);
    let indicators = top
        .labels()
        .into_iter()
        .map(|name| json!({ "name": name, "max": max }))
        .collect::<Vec<Value>>();
    let option = with(
        base_option(&title),
        json!({
            "legend": { "data": [SERIES_NAME] },
            "radar": { "indicator": indicators },
            "series": [{
                "name": SERIES_NAME,
                "type": "radar",
                "data": [{ "name": SERIES_NAME, "value": top.values() }],
            }],
        }),
    );
    spec.chart(title, option)
}

/// Only the highest count is shown; the title names its word.
pub(crate) fn gauge(spec: &ChartSpec, top: &TopWords) -> Chart {
    let (title, data, max) = match top.first() {
        Some(first) => (
            format!("{} - {}", spec.title(), first.word),
            vec![json!({ "name": first.word, "value": first.count })],
            first.count.max(GAUGE_DEFAULT_MAX),
        ),
        None => (spec.title(), Vec::new(), GAUGE_DEFAULT_MAX),
    };
    let option = with(
        base_option(&title),
        json!({
            "series": [{
                "type": "gauge",
                "min": 0,
                "max": max,
                "detail": { "formatter": "{value}" },
                "data": data,
            }],
        }),
    );
    spec.chart(title, option)
}
