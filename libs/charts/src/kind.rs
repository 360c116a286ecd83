use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::options::{self, ChartSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartKind {
    #[default]
    WordCloud,
    Bar,
    Line,
    Pie,
    Scatter,
    Radar,
    Gauge,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown chart kind: {0}")]
pub struct UnknownChartKind(pub String);

/// One entry per kind, indexed by the enum discriminant.
pub(crate) static RENDERERS: [ChartSpec; 7] = [
    ChartSpec {
        kind: ChartKind::WordCloud,
        slug: "word-cloud",
        label: "词云",
        build: options::word_cloud,
    },
    ChartSpec {
        kind: ChartKind::Bar,
        slug: "bar",
        label: "柱状图",
        build: options::bar,
    },
    ChartSpec {
        kind: ChartKind::Line,
        slug: "line",
        label: "折线图",
        build: options::line,
    },
    ChartSpec {
        kind: ChartKind::Pie,
        slug: "pie",
        label: "饼图",
        build: options::pie,
    },
    ChartSpec {
        kind: ChartKind::Scatter,
        slug: "scatter",
        label: "散点图",
        build: options::scatter,
    },
    ChartSpec {
        kind: ChartKind::Radar,
        slug: "radar",
        label: "雷达图",
        build: options::radar,
    },
    ChartSpec {
        kind: ChartKind::Gauge,
        slug: "gauge",
        label: "仪表盘",
        build: options::gauge,
    },
];

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::WordCloud,
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::Radar,
        ChartKind::Gauge,
    ];

    pub(crate) fn spec(self) -> &'static ChartSpec {
        &RENDERERS[self as usize]
    }

    /// Identifier used in query strings.
    pub fn slug(self) -> &'static str {
        self.spec().slug
    }

    /// Name shown to the user.
    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    /// Accepts either the slug or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RENDERERS
            .iter()
            .find(|spec| spec.slug.eq_ignore_ascii_case(s) || spec.label == s)
            .map(|spec| spec.kind)
            .ok_or_else(|| UnknownChartKind(s.to_owned()))
    }
}
