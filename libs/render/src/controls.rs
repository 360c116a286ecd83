use charts::ChartKind;

use crate::{escape_html, render_includes, Render, Template};

/// The URL field, threshold control and chart selector shared by every page.
pub struct ControlsForm<'a> {
    pub url: &'a str,
    pub chart: ChartKind,
    pub min_freq: usize,
    /// Known once a page has been counted; the threshold becomes a slider.
    pub bounds: Option<(usize, usize)>,
}

impl<'a> ControlsForm<'a> {
    pub fn empty() -> Self {
        Self {
            url: "",
            chart: ChartKind::default(),
            min_freq: 1,
            bounds: None,
        }
    }

    fn min_freq_input(&self) -> String {
        match self.bounds {
            Some((low, high)) => format!(
                r#"<input type="range" id="min_freq" name="min_freq" min="{low}" max="{high}" value="{value}" oninput="this.nextElementSibling.value = this.value" onchange="this.form.submit()"> <output>{value}</output>"#,
                low = low,
                high = high,
                value = self.min_freq,
            ),
            None => format!(
                r#"<input type="number" id="min_freq" name="min_freq" min="1" step="1" value="{}">"#,
                self.min_freq
            ),
        }
    }

    fn chart_options(&self) -> String {
        ChartKind::ALL
            .iter()
            .map(|kind| {
                let selected = if *kind == self.chart { " selected" } else { "" };
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    kind.slug(),
                    selected,
                    kind.label()
                )
            })
            .collect::<Vec<String>>()
            .join("")
    }
}

impl Render for ControlsForm<'_> {
    fn render(&self) -> String {
        render_includes(Template::Controls)
            .replace("<%= min_freq_input %>", &self.min_freq_input())
            .replace("<%= chart_options %>", &self.chart_options())
            .replace("<%= url %>", &escape_html(self.url))
    }
}
