use crate::{controls::ControlsForm, escape_html, render_includes, Render, Template};

/// A single error message in place of results. Keeps the form so the user can retry.
pub struct ErrorPage<'a> {
    pub msg: String,
    pub controls: ControlsForm<'a>,
}

impl<'a> ErrorPage<'a> {
    pub fn new(msg: String, controls: ControlsForm<'a>) -> Self {
        Self { msg, controls }
    }
}

impl Render for ErrorPage<'_> {
    fn render(&self) -> String {
        render_includes(Template::ErrorPage)
            .replace("<%= controls %>", &self.controls.render())
            .replace("<%= msg %>", &escape_html(&self.msg))
    }
}
