use crate::{controls::ControlsForm, render_includes, Render, Template};

#[derive(Default)]
pub struct IndexPage {}

impl IndexPage {
    pub fn new() -> Self {
        Self {}
    }
}

impl Render for IndexPage {
    fn render(&self) -> String {
        render_includes(Template::Index).replace("<%= controls %>", &ControlsForm::empty().render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_blank_form() {
        let html = IndexPage::new().render();
        assert!(html.contains(r#"action="/analyze""#));
        assert!(html.contains(r#"value="""#));
        assert!(!html.contains("<%="));
        assert!(!html.contains("<table"));
    }
}
