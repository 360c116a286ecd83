use scraper::{ElementRef, Html};

// Text inside these never reaches the reader.
const INVISIBLE_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Pulls the readable text out of an HTML document and normalizes its whitespace.
///
/// Parsing is lenient: broken markup still yields whatever text html5ever recovers.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::with_capacity(html.len() / 2);
    collect_text(document.root_element(), &mut text);
    collapse_whitespace(&text)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !INVISIBLE_TAGS.contains(&child_element.value().name()) {
                collect_text(child_element, out);
            }
        }
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}
