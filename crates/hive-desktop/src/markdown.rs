//! Markdown to HTML for note cards.

use pulldown_cmark::{html, Event, Options, Parser};

/// Render note content with GFM strikethrough and tables.
///
/// Raw HTML in a note is shown as text, never injected into the page.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let events = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut rendered = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut rendered, events);
    rendered
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bold_is_rendered() {
        assert_eq!(
            render_markdown("Hello **world**"),
            "<p>Hello <strong>world</strong></p>\n"
        );
    }

    #[test]
    fn done_section_renders_struck_items() {
        let rendered =
            render_markdown("* Walk the dog\n\n---\n### 🍯 DONE & DUSTED\n~~* Buy milk~~");
        assert!(rendered.contains("<li>Walk the dog</li>"));
        assert!(rendered.contains("<hr />"));
        assert!(rendered.contains("<h3>🍯 DONE &amp; DUSTED</h3>"));
        assert!(rendered.contains("<del>* Buy milk</del>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let rendered = render_markdown("<script>alert(1)</script>");
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn tables_are_enabled() {
        let rendered = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(rendered.contains("<table>"));
    }
}
