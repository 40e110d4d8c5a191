//! Markdown rendering with outline anchors

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag};
use std::collections::HashMap;

use super::toc::locate_headings;
use crate::config::AnchorPolicy;

/// Markdown renderer that gives `##`/`###` headings the same ids as the outline
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    anchors: AnchorPolicy,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a specific anchor policy
    pub fn with_anchors(anchors: AnchorPolicy) -> Self {
        Self { anchors }
    }

    /// Render markdown to HTML.
    ///
    /// A heading gets an id only when the outline lists the line it starts on,
    /// and then it is exactly the outline's id.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;

        let mut outline: HashMap<usize, String> = locate_headings(markdown, self.anchors)
            .into_iter()
            .map(|(line, heading)| (line, heading.id))
            .collect();

        let events = Parser::new_ext(markdown, options)
            .into_offset_iter()
            .map(|(event, range)| match event {
                Event::Start(Tag::Heading {
                    level: level @ (HeadingLevel::H2 | HeadingLevel::H3),
                    id: None,
                    classes,
                    attrs,
                }) => {
                    let id = outline
                        .remove(&line_start(markdown, range.start))
                        .map(CowStr::from);
                    Event::Start(Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    })
                }
                other => other,
            });

        let mut html_output = String::new();
        html::push_html(&mut html_output, events);
        html_output
    }
}

/// Byte offset of the start of the line containing `offset`
fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::toc::extract_headings_with;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_outline_headings_get_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Hello, World!\n\n### Next `step`\n\n#### Deep\n");
        assert!(html.contains(r#"<h2 id="hello-world">Hello, World!</h2>"#));
        assert!(html.contains(r#"<h3 id="next-step">Next <code>step</code></h3>"#));
        assert!(html.contains("<h4>Deep</h4>"));
    }

    #[test]
    fn test_ids_match_outline() {
        let body = "## Setup\n\ntext\n\n### Install it\n\n## Setup\n\n\
                    ## See [the docs](https://example.com)\n\n## The _config_ file\n";
        for policy in [AnchorPolicy::Preserve, AnchorPolicy::Disambiguate] {
            let html = MarkdownRenderer::with_anchors(policy).render(body);
            for heading in extract_headings_with(body, policy) {
                assert!(
                    html.contains(&format!("id=\"{}\"", heading.id)),
                    "missing anchor {} in {}",
                    heading.id,
                    html
                );
            }
        }
    }

    #[test]
    fn test_inline_markup_uses_source_anchor() {
        let html = MarkdownRenderer::new()
            .render("## See [the docs](https://example.com)\n\n## The _config_ file\n");
        assert!(html.contains(r#"<h2 id="see-the-docshttpsexamplecom">"#));
        assert!(html.contains(r#"<h2 id="the-_config_-file">The <em>config</em> file</h2>"#));
    }

    #[test]
    fn test_fenced_heading_does_not_shift_numbering() {
        let body = "```md\n## Setup\n```\n\n## Setup\n";
        let outline = extract_headings_with(body, AnchorPolicy::Disambiguate);
        assert_eq!(outline[1].id, "setup-1");

        let html = MarkdownRenderer::with_anchors(AnchorPolicy::Disambiguate).render(body);
        assert!(html.contains(r#"<h2 id="setup-1">Setup</h2>"#));
        assert!(!html.contains(r#"id="setup""#));
    }

    #[test]
    fn test_setext_heading_gets_no_anchor() {
        let body = "Intro\n-----\n\n## Intro\n";
        let html = MarkdownRenderer::with_anchors(AnchorPolicy::Disambiguate).render(body);
        assert!(html.contains("<h2>Intro</h2>"));
        assert!(html.contains(r#"<h2 id="intro">Intro</h2>"#));
    }

    #[test]
    fn test_gfm_table() {
        let html = MarkdownRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
