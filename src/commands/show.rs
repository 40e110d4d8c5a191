//! Show a single post

use anyhow::Result;
use std::fmt::Write as _;

use crate::content::{MarkdownRenderer, Post};
use crate::Folio;

/// How to print the post body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowFormat {
    /// Metadata header followed by the raw body
    #[default]
    Text,
    /// Body rendered to HTML
    Html,
    /// The whole post as JSON
    Json,
}

/// Print a public post. Drafts and missing slugs are "not found" errors.
pub fn run(folio: &Folio, slug: &str, format: ShowFormat) -> Result<()> {
    let repository = folio.repository();
    let post = repository.get_post(slug)?;

    let output = match format {
        ShowFormat::Text => format_post(&post),
        ShowFormat::Html => {
            MarkdownRenderer::with_anchors(repository.anchors()).render(&post.content)
        }
        ShowFormat::Json => serde_json::to_string_pretty(&post)? + "\n",
    };
    print!("{}", output);

    Ok(())
}

/// Metadata header followed by the raw body
pub fn format_post(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", post.title);
    if let Some(date) = post.formatted_date() {
        let _ = writeln!(out, "{} · {}", date, post.reading_time);
    } else {
        let _ = writeln!(out, "{}", post.reading_time);
    }
    if !post.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", post.tags.join(", "));
    }
    if !post.summary.is_empty() {
        let _ = writeln!(out, "\n{}", post.summary);
    }
    let _ = write!(out, "\n{}", post.content);
    if !post.content.ends_with('\n') {
        out.push('\n');
    }
    out
}
