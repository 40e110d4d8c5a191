//! List site content

use anyhow::Result;
use std::fmt::Write as _;

use crate::content::{tags, PostMeta};
use crate::helpers;
use crate::Folio;

/// Listing filters
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only posts carrying this tag
    pub tag: Option<String>,
    /// At most this many posts
    pub limit: Option<usize>,
    /// Print JSON instead of text
    pub json: bool,
}

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, options: &ListOptions) -> Result<()> {
    let repository = folio.repository();

    let output = match content_type {
        "post" | "posts" => {
            let mut posts = match &options.tag {
                Some(tag) => repository.posts_tagged(tag),
                None => repository.list_posts(),
            };
            if let Some(limit) = options.limit {
                posts.truncate(limit);
            }
            if options.json {
                serde_json::to_string_pretty(&posts)?
            } else {
                format_posts(&posts)
            }
        }
        "tag" | "tags" => {
            let counts = tags::tag_counts(&repository.list_posts());
            if options.json {
                serde_json::to_string_pretty(&counts)?
            } else {
                let mut out = format!("Tags ({}):\n", counts.len());
                for tag in counts {
                    let _ = writeln!(out, "  {} ({})", tag.name, tag.count);
                }
                out
            }
        }
        "slug" | "slugs" => {
            let slugs = repository.list_slugs();
            if options.json {
                serde_json::to_string_pretty(&slugs)?
            } else {
                slugs.iter().map(|slug| format!("{}\n", slug)).collect()
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, slug",
                content_type
            );
        }
    };

    print!("{}", output);
    if options.json {
        println!();
    }

    Ok(())
}

/// One line per post: date, title, slug and reading time
pub fn format_posts(posts: &[PostMeta]) -> String {
    let mut out = format!("Posts ({}):\n", posts.len());
    for post in posts {
        let date = post
            .published_at
            .as_ref()
            .map(helpers::short_date)
            .unwrap_or_else(|| "----------".to_string());
        let _ = writeln!(
            out,
            "  {} - {} [{}] ({})",
            date, post.title, post.slug, post.reading_time
        );
    }
    out
}
