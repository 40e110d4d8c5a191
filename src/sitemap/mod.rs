//! Sitemap generation
//!
//! Lists the site root, the blog index and every public post.

use chrono::NaiveDateTime;
use std::fmt::Write as _;

use crate::config::SiteConfig;
use crate::content::PostMeta;
use crate::helpers::{self, BLOG_PATH};

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// One `<url>` entry
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDateTime,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Sitemap entries for the site. Undated posts use `now` as their last
/// modification.
pub fn sitemap_entries(
    config: &SiteConfig,
    posts: &[PostMeta],
    now: NaiveDateTime,
) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry {
            url: helpers::full_url_for(config, ""),
            last_modified: now,
            change_frequency: ChangeFrequency::Weekly,
            priority: 1.0,
        },
        SitemapEntry {
            url: helpers::full_url_for(config, BLOG_PATH),
            last_modified: now,
            change_frequency: ChangeFrequency::Weekly,
            priority: 0.8,
        },
    ];

    entries.extend(posts.iter().map(|post| SitemapEntry {
        url: helpers::full_url_for(config, &helpers::post_path(&post.slug)),
        last_modified: post.published_at.unwrap_or(now),
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.7,
    }));

    entries
}

/// Render the sitemap XML
pub fn build_sitemap(config: &SiteConfig, posts: &[PostMeta], now: NaiveDateTime) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in sitemap_entries(config, posts, now) {
        // Writing to a String cannot fail
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.url),
            helpers::date_xml(&entry.last_modified),
            entry.change_frequency.as_str(),
            entry.priority
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
