//! Post models

use chrono::NaiveDateTime;
use serde::Serialize;
use std::ops::Deref;

use super::frontmatter::FrontMatter;
use super::reading_time;
use crate::helpers;

/// Metadata of a post, as shown in listings (no body)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// File name without extension; lookup key and URL segment
    pub slug: String,

    pub title: String,

    pub summary: String,

    pub published_at: Option<NaiveDateTime>,

    /// Cover illustration
    pub image: Option<String>,

    pub tags: Vec<String>,

    /// Derived from the body on every load
    pub reading_time: String,

    pub badge: Option<String>,
}

impl PostMeta {
    /// Build the listing record from parsed front-matter and the body
    pub fn from_parts(slug: &str, fm: &FrontMatter, body: &str, words_per_minute: u32) -> Self {
        Self {
            slug: slug.to_string(),
            title: fm.title.clone().unwrap_or_else(|| slug.to_string()),
            summary: fm.summary.clone().unwrap_or_default(),
            published_at: fm.published_at,
            image: fm.image.clone(),
            tags: fm.tags.clone(),
            reading_time: reading_time::estimate_with(body, words_per_minute).text,
            badge: fm.badge.clone(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Publication date in long US form, e.g. "January 5, 2024"
    pub fn formatted_date(&self) -> Option<String> {
        self.published_at.as_ref().map(helpers::full_date)
    }
}

/// A single post with its raw markup body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,

    /// Raw markup body, front-matter removed
    pub content: String,
}

impl Deref for Post {
    type Target = PostMeta;

    fn deref(&self) -> &PostMeta {
        &self.meta
    }
}

/// Order posts newest first.
///
/// Undated posts go after every dated post and keep their relative order.
pub fn sort_by_date(posts: &mut [PostMeta]) {
    posts.sort_by(|a, b| match (a.published_at, b.published_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
