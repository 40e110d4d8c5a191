//! Tag index over post listings

use indexmap::IndexMap;
use serde::Serialize;

use super::PostMeta;

/// A tag and the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Tags ordered by post count, most used first.
///
/// Ties keep the order in which tags first appear in `posts`.
pub fn tag_counts(posts: &[PostMeta]) -> Vec<TagCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags
}

/// Keep the posts carrying `tag` (exact match)
pub fn filter_by_tag(posts: Vec<PostMeta>, tag: &str) -> Vec<PostMeta> {
    posts.into_iter().filter(|post| post.has_tag(tag)).collect()
}
