//! In-memory post cache
//!
//! [`PostRepository`] reads every file on each call. `PostCache` keeps loaded
//! posts and the listing between calls until they are invalidated, either
//! by hand or from file-system events (see `commands::watch`).

use std::collections::HashMap;
use std::path::Path;

use crate::content::{ContentError, Post, PostMeta, PostRepository};

/// Posts memoized by slug, plus the metadata listing
#[derive(Debug)]
pub struct PostCache {
    repository: PostRepository,
    posts: HashMap<String, Post>,
    listing: Option<Vec<PostMeta>>,
}

impl PostCache {
    pub fn new(repository: PostRepository) -> Self {
        Self {
            repository,
            posts: HashMap::new(),
            listing: None,
        }
    }

    /// A public post, loaded on first access. Failures are not cached.
    pub fn get(&mut self, slug: &str) -> Result<&Post, ContentError> {
        if !self.posts.contains_key(slug) {
            let post = self.repository.get_post(slug)?;
            self.posts.insert(slug.to_string(), post);
        }
        Ok(&self.posts[slug])
    }

    /// The public listing, newest first
    pub fn list(&mut self) -> &[PostMeta] {
        self.listing
            .get_or_insert_with(|| self.repository.list_posts())
            .as_slice()
    }

    /// Drop one post and the listing
    pub fn invalidate(&mut self, slug: &str) {
        self.posts.remove(slug);
        self.listing = None;
    }

    /// Drop whatever a change to `path` may have made stale.
    ///
    /// Returns the affected slug when `path` is a content file; any other path
    /// clears every cached post.
    pub fn invalidate_path(&mut self, path: &Path) -> Option<String> {
        match self.repository.slug_for_path(path) {
            Some(slug) => {
                self.invalidate(&slug);
                Some(slug)
            }
            None => {
                self.clear();
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.posts.clear();
        self.listing = None;
    }

    /// Number of posts held
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
