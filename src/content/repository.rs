//! Post repository - reads posts from the content directory

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::FrontMatter;
use super::post::{sort_by_date, Post, PostMeta};
use super::reading_time::WORDS_PER_MINUTE;
use super::toc::{extract_headings_with, Heading};
use super::ContentError;
use crate::config::{AnchorPolicy, SiteConfig};

/// Read-only access to the posts under one content directory.
///
/// Every call reads the files again; wrap it in [`crate::cache::PostCache`]
/// to keep results between calls.
#[derive(Debug, Clone)]
pub struct PostRepository {
    root: PathBuf,
    /// Supported extensions, highest priority first
    extensions: Vec<String>,
    words_per_minute: u32,
    anchors: AnchorPolicy,
}

impl PostRepository {
    /// Create a repository over `root` with default settings
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["mdx".to_string(), "md".to_string()],
            words_per_minute: WORDS_PER_MINUTE,
            anchors: AnchorPolicy::default(),
        }
    }

    /// Create a repository over `root` using the site settings
    pub fn with_config<P: Into<PathBuf>>(root: P, config: &SiteConfig) -> Self {
        Self {
            root: root.into(),
            extensions: config.extensions.clone(),
            words_per_minute: config.reading.words_per_minute,
            anchors: config.toc.anchors,
        }
    }

    /// Anchor policy for outlines and rendered headings
    pub fn anchors(&self) -> AnchorPolicy {
        self.anchors
    }

    /// All public posts, newest first, without bodies
    pub fn list_posts(&self) -> Vec<PostMeta> {
        let mut posts: Vec<PostMeta> = self
            .content_files()
            .into_iter()
            .filter_map(|(slug, path)| {
                let (fm, body) = self.read_logged(&path)?;
                if fm.draft {
                    tracing::debug!("Skipping draft {:?}", path);
                    return None;
                }
                Some(PostMeta::from_parts(&slug, &fm, &body, self.words_per_minute))
            })
            .collect();

        sort_by_date(&mut posts);
        posts
    }

    /// Slugs of all public posts, in file-name order
    pub fn list_slugs(&self) -> Vec<String> {
        self.content_files()
            .into_iter()
            .filter(|(_, path)| match self.read_logged(path) {
                Some((fm, _)) => !fm.draft,
                None => false,
            })
            .map(|(slug, _)| slug)
            .collect()
    }

    /// The `n` most recent public posts
    pub fn recent_posts(&self, n: usize) -> Vec<PostMeta> {
        let mut posts = self.list_posts();
        posts.truncate(n);
        posts
    }

    /// Public posts carrying `tag`, newest first
    pub fn posts_tagged(&self, tag: &str) -> Vec<PostMeta> {
        super::tags::filter_by_tag(self.list_posts(), tag)
    }

    /// Load a single public post with its body.
    ///
    /// Missing files, drafts and slugs that are not plain file names are all
    /// [`ContentError::NotFound`].
    pub fn get_post(&self, slug: &str) -> Result<Post, ContentError> {
        let path = self
            .locate(slug)
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))?;

        let (fm, body) = read_post_file(&path)?;
        if fm.draft {
            tracing::debug!("Refusing draft {:?}", path);
            return Err(ContentError::NotFound(slug.to_string()));
        }

        let meta = PostMeta::from_parts(slug, &fm, &body, self.words_per_minute);
        Ok(Post {
            meta,
            content: body,
        })
    }

    /// Like [`get_post`](Self::get_post), with every failure as `None`
    pub fn find_post(&self, slug: &str) -> Option<Post> {
        match self.get_post(slug) {
            Ok(post) => Some(post),
            Err(ContentError::NotFound(_)) => None,
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    /// Outline of a public post
    pub fn headings(&self, slug: &str) -> Result<Vec<Heading>, ContentError> {
        let post = self.get_post(slug)?;
        Ok(extract_headings_with(&post.content, self.anchors))
    }

    /// Slug of a content file path, if it is one this repository would read
    pub fn slug_for_path(&self, path: &Path) -> Option<String> {
        if path.parent()? != self.root.as_path() {
            return None;
        }
        let (slug, _) = self.split_file_name(path)?;
        Some(slug)
    }

    /// Content files keyed by slug, in file-name order.
    ///
    /// When one slug exists with several extensions, the highest-priority
    /// extension wins.
    fn content_files(&self) -> Vec<(String, PathBuf)> {
        if !self.root.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", self.root);
            return Vec::new();
        }

        let mut files: IndexMap<String, (usize, PathBuf)> = IndexMap::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some((slug, priority)) = self.split_file_name(path) else {
                continue;
            };

            match files.get(&slug) {
                Some((existing, _)) if *existing <= priority => {
                    tracing::debug!("Ignoring {:?}, slug {} already taken", path, slug);
                }
                _ => {
                    files.insert(slug, (priority, path.to_path_buf()));
                }
            }
        }

        files
            .into_iter()
            .map(|(slug, (_, path))| (slug, path))
            .collect()
    }

    /// Split a file name into its slug and extension priority
    fn split_file_name(&self, path: &Path) -> Option<(String, usize)> {
        let slug = path.file_stem()?.to_str()?;
        if slug.is_empty() || slug.starts_with('.') {
            return None;
        }
        let ext = path.extension()?.to_str()?;
        let priority = self.extensions.iter().position(|e| e == ext)?;
        Some((slug.to_string(), priority))
    }

    /// Find the file for `slug`, honoring extension priority
    fn locate(&self, slug: &str) -> Option<PathBuf> {
        if !is_plain_slug(slug) {
            return None;
        }
        self.extensions
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
    }

    fn read_logged(&self, path: &Path) -> Option<(FrontMatter, String)> {
        match read_post_file(path) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Failed to load post: {}", e);
                None
            }
        }
    }
}

/// A slug that names a file directly inside the content root
fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains("..")
}

fn read_post_file(path: &Path) -> Result<(FrontMatter, String), ContentError> {
    let bytes = fs::read(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);
    let (fm, body) = FrontMatter::parse(&content);
    let body = body.to_string();
    Ok((fm, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn site() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            "raft.mdx",
            "---\ntitle: Raft\npublishedAt: 2023-06-01\ntags: [go]\n---\n## Leader election\n\nBody text.\n",
        );
        write(
            &dir,
            "sidekiq.mdx",
            "---\ntitle: Sidekiq\npublishedAt: 2024-01-01\ntags: [ruby]\n---\nBody.\n",
        );
        write(&dir, "notes.mdx", "No front matter at all.\n");
        write(
            &dir,
            "wip.mdx",
            "---\ntitle: Work in progress\ntags: [draft]\n---\nSecret.\n",
        );
        write(
            &dir,
            "badge.mdx",
            "---\ntitle: Coming soon\nbadge: Draft\n---\nSecret.\n",
        );
        write(&dir, "readme.txt", "not content");
        dir
    }

    #[test]
    fn test_list_posts_excludes_drafts_and_sorts() {
        let dir = site();
        let repo = PostRepository::new(dir.path());
        let slugs: Vec<_> = repo.list_posts().into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, vec!["sidekiq", "raft", "notes"]);
    }

    #[test]
    fn test_list_slugs_matches_list_posts() {
        let dir = site();
        let repo = PostRepository::new(dir.path());
        let mut listed: Vec<_> = repo.list_posts().into_iter().map(|p| p.slug).collect();
        listed.sort();
        assert_eq!(repo.list_slugs(), listed);
    }

    #[test]
    fn test_get_post() {
        let dir = site();
        let repo = PostRepository::new(dir.path());
        let post = repo.get_post("raft").unwrap();
        assert_eq!(post.title, "Raft");
        assert_eq!(post.tags, vec!["go"]);
        assert_eq!(post.reading_time, "1 min read");
        assert!(post.content.starts_with("## Leader election"));
    }

    #[test]
    fn test_get_post_defaults() {
        let dir = site();
        let post = PostRepository::new(dir.path()).get_post("notes").unwrap();
        assert_eq!(post.title, "notes");
        assert_eq!(post.summary, "");
        assert_eq!(post.published_at, None);
        assert_eq!(post.content, "No front matter at all.\n");
    }

    #[test]
    fn test_drafts_not_found() {
        let dir = site();
        let repo = PostRepository::new(dir.path());
        for slug in ["wip", "badge"] {
            assert!(repo.get_post(slug).unwrap_err().is_not_found());
            assert!(repo.find_post(slug).is_none());
        }
    }

    #[test]
    fn test_missing_and_invalid_slugs() {
        let dir = site();
        let repo = PostRepository::new(dir.path());
        for slug in ["nope", "", "../raft", "sub/raft", ".hidden", "readme"] {
            assert!(repo.get_post(slug).unwrap_err().is_not_found(), "{}", slug);
        }
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PostRepository::new(dir.path().join("content"));
        assert!(repo.list_posts().is_empty());
        assert!(repo.list_slugs().is_empty());
        assert!(repo.get_post("anything").unwrap_err().is_not_found());
    }

    #[test]
    fn test_extension_priority() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "dup.md", "---\ntitle: From md\n---\n");
        write(&dir, "dup.mdx", "---\ntitle: From mdx\n---\n");
        let repo = PostRepository::new(dir.path());

        let posts = repo.list_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "From mdx");
        assert_eq!(repo.get_post("dup").unwrap().title, "From mdx");
    }

    #[test]
    fn test_malformed_file_does_not_abort_listing() {
        let dir = site();
        write(&dir, "broken.mdx", "---\ntitle: [oops\n---\nStill a post.\n");
        let repo = PostRepository::new(dir.path());
        let broken = repo
            .list_posts()
            .into_iter()
            .find(|p| p.slug == "broken")
            .unwrap();
        assert_eq!(broken.title, "broken");
        assert_eq!(repo.list_posts().len(), 4);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = site();
        fs::write(
            dir.path().join("latin1.mdx"),
            b"---\ntitle: Caf\xe9\n---\nBody with a stray \xff byte.\n",
        )
        .unwrap();
        let repo = PostRepository::new(dir.path());
        let post = repo.get_post("latin1").unwrap();
        assert_eq!(post.title, "Caf\u{FFFD}");
        assert!(post.content.contains("stray \u{FFFD} byte"));
        assert!(repo.list_slugs().contains(&"latin1".to_string()));
    }

    #[test]
    fn test_anchor_policy_from_config() {
        let mut config = SiteConfig::default();
        assert_eq!(PostRepository::new("content").anchors(), AnchorPolicy::Preserve);
        config.toc.anchors = AnchorPolicy::Disambiguate;
        let repo = PostRepository::with_config("content", &config);
        assert_eq!(repo.anchors(), AnchorPolicy::Disambiguate);
    }

    #[test]
    fn test_headings_and_tag_filter() {
        let dir = site();
        let repo = PostRepository::new(dir.path());
        let headings = repo.headings("raft").unwrap();
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].id, "leader-election");

        let ruby: Vec<_> = repo.posts_tagged("ruby").into_iter().map(|p| p.slug).collect();
        assert_eq!(ruby, vec!["sidekiq"]);
        assert_eq!(repo.recent_posts(1)[0].slug, "sidekiq");
    }

    #[test]
    fn test_slug_for_path() {
        let dir = site();
        let repo = PostRepository::new(dir.path());
        assert_eq!(
            repo.slug_for_path(&dir.path().join("raft.mdx")).as_deref(),
            Some("raft")
        );
        assert_eq!(repo.slug_for_path(&dir.path().join("readme.txt")), None);
        assert_eq!(
            repo.slug_for_path(&dir.path().join("nested").join("x.mdx")),
            None
        );
    }
}
