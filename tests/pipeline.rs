//! End-to-end checks of the content pipeline over a content directory

use std::fs;
use std::path::Path;

use folio::cache::PostCache;
use folio::config::{AnchorPolicy, SiteConfig};
use folio::content::{reading_time, toc, PostRepository};
use folio::Folio;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn blog() -> tempfile::TempDir {
    let base = tempfile::tempdir().unwrap();
    let content = base.path().join("content");
    fs::create_dir(&content).unwrap();

    write(
        &content,
        "new-year.mdx",
        "---\ntitle: New Year\npublishedAt: 2024-01-01\ntags: [life]\n---\n## Plans\n\n### Reading\n\n# Title\n",
    );
    write(
        &content,
        "summer.mdx",
        "---\ntitle: Summer\npubDate: 2023-06-01\ntags: [ruby, life]\n---\nWarm.\n",
    );
    write(&content, "scratch.mdx", "---\ntitle: Scratch\n---\nUndated.\n");
    write(
        &content,
        "hidden-tag.mdx",
        "---\ntitle: Hidden\ntags: [DRAFT]\n---\nNope.\n",
    );
    write(
        &content,
        "hidden-badge.mdx",
        "---\ntitle: Hidden too\nbadge: draft - do not publish\n---\nNope.\n",
    );
    base
}

#[test]
fn public_posts_appear_in_both_listings() {
    let base = blog();
    let repo = Folio::new(base.path()).unwrap().repository();

    let listed: Vec<_> = repo.list_posts().into_iter().map(|p| p.slug).collect();
    let slugs = repo.list_slugs();

    for slug in ["new-year", "summer", "scratch"] {
        assert!(listed.iter().any(|s| s == slug), "{} missing from list", slug);
        assert!(slugs.iter().any(|s| s == slug), "{} missing from slugs", slug);
    }
}

#[test]
fn drafts_appear_nowhere() {
    let base = blog();
    let repo = Folio::new(base.path()).unwrap().repository();

    let listed: Vec<_> = repo.list_posts().into_iter().map(|p| p.slug).collect();
    let slugs = repo.list_slugs();

    for slug in ["hidden-tag", "hidden-badge"] {
        assert!(!listed.iter().any(|s| s == slug));
        assert!(!slugs.iter().any(|s| s == slug));
        assert!(repo.get_post(slug).unwrap_err().is_not_found());
    }
}

#[test]
fn listing_is_newest_first_and_keeps_undated() {
    let base = blog();
    let repo = Folio::new(base.path()).unwrap().repository();

    let listed: Vec<_> = repo.list_posts().into_iter().map(|p| p.slug).collect();
    assert_eq!(listed.len(), 3);
    let new_year = listed.iter().position(|s| s == "new-year").unwrap();
    let summer = listed.iter().position(|s| s == "summer").unwrap();
    assert!(new_year < summer);
    assert!(listed.iter().any(|s| s == "scratch"));
}

#[test]
fn lookup_of_missing_slug_is_not_found() {
    let base = blog();
    let repo = Folio::new(base.path()).unwrap().repository();
    assert!(repo.find_post("does-not-exist").is_none());
    assert!(repo.get_post("does-not-exist").unwrap_err().is_not_found());
}

#[test]
fn missing_content_directory_degrades_to_empty() {
    let repo = PostRepository::new("/nonexistent/folio/content");
    assert!(repo.list_posts().is_empty());
    assert!(repo.list_slugs().is_empty());
    assert!(repo.find_post("anything").is_none());
}

#[test]
fn outline_has_second_and_third_level_only() {
    let base = blog();
    let repo = Folio::new(base.path()).unwrap().repository();
    let headings = repo.headings("new-year").unwrap();
    let texts: Vec<_> = headings.iter().map(|h| (h.text.as_str(), h.level)).collect();
    assert_eq!(texts, vec![("Plans", 2), ("Reading", 3)]);
    assert_eq!(toc::slugify("Hello, World!"), "hello-world");
}

#[test]
fn reading_time_grows_with_length() {
    let short = reading_time::estimate(&"word ".repeat(100));
    let long = reading_time::estimate(&"word ".repeat(1000));
    assert!(long.minutes > short.minutes);
    assert_eq!(long.text, "5 min read");
}

#[test]
fn configured_anchor_policy_reaches_outline() {
    let base = tempfile::tempdir().unwrap();
    write(base.path(), "faq.md", "## Why\n## Why\n");
    let mut config = SiteConfig::default();
    config.toc.anchors = AnchorPolicy::Disambiguate;

    let repo = PostRepository::with_config(base.path(), &config);
    let ids: Vec<_> = repo.headings("faq").unwrap().into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec!["why", "why-1"]);
}

#[test]
fn cache_serves_stale_until_invalidated() {
    let base = blog();
    let folio = Folio::new(base.path()).unwrap();
    let mut cache = PostCache::new(folio.repository());
    assert_eq!(cache.list().len(), 3);

    let path = folio.content_dir.join("scratch.mdx");
    write(&folio.content_dir, "scratch.mdx", "---\ntags: [draft]\n---\n");
    assert_eq!(cache.list().len(), 3);

    cache.invalidate_path(&path);
    assert_eq!(cache.list().len(), 2);
}
