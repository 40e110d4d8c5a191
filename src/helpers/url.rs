//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left as-is in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Path of the blog index
pub const BLOG_PATH: &str = "/blog";

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog") // -> "https://example.com/blog"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        config.base_url().to_string()
    } else {
        format!("{}/{}", config.base_url(), path)
    }
}

/// Site-relative path of a post page
pub fn post_path(slug: &str) -> String {
    format!("{}/{}", BLOG_PATH, encode_segment(slug))
}

/// Percent-encode one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
