//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::ContentError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Content
    pub content_dir: String,
    /// Supported file extensions, in lookup priority order
    pub extensions: Vec<String>,

    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub toc: TocConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            url: "http://localhost:3000".to_string(),

            content_dir: "content".to_string(),
            extensions: vec!["mdx".to_string(), "md".to_string()],

            reading: ReadingConfig::default(),
            toc: TocConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|e| ContentError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(config)
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Reading-time estimation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: crate::content::reading_time::WORDS_PER_MINUTE,
        }
    }
}

/// Table-of-contents settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub anchors: AnchorPolicy,
}

/// How repeated heading anchors are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPolicy {
    /// Identical headings share an id
    #[default]
    Preserve,
    /// Repeats get `-1`, `-2`, ... suffixes
    Disambiguate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.extensions, vec!["mdx", "md"]);
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.toc.anchors, AnchorPolicy::Preserve);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Harry's Blog
url: https://example.dev/
content_dir: posts
reading:
  words_per_minute: 250
toc:
  anchors: disambiguate
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Harry's Blog");
        assert_eq!(config.base_url(), "https://example.dev");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.extensions, vec!["mdx", "md"]);
        assert_eq!(config.reading.words_per_minute, 250);
        assert_eq!(config.toc.anchors, AnchorPolicy::Disambiguate);
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "reading: [not, a, map]\n").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ContentError::Config { .. }));
    }
}
