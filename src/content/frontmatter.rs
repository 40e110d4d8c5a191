//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;

/// Why a delimited header block could not be read as metadata
#[derive(Error, Debug)]
enum BlockError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Language of a header block, taken from the text after the opening `---`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Yaml,
    Json,
}

impl Language {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "" | "yaml" | "yml" => Some(Language::Yaml),
            "json" => Some(Language::Json),
            _ => None,
        }
    }
}

/// Raw key/value metadata from a header block, in authored order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: IndexMap<String, Value>,
}

impl Metadata {
    /// Split `content` into metadata and body.
    ///
    /// Never fails: a missing, unterminated or malformed block gives empty
    /// metadata. When the block cannot be parsed, the whole text is the body.
    pub fn parse(content: &str) -> (Self, &str) {
        let text = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(after_open) = text.strip_prefix("---") else {
            return (Self::default(), text);
        };
        let Some(newline) = after_open.find('\n') else {
            return (Self::default(), text);
        };
        let Some(language) = Language::from_tag(after_open[..newline].trim()) else {
            // `----` rules and unknown languages are body text
            return (Self::default(), text);
        };
        let rest = &after_open[newline + 1..];

        let mut offset = 0;
        let mut closing = None;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                closing = Some((offset, offset + line.len()));
                break;
            }
            offset += line.len();
        }
        let Some((block_end, body_start)) = closing else {
            tracing::debug!("Unterminated front-matter block, treating as content");
            return (Self::default(), text);
        };

        let block = &rest[..block_end];
        let body = &rest[body_start..];

        if block.trim().is_empty() {
            return (Self::default(), body);
        }

        match parse_block(block, language) {
            Ok(Some(metadata)) => (metadata, body),
            Ok(None) => {
                tracing::debug!("Front-matter block is not a key/value mapping, treating as content");
                (Self::default(), text)
            }
            Err(e) => {
                tracing::warn!("Failed to parse front-matter, treating as content: {}", e);
                (Self::default(), text)
            }
        }
    }

    fn from_mapping(mapping: serde_yaml::Mapping) -> Self {
        let fields = mapping
            .into_iter()
            .filter_map(|(key, value)| scalar_to_string(&key).map(|key| (key, value)))
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// A scalar field as a string. Empty strings count as absent.
    pub fn string(&self, key: &str) -> Option<String> {
        let value = self.get(key)?;
        match scalar_to_string(value) {
            Some(s) if s.is_empty() => None,
            Some(s) => Some(s),
            None => {
                if !value.is_null() {
                    tracing::debug!("Ignoring non-scalar value for `{}`", key);
                }
                None
            }
        }
    }

    /// The first of `keys` holding a non-empty scalar
    pub fn first_string(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.string(key))
    }

    /// A list field. A lone scalar is a one-item list; non-scalar items are skipped.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.get(key).map(untag) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(scalar_to_string)
                .filter(|s| !s.is_empty())
                .collect(),
            Some(value) => scalar_to_string(value)
                .filter(|s| !s.is_empty())
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }

    /// The first of `keys` holding a value, parsed as a date.
    ///
    /// An unrecognized date is logged and treated as absent.
    pub fn date(&self, keys: &[&str]) -> Option<NaiveDateTime> {
        let (key, raw) = keys
            .iter()
            .find_map(|key| self.string(key).map(|value| (*key, value)))?;
        let parsed = parse_date_string(&raw);
        if parsed.is_none() {
            tracing::warn!("Unrecognized date {:?} in `{}`", raw, key);
        }
        parsed
    }

    /// Draft marker: a `badge` mentioning "draft" or a tag named "draft"
    pub fn is_draft(&self) -> bool {
        let badge = self
            .string("badge")
            .map(|badge| badge.to_lowercase().contains("draft"))
            .unwrap_or(false);

        badge
            || self
                .string_list("tags")
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case("draft"))
    }
}

fn parse_block(block: &str, language: Language) -> Result<Option<Metadata>, BlockError> {
    let value: Value = match language {
        Language::Yaml => serde_yaml::from_str(block)?,
        Language::Json => {
            let json: serde_json::Value = serde_json::from_str(block)?;
            serde_yaml::to_value(json)?
        }
    };

    match value {
        Value::Mapping(mapping) => Ok(Some(Metadata::from_mapping(mapping))),
        Value::Null => Ok(Some(Metadata::default())),
        _ => Ok(None),
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Typed view of the recognized front-matter keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    /// `summary`, falling back to `description`
    pub summary: Option<String>,
    /// `publishedAt`, falling back to `pubDate`
    pub published_at: Option<NaiveDateTime>,
    /// `image`, falling back to `heroImage`
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub badge: Option<String>,
    pub draft: bool,

    /// Every key as authored, including unrecognized ones
    pub metadata: Metadata,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let (metadata, body) = Metadata::parse(content);
        (Self::from(metadata), body)
    }
}

impl From<Metadata> for FrontMatter {
    fn from(metadata: Metadata) -> Self {
        Self {
            title: metadata.string("title"),
            summary: metadata.first_string(&["summary", "description"]),
            published_at: metadata.date(&["publishedAt", "pubDate"]),
            image: metadata.first_string(&["image", "heroImage"]),
            tags: metadata.string_list("tags"),
            badge: metadata.string("badge"),
            draft: metadata.is_draft(),
            metadata,
        }
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 with offset, normalised to UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
