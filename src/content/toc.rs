//! Heading outline (table of contents) extraction

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::config::AnchorPolicy;

lazy_static! {
    static ref HEADING_REGEX: Regex = Regex::new(r"(?m)^(#{2,3})[ \t]+(.+)$").unwrap();
    static ref NON_WORD_REGEX: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS_REGEX: Regex = Regex::new(r"-+").unwrap();
}

/// A second- or third-level heading in a post body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Anchor id derived from the text
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Derive an anchor id from heading text
///
/// Lowercases, drops everything but word characters, whitespace and hyphens,
/// turns whitespace runs into single hyphens and trims hyphens at both ends.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = NON_WORD_REGEX.replace_all(&lower, "");
    let hyphenated = WHITESPACE_REGEX.replace_all(stripped.trim(), "-");
    let collapsed = HYPHENS_REGEX.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Extract `##` and `###` headings in document order.
///
/// Identical headings yield identical ids.
pub fn extract_headings(content: &str) -> Vec<Heading> {
    extract_headings_with(content, AnchorPolicy::Preserve)
}

/// Extract headings, applying `policy` to repeated anchors
pub fn extract_headings_with(content: &str, policy: AnchorPolicy) -> Vec<Heading> {
    locate_headings(content, policy)
        .into_iter()
        .map(|(_, heading)| heading)
        .collect()
}

/// Headings paired with the byte offset of the line each one starts on
pub(crate) fn locate_headings(content: &str, policy: AnchorPolicy) -> Vec<(usize, Heading)> {
    let mut anchors = AnchorSet::default();
    HEADING_REGEX
        .captures_iter(content)
        .filter_map(|caps| {
            let text = caps[2].trim_end().to_string();
            if text.is_empty() {
                return None;
            }
            let base = slugify(&text);
            let id = match policy {
                AnchorPolicy::Preserve => base,
                AnchorPolicy::Disambiguate => anchors.claim(&base),
            };
            let heading = Heading {
                id,
                level: caps[1].len() as u8,
                text,
            };
            Some((caps.get(0)?.start(), heading))
        })
        .collect()
}

/// Hands out unique anchors: the first `x` stays `x`, repeats become `x-1`, `x-2`, ...
#[derive(Debug, Default)]
struct AnchorSet {
    seen: HashMap<String, usize>,
}

impl AnchorSet {
    fn claim(&mut self, base: &str) -> String {
        match self.seen.get(base).copied() {
            None => {
                self.seen.insert(base.to_string(), 0);
                base.to_string()
            }
            Some(mut n) => loop {
                n += 1;
                let candidate = format!("{}-{}", base, n);
                if !self.seen.contains_key(&candidate) {
                    self.seen.insert(base.to_string(), n);
                    self.seen.insert(candidate.clone(), 0);
                    return candidate;
                }
            },
        }
    }
}
