//! Reading-time estimation

use serde::Serialize;
use std::fmt;

/// Assumed reading speed
pub const WORDS_PER_MINUTE: u32 = 200;

/// Estimated reading duration of a text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingTime {
    /// Human-readable form, e.g. "5 min read"
    pub text: String,
    pub minutes: f64,
    pub words: usize,
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Estimate reading time at the default reading speed
pub fn estimate(text: &str) -> ReadingTime {
    estimate_with(text, WORDS_PER_MINUTE)
}

/// Estimate reading time at `words_per_minute` (zero falls back to the default)
pub fn estimate_with(text: &str, words_per_minute: u32) -> ReadingTime {
    let words_per_minute = if words_per_minute == 0 {
        WORDS_PER_MINUTE
    } else {
        words_per_minute
    };

    let words = count_words(text);
    let minutes = words as f64 / f64::from(words_per_minute);
    // Round to two decimals before the ceiling so 1.001 minutes reads as 1
    let displayed = ((minutes * 100.0).round() / 100.0).ceil() as u64;

    ReadingTime {
        text: format!("{} min read", displayed),
        minutes,
        words,
    }
}

/// Count words in text
///
/// A word is a run of alphanumeric characters, which may contain `'` or `-`
/// between letters. Each CJK ideograph counts as a word of its own.
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if in_word && (c == '\'' || c == '’' || c == '-') {
            // Joiners only continue a word when a letter follows
            in_word = chars
                .peek()
                .map(|next| next.is_alphanumeric() && !is_cjk(*next))
                .unwrap_or(false);
        } else {
            in_word = false;
        }
    }

    count
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{F900}'..='\u{FAFF}')
}
