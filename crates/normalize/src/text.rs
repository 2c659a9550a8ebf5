//! Rich-text and formatted-number helpers.
//!
//! The service encodes text either as `{"simpleText": "..."}` or as a list of
//! runs `{"runs": [{"text": "..."}, ...]}`, where individual runs may carry a
//! navigation endpoint (bylines, owner names). Counts arrive pre-formatted for
//! display, e.g. `"1,234,567 views"` or `"1.2M subscribers"`.
//!
//! # Examples
//!
//! ```rust
//! use normalize::text::{parse_integer, parse_text, RichText};
//!
//! let text: RichText = serde_json::from_value(serde_json::json!({
//!     "runs": [{"text": "Hello, "}, {"text": "world"}]
//! })).unwrap();
//! assert_eq!(parse_text(Some(&text), ""), "Hello, world");
//! assert_eq!(parse_text(None, "Show More"), "Show More");
//!
//! assert_eq!(parse_integer("1.2M views"), Some(1_200_000));
//! assert_eq!(parse_integer("1,234,567 views"), Some(1_234_567));
//! ```
use serde::{Deserialize, Serialize};

use crate::raw::NavigationEndpoint;

/// Text as the service encodes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichText {
    #[serde(default)]
    pub simple_text: Option<String>,
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

/// One run of a [`RichText`]; bylines carry a navigation endpoint per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl RichText {
    /// First run, if the text is run-encoded.
    pub fn first_run(&self) -> Option<&TextRun> {
        self.runs.first()
    }
}

/// Flattens rich text into a plain string, or `default` when there is none.
///
/// `simpleText` wins over `runs`; runs are concatenated without separators.
pub fn parse_text(text: Option<&RichText>, default: &str) -> String {
    let Some(text) = text else {
        return default.to_string();
    };
    match text.simple_text.as_deref() {
        Some(simple) if !simple.is_empty() => simple.to_string(),
        _ if !text.runs.is_empty() => text.runs.iter().map(|run| run.text.as_str()).collect(),
        _ => default.to_string(),
    }
}

/// Parses the count carried by a rich-text field, e.g. a view count.
pub fn parse_count(text: &RichText) -> Option<u64> {
    parse_integer(&parse_text(Some(text), ""))
}

/// Extracts the first numeric magnitude from display text.
///
/// Digit groups may be separated by `,`, `.`, `'` or (narrow) no-break
/// spaces. A `K`, `M` or `B` after the number, directly or after a space,
/// scales it; the last separator is then read as a decimal mark (`"1.2M"`,
/// `"3,4K"`, `"1,2 M"`).
/// Returns `None` when the text carries no digits.
pub fn parse_integer(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];

    let mut end = 0;
    for (idx, ch) in rest.char_indices() {
        if ch.is_ascii_digit() || is_group_separator(ch) {
            end = idx + ch.len_utf8();
        } else {
            break;
        }
    }
    let number = rest[..end].trim_end_matches(|c: char| !c.is_ascii_digit());
    let after = &rest[number.len()..];

    match magnitude_suffix(after) {
        Some(multiplier) => {
            // Only the last separator is a decimal mark; earlier ones group digits.
            let (whole, fraction) = match number.rfind(|c: char| c == ',' || c == '.') {
                Some(idx) => (&number[..idx], &number[idx + 1..]),
                None => (number, ""),
            };
            let mut decimal: String = whole.chars().filter(char::is_ascii_digit).collect();
            if !fraction.is_empty() {
                decimal.push('.');
                decimal.extend(fraction.chars().filter(char::is_ascii_digit));
            }
            let value: f64 = decimal.parse().ok()?;
            Some((value * multiplier as f64).round() as u64)
        }
        None => number
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .ok(),
    }
}

fn is_group_separator(ch: char) -> bool {
    matches!(ch, ',' | '.' | '\'' | '\u{a0}' | '\u{202f}')
}

/// `K`/`M`/`B` after the number, optionally separated by (no-break) spaces.
fn magnitude_suffix(after: &str) -> Option<u64> {
    let mut chars = after.trim_start().chars();
    let multiplier = match chars.next()? {
        'K' => 1_000,
        'M' => 1_000_000,
        'B' => 1_000_000_000,
        _ => return None,
    };
    // "5 Members" style words must not read as a suffix.
    match chars.next() {
        Some(next) if next.is_alphabetic() => None,
        _ => Some(multiplier),
    }
}
