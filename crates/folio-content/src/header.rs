//! JSON option headers on fence info strings.
//!
//! Playground and chart fences carry a single-line JSON object after the
//! keyword: ```` ```chart {"type": "bar"} ````. The text between the outer
//! braces is re-wrapped in braces and parsed.

use regex::Regex;
use serde_json::{Map, Value};

/// Result of reading a keyword fence header.
#[derive(Debug, PartialEq)]
pub(crate) enum Header {
    /// The info string is not this keyword's fence.
    NotMatched,
    /// Keyword without an options object.
    Empty,
    /// Parsed options object.
    Options(Map<String, Value>),
    /// Options present but not valid JSON.
    Malformed(String),
}

/// Build the info-string pattern for `keyword`.
///
/// Captures everything from the opening brace on as `options`.
pub(crate) fn header_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(
        r"^{}\s*(?P<options>\{{.*)?$",
        regex::escape(keyword)
    ))
    .expect("invalid fence header regex")
}

/// Read the options header from a fence info string.
pub(crate) fn parse_header(pattern: &Regex, info: &str) -> Header {
    let Some(caps) = pattern.captures(info) else {
        return Header::NotMatched;
    };
    let Some(options) = caps.name("options") else {
        return Header::Empty;
    };
    let Some(inner) = options
        .as_str()
        .trim_end()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Header::Malformed("options object is not closed".to_owned());
    };

    match serde_json::from_str::<Map<String, Value>>(&format!("{{{inner}}}")) {
        Ok(map) => Header::Options(map),
        Err(e) => Header::Malformed(e.to_string()),
    }
}
