//! Gallery markers left by the post editor.
//!
//! The editor inserts an empty element carrying the image list as JSON:
//!
//! ```html
//! <div class="gallery-container" data-gallery='{"images":[{"url":"a.png"}]}'></div>
//! ```
//!
//! Unlike the fence scanners, a marker whose JSON cannot be read is dropped:
//! the raw element has no useful rendering of its own.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::fragment::{Fragment, Gallery};
use crate::scanner::push_text;

/// Class that identifies a gallery marker.
pub const GALLERY_CLASS: &str = "gallery-container";

/// Element without child elements. Quoted attribute values are matched
/// whole, so a raw `>` inside the JSON payload does not end the tag.
static DIV_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<div\b(?P<attrs>(?:[^>"']|"[^"]*"|'[^']*')*)>[^<]*</div>"#)
        .expect("invalid div regex")
});

static CLASS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#)
        .expect("invalid class regex")
});

static DATA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)data-gallery\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#)
        .expect("invalid data-gallery regex")
});

static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("invalid entity regex")
});

/// Extracts gallery fragments from HTML text.
#[derive(Debug, Default, Clone, Copy)]
pub struct GalleryExtractor;

impl GalleryExtractor {
    /// Create a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `text` contains at least one gallery marker.
    #[must_use]
    pub fn has_markers(&self, text: &str) -> bool {
        text.contains(GALLERY_CLASS)
            && DIV_PATTERN
                .captures_iter(text)
                .any(|caps| marker_payload(&caps["attrs"]).is_some())
    }

    /// Split `text` around its gallery markers.
    ///
    /// Returns `None` when there are no markers, so the caller can keep the
    /// text for the other passes. Markers with unreadable JSON contribute no
    /// fragment and add a warning.
    pub fn extract(&self, text: &str, warnings: &mut Vec<String>) -> Option<Vec<Fragment>> {
        if !self.has_markers(text) {
            return None;
        }

        let mut fragments = Vec::new();
        let mut last = 0;

        for caps in DIV_PATTERN.captures_iter(text) {
            let Some(payload) = marker_payload(&caps["attrs"]) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };

            push_text(&mut fragments, &text[last..whole.start()]);
            last = whole.end();

            match serde_json::from_str::<Gallery>(&payload) {
                Ok(gallery) => fragments.push(Fragment::Gallery(gallery)),
                Err(e) => {
                    tracing::warn!(offset = whole.start(), error = %e, "Dropping gallery marker with invalid JSON");
                    warnings.push(format!(
                        "gallery at byte {}: invalid data-gallery JSON ({e}), marker dropped",
                        whole.start()
                    ));
                }
            }
        }

        push_text(&mut fragments, &text[last..]);
        Some(fragments)
    }
}

/// Decoded `data-gallery` value, if the attributes describe a gallery marker.
fn marker_payload(attrs: &str) -> Option<String> {
    let class = attribute_value(&CLASS_PATTERN, attrs)?;
    if !class.split_whitespace().any(|c| c == GALLERY_CLASS) {
        return None;
    }
    attribute_value(&DATA_PATTERN, attrs).map(decode_entities)
}

fn attribute_value<'a>(pattern: &Regex, attrs: &'a str) -> Option<&'a str> {
    let caps = pattern.captures(attrs)?;
    caps.name("dq").or_else(|| caps.name("sq")).map(|m| m.as_str())
}

/// Decode the HTML entities an editor uses when escaping attribute values.
///
/// Unknown named entities are left as-is.
pub(crate) fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_owned();
    }

    ENTITY_PATTERN
        .replace_all(value, |caps: &Captures| {
            let entity = &caps[1];
            decode_entity(entity).unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(numeric) = entity.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let decoded = match entity {
        "quot" => "\"",
        "apos" => "'",
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "nbsp" => "\u{00a0}",
        _ => return None,
    };
    Some(decoded.to_owned())
}
