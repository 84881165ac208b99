//! Bare URL embeds.
//!
//! YouTube, Twitter/X and Instagram links are reduced to an embed id so the
//! renderer can show the platform widget. Every other URL, and any URL
//! without an extractable id, stays literal text.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::fragment::{Embed, EmbedKind, Fragment};
use crate::scanner::{Match, Scanner};

/// Generic HTTP(S) URL token.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>]+").expect("invalid URL regex"));

/// Scanner for embeddable URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbedScanner;

impl EmbedScanner {
    /// Create a new scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for EmbedScanner {
    fn name(&self) -> &'static str {
        "embed"
    }

    fn find(&self, text: &str, _warnings: &mut Vec<String>) -> Vec<Match> {
        URL_PATTERN
            .find_iter(text)
            .filter_map(|m| {
                let embed = parse_embed(m.as_str())?;
                tracing::debug!(kind = embed.kind.as_str(), id = %embed.id, "Found embed");
                Some(Match::new(m.range(), Fragment::Embed(embed)))
            })
            .collect()
    }
}

/// Classify a URL as an embed.
///
/// Returns `None` for malformed URLs, unknown hosts, and recognized hosts
/// without an id.
///
/// # Example
///
/// ```
/// use folio_content::{EmbedKind, parse_embed};
///
/// let embed = parse_embed("https://www.youtube.com/watch?v=abc123").unwrap();
/// assert_eq!(embed.kind, EmbedKind::YouTube);
/// assert_eq!(embed.id, "abc123");
///
/// assert!(parse_embed("https://example.com/page").is_none());
/// ```
#[must_use]
pub fn parse_embed(raw: &str) -> Option<Embed> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(url = raw, error = %e, "Unparsable URL left as text");
            return None;
        }
    };
    let host = url.host_str()?;

    let (kind, id) = if is_host(host, "youtube.com") || is_host(host, "youtu.be") {
        (EmbedKind::YouTube, youtube_id(&url, host)?)
    } else if is_host(host, "twitter.com") || is_host(host, "x.com") {
        (EmbedKind::Twitter, segment_after(url.path(), "/status/")?)
    } else if is_host(host, "instagram.com") {
        (EmbedKind::Instagram, segment_after(url.path(), "/p/")?)
    } else {
        return None;
    };

    Some(Embed {
        kind,
        id,
        url: raw.to_owned(),
    })
}

/// Whether `host` is `domain` or one of its subdomains.
///
/// Deliberately stricter than a substring test: `netflix.com` is not
/// `x.com`, and `youtube.com.example.net` is not YouTube.
fn is_host(host: &str, domain: &str) -> bool {
    host.strip_suffix(domain)
        .is_some_and(|rest| rest.is_empty() || rest.ends_with('.'))
}

/// Video id: the path on `youtu.be`, the `v` parameter elsewhere.
fn youtube_id(url: &Url, host: &str) -> Option<String> {
    let id = if host == "youtu.be" {
        url.path().trim_start_matches('/').split('/').next()?.to_owned()
    } else {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    };
    (!id.is_empty()).then_some(id)
}

/// Path segment following `marker`, up to the next slash.
fn segment_after(path: &str, marker: &str) -> Option<String> {
    let start = path.find(marker)? + marker.len();
    let segment = path[start..].split('/').next()?;
    (!segment.is_empty()).then(|| segment.to_owned())
}
