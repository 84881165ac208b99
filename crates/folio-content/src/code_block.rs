//! Fenced code block extraction.
//!
//! Runs first over the raw post body so that code content is never seen by
//! the later passes:
//!
//! ````markdown
//! ```rust:src/main.rs
//! fn main() {}
//! ```
//! ````

use std::sync::LazyLock;

use regex::Regex;

use crate::chart::CHART_KEYWORD;
use crate::diagram::DIAGRAM_KEYWORD;
use crate::fence::fenced_blocks;
use crate::fragment::{CodeBlock, DEFAULT_CODE_LANGUAGE, Fragment};
use crate::playground::PLAYGROUND_KEYWORD;
use crate::scanner::{Match, Scanner};

/// `lang:filename`, both parts optional.
static INFO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<lang>\w+)?(?::(?P<file>\S+))?\s*$").expect("invalid code info regex")
});

/// Fence keywords owned by other scanners.
const RESERVED_LANGUAGES: [&str; 3] = [PLAYGROUND_KEYWORD, CHART_KEYWORD, DIAGRAM_KEYWORD];

/// Scanner for ```` ```lang:filename ```` code blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeBlockScanner;

impl CodeBlockScanner {
    /// Create a new scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for CodeBlockScanner {
    fn name(&self) -> &'static str {
        "code"
    }

    fn find(&self, text: &str, _warnings: &mut Vec<String>) -> Vec<Match> {
        fenced_blocks(text)
            .filter_map(|block| {
                let caps = INFO_PATTERN.captures(block.info)?;
                let language = caps.name("lang").map(|m| m.as_str());
                if language.is_some_and(|lang| RESERVED_LANGUAGES.contains(&lang)) {
                    return None;
                }

                let code = CodeBlock {
                    language: language.unwrap_or(DEFAULT_CODE_LANGUAGE).to_owned(),
                    filename: caps
                        .name("file")
                        .map_or_else(String::new, |m| m.as_str().to_owned()),
                    code: block.body.trim().to_owned(),
                    highlighted_lines: Vec::new(),
                };
                Some(Match::new(block.range, Fragment::Code(code)))
            })
            .collect()
    }
}
