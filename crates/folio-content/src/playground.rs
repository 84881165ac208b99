//! Interactive code playgrounds.
//!
//! ````markdown
//! ```playground {"language": "typescript", "readOnly": false}
//! const x: number = 1;
//! ```
//! ````

use std::sync::LazyLock;

use regex::Regex;

use crate::fence::fenced_blocks;
use crate::fragment::{Fragment, Playground, PlaygroundOptions};
use crate::header::{Header, header_pattern, parse_header};
use crate::scanner::{Match, Scanner};

/// Fence keyword for playgrounds.
pub const PLAYGROUND_KEYWORD: &str = "playground";

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| header_pattern(PLAYGROUND_KEYWORD));

/// Scanner for ```` ```playground {options} ```` blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaygroundScanner;

impl PlaygroundScanner {
    /// Create a new scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for PlaygroundScanner {
    fn name(&self) -> &'static str {
        "playground"
    }

    fn find(&self, text: &str, warnings: &mut Vec<String>) -> Vec<Match> {
        let mut matches = Vec::new();

        for block in fenced_blocks(text) {
            let options = match parse_header(&HEADER_PATTERN, block.info) {
                Header::NotMatched => continue,
                Header::Empty => PlaygroundOptions::default(),
                Header::Options(map) => PlaygroundOptions::from_header(&map),
                Header::Malformed(error) => {
                    tracing::debug!(%error, "Malformed playground options, keeping block as text");
                    warnings.push(self.kept_as_text(
                        block.range.start,
                        &format!("invalid options JSON ({error})"),
                    ));
                    continue;
                }
            };

            let playground = Playground {
                options,
                code: block.body.trim().to_owned(),
            };
            matches.push(Match::new(block.range, Fragment::Playground(playground)));
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_options_applied() {
        let input = "```playground {\"language\": \"python\", \"readOnly\": false, \"height\": \"300px\"}\nprint(1)\n```";
        let fragments = PlaygroundScanner::new().scan(input);
        assert_eq!(
            fragments,
            vec![Fragment::Playground(Playground {
                options: PlaygroundOptions {
                    language: "python".to_owned(),
                    read_only: false,
                    height: "300px".to_owned(),
                },
                code: "print(1)".to_owned(),
            })]
        );
    }

    #[test]
    fn test_defaults_with_empty_object() {
        let fragments = PlaygroundScanner::new().scan("```playground {}\n  let a = 1;  \n```");
        assert_eq!(
            fragments,
            vec![Fragment::Playground(Playground {
                options: PlaygroundOptions::default(),
                code: "let a = 1;".to_owned(),
            })]
        );
    }

    #[test]
    fn test_bare_keyword_uses_defaults() {
        let fragments = PlaygroundScanner::new().scan("```playground\nx\n```");
        assert!(matches!(
            &fragments[..],
            [Fragment::Playground(Playground { options, .. })] if *options == PlaygroundOptions::default()
        ));
    }

    #[test]
    fn test_malformed_options_degrade_to_text() {
        let input = "```playground {bad json}\ncode\n```";
        let mut warnings = Vec::new();
        assert!(PlaygroundScanner::new().find(input, &mut warnings).is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("invalid options JSON"));
        assert_eq!(PlaygroundScanner::new().scan(input), vec![Fragment::text(input)]);
    }

    #[test]
    fn test_unclosed_options_warn() {
        let input = "```playground {\"language\": \"rust\"\ncode\n```";
        let mut warnings = Vec::new();
        assert!(PlaygroundScanner::new().find(input, &mut warnings).is_empty());
        assert_eq!(
            warnings,
            vec!["playground at byte 0: invalid options JSON (options object is not closed), kept as text"]
        );
    }

    #[test]
    fn test_malformed_between_text_is_one_text() {
        let input = "before ```playground {oops}\ncode\n``` after";
        assert_eq!(PlaygroundScanner::new().scan(input), vec![Fragment::text(input)]);
    }

    #[test]
    fn test_other_fences_ignored() {
        let input = "```js\nx\n```\n```playground {}\ny\n```";
        let fragments = PlaygroundScanner::new().scan(input);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], Fragment::text("```js\nx\n```\n"));
        assert_eq!(fragments[1].kind(), "playground");
    }
}
