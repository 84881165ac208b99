//! Fenced block walking.
//!
//! All fence-based scanners pair triple-backtick fences the same way, so a
//! block that one scanner ignores is still skipped as a unit by it and found
//! intact by the next. Fences do not have to start a line: post bodies come
//! from an HTML editor, where fences often sit right after a tag.

use std::ops::Range;

/// Fence delimiter.
pub(crate) const FENCE: &str = "```";

/// A fenced block located in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FencedBlock<'a> {
    /// Byte range from the opening fence to the end of the closing fence.
    pub range: Range<usize>,
    /// Info string after the opening fence, up to the newline.
    pub info: &'a str,
    /// Body between the newline and the closing fence, untrimmed.
    pub body: &'a str,
}

impl<'a> FencedBlock<'a> {
    /// The whole block as it appears in the source.
    pub(crate) fn raw(&self, text: &'a str) -> &'a str {
        &text[self.range.clone()]
    }
}

/// Iterate over the fenced blocks of `text`, left to right.
pub(crate) fn fenced_blocks(text: &str) -> FencedBlocks<'_> {
    FencedBlocks { text, pos: 0 }
}

/// Iterator returned by [`fenced_blocks`].
#[derive(Debug)]
pub(crate) struct FencedBlocks<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for FencedBlocks<'a> {
    type Item = FencedBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let first = self.pos + self.text.get(self.pos..)?.find(FENCE)?;
            let newline = first + FENCE.len() + self.text[first + FENCE.len()..].find('\n')?;

            // The info string holds no backticks, so the only fence on this
            // line that can open a block ends at its last backtick.
            let last = first + self.text[first..newline].rfind('`')?;
            let open = last + 1 - FENCE.len();
            let info = self.text[open + FENCE.len()..newline].trim_end_matches('\r');

            // Inline code, the tail of an inline span followed by prose, or a
            // fence with a spaced info string: nothing on this line opens.
            if !self.text[open..].starts_with(FENCE) || !is_opening_info(info) {
                self.pos = newline + 1;
                continue;
            }

            let body_start = newline + 1;
            // No closing fence anywhere after this opener: nothing else can
            // pair either.
            let close = body_start + self.text[body_start..].find(FENCE)?;
            let end = close + FENCE.len();
            self.pos = end;

            return Some(FencedBlock {
                range: open..end,
                info,
                body: &self.text[body_start..close],
            });
        }
    }
}

/// Info strings start right after the fence and never contain backticks.
fn is_opening_info(info: &str) -> bool {
    !info.contains('`') && !info.starts_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks(text: &str) -> Vec<FencedBlock<'_>> {
        fenced_blocks(text).collect()
    }

    #[test]
    fn test_no_fence() {
        assert!(blocks("plain text").is_empty());
    }

    #[test]
    fn test_single_block() {
        let text = "pre```js:foo.js\nconsole.log(1)\n```post";
        let found = blocks(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].info, "js:foo.js");
        assert_eq!(found[0].body, "console.log(1)\n");
        assert_eq!(found[0].raw(text), "```js:foo.js\nconsole.log(1)\n```");
        assert_eq!(&text[found[0].range.end..], "post");
    }

    #[test]
    fn test_empty_info() {
        let found = blocks("```\ncode\n```");
        assert_eq!(found[0].info, "");
        assert_eq!(found[0].body, "code\n");
    }

    #[test]
    fn test_crlf_info() {
        let found = blocks("```rust\r\nfn main() {}\r\n```");
        assert_eq!(found[0].info, "rust");
    }

    #[test]
    fn test_multiple_blocks_pair_in_order() {
        let text = "```a\n1\n```mid```b\n2\n```";
        let found = blocks(text);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].info, "a");
        assert_eq!(found[1].info, "b");
        assert_eq!(found[1].body, "2\n");
    }

    #[test]
    fn test_unclosed_fence() {
        assert!(blocks("```rust\nfn main() {}").is_empty());
    }

    #[test]
    fn test_fence_without_newline() {
        assert!(blocks("a ``` b").is_empty());
    }

    #[test]
    fn test_inline_triple_backticks_not_opening() {
        let text = "use ```x``` inline\n```js\ncode\n```";
        let found = blocks(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].info, "js");
        assert_eq!(found[0].body, "code\n");
    }

    #[test]
    fn test_four_backticks_open() {
        let found = blocks("````js\ncode\n```");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].info, "js");
        assert_eq!(found[0].range.start, 1);
    }

    #[test]
    fn test_trailing_inline_span_skips_line() {
        let text = "see ```x` here\n```js\ncode\n```";
        let found = blocks(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].info, "js");
    }

    #[test]
    fn test_spaced_info_not_opening() {
        assert!(blocks("``` js\ncode\n```").is_empty());
    }

    #[test]
    fn test_long_backtick_run_is_linear() {
        let text = format!("{}\n", "`".repeat(200_000));
        let started = std::time::Instant::now();

        assert!(blocks(&text).is_empty());
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_many_rejected_lines_then_block() {
        let mut text = "a ```b``` c\n".repeat(10_000);
        text.push_str("```rust\nfn main() {}\n```");
        let found = blocks(&text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].info, "rust");
    }

    #[test]
    fn test_body_may_be_empty() {
        let found = blocks("```mermaid\n```");
        assert_eq!(found[0].body, "");
    }
}
