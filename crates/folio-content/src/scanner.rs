//! Scanner trait shared by all content passes.
//!
//! A scanner finds the special regions of a text and turns each into a
//! [`Fragment`]. [`Scanner::scan`] fills the gaps between matches with text
//! fragments, so the result always covers the whole input exactly once.

use std::ops::Range;

use crate::fragment::Fragment;

/// A special region found by a scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Byte range of the source text this match replaces.
    pub range: Range<usize>,
    /// The fragment for the range (never [`Fragment::Text`]).
    pub fragment: Fragment,
}

impl Match {
    pub(crate) fn new(range: Range<usize>, fragment: Fragment) -> Self {
        Self { range, fragment }
    }
}

/// A single pass over text content.
///
/// Implementations are pure: the same text always yields the same matches,
/// and nothing is kept between calls.
pub trait Scanner {
    /// Pass name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Find special regions in `text`.
    ///
    /// Matches must be non-overlapping and sorted by start offset. Problems
    /// that leave a region as plain text are reported through `warnings`.
    fn find(&self, text: &str, warnings: &mut Vec<String>) -> Vec<Match>;

    /// Warning for a region this pass recognized but left as plain text.
    fn kept_as_text(&self, offset: usize, problem: &str) -> String {
        format!("{} at byte {offset}: {problem}, kept as text", self.name())
    }

    /// Partition `text` into text and special fragments, discarding warnings.
    fn scan(&self, text: &str) -> Vec<Fragment> {
        let matches = self.find(text, &mut Vec::new());
        fill_gaps(text, matches)
    }
}

/// Build a contiguous fragment list from sorted, non-overlapping matches.
///
/// Text between, before and after matches becomes one text fragment each;
/// empty gaps produce nothing.
pub(crate) fn fill_gaps(text: &str, matches: Vec<Match>) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(matches.len() * 2 + 1);
    let mut last = 0;

    for m in matches {
        push_text(&mut fragments, &text[last..m.range.start]);
        fragments.push(m.fragment);
        last = m.range.end;
    }
    push_text(&mut fragments, &text[last..]);

    fragments
}

/// Push a text fragment, skipping empty content.
pub(crate) fn push_text(fragments: &mut Vec<Fragment>, content: &str) {
    if !content.is_empty() {
        fragments.push(Fragment::text(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartScanner;
    use crate::fragment::Diagram;
    use crate::playground::PlaygroundScanner;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_warnings_name_the_pass() {
        let mut warnings = Vec::new();
        let text = "```playground {x}\na\n```\n```chart\n[1]\n```";
        PlaygroundScanner::new().find(text, &mut warnings);
        ChartScanner::new().find(text, &mut warnings);

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("playground at byte 0: invalid options JSON"));
        assert_eq!(
            warnings[1],
            "chart at byte 24: missing options header, kept as text"
        );
    }

    fn diagram(definition: &str) -> Fragment {
        Fragment::Diagram(Diagram {
            definition: definition.to_owned(),
        })
    }

    #[test]
    fn test_fill_gaps_no_matches() {
        assert_eq!(fill_gaps("plain", Vec::new()), vec![Fragment::text("plain")]);
    }

    #[test]
    fn test_fill_gaps_empty_input() {
        assert!(fill_gaps("", Vec::new()).is_empty());
    }

    #[test]
    fn test_fill_gaps_surrounding_text() {
        let matches = vec![Match::new(2..5, diagram("x"))];
        assert_eq!(
            fill_gaps("abXXXcd", matches),
            vec![Fragment::text("ab"), diagram("x"), Fragment::text("cd")]
        );
    }

    #[test]
    fn test_fill_gaps_adjacent_matches_and_edges() {
        let matches = vec![Match::new(0..2, diagram("a")), Match::new(2..4, diagram("b"))];
        assert_eq!(fill_gaps("AABB", matches), vec![diagram("a"), diagram("b")]);
    }
}
