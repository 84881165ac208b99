//! Pipeline orchestration.
//!
//! [`FragmentAssembler`] runs the passes in order over a post body:
//!
//! 1. Code blocks, over the whole input. Code is never scanned again.
//! 2. Gallery markers, per remaining text segment. A segment with markers is
//!    split around them and goes no further.
//! 3. Embeds, playgrounds, charts and diagrams, each run independently over
//!    the segment. How their results are merged is set by
//!    [`RichTextPolicy`].

use crate::chart::ChartScanner;
use crate::code_block::CodeBlockScanner;
use crate::diagram::DiagramScanner;
use crate::embed::EmbedScanner;
use crate::fragment::Fragment;
use crate::gallery::GalleryExtractor;
use crate::playground::PlaygroundScanner;
use crate::scanner::{Match, Scanner, fill_gaps, push_text};

/// Passes run over text segments without gallery markers, in output order.
const RICH_SCANNERS: [&dyn Scanner; 4] = [
    &EmbedScanner,
    &PlaygroundScanner,
    &ChartScanner,
    &DiagramScanner,
];

/// How a segment with embeds, playgrounds, charts or diagrams is merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RichTextPolicy {
    /// Emit the special fragments grouped by pass (embeds, then playgrounds,
    /// charts, diagrams) and discard the segment's plain text.
    #[default]
    Drop,
    /// Merge all passes by source position and keep the text between them.
    Interleave,
}

impl RichTextPolicy {
    /// Parse a policy name (`drop` or `interleave`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drop" => Some(Self::Drop),
            "interleave" => Some(Self::Interleave),
            _ => None,
        }
    }

    /// Policy name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Interleave => "interleave",
        }
    }
}

/// Fragments and diagnostics from one assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembled {
    /// Ordered fragments.
    pub fragments: Vec<Fragment>,
    /// Problems that left content as text or dropped a gallery marker.
    pub warnings: Vec<String>,
}

/// Turns a raw post body into a flat fragment list.
///
/// Holds no state between calls and can be shared across threads.
///
/// # Example
///
/// ```
/// use folio_content::{Fragment, FragmentAssembler};
///
/// let fragments = FragmentAssembler::new().assemble("pre```js:foo.js\nconsole.log(1)\n```post");
/// assert_eq!(fragments.len(), 3);
/// assert_eq!(fragments[0], Fragment::text("pre"));
/// assert_eq!(fragments[1].kind(), "code");
/// assert_eq!(fragments[2], Fragment::text("post"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FragmentAssembler {
    policy: RichTextPolicy,
}

impl FragmentAssembler {
    /// Create an assembler with the default [`RichTextPolicy::Drop`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how segments with special content are merged.
    #[must_use]
    pub fn rich_text(mut self, policy: RichTextPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Configured merge policy.
    #[must_use]
    pub fn policy(&self) -> RichTextPolicy {
        self.policy
    }

    /// Assemble `raw` into fragments.
    #[must_use]
    pub fn assemble(&self, raw: &str) -> Vec<Fragment> {
        self.assemble_with_warnings(raw).fragments
    }

    /// Assemble `raw`, also returning diagnostics.
    #[must_use]
    pub fn assemble_with_warnings(&self, raw: &str) -> Assembled {
        let mut warnings = Vec::new();
        let mut fragments = Vec::new();

        let code_matches = CodeBlockScanner.find(raw, &mut warnings);
        for fragment in fill_gaps(raw, code_matches) {
            match fragment {
                Fragment::Text { content } => {
                    self.assemble_segment(&content, &mut fragments, &mut warnings);
                }
                other => fragments.push(other),
            }
        }

        tracing::debug!(
            input_len = raw.len(),
            fragments = fragments.len(),
            warnings = warnings.len(),
            policy = self.policy.as_str(),
            "Assembled content"
        );

        Assembled {
            fragments,
            warnings,
        }
    }

    /// Run the per-segment passes over one text segment.
    fn assemble_segment(&self, text: &str, out: &mut Vec<Fragment>, warnings: &mut Vec<String>) {
        if let Some(parts) = GalleryExtractor.extract(text, warnings) {
            out.extend(parts);
            return;
        }

        let found: Vec<Vec<Match>> = RICH_SCANNERS
            .iter()
            .map(|scanner| scanner.find(text, warnings))
            .collect();

        if found.iter().all(Vec::is_empty) {
            push_text(out, text);
            return;
        }

        match self.policy {
            RichTextPolicy::Drop => {
                let discarded = discarded_text_len(text, &found);
                if discarded > 0 {
                    tracing::debug!(discarded, "Discarding text around rich content");
                    warnings.push(format!(
                        "{discarded} bytes of text next to embeds, playgrounds, charts or diagrams were discarded (rich_text = \"drop\")"
                    ));
                }
                out.extend(found.into_iter().flatten().map(|m| m.fragment));
            }
            RichTextPolicy::Interleave => {
                out.extend(fill_gaps(text, interleave(found)));
            }
        }
    }
}

/// Assemble `raw` with the default assembler.
#[must_use]
pub fn assemble(raw: &str) -> Vec<Fragment> {
    FragmentAssembler::new().assemble(raw)
}

/// Merge per-pass matches into one non-overlapping, position-ordered list.
///
/// The earliest start wins; on equal starts the earlier pass wins. Matches
/// overlapping an accepted one are dropped.
fn interleave(found: Vec<Vec<Match>>) -> Vec<Match> {
    let mut all: Vec<(usize, Match)> = found
        .into_iter()
        .enumerate()
        .flat_map(|(pass, matches)| matches.into_iter().map(move |m| (pass, m)))
        .collect();
    all.sort_by_key(|(pass, m)| (m.range.start, *pass));

    let mut merged = Vec::with_capacity(all.len());
    let mut end = 0;
    for (_, m) in all {
        if m.range.start >= end {
            end = m.range.end;
            merged.push(m);
        }
    }
    merged
}

/// Non-whitespace bytes of `text` covered by none of the matches.
fn discarded_text_len(text: &str, found: &[Vec<Match>]) -> usize {
    let mut covered = vec![false; text.len()];
    for m in found.iter().flatten() {
        covered[m.range.clone()].fill(true);
    }
    text.bytes()
        .zip(covered)
        .filter(|(byte, covered)| !covered && !byte.is_ascii_whitespace())
        .count()
}
