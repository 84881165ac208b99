//! Mermaid diagram blocks.
//!
//! The body is passed through untouched for client-side rendering; no
//! syntax checking happens here.

use crate::fence::fenced_blocks;
use crate::fragment::{Diagram, Fragment};
use crate::scanner::{Match, Scanner};

/// Fence keyword for diagrams.
pub const DIAGRAM_KEYWORD: &str = "mermaid";

/// Scanner for ```` ```mermaid ```` blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiagramScanner;

impl DiagramScanner {
    /// Create a new scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for DiagramScanner {
    fn name(&self) -> &'static str {
        "diagram"
    }

    fn find(&self, text: &str, _warnings: &mut Vec<String>) -> Vec<Match> {
        fenced_blocks(text)
            .filter(|block| block.info.trim() == DIAGRAM_KEYWORD)
            .map(|block| {
                let diagram = Diagram {
                    definition: block.body.trim().to_owned(),
                };
                Match::new(block.range, Fragment::Diagram(diagram))
            })
            .collect()
    }
}
