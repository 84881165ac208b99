//! Rich-content fragment pipeline for blog posts.
//!
//! A post body, as stored by the editor, is HTML with a few extensions:
//! fenced code blocks, playground/chart/diagram fences, bare social media
//! links and gallery markers. This crate turns it into an ordered list of
//! typed [`Fragment`]s for a renderer to walk.
//!
//! # Architecture
//!
//! Each pass is a [`Scanner`] that partitions a string into text and one kind
//! of special fragment:
//! - [`CodeBlockScanner`]: ```` ```lang:filename ```` blocks
//! - [`EmbedScanner`]: YouTube, Twitter/X and Instagram URLs
//! - [`PlaygroundScanner`]: ```` ```playground {options} ```` blocks
//! - [`ChartScanner`]: ```` ```chart {options} ```` blocks with JSON data
//! - [`DiagramScanner`]: ```` ```mermaid ```` blocks
//!
//! [`GalleryExtractor`] splits text around `gallery-container` markers, and
//! [`FragmentAssembler`] composes all of them. Parsing never fails: anything
//! malformed stays text, except gallery markers with unreadable JSON, which
//! are dropped with a warning.
//!
//! The [`editor`] module builds the syntax the parser reads.
//!
//! # Example
//!
//! ```
//! use folio_content::assemble;
//!
//! let fragments = assemble("<p>Intro</p>\n```rust\nfn main() {}\n```\n");
//! assert_eq!(fragments.len(), 3);
//! assert_eq!(fragments[1].kind(), "code");
//! ```

mod assembler;
mod chart;
mod code_block;
mod diagram;
pub mod editor;
mod embed;
mod error;
mod fence;
mod fragment;
mod gallery;
mod header;
mod playground;
mod scanner;

pub use assembler::{Assembled, FragmentAssembler, RichTextPolicy, assemble};
pub use chart::{CHART_KEYWORD, ChartScanner};
pub use code_block::CodeBlockScanner;
pub use diagram::{DIAGRAM_KEYWORD, DiagramScanner};
pub use embed::{EmbedScanner, parse_embed};
pub use error::InsertError;
pub use fragment::{
    Chart, CodeBlock, DEFAULT_CODE_LANGUAGE, DEFAULT_PLAYGROUND_HEIGHT,
    DEFAULT_PLAYGROUND_LANGUAGE, Diagram, Embed, EmbedKind, Fragment, Gallery, GalleryImage,
    Playground, PlaygroundOptions,
};
pub use gallery::{GALLERY_CLASS, GalleryExtractor};
pub use playground::{PLAYGROUND_KEYWORD, PlaygroundScanner};
pub use scanner::{Match, Scanner};
