//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod fence;
pub(crate) mod parse;

pub(crate) use check::CheckArgs;
pub(crate) use fence::FenceCommand;
pub(crate) use parse::ParseArgs;

use folio_config::RichTextMode;
use folio_content::RichTextPolicy;

/// Map the configured merge mode onto the assembler policy.
pub(crate) fn rich_text_policy(mode: RichTextMode) -> RichTextPolicy {
    match mode {
        RichTextMode::Drop => RichTextPolicy::Drop,
        RichTextMode::Interleave => RichTextPolicy::Interleave,
    }
}
