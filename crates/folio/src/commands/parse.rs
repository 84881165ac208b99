//! `folio parse` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CliSettings, Config, RichTextMode};
use folio_content::{Fragment, FragmentAssembler};

use super::rich_text_policy;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    /// Post body to parse, or `-` for stdin (default: stdin).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep text around embeds, playgrounds, charts and diagrams (overrides config).
    #[arg(long)]
    interleave: bool,

    /// Print compact JSON (overrides config).
    #[arg(long)]
    compact: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ParseArgs {
    /// Execute the parse command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            rich_text: self.interleave.then_some(RichTextMode::Interleave),
            pretty: self.compact.then_some(false),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let raw = read_input(self.input.as_deref())?;
        let assembler =
            FragmentAssembler::new().rich_text(rich_text_policy(config.content.rich_text));
        tracing::info!(
            policy = assembler.policy().as_str(),
            input_len = raw.len(),
            "Parsing post"
        );
        let assembled = assembler.assemble_with_warnings(&raw);

        output.warnings(&assembled.warnings);

        let json = render_fragments(&assembled.fragments, config.output.pretty)?;
        output.result(&json)?;
        Ok(())
    }
}

/// Read the post body from a file, or from stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Serialize fragments for the renderer.
pub(crate) fn render_fragments(fragments: &[Fragment], pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(fragments)?
    } else {
        serde_json::to_string(fragments)?
    };
    Ok(json)
}
