//! `folio check` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CliSettings, Config, PostsConfig};
use folio_content::FragmentAssembler;
use rayon::prelude::*;

use super::rich_text_policy;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Posts source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output (list every post, not only those with warnings).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of assembling one post.
#[derive(Debug)]
pub(crate) struct PostReport {
    pub path: PathBuf,
    pub fragments: usize,
    pub special: usize,
    pub warnings: Vec<String>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a post cannot be read, or any
    /// post produced warnings.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let posts = &config.posts_resolved;

        if !posts.source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Posts directory not found: {}",
                posts.source_dir.display()
            )));
        }

        output.info(&format!("Checking posts in {}", posts.source_dir.display()));

        let assembler =
            FragmentAssembler::new().rich_text(rich_text_policy(config.content.rich_text));
        let reports = check_posts(&assembler, posts)?;

        let mut with_warnings = 0;
        for report in &reports {
            if !report.warnings.is_empty() {
                with_warnings += 1;
            } else if !self.verbose {
                continue;
            }
            let name = report
                .path
                .strip_prefix(&posts.source_dir)
                .unwrap_or(&report.path)
                .display()
                .to_string();
            output.post(&name, report.fragments, report.special, &report.warnings);
        }

        if with_warnings > 0 {
            return Err(CliError::Validation(format!(
                "{with_warnings} of {} posts produced warnings",
                reports.len()
            )));
        }

        output.success(&format!("Checked {} posts, no warnings", reports.len()));
        Ok(())
    }
}

/// Assemble every post under the source directory.
///
/// Reports are sorted by path.
pub(crate) fn check_posts(
    assembler: &FragmentAssembler,
    posts: &PostsConfig,
) -> Result<Vec<PostReport>, CliError> {
    let mut paths = Vec::new();
    collect_posts(&posts.source_dir, posts, &mut paths);
    paths.sort();

    paths
        .into_par_iter()
        .map(|path| -> Result<PostReport, CliError> {
            let raw = fs::read_to_string(&path)?;
            let assembled = assembler.assemble_with_warnings(&raw);
            tracing::debug!(
                path = %path.display(),
                fragments = assembled.fragments.len(),
                warnings = assembled.warnings.len(),
                "Checked post"
            );
            Ok(PostReport {
                special: assembled
                    .fragments
                    .iter()
                    .filter(|f| !f.is_text())
                    .count(),
                fragments: assembled.fragments.len(),
                warnings: assembled.warnings,
                path,
            })
        })
        .collect()
}

/// Recursively collect post files, skipping hidden entries.
fn collect_posts(dir: &Path, posts: &PostsConfig, paths: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            collect_posts(&path, posts, paths);
        } else if posts.is_post(&path) {
            paths.push(path);
        }
    }
}
