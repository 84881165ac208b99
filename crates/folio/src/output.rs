//! Terminal output for folio commands.
//!
//! Fragment JSON and fences go to stdout untouched so they can be piped.
//! Progress, per-post summaries and warnings go to stderr, coloured when
//! stderr is a terminal.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    stdout: Term,
    stderr: Term,
    ok: Style,
    warn: Style,
    err: Style,
    post: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stdout: Term::stdout(),
            stderr: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            err: Style::new().red(),
            post: Style::new().cyan().bold(),
        }
    }

    /// Write a command result (fragment JSON, a fence) to stdout.
    pub(crate) fn result(&self, text: &str) -> std::io::Result<()> {
        self.stdout.write_line(text)
    }

    /// Print a progress message.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg, None);
    }

    /// Print a final success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(msg, Some(&self.ok));
    }

    /// Print a fatal error (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(msg, Some(&self.err));
    }

    /// Print pipeline warnings for a single post.
    pub(crate) fn warnings(&self, warnings: &[String]) {
        for warning in warnings {
            self.line(&format!("Warning: {warning}"), Some(&self.warn));
        }
    }

    /// Print a post summary line, followed by its warnings indented.
    ///
    /// Posts with warnings are highlighted.
    pub(crate) fn post(&self, name: &str, fragments: usize, special: usize, warnings: &[String]) {
        let summary = post_summary(name, fragments, special);
        if warnings.is_empty() {
            self.line(&summary, None);
            return;
        }

        self.line(&summary, Some(&self.post));
        for warning in warnings {
            self.line(&format!("  {warning}"), Some(&self.warn));
        }
    }

    fn line(&self, msg: &str, style: Option<&Style>) {
        let _ = match style {
            Some(style) => self.stderr.write_line(&style.apply_to(msg).to_string()),
            None => self.stderr.write_line(msg),
        };
    }
}

/// One-line fragment summary for a post.
fn post_summary(name: &str, fragments: usize, special: usize) -> String {
    let noun = if fragments == 1 { "fragment" } else { "fragments" };
    format!("{name}: {fragments} {noun} ({special} special)")
}
