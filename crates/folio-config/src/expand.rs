//! `${VAR}` expansion in the posts directory setting.
//!
//! Lets one `folio.toml` serve several checkouts of a blog, for example
//! `source_dir = "${BLOG_ROOT:-.}/posts"`. Bare `$VAR` is left alone, so
//! directory names containing `$` survive.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// Setting that supports expansion, as named in errors.
pub(crate) const SOURCE_DIR_FIELD: &str = "posts.source_dir";

/// Expand `${VAR}` and `${VAR:-default}` in a posts directory value.
///
/// A variable without a default must be set and valid Unicode.
pub(crate) fn expand_source_dir(value: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(Cow::into_owned)
        .map_err(|e| {
            let problem = match e.cause {
                VarError::NotPresent => "is not set",
                VarError::NotUnicode(_) => "is not valid Unicode",
            };
            ConfigError::EnvVar {
                field: SOURCE_DIR_FIELD.to_owned(),
                message: format!(
                    "${{{var}}} {problem} (set it, or write ${{{var}:-posts}} for a fallback)",
                    var = e.var_name
                ),
            }
        })
}
