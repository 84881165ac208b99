//! Configuration management for folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `posts.source_dir` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override posts source directory.
    pub source_dir: Option<PathBuf>,
    /// Override rich text merge mode.
    pub rich_text: Option<RichTextMode>,
    /// Override pretty-printed JSON output.
    pub pretty: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content pipeline configuration.
    pub content: ContentConfig,
    /// Posts configuration (paths are relative strings from TOML).
    posts: PostsConfigRaw,
    /// Output configuration.
    pub output: OutputConfig,

    /// Resolved posts configuration (set after loading).
    #[serde(skip)]
    pub posts_resolved: PostsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// How segments mixing text with embeds, playgrounds, charts or diagrams
/// are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RichTextMode {
    /// Keep only the special fragments of such a segment.
    #[default]
    Drop,
    /// Keep the text between special fragments, in source order.
    Interleave,
}

/// Content pipeline configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Merge mode for rich segments.
    pub rich_text: RichTextMode,
}

/// Raw posts configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PostsConfigRaw {
    source_dir: Option<String>,
    extensions: Option<Vec<String>>,
}

/// Resolved posts configuration with absolute paths.
#[derive(Debug, Default)]
pub struct PostsConfig {
    /// Directory holding post bodies.
    pub source_dir: PathBuf,
    /// File extensions treated as posts, without the leading dot.
    pub extensions: Vec<String>,
}

impl PostsConfig {
    /// Whether `path` has one of the configured post extensions.
    #[must_use]
    pub fn is_post(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Default post file extensions.
fn default_extensions() -> Vec<String> {
    vec!["html".to_owned(), "md".to_owned()]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`posts.source_dir`").
        field: String,
        /// Error message (e.g., "${`BLOG_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.posts_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(rich_text) = settings.rich_text {
            self.content.rich_text = rich_text;
        }
        if let Some(pretty) = settings.pretty {
            self.output.pretty = pretty;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfig::default(),
            posts: PostsConfigRaw::default(),
            output: OutputConfig::default(),
            posts_resolved: PostsConfig {
                source_dir: base.join("posts"),
                extensions: default_extensions(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(source_dir) = &self.posts.source_dir {
            require_non_empty(source_dir.trim(), expand::SOURCE_DIR_FIELD)?;
        }

        let posts = &self.posts_resolved;

        if posts.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "posts.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &posts.extensions {
            require_non_empty(ext, "posts.extensions entry")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.posts.source_dir {
            self.posts.source_dir = Some(expand::expand_source_dir(dir)?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let extensions = self.posts.extensions.clone().map_or_else(default_extensions, |exts| {
            exts.iter()
                .map(|e| e.trim().trim_start_matches('.').to_owned())
                .collect()
        });

        self.posts_resolved = PostsConfig {
            source_dir: config_dir.join(self.posts.source_dir.as_deref().unwrap_or("posts")),
            extensions,
        };
    }
}
