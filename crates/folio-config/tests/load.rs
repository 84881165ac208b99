//! Loading `folio.toml` through the public API.

use std::path::Path;

use folio_config::{CliSettings, Config, ConfigError, RichTextMode};
use pretty_assertions::assert_eq;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("folio.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[content]
rich_text = "interleave"

[posts]
source_dir = "${FOLIO_IT_UNSET_ROOT:-site}/posts"
extensions = ["html"]

[output]
pretty = false
"#,
    );

    let config = Config::load(Some(&path), None).unwrap();

    assert_eq!(config.content.rich_text, RichTextMode::Interleave);
    assert_eq!(config.posts_resolved.source_dir, dir.path().join("site/posts"));
    assert_eq!(config.posts_resolved.extensions, vec!["html"]);
    assert!(!config.output.pretty);
}

#[test]
fn test_cli_settings_take_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[content]\nrich_text = \"interleave\"\n");

    let settings = CliSettings {
        source_dir: Some(dir.path().join("elsewhere")),
        rich_text: Some(RichTextMode::Drop),
        pretty: None,
    };
    let config = Config::load(Some(&path), Some(&settings)).unwrap();

    assert_eq!(config.content.rich_text, RichTextMode::Drop);
    assert_eq!(config.posts_resolved.source_dir, dir.path().join("elsewhere"));
    assert!(config.output.pretty);
}

#[test]
fn test_missing_env_var_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[posts]\nsource_dir = \"${FOLIO_IT_MISSING}\"\n");

    let err = Config::load(Some(&path), None).unwrap_err();

    assert!(matches!(err, ConfigError::EnvVar { .. }));
    assert!(err.to_string().contains("FOLIO_IT_MISSING"));
}

#[test]
fn test_empty_extensions_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[posts]\nextensions = []\n");

    let err = Config::load(Some(&path), None).unwrap_err();

    assert!(matches!(err, ConfigError::Validation(_)));
}
