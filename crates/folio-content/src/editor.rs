//! Building insertable content for the post editor.
//!
//! These helpers produce the exact syntax the parser reads back, and refuse
//! to produce anything the parser would have to degrade to text. Media
//! selection is passed in through [`MediaSource`] and its result handed
//! straight back to the caller.

use serde_json::{Map, Value};

use crate::chart::CHART_KEYWORD;
use crate::error::InsertError;
use crate::fence::FENCE;
use crate::fragment::{Gallery, GalleryImage, PlaygroundOptions};
use crate::gallery::GALLERY_CLASS;
use crate::playground::PLAYGROUND_KEYWORD;

/// Build a chart fence.
///
/// `data` must be valid JSON; it is validated before anything is emitted.
///
/// # Example
///
/// ```
/// use folio_content::editor::chart_fence;
///
/// let fence = chart_fence("bar", Some("Visitors"), "[1, 2, 3]").unwrap();
/// assert_eq!(fence, "```chart {\"title\":\"Visitors\",\"type\":\"bar\"}\n[1, 2, 3]\n```");
///
/// assert!(chart_fence("bar", None, "[1, 2").is_err());
/// ```
pub fn chart_fence(chart_type: &str, title: Option<&str>, data: &str) -> Result<String, InsertError> {
    let chart_type = chart_type.trim();
    if chart_type.is_empty() {
        return Err(InsertError::EmptyChartType);
    }
    let data = data.trim();
    serde_json::from_str::<Value>(data).map_err(InsertError::InvalidChartData)?;

    let mut header = Map::new();
    header.insert("type".to_owned(), Value::from(chart_type));
    if let Some(title) = title {
        header.insert("title".to_owned(), Value::from(title));
    }
    let header = serde_json::to_string(&header).map_err(|source| InsertError::Serialize {
        what: "chart options",
        source,
    })?;

    // Backticks can only occur inside JSON strings, where the escape is
    // equivalent and cannot close the fence.
    let data = data.replace('`', "\\u0060");

    Ok(format!("{FENCE}{CHART_KEYWORD} {header}\n{data}\n{FENCE}"))
}

/// Build a playground fence.
///
/// Only options that differ from the defaults are written to the header.
pub fn playground_fence(options: &PlaygroundOptions, code: &str) -> Result<String, InsertError> {
    if code.contains(FENCE) {
        return Err(InsertError::FenceInCode);
    }

    let defaults = PlaygroundOptions::default();
    let mut header = Map::new();
    if options.language != defaults.language {
        header.insert("language".to_owned(), Value::from(options.language.as_str()));
    }
    if !options.read_only {
        header.insert("readOnly".to_owned(), Value::Bool(false));
    }
    if options.height != defaults.height {
        header.insert("height".to_owned(), Value::from(options.height.as_str()));
    }
    let header = serde_json::to_string(&header).map_err(|source| InsertError::Serialize {
        what: "playground options",
        source,
    })?;

    Ok(format!(
        "{FENCE}{PLAYGROUND_KEYWORD} {header}\n{}\n{FENCE}",
        code.trim()
    ))
}

/// Build a gallery marker element.
pub fn gallery_marker(images: &[GalleryImage]) -> Result<String, InsertError> {
    if images.is_empty() {
        return Err(InsertError::EmptyGallery);
    }

    let gallery = Gallery {
        images: images.to_vec(),
    };
    let json = serde_json::to_string(&gallery).map_err(|source| InsertError::Serialize {
        what: "gallery images",
        source,
    })?;

    Ok(format!(
        "<div class=\"{GALLERY_CLASS}\" data-gallery='{}'></div>",
        escape_attribute(&json)
    ))
}

/// Source of a gallery image selection, such as a media picker dialog.
pub trait MediaSource {
    /// Ask for a selection. `Ok(None)` means the author cancelled.
    fn select(&mut self) -> Result<Option<Vec<GalleryImage>>, InsertError>;
}

/// Ask `source` for images and build the marker for them.
///
/// Returns `Ok(None)` when the selection was cancelled or empty.
pub fn insert_gallery<S: MediaSource + ?Sized>(source: &mut S) -> Result<Option<String>, InsertError> {
    match source.select()? {
        Some(images) if !images.is_empty() => gallery_marker(&images).map(Some),
        _ => Ok(None),
    }
}

/// Escape a value for a single-quoted HTML attribute.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
