//! Fragment types produced by the content pipeline.
//!
//! A post body is parsed into an ordered list of [`Fragment`]s. Renderers
//! switch on the variant: text is emitted as raw HTML, the other variants are
//! handed to dedicated widgets (highlighted code, embeds, playgrounds, charts,
//! diagrams, galleries).
//!
//! Fragments serialize as internally tagged objects with camelCase fields:
//!
//! ```
//! use folio_content::Fragment;
//!
//! let json = serde_json::to_string(&Fragment::text("hi")).unwrap();
//! assert_eq!(json, r#"{"type":"text","content":"hi"}"#);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default language of a fenced code block without a language tag.
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

/// Default playground language.
pub const DEFAULT_PLAYGROUND_LANGUAGE: &str = "javascript";

/// Default playground editor height.
pub const DEFAULT_PLAYGROUND_HEIGHT: &str = "500px";

/// One typed unit of parsed content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fragment {
    /// Literal HTML or plain content, rendered verbatim.
    Text {
        /// The content.
        content: String,
    },
    /// Fenced code block.
    Code(CodeBlock),
    /// Recognized social or video URL.
    Embed(Embed),
    /// Interactive code sample.
    Playground(Playground),
    /// Chart specification.
    Chart(Chart),
    /// Diagram source.
    Diagram(Diagram),
    /// Image gallery.
    Gallery(Gallery),
}

impl Fragment {
    /// Create a text fragment.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Whether this is a [`Fragment::Text`].
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Text content, if this is a text fragment.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            _ => None,
        }
    }

    /// Short type name, matching the serialized `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Code(_) => "code",
            Self::Embed(_) => "embed",
            Self::Playground(_) => "playground",
            Self::Chart(_) => "chart",
            Self::Diagram(_) => "diagram",
            Self::Gallery(_) => "gallery",
        }
    }
}

/// Fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    /// Language tag (`plaintext` when omitted).
    pub language: String,
    /// Filename from the `lang:filename` info string (empty when omitted).
    pub filename: String,
    /// Trimmed block body.
    pub code: String,
    /// Highlighted line numbers. Reserved, always empty.
    #[serde(default)]
    pub highlighted_lines: Vec<u32>,
}

/// Embeddable platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    YouTube,
    Twitter,
    Instagram,
}

impl EmbedKind {
    /// Platform name as used in the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
        }
    }
}

/// Social or video URL reduced to a canonical embed id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embed {
    /// Platform.
    #[serde(rename = "embedType")]
    pub kind: EmbedKind,
    /// Platform-specific id (video id, status id, post shortcode).
    pub id: String,
    /// The URL exactly as it appeared in the content.
    pub url: String,
}

/// Playground editor options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundOptions {
    pub language: String,
    pub read_only: bool,
    pub height: String,
}

impl Default for PlaygroundOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_PLAYGROUND_LANGUAGE.to_owned(),
            read_only: true,
            height: DEFAULT_PLAYGROUND_HEIGHT.to_owned(),
        }
    }
}

impl PlaygroundOptions {
    /// Build options from a parsed header object, applying defaults.
    ///
    /// `readOnly` is only false when explicitly `false`. `height` accepts a
    /// CSS string or a number of pixels.
    #[must_use]
    pub fn from_header(header: &Map<String, Value>) -> Self {
        let defaults = Self::default();

        let language = match header.get("language") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => defaults.language,
        };
        let read_only = header.get("readOnly") != Some(&Value::Bool(false));
        let height = match header.get("height") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => format!("{n}px"),
            _ => defaults.height,
        };

        Self {
            language,
            read_only,
            height,
        }
    }
}

/// Interactive code sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playground {
    pub options: PlaygroundOptions,
    /// Trimmed block body.
    pub code: String,
}

/// Chart specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    /// Chart kind (`bar`, `line`, `pie`, ...), from the header `type`.
    pub chart_type: String,
    /// Dataset parsed from the block body.
    pub data: Value,
    /// Remaining header options (`title`, ...), without `type`.
    pub options: Map<String, Value>,
}

impl Chart {
    /// Chart title from the options, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.options.get("title").and_then(Value::as_str)
    }
}

/// Diagram source, opaque to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    pub definition: String,
}

/// A single gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl GalleryImage {
    /// Image with a URL and no caption or alt text.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
            alt: None,
        }
    }
}

/// Image gallery extracted from an editor marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub images: Vec<GalleryImage>,
}
