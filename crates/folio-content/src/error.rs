//! Error types for editor-side insertion.
//!
//! Parsing never fails; only building new content for a post can.

/// Error building content to insert into a post body.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    /// Chart data is not valid JSON.
    #[error("Invalid chart data JSON: {0}")]
    InvalidChartData(#[source] serde_json::Error),

    /// Chart type is empty.
    #[error("Chart type cannot be empty")]
    EmptyChartType,

    /// Playground code contains a fence delimiter and would close the block early.
    #[error("Playground code cannot contain ```")]
    FenceInCode,

    /// Gallery has no images.
    #[error("Gallery needs at least one image")]
    EmptyGallery,

    /// Serializing a JSON payload failed.
    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        /// What was being serialized.
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The media source failed to provide a selection.
    #[error("Media selection failed: {0}")]
    MediaSource(String),
}
