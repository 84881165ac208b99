//! `folio fence` commands.
//!
//! Print markup ready to paste into a post body. Nothing is printed when the
//! input would not parse back into the intended fragment.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use folio_content::editor::{self, MediaSource};
use folio_content::{GalleryImage, InsertError, PlaygroundOptions};

use crate::error::CliError;
use crate::output::Output;

/// Insertable markup commands.
#[derive(Subcommand)]
pub(crate) enum FenceCommand {
    /// Print a chart fence for a JSON data file.
    Chart(ChartArgs),
    /// Print a playground fence for a code file.
    Playground(PlaygroundArgs),
    /// Print a gallery marker for a list of images.
    Gallery(GalleryArgs),
}

impl FenceCommand {
    /// Execute the fence command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markup = match self {
            Self::Chart(args) => args.render()?,
            Self::Playground(args) => args.render()?,
            Self::Gallery(args) => match args.render()? {
                Some(markup) => markup,
                None => return Err(CliError::Validation("No images given".to_owned())),
            },
        };
        Output::new().result(&markup)?;
        Ok(())
    }
}

/// Arguments for the chart fence command.
#[derive(Args)]
pub(crate) struct ChartArgs {
    /// Chart type, such as `bar` or `line`.
    #[arg(short = 't', long = "type")]
    chart_type: String,

    /// Chart title.
    #[arg(long)]
    title: Option<String>,

    /// JSON file with the chart data.
    data_file: PathBuf,
}

impl ChartArgs {
    fn render(&self) -> Result<String, CliError> {
        let data = std::fs::read_to_string(&self.data_file)?;
        Ok(editor::chart_fence(
            &self.chart_type,
            self.title.as_deref(),
            &data,
        )?)
    }
}

/// Arguments for the playground fence command.
#[derive(Args)]
pub(crate) struct PlaygroundArgs {
    /// Editor language (default: javascript).
    #[arg(short, long)]
    language: Option<String>,

    /// Let readers edit the code.
    #[arg(long)]
    editable: bool,

    /// Editor height as a CSS length (default: 500px).
    #[arg(long)]
    height: Option<String>,

    /// File with the playground code.
    code_file: PathBuf,
}

impl PlaygroundArgs {
    fn options(&self) -> PlaygroundOptions {
        let defaults = PlaygroundOptions::default();
        PlaygroundOptions {
            language: self.language.clone().unwrap_or(defaults.language),
            read_only: !self.editable,
            height: self.height.clone().unwrap_or(defaults.height),
        }
    }

    fn render(&self) -> Result<String, CliError> {
        let code = std::fs::read_to_string(&self.code_file)?;
        Ok(editor::playground_fence(&self.options(), &code)?)
    }
}

/// Arguments for the gallery marker command.
#[derive(Args)]
pub(crate) struct GalleryArgs {
    /// Images as `URL` or `URL|CAPTION`.
    #[arg(required = true)]
    images: Vec<String>,
}

impl GalleryArgs {
    fn render(self) -> Result<Option<String>, CliError> {
        let mut source = ArgsMediaSource {
            images: self.images,
        };
        Ok(editor::insert_gallery(&mut source)?)
    }
}

/// Media selection taken from command line arguments.
struct ArgsMediaSource {
    images: Vec<String>,
}

impl MediaSource for ArgsMediaSource {
    fn select(&mut self) -> Result<Option<Vec<GalleryImage>>, InsertError> {
        self.images
            .drain(..)
            .map(|spec| parse_image(&spec))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Parse `URL` or `URL|CAPTION`.
fn parse_image(spec: &str) -> Result<GalleryImage, InsertError> {
    let (url, caption) = match spec.split_once('|') {
        Some((url, caption)) => (url.trim(), Some(caption.trim())),
        None => (spec.trim(), None),
    };
    if url.is_empty() {
        return Err(InsertError::MediaSource(format!("missing image URL in '{spec}'")));
    }

    let mut image = GalleryImage::new(url);
    image.caption = caption.filter(|c| !c.is_empty()).map(str::to_owned);
    Ok(image)
}
