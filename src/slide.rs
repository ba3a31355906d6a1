//! Slide records and the caller-owned deck handle the carousel reads from.
//!
//! Slides are plain typed records. The only fallible path is loading them from
//! an external deck file, which goes through [`parse_deck`] and yields
//! [`DeckError`] instead of half-valid slides.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::Deserialize;

use crate::attrs::Attrs;
use crate::lock::{read_or_recover, write_or_recover};
use crate::node::ClickHandler;

/// One display unit.
#[derive(Debug, Clone)]
pub struct Slide {
    pub img_url: String,
    pub description: String,
    pub attribution: Option<String>,
    /// Per-slide override of the default image height (rows).
    pub img_height: Option<u16>,
    pub attrs: Attrs,
    /// Attached to the rendered `figure`.
    pub on_click: Option<ClickHandler>,
}

/// Handlers compare by identity: two slides are equal only if they share the same closure.
impl PartialEq for Slide {
    fn eq(&self, other: &Self) -> bool {
        let same_handler = match (&self.on_click, &other.on_click) {
            (Some(ours), Some(theirs)) => ours.ptr_eq(theirs),
            (None, None) => true,
            _ => false,
        };
        same_handler
            && self.img_url == other.img_url
            && self.description == other.description
            && self.attribution == other.attribution
            && self.img_height == other.img_height
            && self.attrs == other.attrs
    }
}

impl Eq for Slide {}

impl Slide {
    #[must_use]
    pub fn new(img_url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            img_url: img_url.into(),
            description: description.into(),
            attribution: None,
            img_height: None,
            attrs: Attrs::new(),
            on_click: None,
        }
    }

    #[must_use]
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    #[must_use]
    pub fn with_img_height(mut self, rows: u16) -> Self {
        self.img_height = Some(rows);
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    #[must_use]
    pub fn with_on_click(mut self, handler: ClickHandler) -> Self {
        self.on_click = Some(handler);
        self
    }
}

/// Shared, caller-owned slide sequence.
///
/// Clones share storage. The carousel only reads through this handle; the
/// owner may replace or edit the slides between renders, and click handlers
/// see the length current at click time.
#[derive(Debug, Clone, Default)]
pub struct SlideDeck {
    slides: Arc<RwLock<Vec<Slide>>>,
}

impl SlideDeck {
    #[must_use]
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides: Arc::new(RwLock::new(slides)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        read_or_recover(&self.slides, "SlideDeck::len").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Slide> {
        read_or_recover(&self.slides, "SlideDeck::get")
            .get(index)
            .cloned()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Slide> {
        read_or_recover(&self.slides, "SlideDeck::snapshot").clone()
    }

    pub fn replace(&self, slides: Vec<Slide>) {
        *write_or_recover(&self.slides, "SlideDeck::replace") = slides;
    }

    pub fn push(&self, slide: Slide) {
        write_or_recover(&self.slides, "SlideDeck::push").push(slide);
    }

    pub fn remove(&self, index: usize) -> Option<Slide> {
        let mut slides = write_or_recover(&self.slides, "SlideDeck::remove");
        (index < slides.len()).then(|| slides.remove(index))
    }
}

impl From<Vec<Slide>> for SlideDeck {
    fn from(slides: Vec<Slide>) -> Self {
        Self::new(slides)
    }
}

// ---------------------------------------------------------------------------
// Deck files
// ---------------------------------------------------------------------------

/// Errors from loading a deck file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    Io(String),
    Parse(String),
    UnsupportedFormat(String),
    Empty,
    MissingField { slide: usize, field: &'static str },
    InvalidSlide { slide: usize, reason: String },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "deck parse error: {msg}"),
            Self::UnsupportedFormat(ext) => write!(f, "unsupported deck format: {ext}"),
            Self::Empty => f.write_str("deck contains no slides"),
            Self::MissingField { slide, field } => {
                write!(f, "slide {slide} is missing required field `{field}`")
            }
            Self::InvalidSlide { slide, reason } => write!(f, "slide {slide} is invalid: {reason}"),
        }
    }
}

impl std::error::Error for DeckError {}

/// Deck file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckFormat {
    Toml,
    Json,
}

impl DeckFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, DeckError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            other => Err(DeckError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SlideRecord {
    #[serde(default)]
    img_url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    attribution: Option<String>,
    #[serde(default)]
    img_height: Option<u16>,
    #[serde(flatten)]
    attrs: Attrs,
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    slides: Vec<SlideRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDeck {
    Wrapped(DeckFile),
    Bare(Vec<SlideRecord>),
}

/// Parse deck text into validated slides.
pub fn parse_deck(text: &str, format: DeckFormat) -> Result<Vec<Slide>, DeckError> {
    let records = match format {
        DeckFormat::Toml => {
            toml::from_str::<DeckFile>(text)
                .map_err(|err| DeckError::Parse(err.to_string()))?
                .slides
        }
        DeckFormat::Json => match serde_json::from_str::<JsonDeck>(text)
            .map_err(|err| DeckError::Parse(err.to_string()))?
        {
            JsonDeck::Wrapped(file) => file.slides,
            JsonDeck::Bare(records) => records,
        },
    };
    if records.is_empty() {
        return Err(DeckError::Empty);
    }
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_slide(index))
        .collect()
}

/// Read and parse a deck file, choosing the format by extension.
pub fn load_deck(path: &Path) -> Result<Vec<Slide>, DeckError> {
    let format = DeckFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .map_err(|err| DeckError::Io(format!("{}: {err}", path.display())))?;
    let slides = parse_deck(&text, format)?;
    tracing::debug!(path = %path.display(), slides = slides.len(), "deck loaded");
    Ok(slides)
}

impl SlideRecord {
    fn into_slide(self, index: usize) -> Result<Slide, DeckError> {
        let img_url = required(self.img_url, index, "img_url")?;
        let description = required(self.description, index, "description")?;
        if self.img_height == Some(0) {
            return Err(DeckError::InvalidSlide {
                slide: index,
                reason: "img_height must be at least 1".to_string(),
            });
        }
        Ok(Slide {
            img_url,
            description: sanitize_caption(&description),
            attribution: self
                .attribution
                .map(|text| sanitize_caption(&text))
                .filter(|text| !text.is_empty()),
            img_height: self.img_height,
            attrs: self.attrs,
            on_click: None,
        })
    }
}

fn required(
    value: Option<String>,
    slide: usize,
    field: &'static str,
) -> Result<String, DeckError> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(DeckError::MissingField { slide, field })
}

/// Deck captions come from files we do not control; drop escape sequences
/// before they reach the terminal.
fn sanitize_caption(text: &str) -> String {
    strip_ansi_escapes::strip_str(text).trim().to_string()
}
