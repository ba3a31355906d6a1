//! Command-line surface for the carousel binary so deck, ownership, and scripted clicks resolve in one place.

use carousel_tui::config::AppConfig;
use carousel_tui::{NEXT_ACTION, PREV_ACTION};
use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Who stores the slide index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Ownership {
    /// The carousel keeps its own index
    Local,
    /// An index adapter owns the index and hands it to the view
    Delegated,
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Delegated => "delegated",
        })
    }
}

/// A navigation button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ClickAction {
    Prev,
    Next,
}

impl ClickAction {
    /// `data-action` value of the matching button.
    pub(crate) fn as_attr(self) -> &'static str {
        match self {
            Self::Prev => PREV_ACTION,
            Self::Next => NEXT_ACTION,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(name = "carousel", about = "Terminal image carousel", author, version)]
pub(crate) struct CarouselConfig {
    #[command(flatten)]
    pub(crate) app: AppConfig,

    /// Deck file (.toml or .json); defaults to <config dir>/carousel/deck.toml, then a built-in sample
    #[arg(long = "deck", env = "CAROUSEL_DECK")]
    pub(crate) deck: Option<PathBuf>,

    /// Where the slide index lives
    #[arg(long = "ownership", value_enum, default_value_t = Ownership::Delegated)]
    pub(crate) ownership: Ownership,

    /// Image height in rows for slides that do not set one
    #[arg(
        long = "img-height",
        default_value_t = carousel_tui::slide_view::DEFAULT_IMG_HEIGHT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub(crate) img_height: u16,

    /// Comma-separated button presses applied before display (e.g. next,next,prev)
    #[arg(long = "clicks", value_enum, value_delimiter = ',')]
    pub(crate) clicks: Vec<ClickAction>,

    /// Print the rendered markup and exit instead of opening the terminal UI
    #[arg(long = "print", default_value_t = false)]
    pub(crate) print: bool,

    /// Leave mouse capture off
    #[arg(long = "no-mouse", default_value_t = false)]
    pub(crate) no_mouse: bool,
}

impl CarouselConfig {
    /// Explicit `--deck`, else the per-user deck when it exists.
    pub(crate) fn resolve_deck_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.deck {
            return Some(path.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("carousel").join("deck.toml"))
            .filter(|path| path.is_file())
    }
}
