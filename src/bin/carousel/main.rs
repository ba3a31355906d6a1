//! Carousel entrypoint so a deck file, an ownership mode, and the terminal UI start as one runtime.
//!
//! `--print` skips the terminal entirely: scripted `--clicks` are applied to the
//! rendered tree and the final markup goes to stdout.

mod app;
mod config;
mod event_loop;

use anyhow::{Context, Result};
use carousel_tui::slide_view::SlideDefaults;
use carousel_tui::{init_tracing, load_deck, parse_deck, CarouselProps, DeckFormat, Slide};
use clap::Parser;

use crate::app::CarouselApp;
use crate::config::CarouselConfig;
use crate::event_loop::run_event_loop;

const SAMPLE_DECK: &str = include_str!("../../../decks/sample.toml");

fn main() -> Result<()> {
    let config = CarouselConfig::parse();
    init_tracing(&config.app);

    let slides = load_slides(&config)?;
    tracing::info!(
        ownership = %config.ownership,
        slides = slides.len(),
        "carousel starting"
    );
    let defaults = SlideDefaults {
        img_height: config.img_height,
        ..SlideDefaults::default()
    };
    let app = CarouselApp::new(
        config.ownership,
        CarouselProps::new(slides).defaults(defaults),
    );

    for action in &config.clicks {
        app.apply(*action);
    }

    if config.print {
        println!("{}", app.render().to_markup());
        return Ok(());
    }
    run_event_loop(&app, !config.no_mouse)
}

fn load_slides(config: &CarouselConfig) -> Result<Vec<Slide>> {
    match config.resolve_deck_path() {
        Some(path) => {
            load_deck(&path).with_context(|| format!("failed to load deck {}", path.display()))
        }
        None => parse_deck(SAMPLE_DECK, DeckFormat::Toml).context("built-in sample deck is invalid"),
    }
}
