//! Carousel widget library: index ownership, slide composition, and a terminal renderer.
//!
//! The `carousel` binary is a thin shell over these modules.

pub mod adapter;
pub mod attrs;
pub mod button;
pub mod carousel;
pub mod component;
pub mod config;
pub mod cycle_index;
mod lock;
pub mod node;
pub mod slide;
pub mod slide_view;
pub mod state;
mod telemetry;
pub mod terminal_restore;
pub mod tui;

pub use adapter::{
    with_index, IndexBinding, IndexKey, IndexedComponent, PageIndex, SlideIndex, WithIndex,
};
pub use carousel::{
    Carousel, CarouselProps, CarouselView, ACTION_ATTR, NEXT_ACTION, PREV_ACTION,
};
pub use component::Component;
pub use config::{AppConfig, LogLevel};
pub use node::{ClickHandler, Element, Node};
pub use slide::{load_deck, parse_deck, DeckError, DeckFormat, Slide, SlideDeck};
pub use state::{transition, IndexAction, IndexCell};
pub use telemetry::{init_tracing, tracing_log_path};
