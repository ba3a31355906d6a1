//! Carousel view: one slide plus prev/next buttons, with the index owned locally or by an adapter.
//!
//! The view decides *when* the index moves (a button click) and how the index
//! maps to a slide. Where the index is stored is the caller's choice:
//!
//! - [`Carousel`] keeps its own [`IndexCell`] (local ownership).
//! - [`CarouselView`] wrapped in [`WithIndex`](crate::adapter::WithIndex)
//!   receives the index and its mutators as an [`IndexBinding`] (delegated
//!   ownership).
//!
//! Both paths render through the same composition and the same reducer, so a
//! given click sequence shows the same slides either way.

use crate::adapter::{IndexBinding, IndexKey, IndexedComponent};
use crate::attrs::Attrs;
use crate::button::{ButtonProps, CarouselButton};
use crate::component::Component;
use crate::node::{ClickHandler, Element, Node};
use crate::slide::SlideDeck;
use crate::slide_view::{CarouselSlide, SlideDefaults, SlideProps};
use crate::state::{IndexAction, IndexCell};

pub const PREV_ACTION: &str = "prev";
pub const NEXT_ACTION: &str = "next";
/// Attribute identifying the navigation buttons.
pub const ACTION_ATTR: &str = "data-action";

/// Caller-supplied carousel props.
#[derive(Debug, Clone, Default)]
pub struct CarouselProps {
    pub deck: SlideDeck,
    pub defaults: SlideDefaults,
    /// Forwarded untouched to the outer container.
    pub attrs: Attrs,
}

impl CarouselProps {
    #[must_use]
    pub fn new(deck: impl Into<SlideDeck>) -> Self {
        Self {
            deck: deck.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn defaults(mut self, defaults: SlideDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Presentational carousel. Owns no index; see the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarouselView {
    slide: CarouselSlide,
    button: CarouselButton,
}

impl CarouselView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn compose(
        &self,
        props: CarouselProps,
        index: usize,
        on_prev: ClickHandler,
        on_next: ClickHandler,
    ) -> Node {
        let CarouselProps {
            deck,
            defaults,
            attrs,
        } = props;

        let mut container = Element::new("div").attrs(attrs);
        let len = deck.len();
        match deck.get(index % len.max(1)) {
            Some(slide) => {
                container = container.child(
                    self.slide
                        .render(SlideProps::from_slide(slide, &defaults)),
                );
            }
            None => tracing::warn!(index, "carousel rendered with an empty deck"),
        }
        container
            .child(self.button.render(nav_button("Prev", PREV_ACTION, on_prev)))
            .child(self.button.render(nav_button("Next", NEXT_ACTION, on_next)))
            .into()
    }
}

fn nav_button(label: &str, action: &str, handler: ClickHandler) -> ButtonProps {
    ButtonProps::new(label)
        .attrs(Attrs::new().with(ACTION_ATTR, action))
        .on_click(handler)
}

impl<K: IndexKey> IndexedComponent<K> for CarouselView {
    type Props = CarouselProps;

    fn render_indexed(&self, mut props: CarouselProps, index: IndexBinding<K>) -> Node {
        for name in K::reserved_names() {
            if props.attrs.remove(&name).is_some() {
                tracing::debug!(name = %name, "dropped caller attribute shadowed by index binding");
            }
        }

        let value = index.value();
        let prev_deck = props.deck.clone();
        let next_deck = props.deck.clone();
        let prev_binding = index.clone();
        let next_binding = index;
        let on_prev = ClickHandler::new(move || {
            prev_binding.decrement(prev_deck.len());
        });
        let on_next = ClickHandler::new(move || {
            next_binding.increment(next_deck.len());
        });
        self.compose(props, value, on_prev, on_next)
    }
}

/// Carousel that owns its index.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    view: CarouselView,
    index: IndexCell,
}

impl Carousel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the slide currently shown.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// Step back one slide in `deck`, wrapping at the start.
    pub fn prev(&self, deck: &SlideDeck) -> usize {
        self.index
            .dispatch(IndexAction::Decrement { modulus: deck.len() })
    }

    /// Step forward one slide in `deck`, wrapping at the end.
    pub fn next(&self, deck: &SlideDeck) -> usize {
        self.index
            .dispatch(IndexAction::Increment { modulus: deck.len() })
    }

    fn handler(&self, deck: &SlideDeck, forward: bool) -> ClickHandler {
        let carousel = self.clone();
        let deck = deck.clone();
        ClickHandler::new(move || {
            if forward {
                carousel.next(&deck);
            } else {
                carousel.prev(&deck);
            }
        })
    }
}

impl Component for Carousel {
    type Props = CarouselProps;

    /// Local ownership injects no binding, so every caller attribute is forwarded.
    fn render(&self, props: CarouselProps) -> Node {
        let on_prev = self.handler(&props.deck, false);
        let on_next = self.handler(&props.deck, true);
        self.view.compose(props, self.index(), on_prev, on_next)
    }
}
