//! One carousel behind either ownership mode so the event loop and print mode drive them the same way.

use carousel_tui::{
    with_index, Carousel, CarouselProps, CarouselView, Component, Node, SlideIndex, WithIndex,
    ACTION_ATTR,
};

use crate::config::{ClickAction, Ownership};

enum Widget {
    Local(Carousel),
    Delegated(WithIndex<CarouselView, SlideIndex>),
}

pub(crate) struct CarouselApp {
    widget: Widget,
    props: CarouselProps,
    ownership: Ownership,
}

impl CarouselApp {
    pub(crate) fn new(ownership: Ownership, props: CarouselProps) -> Self {
        let widget = match ownership {
            Ownership::Local => Widget::Local(Carousel::new()),
            Ownership::Delegated => Widget::Delegated(with_index(CarouselView::new())),
        };
        Self {
            widget,
            props,
            ownership,
        }
    }

    pub(crate) fn render(&self) -> Node {
        let props = self.props.clone();
        match &self.widget {
            Widget::Local(carousel) => carousel.render(props),
            Widget::Delegated(adapter) => adapter.render(props),
        }
    }

    /// Stored index; may exceed the deck after the deck shrinks.
    pub(crate) fn index(&self) -> usize {
        match &self.widget {
            Widget::Local(carousel) => carousel.index(),
            Widget::Delegated(adapter) => adapter.index(),
        }
    }

    /// Press a navigation button on a fresh render. Returns false if no button matched.
    pub(crate) fn apply(&self, action: ClickAction) -> bool {
        let clicked = self.render().click_by_attr(ACTION_ATTR, action.as_attr());
        tracing::debug!(?action, clicked, index = self.index(), "carousel click");
        clicked
    }

    pub(crate) fn status(&self) -> String {
        let len = self.props.deck.len();
        let position = if len == 0 {
            "no slides".to_string()
        } else {
            format!("slide {}/{len}", self.index() % len + 1)
        };
        format!(
            "{position} · {} · ←/h prev  →/l next  q quit",
            self.ownership
        )
    }
}
