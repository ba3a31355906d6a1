//! Navigation button leaf: a labelled clickable element with passthrough attributes.

use crate::attrs::Attrs;
use crate::component::Component;
use crate::node::{ClickHandler, Element, Node};

/// Props for [`CarouselButton`].
#[derive(Debug, Clone)]
pub struct ButtonProps {
    /// Visible label; required.
    pub label: String,
    pub on_click: Option<ClickHandler>,
    /// Forwarded to the `button` element, e.g. `data-action`.
    pub attrs: Attrs,
}

impl ButtonProps {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
            attrs: Attrs::new(),
        }
    }

    #[must_use]
    pub fn on_click(mut self, handler: ClickHandler) -> Self {
        self.on_click = Some(handler);
        self
    }

    #[must_use]
    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CarouselButton;

impl Component for CarouselButton {
    type Props = ButtonProps;

    fn render(&self, props: ButtonProps) -> Node {
        Element::new("button")
            .attrs(props.attrs)
            .on_click(props.on_click)
            .text(props.label)
            .into()
    }
}
