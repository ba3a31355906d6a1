//! Renderable element tree so components stay independent of the terminal backend.
//!
//! Components return a [`Node`]. The terminal backend draws it, `--print`
//! serializes it with [`Node::to_markup`], and tests query it the way a user
//! would: find an element, read its text, click it.

use std::fmt;
use std::sync::Arc;

use crate::attrs::{AttrValue, Attrs};

/// Click callback attached to an element.
#[derive(Clone)]
pub struct ClickHandler(Arc<dyn Fn() + Send + Sync>);

impl ClickHandler {
    pub fn new(handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    pub fn call(&self) {
        (self.0)();
    }

    /// True when both handles wrap the same closure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}

/// An element with a tag, ordered attributes, an optional click handler and children.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Attrs,
    pub on_click: Option<ClickHandler>,
    pub children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Attrs::new(),
            on_click: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// Append `attrs` after the ones already set; later values win.
    #[must_use]
    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs.extend(attrs);
        self
    }

    #[must_use]
    pub fn on_click(mut self, handler: Option<ClickHandler>) -> Self {
        self.on_click = handler;
        self
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Invoke the click handler. Returns false when the element has none.
    pub fn click(&self) -> bool {
        match &self.on_click {
            Some(handler) => {
                handler.call();
                true
            }
            None => false,
        }
    }

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

/// A rendered node.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Node {
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Tag of an element node; `None` for text.
    #[must_use]
    pub fn tag(&self) -> Option<&'static str> {
        self.as_element().map(|element| element.tag)
    }

    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// First element in document order matching `predicate`, including `self`.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let element = self.as_element()?;
        if predicate(element) {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find(predicate))
    }

    #[must_use]
    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|element: &Element| element.tag == tag)
    }

    /// First element whose `key` attribute renders as `value`.
    #[must_use]
    pub fn find_by_attr(&self, key: &str, value: &str) -> Option<&Element> {
        self.find(&|element: &Element| {
            element.attrs.get_text(key).as_deref() == Some(value)
        })
    }

    /// Click the first element whose `key` attribute equals `value`.
    /// Returns false when no such element exists or it has no handler.
    pub fn click_by_attr(&self, key: &str, value: &str) -> bool {
        self.find_by_attr(key, value)
            .is_some_and(Element::click)
    }

    /// HTML-like serialization used by `--print` and snapshot-style tests.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape(text)),
            Self::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (key, value) in element.attrs.iter() {
                    match value {
                        AttrValue::Flag(true) => {
                            out.push(' ');
                            out.push_str(key);
                        }
                        AttrValue::Flag(false) => {}
                        _ => {
                            out.push_str(&format!(" {key}=\"{}\"", escape(&value.to_string())));
                        }
                    }
                }
                if element.children.is_empty() {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for child in &element.children {
                    child.write_markup(out);
                }
                out.push_str(&format!("</{}>", element.tag));
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
