//! Component contract shared by leaves, the carousel view, and the index adapter.

use crate::node::Node;

/// A renderable unit: typed props in, a node tree out.
///
/// Rendering must not mutate component state. Interaction happens later, when
/// a click handler captured in the returned tree fires.
pub trait Component {
    type Props;

    fn render(&self, props: Self::Props) -> Node;
}
