//! Index-ownership adapter so a presentational component never decides where its index lives.
//!
//! [`WithIndex`] owns one [`IndexCell`] and, on every render, hands the wrapped
//! component an [`IndexBinding`]: the current value under a compile-time name
//! plus increment/decrement operations that take the modulus at call time.
//!
//! ```
//! use carousel_tui::adapter::{with_index, IndexKey, PageIndex};
//! use carousel_tui::carousel::CarouselView;
//!
//! let carousel = with_index::<PageIndex, _>(CarouselView::new());
//! assert_eq!(carousel.index(), 0);
//! assert_eq!(PageIndex::NAME, "pageIndex");
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::component::Component;
use crate::node::Node;
use crate::state::{IndexAction, IndexCell};

/// Compile-time name under which an adapter exposes its index.
pub trait IndexKey: 'static {
    const NAME: &'static str;

    fn increment_name() -> String {
        format!("{}Increment", Self::NAME)
    }

    fn decrement_name() -> String {
        format!("{}Decrement", Self::NAME)
    }

    /// All three names the binding occupies.
    fn reserved_names() -> [String; 3] {
        [
            Self::NAME.to_string(),
            Self::increment_name(),
            Self::decrement_name(),
        ]
    }
}

/// `slideIndex`, used by the carousel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideIndex;

impl IndexKey for SlideIndex {
    const NAME: &'static str = "slideIndex";
}

/// `pageIndex`, for paged views sharing the same adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageIndex;

impl IndexKey for PageIndex {
    const NAME: &'static str = "pageIndex";
}

/// The index triple injected into a wrapped component.
///
/// `value` is a snapshot taken at render time. The mutators always act on the
/// owner's stored value, so calling them through an older binding still
/// composes with every transition applied since.
pub struct IndexBinding<K> {
    value: usize,
    cell: IndexCell,
    _key: PhantomData<fn() -> K>,
}

impl<K: IndexKey> IndexBinding<K> {
    /// Bind to `cell`, snapshotting its current value.
    #[must_use]
    pub fn from_cell(cell: &IndexCell) -> Self {
        Self {
            value: cell.get(),
            cell: cell.clone(),
            _key: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        K::NAME
    }

    /// `<name>`: the snapshot taken when this binding was handed out.
    #[must_use]
    pub fn value(&self) -> usize {
        self.value
    }

    /// `<name>Increment(modulus)`; returns the stored value afterwards.
    pub fn increment(&self, modulus: usize) -> usize {
        self.cell.dispatch(IndexAction::Increment { modulus })
    }

    /// `<name>Decrement(modulus)`; returns the stored value afterwards.
    pub fn decrement(&self, modulus: usize) -> usize {
        self.cell.dispatch(IndexAction::Decrement { modulus })
    }
}

impl<K> Clone for IndexBinding<K> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            cell: self.cell.clone(),
            _key: PhantomData,
        }
    }
}

impl<K: IndexKey> fmt::Debug for IndexBinding<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexBinding")
            .field("name", &K::NAME)
            .field("value", &self.value)
            .finish()
    }
}

/// A component that renders from caller props plus an injected index binding.
pub trait IndexedComponent<K: IndexKey> {
    type Props;

    fn render_indexed(&self, props: Self::Props, index: IndexBinding<K>) -> Node;
}

/// Wraps `C`, owning the index it renders from.
///
/// Caller props cannot carry the binding: it exists only on the adapter side,
/// so the adapter-injected value always wins. Components that also forward
/// loose attributes drop any that reuse [`IndexKey::reserved_names`].
pub struct WithIndex<C, K> {
    inner: C,
    cell: IndexCell,
    _key: PhantomData<fn() -> K>,
}

impl<C, K: IndexKey> WithIndex<C, K> {
    #[must_use]
    pub fn new(inner: C) -> Self {
        tracing::debug!(name = K::NAME, "index adapter created");
        Self {
            inner,
            cell: IndexCell::new(),
            _key: PhantomData,
        }
    }

    /// Current stored index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.cell.get()
    }

    /// A fresh binding onto this adapter's index.
    #[must_use]
    pub fn binding(&self) -> IndexBinding<K> {
        IndexBinding::from_cell(&self.cell)
    }
}

impl<C, K> Component for WithIndex<C, K>
where
    C: IndexedComponent<K>,
    K: IndexKey,
{
    type Props = C::Props;

    fn render(&self, props: C::Props) -> Node {
        let binding = self.binding();
        tracing::trace!(name = K::NAME, value = binding.value(), "index binding injected");
        self.inner.render_indexed(props, binding)
    }
}

impl<C: fmt::Debug, K: IndexKey> fmt::Debug for WithIndex<C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithIndex")
            .field("name", &K::NAME)
            .field("index", &self.index())
            .field("inner", &self.inner)
            .finish()
    }
}

/// Wrap `inner` in an adapter exposing its index as `K::NAME`.
#[must_use]
pub fn with_index<K: IndexKey, C: IndexedComponent<K>>(inner: C) -> WithIndex<C, K> {
    WithIndex::new(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;

    /// Minimal indexed component that prints its binding.
    struct Pager;

    impl<K: IndexKey> IndexedComponent<K> for Pager {
        type Props = usize;

        fn render_indexed(&self, pages: usize, index: IndexBinding<K>) -> Node {
            Element::new("nav")
                .attr(index.name(), index.value() as i64)
                .attr("data-pages", pages as i64)
                .into()
        }
    }

    #[test]
    fn starts_at_zero_and_exposes_configured_name() {
        let pager = with_index::<PageIndex, _>(Pager);
        let node = pager.render(4);
        assert_eq!(pager.index(), 0);
        assert_eq!(
            node.as_element().expect("nav").attrs.get_text("pageIndex").as_deref(),
            Some("0")
        );
    }

    #[test]
    fn names_are_derived_from_key() {
        assert_eq!(SlideIndex::increment_name(), "slideIndexIncrement");
        assert_eq!(SlideIndex::decrement_name(), "slideIndexDecrement");
        assert_eq!(
            PageIndex::reserved_names(),
            [
                "pageIndex".to_string(),
                "pageIndexIncrement".to_string(),
                "pageIndexDecrement".to_string()
            ]
        );
    }

    #[test]
    fn back_to_back_increments_compose() {
        let pager = with_index::<SlideIndex, _>(Pager);
        let binding = pager.binding();
        for _ in 0..4 {
            binding.increment(5);
        }
        assert_eq!(pager.index(), 4);
        binding.increment(5);
        binding.increment(5);
        assert_eq!(pager.index(), 1);
    }

    #[test]
    fn stale_binding_mutates_true_current_value() {
        let pager = with_index::<SlideIndex, _>(Pager);
        let stale = pager.binding();
        let fresh = pager.binding();
        fresh.increment(5);
        fresh.increment(5);
        fresh.increment(5);
        assert_eq!(stale.value(), 0);
        assert_eq!(stale.increment(5), 4);
        assert_eq!(stale.increment(5), 0);
    }

    #[test]
    fn decrement_wraps_with_modulus_given_at_call_time() {
        let pager = with_index::<SlideIndex, _>(Pager);
        assert_eq!(pager.binding().decrement(3), 2);
        assert_eq!(pager.binding().decrement(2), 1);
        assert_eq!(pager.binding().increment(2), 0);
    }

    #[test]
    fn largest_modulus_wraps_without_poisoning_the_index() {
        let pager = with_index::<SlideIndex, _>(Pager);
        let binding = pager.binding();
        assert_eq!(binding.increment(usize::MAX), 1);
        assert_eq!(binding.increment(usize::MAX), 2);
        assert_eq!(binding.decrement(usize::MAX), 1);
        assert_eq!(binding.decrement(usize::MAX), 0);
        assert_eq!(binding.decrement(usize::MAX), usize::MAX - 1);
        assert_eq!(binding.decrement(usize::MAX - 1), usize::MAX - 2);
        assert_eq!(pager.index(), usize::MAX - 2);
    }

    #[test]
    fn each_adapter_owns_its_own_index() {
        let first = with_index::<SlideIndex, _>(Pager);
        let second = with_index::<SlideIndex, _>(Pager);
        first.binding().increment(3);
        assert_eq!(first.index(), 1);
        assert_eq!(second.index(), 0);
    }

    #[test]
    fn render_snapshots_value_at_render_time() {
        let pager = with_index::<PageIndex, _>(Pager);
        pager.binding().increment(3);
        let node = pager.render(3);
        assert_eq!(
            node.find_by_attr("pageIndex", "1").map(|e| e.tag),
            Some("nav")
        );
    }
}
