#![forbid(unsafe_code)]

//! Capability traits at the seams between the store, the backing data, and
//! the drag controller.

/// Backing data for a selectable list.
///
/// Implementors supply the item count and selectability, and receive repaint
/// requests when membership changes. Binding a list requires this trait at
/// the call site, so a data source without the contract never type-checks.
pub trait SelectionAdapter {
    /// Total number of items in the list.
    fn item_count(&self) -> usize;

    /// Whether the item at `index` may be selected.
    fn is_index_selectable(&self, _index: usize) -> bool {
        true
    }

    /// Repaint a single item whose selection state changed.
    fn on_item_changed(&mut self, _index: usize) {}

    /// Repaint every item.
    fn on_data_set_changed(&mut self) {}
}

impl<A: SelectionAdapter + ?Sized> SelectionAdapter for Box<A> {
    fn item_count(&self) -> usize {
        (**self).item_count()
    }

    fn is_index_selectable(&self, index: usize) -> bool {
        (**self).is_index_selectable(index)
    }

    fn on_item_changed(&mut self, index: usize) {
        (**self).on_item_changed(index);
    }

    fn on_data_set_changed(&mut self) {
        (**self).on_data_set_changed();
    }
}

/// The selection surface a drag controller drives.
///
/// Indices passed in are assumed to be valid (`< item_count()`); the drag
/// controller validates pointer targets before calling.
pub trait SelectionTarget {
    /// Total number of items.
    fn item_count(&self) -> usize;

    /// Whether the item at `index` may be selected.
    fn is_index_selectable(&self, index: usize) -> bool;

    /// Whether the item at `index` is currently selected.
    fn is_index_selected(&self, index: usize) -> bool;

    /// Select or deselect a single item.
    fn set_selected(&mut self, index: usize, selected: bool);

    /// Reconcile the selection with the current drag extent.
    ///
    /// `anchor` is where the drag began, `current` is the item under the
    /// pointer, and `min_visited..=max_visited` is every index the drag has
    /// touched so far.
    fn select_range(
        &mut self,
        anchor: usize,
        current: usize,
        min_visited: usize,
        max_visited: usize,
    );
}
