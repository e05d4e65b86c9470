#![forbid(unsafe_code)]

//! Selected-index bookkeeping for a drag-selectable list.
//!
//! [`SelectionStore`] wraps a [`SelectionAdapter`] and tracks which of its
//! items are selected.
//!
//! # Invariants
//!
//! 1. An index enters the set only if the adapter reports it selectable at
//!    that moment. Later changes to the backing list may leave stale indices;
//!    pruning them is the caller's job.
//! 2. With a cap of `n`, the set never holds more than `n` indices.
//!    Selections past the cap are dropped silently.
//! 3. The selection listener fires only when the set's size differs from the
//!    size at the previous dispatch, and at most once per public operation.
//! 4. A repaint is requested only for indices whose membership changed,
//!    except [`SelectionStore::toggle_selected`], which always repaints.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::adapter::{SelectionAdapter, SelectionTarget};
use crate::diagnostics::{self, Diagnostic, DiagnosticSink};
use crate::stateful::{SelectionPersistState, StateBlob, StateKey, Stateful};

/// Blob key used by [`SelectionStore::save_instance_state`].
pub const SELECTED_INDICES_KEY: &str = "selected_indices";

type SelectionListener = Box<dyn FnMut(usize)>;

/// Selected-index set over a backing adapter.
pub struct SelectionStore<A> {
    adapter: A,
    selected: BTreeSet<usize>,
    max_selection_count: Option<usize>,
    listener: Option<SelectionListener>,
    /// Size at the last listener dispatch.
    last_count: usize,
    persistence_id: Option<String>,
    sink: Rc<dyn DiagnosticSink>,
}

impl<A: fmt::Debug> fmt::Debug for SelectionStore<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("adapter", &self.adapter)
            .field("selected", &self.selected)
            .field("max_selection_count", &self.max_selection_count)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl<A: SelectionAdapter> SelectionStore<A> {
    /// Create an empty store over `adapter`.
    #[must_use]
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            selected: BTreeSet::new(),
            max_selection_count: None,
            listener: None,
            last_count: 0,
            persistence_id: None,
            sink: diagnostics::noop(),
        }
    }

    /// Attach a persistence id used by the [`Stateful`] key.
    #[must_use]
    pub fn with_persistence_id(mut self, id: impl Into<String>) -> Self {
        self.persistence_id = Some(id.into());
        self
    }

    /// Route diagnostics to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn set_sink(&mut self, sink: Rc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    #[inline]
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    #[inline]
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Consume the store and return the adapter.
    pub fn into_adapter(self) -> A {
        self.adapter
    }

    #[inline]
    #[must_use]
    pub fn persistence_id(&self) -> Option<&str> {
        self.persistence_id.as_deref()
    }

    /// Cap the number of selected items. `None` removes the cap.
    ///
    /// Lowering the cap below the current count does not evict anything; it
    /// only blocks further additions.
    pub fn set_max_selection_count(&mut self, max: Option<usize>) {
        self.max_selection_count = max;
    }

    #[inline]
    #[must_use]
    pub fn max_selection_count(&self) -> Option<usize> {
        self.max_selection_count
    }

    /// Install the selection-count listener, replacing any previous one.
    pub fn set_selection_listener(&mut self, listener: impl FnMut(usize) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_selection_listener(&mut self) {
        self.listener = None;
    }

    // --- Mutations -------------------------------------------------------

    /// Select or deselect `index`.
    ///
    /// Selecting an unselectable index is treated as a deselect. Selecting
    /// past the cap is a no-op.
    pub fn set_selected(&mut self, index: usize, selected: bool) {
        self.apply(index, selected);
        self.fire_selection_listener();
    }

    /// Flip membership of `index`. Returns whether it is selected afterwards.
    pub fn toggle_selected(&mut self, index: usize) -> bool {
        let mut selected_now = false;
        if self.adapter.is_index_selectable(index) {
            if !self.selected.remove(&index) && self.has_room() {
                self.selected.insert(index);
                selected_now = true;
            }
        } else {
            self.selected.remove(&index);
        }
        self.adapter.on_item_changed(index);
        self.fire_selection_listener();
        selected_now
    }

    /// Reconcile the selection with a drag that started at `anchor`, is now
    /// over `current`, and has visited `min_visited..=max_visited`.
    ///
    /// Only indices inside the visited range (plus `anchor..=current`) are
    /// touched, so the cost tracks the drag extent rather than the list size.
    pub fn select_range(
        &mut self,
        anchor: usize,
        current: usize,
        min_visited: usize,
        max_visited: usize,
    ) {
        if current == anchor {
            // Back on the anchor: everything else the drag touched goes.
            for i in min_visited..=max_visited {
                if i != anchor {
                    self.apply(i, false);
                }
            }
        } else if current < anchor {
            for i in current..=anchor {
                self.apply(i, true);
            }
            if min_visited < current {
                for i in min_visited..current {
                    self.apply(i, false);
                }
            }
            if max_visited > anchor {
                for i in anchor + 1..=max_visited {
                    self.apply(i, false);
                }
            }
        } else {
            for i in anchor..=current {
                self.apply(i, true);
            }
            if max_visited > current {
                for i in current + 1..=max_visited {
                    self.apply(i, false);
                }
            }
            if min_visited < anchor {
                for i in min_visited..anchor {
                    self.apply(i, false);
                }
            }
        }

        self.sink.record(&Diagnostic::RangeReconciled {
            anchor,
            current,
            min_visited,
            max_visited,
            selected_count: self.selected.len(),
        });
        self.fire_selection_listener();
    }

    /// Select every selectable index, replacing the current selection.
    ///
    /// The cap still applies: indices are taken in ascending order until it
    /// is reached.
    pub fn select_all(&mut self) {
        self.selected.clear();
        for i in 0..self.adapter.item_count() {
            if !self.has_room() {
                break;
            }
            if self.adapter.is_index_selectable(i) {
                self.selected.insert(i);
            }
        }
        self.adapter.on_data_set_changed();
        self.fire_selection_listener();
    }

    /// Deselect everything.
    pub fn clear_selected(&mut self) {
        self.selected.clear();
        self.adapter.on_data_set_changed();
        self.fire_selection_listener();
    }

    // --- Queries ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn is_index_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    #[inline]
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected indices in ascending order.
    #[must_use]
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    #[inline]
    #[must_use]
    pub fn selected_set(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    // --- Persistence -----------------------------------------------------

    /// Write the selection into `blob` under [`SELECTED_INDICES_KEY`].
    pub fn save_instance_state(&self, blob: &mut StateBlob) {
        self.save_instance_state_with_key(SELECTED_INDICES_KEY, blob);
    }

    pub fn save_instance_state_with_key(&self, key: &str, blob: &mut StateBlob) {
        blob.put(key, serde_json::Value::from(self.selected_indices()));
    }

    /// Replace the selection with the one stored in `blob`.
    ///
    /// Restored indices pass the same checks as
    /// [`set_selected`](Self::set_selected): out-of-range or unselectable
    /// indices are skipped and the cap holds. A missing key leaves the selection as it is. So does a value that is
    /// not a list of non-negative integers; that case is reported to the
    /// diagnostics sink.
    pub fn restore_instance_state(&mut self, blob: &StateBlob) {
        self.restore_instance_state_with_key(SELECTED_INDICES_KEY, blob);
    }

    pub fn restore_instance_state_with_key(&mut self, key: &str, blob: &StateBlob) {
        let Some(value) = blob.get(key) else {
            return;
        };
        match serde_json::from_value::<Vec<usize>>(value.clone()) {
            Ok(indices) => self.replace_selection(indices),
            Err(err) => self.sink.record(&Diagnostic::RestoreRejected {
                key: key.to_owned(),
                error: err.to_string(),
            }),
        }
    }

    // --- Internals -------------------------------------------------------

    fn has_room(&self) -> bool {
        self.max_selection_count
            .is_none_or(|max| self.selected.len() < max)
    }

    /// Change membership without notifying the listener.
    fn apply(&mut self, index: usize, selected: bool) {
        let selected = selected && self.adapter.is_index_selectable(index);
        let changed = if selected {
            !self.selected.contains(&index) && self.has_room() && self.selected.insert(index)
        } else {
            self.selected.remove(&index)
        };
        if changed {
            self.adapter.on_item_changed(index);
        }
    }

    /// Swap in a persisted set. Indices past the end of the list or no longer
    /// selectable are dropped, and the cap applies in ascending order.
    fn replace_selection(&mut self, indices: Vec<usize>) {
        let count = self.adapter.item_count();
        let mut incoming: Vec<usize> = indices.into_iter().filter(|&i| i < count).collect();
        incoming.sort_unstable();
        incoming.dedup();

        self.selected.clear();
        for i in incoming {
            if !self.has_room() {
                break;
            }
            if self.adapter.is_index_selectable(i) {
                self.selected.insert(i);
            }
        }
        self.adapter.on_data_set_changed();
        self.fire_selection_listener();
    }

    fn fire_selection_listener(&mut self) {
        let count = self.selected.len();
        if count == self.last_count {
            return;
        }
        self.last_count = count;
        self.sink.record(&Diagnostic::SelectionCountChanged { count });
        if let Some(listener) = self.listener.as_mut() {
            listener(count);
        }
    }
}

impl<A: SelectionAdapter> SelectionTarget for SelectionStore<A> {
    fn item_count(&self) -> usize {
        self.adapter.item_count()
    }

    fn is_index_selectable(&self, index: usize) -> bool {
        self.adapter.is_index_selectable(index)
    }

    fn is_index_selected(&self, index: usize) -> bool {
        SelectionStore::is_index_selected(self, index)
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        SelectionStore::set_selected(self, index, selected);
    }

    fn select_range(
        &mut self,
        anchor: usize,
        current: usize,
        min_visited: usize,
        max_visited: usize,
    ) {
        SelectionStore::select_range(self, anchor, current, min_visited, max_visited);
    }
}

impl<A: SelectionAdapter> Stateful for SelectionStore<A> {
    type State = SelectionPersistState;

    fn state_key(&self) -> StateKey {
        StateKey::new(
            "Selection",
            self.persistence_id.as_deref().unwrap_or("default"),
        )
    }

    fn save_state(&self) -> SelectionPersistState {
        SelectionPersistState {
            selected: self.selected_indices(),
        }
    }

    fn restore_state(&mut self, state: SelectionPersistState) {
        self.replace_selection(state.selected);
    }
}
