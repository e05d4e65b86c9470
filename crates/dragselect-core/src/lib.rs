#![forbid(unsafe_code)]

//! Core: selection bookkeeping for drag-to-select lists.
//!
//! # Role in dragselect
//! `dragselect-core` is the leaf of the stack. It owns the set of selected
//! item indices and the contracts the rest of the system talks through:
//!
//! - **SelectionStore**: the selected-index set, selection cap, coalesced
//!   count listener, range reconciliation, and save/restore.
//! - **SelectionAdapter**: what a backing data source must provide (item
//!   count, selectability, repaint hooks).
//! - **SelectionTarget**: what the drag controller drives. Implemented by
//!   [`SelectionStore`].
//! - **Stateful / StateBlob**: persistence into an opaque key-value blob.
//! - **DiagnosticSink**: injected observability, no-op unless wired.
//!
//! # How it fits in the system
//! The `dragselect` crate maps pointer events to item indices and calls
//! [`SelectionTarget::select_range`] on every index change. Nothing in this
//! crate knows about pointers, pixels, or timers.

pub mod adapter;
pub mod diagnostics;
pub mod selection;
pub mod stateful;

pub use adapter::{SelectionAdapter, SelectionTarget};
pub use diagnostics::{
    Diagnostic, DiagnosticSink, HotspotEdge, MemorySink, NoopSink, TracingSink,
};
pub use selection::{SELECTED_INDICES_KEY, SelectionStore};
pub use stateful::{SelectionPersistState, StateBlob, StateKey, Stateful};
