#![forbid(unsafe_code)]

//! Drag-to-select for scrollable lists and grids.
//!
//! A long press on an item starts a session; dragging across the list
//! selects everything between the pressed item and the pointer, deselects
//! what the pointer backs away from, and scrolls the list while the pointer
//! sits in a band near the top or bottom edge.
//!
//! # Pieces
//! - [`DragSelectController`]: the `Idle`/`Active` state machine, range
//!   reconciliation driver, and hotspot evaluation.
//! - [`hotspot`]: band geometry and the self-rearming auto-scroll tick.
//! - [`DragSelectList`]: binds a [`ListHost`] and a [`SelectionAdapter`]
//!   with long-press activation.
//! - [`DragSelectConfig`]: tunables, loadable from TOML or JSON.
//!
//! Selection bookkeeping lives in `dragselect-core` and is re-exported here.
//!
//! # Threading
//! Everything runs on the caller's thread. Time is passed in explicitly, and
//! the host decides when to call back by reading
//! [`DragSelectList::next_deadline`].

pub mod binding;
pub mod config;
pub mod controller;
pub mod event;
pub mod host;
pub mod hotspot;

pub use binding::{DragSelectList, LongPressTracker};
pub use config::{ConfigError, DragMode, DragSelectConfig, HotspotConfig};
pub use controller::{DragSelectController, DragSession};
pub use event::{EventDisposition, PointerEvent, PointerEventKind};
pub use host::ListHost;
pub use hotspot::{AutoScroll, Band, HotspotBands, HotspotTransition};

pub use dragselect_core::{
    Diagnostic, DiagnosticSink, HotspotEdge, MemorySink, NoopSink, SELECTED_INDICES_KEY,
    SelectionAdapter, SelectionPersistState, SelectionStore, SelectionTarget, StateBlob, StateKey,
    Stateful, TracingSink,
};
pub use web_time::Instant;
