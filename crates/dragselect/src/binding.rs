#![forbid(unsafe_code)]

//! Glue between a host list, its selection store, and the drag controller.
//!
//! [`DragSelectList`] is what a host widget holds. It routes pointer events,
//! turns a held press into a drag session, and drives auto-scroll ticks.
//!
//! ```rust,ignore
//! let mut list = DragSelectList::bind(host, adapter, DragSelectConfig::default())?;
//! // on every pointer event:
//! if list.on_pointer_event(&event, Instant::now()).is_consumed() {
//!     return;
//! }
//! // on every frame or timer wakeup:
//! list.poll(Instant::now());
//! ```

use std::rc::Rc;

use dragselect_core::{DiagnosticSink, SelectionAdapter, SelectionStore};
use web_time::Instant;

use crate::config::{ConfigError, DragSelectConfig};
use crate::controller::DragSelectController;
use crate::event::{EventDisposition, PointerEvent, PointerEventKind};
use crate::host::ListHost;

/// A pressed pointer that has not moved far enough to count as a scroll.
#[derive(Debug, Clone, Copy)]
struct PendingPress {
    x: f32,
    y: f32,
    since: Instant,
}

/// Detects a stationary press held past the configured threshold.
#[derive(Debug, Clone, Default)]
pub struct LongPressTracker {
    pending: Option<PendingPress>,
}

impl LongPressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an idle-state pointer event.
    pub fn observe(&mut self, event: &PointerEvent, now: Instant, slop: f32) {
        match event.kind {
            PointerEventKind::Down => {
                self.pending = Some(PendingPress {
                    x: event.x,
                    y: event.y,
                    since: now,
                });
            }
            PointerEventKind::Move => {
                if let Some(p) = self.pending
                    && (event.x - p.x).abs() + (event.y - p.y).abs() > slop
                {
                    self.pending = None;
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => self.pending = None,
        }
    }

    /// Position of a press that has been held for `threshold`, consumed on
    /// return so it fires once.
    pub fn check(&mut self, now: Instant, threshold: std::time::Duration) -> Option<(f32, f32)> {
        let p = self.pending?;
        if now.duration_since(p.since) < threshold {
            return None;
        }
        self.pending = None;
        Some((p.x, p.y))
    }

    /// When the pending press would fire.
    #[must_use]
    pub fn deadline(&self, threshold: std::time::Duration) -> Option<Instant> {
        self.pending.map(|p| p.since + threshold)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}

/// A host list bound to a selection store and a drag controller.
pub struct DragSelectList<H, A> {
    host: H,
    store: SelectionStore<A>,
    controller: DragSelectController,
    long_press: LongPressTracker,
}

impl<H, A> std::fmt::Debug for DragSelectList<H, A>
where
    A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragSelectList")
            .field("store", &self.store)
            .field("controller", &self.controller)
            .field("long_press_pending", &self.long_press.is_pending())
            .finish()
    }
}

impl<H: ListHost, A: SelectionAdapter> DragSelectList<H, A> {
    /// Bind `host` to `adapter`. Fails if `config` does not validate.
    pub fn bind(host: H, adapter: A, config: DragSelectConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            host,
            store: SelectionStore::new(adapter),
            controller: DragSelectController::new(config)?,
            long_press: LongPressTracker::new(),
        })
    }

    /// Route diagnostics from both the store and the controller to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.store.set_sink(Rc::clone(&sink));
        self.controller.set_sink(sink);
        self
    }

    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &SelectionStore<A> {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut SelectionStore<A> {
        &mut self.store
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> &DragSelectController {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut DragSelectController {
        &mut self.controller
    }

    /// Start a drag at `index`, e.g. from the host's own long-click handler.
    pub fn activate_drag(&mut self, index: usize) -> bool {
        self.long_press.reset();
        self.controller.activate(index, &mut self.store)
    }

    /// Offer a pointer event. While a drag is active the event is consumed;
    /// otherwise it passes through and arms/disarms the long-press tracker.
    pub fn on_pointer_event(&mut self, event: &PointerEvent, now: Instant) -> EventDisposition {
        let disposition =
            self.controller
                .handle_event(event, now, &mut self.host, &mut self.store);
        if disposition == EventDisposition::PassThrough {
            self.long_press
                .observe(event, now, self.controller.config().touch_slop);
        }
        disposition
    }

    /// Fire a due long press and a due auto-scroll tick.
    ///
    /// Returns `true` if a long press started a drag during this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut started = false;
        if !self.controller.is_active()
            && let Some((x, y)) = self.long_press.check(now, self.controller.config().long_press())
            && let Some(index) = self.host.item_index_at(x, y)
        {
            started = self.controller.activate(index, &mut self.store);
        }
        self.controller
            .tick_for(now, &mut self.host, &self.store);
        started
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let press = if self.controller.is_active() {
            None
        } else {
            self.long_press
                .deadline(self.controller.config().long_press())
        };
        match (press, self.controller.next_tick_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// End any drag and drop pending timers. Call when the host goes away.
    pub fn teardown(&mut self) {
        self.long_press.reset();
        self.controller.deactivate();
    }

    /// Unbind, returning the host and the store.
    pub fn into_parts(mut self) -> (H, SelectionStore<A>) {
        self.teardown();
        (self.host, self.store)
    }
}
