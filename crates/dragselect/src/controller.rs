#![forbid(unsafe_code)]

//! Drag-select controller: turns pointer motion into selection changes.
//!
//! [`DragSelectController`] is a two-state machine, `Idle` and `Active`.
//!
//! # State Machine
//!
//! - `Idle -> Active` via [`activate`](DragSelectController::activate). The
//!   initial index is selected and becomes the anchor.
//! - `Active` on pointer-move: hotspots are evaluated first, then the item
//!   under the pointer is looked up. A new index extends the visited range
//!   and the selection is reconciled (range mode) or that item is toggled
//!   (path mode).
//! - `Active -> Idle` on pointer-up, pointer-cancel, mode change, any event
//!   or tick once the list has emptied, or
//!   [`deactivate`](DragSelectController::deactivate).
//!
//! # Invariants
//!
//! 1. The anchor is fixed for the lifetime of a session.
//! 2. Once established, `min_visited <= last <= max_visited`.
//! 3. Every exit from `Active` clears the hotspot flags and the pending
//!    auto-scroll tick.
//! 4. While `Active`, every pointer event is consumed; while `Idle`, none is.
//!
//! # Failure Modes
//!
//! - No item under the pointer, or an index past the end of the list: the
//!   move changes nothing (hotspots are still evaluated).
//! - Activating on an unselectable index, or while already active, returns
//!   `false` and changes nothing.

use std::fmt;
use std::rc::Rc;

use dragselect_core::{Diagnostic, DiagnosticSink, HotspotEdge, NoopSink, SelectionTarget};
use web_time::Instant;

use crate::config::{ConfigError, DragMode, DragSelectConfig};
use crate::event::{EventDisposition, PointerEvent, PointerEventKind};
use crate::host::ListHost;
use crate::hotspot::{AutoScroll, HotspotBands, HotspotTransition};

type FlagListener = Box<dyn FnMut(bool)>;

/// Transient state of one drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Index the drag started on.
    pub anchor: usize,
    /// Most recently touched index.
    pub last: usize,
    /// Lowest index touched since the session began (or since the pointer
    /// last returned to the anchor).
    pub min_visited: Option<usize>,
    /// Highest index touched, same scope as `min_visited`.
    pub max_visited: Option<usize>,
}

impl DragSession {
    fn new(anchor: usize) -> Self {
        Self {
            anchor,
            last: anchor,
            min_visited: None,
            max_visited: None,
        }
    }

    /// Widen the visited range to include `index`; returns the new bounds.
    fn visit(&mut self, index: usize) -> (usize, usize) {
        let min = self.min_visited.map_or(index, |m| m.min(index));
        let max = self.max_visited.map_or(index, |m| m.max(index));
        self.min_visited = Some(min);
        self.max_visited = Some(max);
        (min, max)
    }
}

/// Drives a [`SelectionTarget`] from pointer events on a [`ListHost`].
pub struct DragSelectController {
    config: DragSelectConfig,
    session: Option<DragSession>,
    auto_scroll: AutoScroll,
    bands: Option<HotspotBands>,
    finger_listener: Option<FlagListener>,
    auto_scroll_listener: Option<FlagListener>,
    auto_scrolling_reported: bool,
    sink: Rc<dyn DiagnosticSink>,
}

impl fmt::Debug for DragSelectController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSelectController")
            .field("mode", &self.config.mode)
            .field("session", &self.session)
            .field("hotspot", &self.auto_scroll.edge())
            .finish()
    }
}

impl DragSelectController {
    /// Create an idle controller. Fails if `config` does not validate.
    pub fn new(config: DragSelectConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self {
            auto_scroll: AutoScroll::new(config.auto_scroll_delay()),
            config,
            session: None,
            bands: None,
            finger_listener: None,
            auto_scroll_listener: None,
            auto_scrolling_reported: false,
            sink: Rc::new(NoopSink),
        })
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn set_sink(&mut self, sink: Rc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    /// Called with `true` when a session starts and `false` when it ends.
    pub fn set_finger_listener(&mut self, listener: impl FnMut(bool) + 'static) {
        self.finger_listener = Some(Box::new(listener));
    }

    /// Called with `true` when auto-scroll starts and `false` when it stops.
    pub fn set_auto_scroll_listener(&mut self, listener: impl FnMut(bool) + 'static) {
        self.auto_scroll_listener = Some(Box::new(listener));
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragSelectConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> DragMode {
        self.config.mode
    }

    /// Switch modes. Any active session is ended first.
    pub fn set_mode(&mut self, mode: DragMode) {
        self.deactivate();
        self.config.mode = mode;
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn auto_scroll(&self) -> &AutoScroll {
        &self.auto_scroll
    }

    /// Bands computed on the most recent intercepted event.
    #[inline]
    #[must_use]
    pub fn hotspot_bands(&self) -> Option<&HotspotBands> {
        self.bands.as_ref()
    }

    /// When the host should next call [`tick`](Self::tick), if ever.
    #[inline]
    #[must_use]
    pub fn next_tick_deadline(&self) -> Option<Instant> {
        self.auto_scroll.next_tick()
    }

    /// Start a session anchored at `initial`.
    ///
    /// Returns `false` without touching any state when a session is already
    /// running or `initial` is not selectable.
    pub fn activate<T: SelectionTarget + ?Sized>(&mut self, initial: usize, target: &mut T) -> bool {
        if self.session.is_some() {
            self.sink.record(&Diagnostic::DragRejected {
                index: initial,
                reason: "already active",
            });
            return false;
        }
        if initial >= target.item_count() || !target.is_index_selectable(initial) {
            self.sink.record(&Diagnostic::DragRejected {
                index: initial,
                reason: "not selectable",
            });
            return false;
        }

        self.cancel_auto_scroll();
        target.set_selected(initial, true);
        self.session = Some(DragSession::new(initial));
        self.sink.record(&Diagnostic::DragActivated { index: initial });
        if let Some(listener) = self.finger_listener.as_mut() {
            listener(true);
        }
        true
    }

    /// End the current session, if any.
    pub fn deactivate(&mut self) {
        self.cancel_auto_scroll();
        if self.session.take().is_some() {
            self.sink.record(&Diagnostic::DragEnded);
            if let Some(listener) = self.finger_listener.as_mut() {
                listener(false);
            }
        }
    }

    /// Whether events should be routed here rather than to normal list
    /// handling. Refreshes the hotspot bands from the host's current height.
    pub fn intercepts<H, T>(&mut self, host: &H, target: &T) -> bool
    where
        H: ListHost + ?Sized,
        T: SelectionTarget + ?Sized,
    {
        let claimed = self.session.is_some() && target.item_count() > 0;
        if claimed {
            self.bands = self
                .config
                .hotspot
                .as_ref()
                .map(|h| HotspotBands::compute(h, host.viewport_height()));
        }
        claimed
    }

    /// Offer a pointer event. Consumes it while a session is active.
    pub fn handle_event<H, T>(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        host: &mut H,
        target: &mut T,
    ) -> EventDisposition
    where
        H: ListHost + ?Sized,
        T: SelectionTarget + ?Sized,
    {
        if self.session.is_none() {
            return EventDisposition::PassThrough;
        }
        // An emptied list ends the session like a release would.
        if event.is_terminal() || !self.intercepts(&*host, &*target) {
            self.deactivate();
            return EventDisposition::Consumed;
        }

        if event.kind == PointerEventKind::Move {
            self.on_move(event, now, &*host, target);
        }
        EventDisposition::Consumed
    }

    /// Run a due auto-scroll tick against `host`. Returns the applied delta.
    ///
    /// Prefer [`tick_for`](Self::tick_for) when the selection target is at
    /// hand, so a list that emptied mid-drag stops scrolling.
    pub fn tick<H: ListHost + ?Sized>(&mut self, now: Instant, host: &mut H) -> Option<f32> {
        if self.session.is_none() {
            self.cancel_auto_scroll();
            return None;
        }
        let delta = self.auto_scroll.tick(now)?;
        host.scroll_by(delta);
        self.sink.record(&Diagnostic::AutoScrollTick { delta });
        Some(delta)
    }

    /// Like [`tick`](Self::tick), but ends the session first if `target`
    /// has no items left.
    pub fn tick_for<H, T>(&mut self, now: Instant, host: &mut H, target: &T) -> Option<f32>
    where
        H: ListHost + ?Sized,
        T: SelectionTarget + ?Sized,
    {
        if self.session.is_some() && target.item_count() == 0 {
            self.deactivate();
            return None;
        }
        self.tick(now, host)
    }

    fn on_move<H, T>(&mut self, event: &PointerEvent, now: Instant, host: &H, target: &mut T)
    where
        H: ListHost + ?Sized,
        T: SelectionTarget + ?Sized,
    {
        if let Some(bands) = self.bands {
            let zone = bands.locate(event.y);
            match self.auto_scroll.update(zone, now) {
                HotspotTransition::Entered(edge) => self.on_hotspot_entered(edge),
                HotspotTransition::Left => {
                    self.sink.record(&Diagnostic::HotspotLeft);
                    self.report_auto_scrolling(false);
                }
                HotspotTransition::Unchanged => {}
            }
        }

        let Some(index) = host
            .item_index_at(event.x, event.y)
            .filter(|&i| i < target.item_count())
        else {
            return;
        };
        let mode = self.config.mode;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if index == session.last {
            return;
        }
        session.last = index;

        match mode {
            DragMode::Path => {
                let selected = !target.is_index_selected(index);
                target.set_selected(index, selected);
                self.sink.record(&Diagnostic::PathToggled { index, selected });
            }
            DragMode::Range => {
                let (min, max) = session.visit(index);
                let anchor = session.anchor;
                if index == anchor {
                    session.min_visited = Some(index);
                    session.max_visited = Some(index);
                }
                target.select_range(anchor, index, min, max);
            }
        }
    }

    fn on_hotspot_entered(&mut self, edge: HotspotEdge) {
        self.sink.record(&Diagnostic::HotspotEntered { edge });
        self.report_auto_scrolling(true);
    }

    fn cancel_auto_scroll(&mut self) {
        self.auto_scroll.cancel();
        self.report_auto_scrolling(false);
    }

    fn report_auto_scrolling(&mut self, scrolling: bool) {
        if self.auto_scrolling_reported == scrolling {
            return;
        }
        self.auto_scrolling_reported = scrolling;
        if let Some(listener) = self.auto_scroll_listener.as_mut() {
            listener(scrolling);
        }
    }
}
