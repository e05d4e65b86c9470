#![forbid(unsafe_code)]

//! Injected observability for selection and drag sessions.
//!
//! Components hold an `Rc<dyn DiagnosticSink>` and report what they did.
//! The default sink is [`NoopSink`]; wire a [`TracingSink`] to forward events
//! to `tracing`, or a [`MemorySink`] to assert on them in tests.

use std::cell::RefCell;
use std::rc::Rc;

/// Which edge hotspot band an auto-scroll event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotEdge {
    /// Band along the top of the list (scrolls toward the start).
    Top,
    /// Band along the bottom of the list (scrolls toward the end).
    Bottom,
}

impl HotspotEdge {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// A single observable event.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A drag session started at `index`.
    DragActivated { index: usize },
    /// A drag session could not start.
    DragRejected { index: usize, reason: &'static str },
    /// The selection was reconciled against the drag extent.
    RangeReconciled {
        anchor: usize,
        current: usize,
        min_visited: usize,
        max_visited: usize,
        selected_count: usize,
    },
    /// Path-mode drag toggled a single item.
    PathToggled { index: usize, selected: bool },
    /// The drag session ended.
    DragEnded,
    /// The pointer entered a hotspot band.
    HotspotEntered { edge: HotspotEdge },
    /// The pointer left every hotspot band.
    HotspotLeft,
    /// An auto-scroll tick scrolled the list.
    AutoScrollTick { delta: f32 },
    /// The selection listener fired.
    SelectionCountChanged { count: usize },
    /// A persisted selection could not be decoded and was ignored.
    RestoreRejected { key: String, error: String },
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink {
    fn record(&self, event: &Diagnostic);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    #[inline]
    fn record(&self, _event: &Diagnostic) {}
}

/// Forwards events to `tracing` as structured debug records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &Diagnostic) {
        match event {
            Diagnostic::DragActivated { index } => {
                tracing::debug!(message = "dragselect.activate", index);
            }
            Diagnostic::DragRejected { index, reason } => {
                tracing::debug!(message = "dragselect.activate_rejected", index, reason);
            }
            Diagnostic::RangeReconciled {
                anchor,
                current,
                min_visited,
                max_visited,
                selected_count,
            } => {
                tracing::debug!(
                    message = "dragselect.select_range",
                    anchor,
                    current,
                    min_visited,
                    max_visited,
                    selected_count
                );
            }
            Diagnostic::PathToggled { index, selected } => {
                tracing::debug!(message = "dragselect.path_toggle", index, selected);
            }
            Diagnostic::DragEnded => {
                tracing::debug!(message = "dragselect.end");
            }
            Diagnostic::HotspotEntered { edge } => {
                tracing::debug!(message = "dragselect.hotspot_enter", edge = edge.as_str());
            }
            Diagnostic::HotspotLeft => {
                tracing::debug!(message = "dragselect.hotspot_leave");
            }
            Diagnostic::AutoScrollTick { delta } => {
                tracing::trace!(message = "dragselect.auto_scroll", delta);
            }
            Diagnostic::SelectionCountChanged { count } => {
                tracing::debug!(message = "dragselect.selection_count", count);
            }
            Diagnostic::RestoreRejected { key, error } => {
                tracing::warn!(
                    message = "dragselect.restore_rejected",
                    key = key.as_str(),
                    error = error.as_str()
                );
            }
        }
    }
}

/// Collects events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Rc<RefCell<Vec<Diagnostic>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.borrow().clone()
    }

    /// Drop every recorded event.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Count events matching a predicate.
    pub fn count(&self, pred: impl Fn(&Diagnostic) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(*e)).count()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: &Diagnostic) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Shared no-op sink used as the default.
pub(crate) fn noop() -> Rc<dyn DiagnosticSink> {
    Rc::new(NoopSink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let clone = sink.clone();
        clone.record(&Diagnostic::DragEnded);
        clone.record(&Diagnostic::HotspotLeft);
        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.count(|e| matches!(e, Diagnostic::DragEnded)), 1);
        sink.clear();
        assert!(clone.events().is_empty());
    }

    #[test]
    fn tracing_sink_accepts_every_variant() {
        let subscriber = tracing_subscriber::registry();
        tracing::subscriber::with_default(subscriber, || {
            let sink = TracingSink;
            for event in [
                Diagnostic::DragActivated { index: 1 },
                Diagnostic::DragRejected {
                    index: 2,
                    reason: "not selectable",
                },
                Diagnostic::RangeReconciled {
                    anchor: 1,
                    current: 3,
                    min_visited: 1,
                    max_visited: 3,
                    selected_count: 3,
                },
                Diagnostic::PathToggled {
                    index: 4,
                    selected: true,
                },
                Diagnostic::DragEnded,
                Diagnostic::HotspotEntered {
                    edge: HotspotEdge::Bottom,
                },
                Diagnostic::HotspotLeft,
                Diagnostic::AutoScrollTick { delta: -4.0 },
                Diagnostic::SelectionCountChanged { count: 3 },
                Diagnostic::RestoreRejected {
                    key: "k".into(),
                    error: "bad".into(),
                },
            ] {
                sink.record(&event);
            }
        });
    }

    #[test]
    fn edge_names() {
        assert_eq!(HotspotEdge::Top.as_str(), "top");
        assert_eq!(HotspotEdge::Bottom.as_str(), "bottom");
    }
}
