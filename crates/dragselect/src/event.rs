#![forbid(unsafe_code)]

//! Pointer input as delivered by the host list.

/// Phase of a single-pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The host took the gesture away (e.g. a parent started scrolling).
    Cancel,
}

/// A pointer event in the list's content coordinates (pixels, origin at the
/// top-left of the list).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }

    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    #[must_use]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Cancel, x, y)
    }

    /// Whether this event ends the gesture.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

/// What the host should do with an event after offering it to drag select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Drag select used the event; the host must not scroll or click on it.
    Consumed,
    /// Drag select is idle; handle the event normally.
    PassThrough,
}

impl EventDisposition {
    #[inline]
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}
