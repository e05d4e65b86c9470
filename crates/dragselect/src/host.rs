#![forbid(unsafe_code)]

//! The host list widget as seen by the drag controller.

/// Capabilities a scrollable list must expose for drag selection.
///
/// The controller never inspects host views directly; position lookup goes
/// through [`ListHost::item_index_at`].
pub trait ListHost {
    /// Adapter index of the item under `(x, y)`, or `None` if there is none.
    fn item_index_at(&self, x: f32, y: f32) -> Option<usize>;

    /// Current height of the list's content area in pixels.
    fn viewport_height(&self) -> f32;

    /// Scroll the list content by `dy` pixels (negative scrolls toward the
    /// start).
    fn scroll_by(&mut self, dy: f32);
}

impl<H: ListHost + ?Sized> ListHost for &mut H {
    fn item_index_at(&self, x: f32, y: f32) -> Option<usize> {
        (**self).item_index_at(x, y)
    }

    fn viewport_height(&self) -> f32 {
        (**self).viewport_height()
    }

    fn scroll_by(&mut self, dy: f32) {
        (**self).scroll_by(dy);
    }
}
