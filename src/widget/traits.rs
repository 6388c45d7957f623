//! The `Drawable` contract shared by every widget and by `Layout`.

use crate::buffer::Buffer;
use crate::layout::Rect;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Anything that can occupy a rectangle and paint it.
///
/// Widgets live behind a [`Mutex`]: the renderer locks each one around
/// [`draw`](Drawable::draw), and any thread updating widget data must take
/// the same lock. `draw` may adjust viewport state (scroll offsets) but
/// never the widget's data.
pub trait Drawable: Send {
    /// Outer rectangle, including margins and border.
    fn area(&self) -> Rect;

    /// Assign a new outer rectangle.
    ///
    /// Called by the layout on every frame and by callers placing widgets
    /// by hand.
    fn set_area(&mut self, area: Rect);

    /// Paint into `buffer`, whose area equals [`area`](Drawable::area).
    fn draw(&mut self, buffer: &mut Buffer);
}

/// A widget handle that can be shared between the render loop and data producers.
pub type Shared<W> = Arc<Mutex<W>>;

/// Type-erased shared widget, as stored in layouts.
pub type SharedDrawable = Arc<Mutex<dyn Drawable>>;

/// Wrap a widget for sharing.
pub fn shared<W: Drawable>(widget: W) -> Shared<W> {
    Arc::new(Mutex::new(widget))
}

/// Lock a widget, recovering the data if a previous holder panicked.
pub fn lock<W: ?Sized>(widget: &Mutex<W>) -> MutexGuard<'_, W> {
    widget.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        tracing::warn!("widget lock poisoned; drawing last known state");
        poisoned.into_inner()
    })
}
