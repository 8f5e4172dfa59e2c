//! Input Capture Module
//!
//! Scoped capture of the interaction surface. While a capture is held, the
//! host must not scroll the page or run its own pinch/pull-to-refresh
//! gestures, so pointer drags reach the builder and the camera untouched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use block_forge_engine::input::{InputCapture, InputSurface};
//!
//! let mut surface = MyCanvas::new();
//! {
//!     let _capture = InputCapture::acquire(&mut surface);
//!     // ... run the interaction loop ...
//! } // scroll and gestures restored here
//! ```

/// Host surface that can be locked for exclusive pointer handling.
pub trait InputSurface {
    /// Enable or disable page/document scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Enable or disable suppression of host gestures (pinch zoom,
    /// pull-to-refresh, text selection).
    fn set_gestures_suppressed(&mut self, suppressed: bool);
}

/// RAII guard holding the surface captured for its lifetime.
///
/// Dropping the guard releases the capture, including on early return or
/// unwinding.
pub struct InputCapture<'a, S: InputSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: InputSurface + ?Sized> InputCapture<'a, S> {
    /// Capture the surface: lock scrolling and suppress host gestures.
    pub fn acquire(surface: &'a mut S) -> Self {
        surface.set_scroll_locked(true);
        surface.set_gestures_suppressed(true);
        log::debug!("[Input] Surface captured");
        Self { surface }
    }

    /// Access the captured surface.
    pub fn surface(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: InputSurface + ?Sized> Drop for InputCapture<'_, S> {
    fn drop(&mut self) {
        self.surface.set_gestures_suppressed(false);
        self.surface.set_scroll_locked(false);
        log::debug!("[Input] Surface released");
    }
}
