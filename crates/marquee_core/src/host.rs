//! Host interface.
//!
//! Everything the engine needs from its environment goes through these
//! traits. The browser binding implements them over `web-sys`; tests
//! implement them with a recording mock.

use std::collections::HashMap;

use crate::error::MarqueeResult;

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Creates a frame token.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// The host's per-frame scheduling primitive.
///
/// When a requested frame fires, the host calls
/// [`MarqueeController::on_frame`](crate::MarqueeController::on_frame) with
/// the token returned here.
pub trait FrameScheduler {
    /// Requests a callback on the next frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancels a pending frame. Cancelling a fired or unknown token is a
    /// no-op.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Monotonic clock in the same time base as frame timestamps.
pub trait Clock {
    /// Milliseconds since an arbitrary origin.
    fn now_ms(&self) -> f64;
}

/// Live geometry of the page and the component.
pub trait Viewport {
    /// Current viewport width (px).
    fn viewport_width(&self) -> f64;

    /// Current rendered width of the marquee container (px).
    fn container_width(&self) -> f64;
}

/// The element holding all items, subject to the horizontal transform.
pub trait TrackSurface {
    /// Number of items currently in the track.
    fn item_count(&self) -> usize;

    /// Rendered width of the first item (px). Only called when
    /// `item_count() > 0`.
    fn item_width(&self) -> f64;

    /// Effective gap between items (px).
    fn gap(&self) -> f64;

    /// Appends a deep clone of the first item.
    fn append_clone(&mut self);

    /// Writes the horizontal translation of the track.
    fn set_offset(&mut self, offset: f64);
}

/// Pointer capture, so drags keep receiving moves outside the track.
pub trait PointerCapture {
    /// Captures a pointer to the track.
    fn capture(&mut self, pointer_id: i32);

    /// Releases a pointer capture.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::CaptureNotActive`](crate::MarqueeError::CaptureNotActive)
    /// if the capture was already released. Callers ignore it.
    fn release(&mut self, pointer_id: i32) -> MarqueeResult<()>;
}

/// Declarative configuration surface (element attributes).
pub trait AttributeSource {
    /// Returns the raw value of an attribute, if present.
    fn attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Everything the controller needs from its environment.
pub trait Host:
    FrameScheduler + Clock + Viewport + TrackSurface + PointerCapture + AttributeSource
{
}

impl<T> Host for T where
    T: FrameScheduler + Clock + Viewport + TrackSurface + PointerCapture + AttributeSource
{
}
