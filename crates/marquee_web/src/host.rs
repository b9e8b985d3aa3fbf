//! `web-sys` implementation of the engine's host traits.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};
use marquee_core::config::parse_number_prefix;
use marquee_core::style::translate_x;
use marquee_core::{
    AttributeSource, Clock, FrameScheduler, FrameToken, MarqueeController, MarqueeError,
    MarqueeResult, PointerCapture, TrackSurface, Viewport,
};
use web_sys::{HtmlElement, Window};

/// Controller bound to the DOM, as shared between callbacks.
pub(crate) type SharedController = RefCell<MarqueeController<DomHost>>;

/// The pending animation frame. Shared with the frame callback so it can
/// reschedule itself without borrowing the controller.
type FrameSlot = Rc<RefCell<Option<(FrameToken, AnimationFrame)>>>;

/// The browser as seen by one marquee.
pub struct DomHost {
    window: Window,
    element: HtmlElement,
    track: HtmlElement,
    controller: Weak<SharedController>,
    frame: FrameSlot,
    next_frame: u64,
}

impl DomHost {
    /// Creates a host for `element`, whose track has already been
    /// structured. `controller` is the cell this host will live in, so
    /// frame callbacks can find their way back.
    pub(crate) fn new(
        window: Window,
        element: HtmlElement,
        track: HtmlElement,
        controller: Weak<SharedController>,
    ) -> Self {
        Self {
            window,
            element,
            track,
            controller,
            frame: Rc::new(RefCell::new(None)),
            next_frame: 1,
        }
    }
}

/// Schedules `token` on the next animation frame, replacing whatever the
/// slot held. A frame that finds the controller busy is retried on the
/// following one, so the driver never waits on a token that cannot fire.
fn schedule(slot: &FrameSlot, controller: Weak<SharedController>, token: FrameToken) {
    let retry = Rc::downgrade(slot);
    let handle = request_animation_frame(move |timestamp| {
        let Some(shared) = controller.upgrade() else {
            return;
        };
        let Ok(mut marquee) = shared.try_borrow_mut() else {
            tracing::debug!("marquee busy, retrying frame");
            if let Some(slot) = retry.upgrade() {
                schedule(&slot, controller, token);
            }
            return;
        };
        marquee.on_frame(token, timestamp);
    });
    // Replacing a fired handle is harmless; replacing a pending one
    // cancels it.
    *slot.borrow_mut() = Some((token, handle));
}

impl FrameScheduler for DomHost {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_frame);
        self.next_frame += 1;

        schedule(&self.frame, self.controller.clone(), token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut slot = self.frame.borrow_mut();
        if matches!(*slot, Some((current, _)) if current == token) {
            *slot = None;
        }
    }
}

impl Clock for DomHost {
    fn now_ms(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }
}

impl Viewport for DomHost {
    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn container_width(&self) -> f64 {
        self.element.get_bounding_client_rect().width()
    }
}

impl TrackSurface for DomHost {
    fn item_count(&self) -> usize {
        self.track.child_element_count() as usize
    }

    fn item_width(&self) -> f64 {
        self.track
            .first_element_child()
            .map_or(0.0, |item| item.get_bounding_client_rect().width())
    }

    fn gap(&self) -> f64 {
        let Ok(Some(computed)) = self.window.get_computed_style(&self.track) else {
            return 0.0;
        };
        computed
            .get_property_value("column-gap")
            .ok()
            .and_then(|gap| parse_number_prefix(&gap))
            .unwrap_or(0.0)
    }

    fn append_clone(&mut self) {
        let Some(first) = self.track.first_element_child() else {
            return;
        };
        let appended = first
            .clone_node_with_deep(true)
            .and_then(|clone| self.track.append_child(&clone));
        if appended.is_err() {
            tracing::debug!("could not clone marquee item");
        }
    }

    fn set_offset(&mut self, offset: f64) {
        // Nothing sensible to do if the style is read-only.
        let _ = self.track.style().set_property("transform", &translate_x(offset));
    }
}

impl PointerCapture for DomHost {
    fn capture(&mut self, pointer_id: i32) {
        let _ = self.track.set_pointer_capture(pointer_id);
    }

    fn release(&mut self, pointer_id: i32) -> MarqueeResult<()> {
        self.track
            .release_pointer_capture(pointer_id)
            .map_err(|_| MarqueeError::CaptureNotActive(pointer_id))
    }
}

impl AttributeSource for DomHost {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }
}
