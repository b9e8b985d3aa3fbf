//! Recording host shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use marquee_core::{
    AttributeSource, Clock, FrameScheduler, FrameToken, MarqueeController, MarqueeError,
    MarqueeResult, PointerCapture, TrackSurface, Viewport,
};

/// In-memory host: a manual frame queue, a settable clock and fixed
/// geometry.
#[derive(Debug)]
pub struct MockHost {
    pub now: f64,
    pub viewport_width: f64,
    pub container_width: f64,
    pub item_width: f64,
    pub gap: f64,
    pub items: usize,
    pub attributes: HashMap<String, String>,
    pub pending: Vec<FrameToken>,
    pub cancelled: Vec<FrameToken>,
    pub transforms: Vec<f64>,
    pub captured: HashSet<i32>,
    pub release_errors: usize,
    next_token: u64,
}

impl MockHost {
    /// Desktop viewport, 1000px container, one 300px item with a 20px gap.
    pub fn new() -> Self {
        Self {
            now: 0.0,
            viewport_width: 1280.0,
            container_width: 1000.0,
            item_width: 300.0,
            gap: 20.0,
            items: 1,
            attributes: HashMap::new(),
            pending: Vec::new(),
            cancelled: Vec::new(),
            transforms: Vec::new(),
            captured: HashSet::new(),
            release_errors: 0,
            next_token: 1,
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn last_transform(&self) -> Option<f64> {
        self.transforms.last().copied()
    }
}

impl FrameScheduler for MockHost {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_token);
        self.next_token += 1;
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Some(pos) = self.pending.iter().position(|t| *t == token) {
            self.pending.remove(pos);
            self.cancelled.push(token);
        }
    }
}

impl Clock for MockHost {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

impl Viewport for MockHost {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn container_width(&self) -> f64 {
        self.container_width
    }
}

impl TrackSurface for MockHost {
    fn item_count(&self) -> usize {
        self.items
    }

    fn item_width(&self) -> f64 {
        self.item_width
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn append_clone(&mut self) {
        self.items += 1;
    }

    fn set_offset(&mut self, offset: f64) {
        self.transforms.push(offset);
    }
}

impl PointerCapture for MockHost {
    fn capture(&mut self, pointer_id: i32) {
        self.captured.insert(pointer_id);
    }

    fn release(&mut self, pointer_id: i32) -> MarqueeResult<()> {
        if self.captured.remove(&pointer_id) {
            Ok(())
        } else {
            self.release_errors += 1;
            Err(MarqueeError::CaptureNotActive(pointer_id))
        }
    }
}

impl AttributeSource for MockHost {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

/// A controller attached to a default mock host.
pub fn attached() -> MarqueeController<MockHost> {
    attached_with(MockHost::new())
}

pub fn attached_with(host: MockHost) -> MarqueeController<MockHost> {
    let mut marquee = MarqueeController::new(host);
    marquee.on_attach();
    marquee
}

/// Fires the pending frame at `now`, like the browser would. Returns false
/// when nothing was scheduled.
pub fn fire_frame(marquee: &mut MarqueeController<MockHost>, now: f64) -> bool {
    assert!(marquee.host().pending.len() <= 1, "more than one frame scheduled");
    let Some(token) = marquee.host_mut().pending.pop() else {
        return false;
    };
    marquee.host_mut().now = now;
    marquee.on_frame(token, now);
    true
}
