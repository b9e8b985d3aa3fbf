//! Gesture arbiter.
//!
//! Decides whether a press-and-move is a horizontal drag of the marquee or
//! the start of a vertical page scroll. Mouse, pen and touch all go through
//! the same state machine; only the tuning constants differ per family.
//!
//! ```text
//!            press
//!   (none) ────────► Undetermined ──── dx*bias > dy ───► Horizontal ──┐
//!     ▲                   │                                  │ move   │
//!     │                   └──── dy > threshold ─► Vertical   ▼ drag   │
//!     │                                            (abandon)          │
//!     └──────────────────── release / cancel ◄────────────────────────┘
//! ```

use crate::config::{DirectionTuning, GestureTuning};

/// Which device produced an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Mouse pointer.
    Mouse,
    /// Pen or stylus.
    Pen,
    /// Finger on a touch screen.
    Touch,
}

impl InputSource {
    /// Maps a DOM `pointerType` string. Unknown types are treated as mouse.
    #[must_use]
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }
}

/// One input position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Horizontal position (px).
    pub x: f64,
    /// Vertical position (px).
    pub y: f64,
    /// Producing device.
    pub source: InputSource,
    /// Pointer id for Pointer Events; `None` for legacy touch and mouse events.
    pub pointer_id: Option<i32>,
    /// Simultaneous touch points (1 for pointer events).
    pub touch_count: usize,
}

impl PointerSample {
    /// A sample from a Pointer Event.
    #[must_use]
    pub const fn pointer(x: f64, y: f64, pointer_id: i32, source: InputSource) -> Self {
        Self {
            x,
            y,
            source,
            pointer_id: Some(pointer_id),
            touch_count: 1,
        }
    }

    /// A sample from a legacy Touch Event.
    #[must_use]
    pub const fn touch(x: f64, y: f64, touch_count: usize) -> Self {
        Self {
            x,
            y,
            source: InputSource::Touch,
            pointer_id: None,
            touch_count,
        }
    }
}

/// Input delivered to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer or finger went down on the track.
    Press(PointerSample),
    /// Pointer or finger moved.
    Move(PointerSample),
    /// Pointer or finger lifted.
    Release(PointerSample),
    /// The platform cancelled the interaction.
    Cancel(PointerSample),
    /// Pointer entered the component.
    HoverEnter,
    /// Pointer left the component.
    HoverLeave,
}

/// What the host should do with the native event afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// Call `preventDefault` so the page does not scroll.
    pub prevent_default: bool,
}

impl InputResponse {
    /// Let the browser handle the event.
    pub const PASS: Self = Self {
        prevent_default: false,
    };
    /// Suppress the browser's default handling.
    pub const SUPPRESS: Self = Self {
        prevent_default: true,
    };
}

/// Direction classification of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Not enough movement yet.
    #[default]
    Undetermined,
    /// Dragging the marquee.
    Horizontal,
    /// Scrolling the page.
    Vertical,
}

impl Direction {
    /// Classifies movement since press.
    ///
    /// `dx` and `dy` are absolute distances.
    #[must_use]
    pub fn classify(tuning: &DirectionTuning, dx: f64, dy: f64) -> Self {
        let threshold = tuning.threshold;
        if dx * tuning.bias() > dy && (dx > threshold || dy > threshold) {
            Self::Horizontal
        } else if dy > threshold && dx <= dy {
            Self::Vertical
        } else {
            Self::Undetermined
        }
    }
}

/// Transient record of one press-move-release interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Press position, horizontal (px).
    pub start_x: f64,
    /// Press position, vertical (px).
    pub start_y: f64,
    /// Track offset at press time.
    pub start_offset: f64,
    /// Producing device.
    pub source: InputSource,
    /// Captured pointer, if any.
    pub pointer_id: Option<i32>,
    /// Current classification.
    pub direction: Direction,
}

impl GestureSession {
    fn owns(&self, sample: &PointerSample) -> bool {
        self.pointer_id == sample.pointer_id
    }
}

/// Outcome of feeding a move into the arbiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    /// Not part of the active gesture. Nothing changes.
    Ignored,
    /// Direction still unknown. Hold the page still.
    Pending,
    /// Horizontal drag: the offset should become `start_offset + dx`.
    Drag {
        /// Offset at press time.
        start_offset: f64,
        /// Signed horizontal movement since press.
        dx: f64,
    },
    /// Vertical: the gesture was dropped so the page can scroll.
    Abandon(GestureSession),
}

/// Tracks at most one gesture and classifies its direction.
#[derive(Debug, Clone, Default)]
pub struct GestureArbiter {
    tuning: GestureTuning,
    session: Option<GestureSession>,
}

impl GestureArbiter {
    /// Creates an arbiter with the given tuning.
    #[must_use]
    pub const fn new(tuning: GestureTuning) -> Self {
        Self {
            tuning,
            session: None,
        }
    }

    /// Replaces the tuning. An active gesture keeps its classification.
    pub fn set_tuning(&mut self, tuning: GestureTuning) {
        self.tuning = tuning;
    }

    /// Returns the active session.
    #[must_use]
    pub const fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Returns true while a gesture holds the marquee.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    fn tuning_for(&self, source: InputSource) -> &DirectionTuning {
        match source {
            InputSource::Touch => &self.tuning.touch,
            InputSource::Mouse | InputSource::Pen => &self.tuning.pointer,
        }
    }

    /// Starts a gesture. Returns the new session, or `None` if the press is
    /// ignored (a gesture is already active, or more than one finger).
    pub fn press(&mut self, sample: &PointerSample, current_offset: f64) -> Option<GestureSession> {
        if self.session.is_some() || sample.touch_count != 1 {
            return None;
        }
        let session = GestureSession {
            start_x: sample.x,
            start_y: sample.y,
            start_offset: current_offset,
            source: sample.source,
            pointer_id: sample.pointer_id,
            direction: Direction::Undetermined,
        };
        self.session = Some(session);
        Some(session)
    }

    /// Feeds a move.
    pub fn motion(&mut self, sample: &PointerSample) -> GestureStep {
        if sample.touch_count != 1 {
            return GestureStep::Ignored;
        }
        let Some(session) = self.session else {
            return GestureStep::Ignored;
        };
        if !session.owns(sample) {
            return GestureStep::Ignored;
        }

        let dx = sample.x - session.start_x;
        let direction = match session.direction {
            Direction::Undetermined => {
                let dy = sample.y - session.start_y;
                let tuning = self.tuning_for(session.source);
                let direction = Direction::classify(tuning, dx.abs(), dy.abs());
                if direction != Direction::Undetermined {
                    tracing::trace!(?direction, dx, dy, "gesture classified");
                }
                direction
            }
            decided => decided,
        };

        match direction {
            Direction::Undetermined => GestureStep::Pending,
            Direction::Horizontal => {
                if let Some(active) = self.session.as_mut() {
                    active.direction = Direction::Horizontal;
                }
                GestureStep::Drag {
                    start_offset: session.start_offset,
                    dx,
                }
            }
            Direction::Vertical => {
                self.session = None;
                GestureStep::Abandon(GestureSession {
                    direction: Direction::Vertical,
                    ..session
                })
            }
        }
    }

    /// Ends the gesture on release or cancel. Returns the finished session,
    /// or `None` if the sample does not belong to an active gesture.
    pub fn finish(&mut self, sample: &PointerSample) -> Option<GestureSession> {
        match self.session {
            Some(session) if session.owns(sample) => self.session.take(),
            _ => None,
        }
    }

    /// Drops any active gesture unconditionally.
    pub fn abort(&mut self) -> Option<GestureSession> {
        self.session.take()
    }
}
