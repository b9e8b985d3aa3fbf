//! Container controller.
//!
//! Owns all marquee state and wires the replicator, offset model, driver
//! and arbiter to the host's lifecycle callbacks. The host forwards:
//!
//! | Host event                   | Controller hook          |
//! |------------------------------|--------------------------|
//! | element connected, laid out  | [`on_attach`]            |
//! | observed attribute changed   | [`on_config_change`]     |
//! | window resized               | [`on_resize`]            |
//! | requested frame fired        | [`on_frame`]             |
//! | pointer / touch / hover      | [`on_input`]             |
//! | element disconnected         | [`on_detach`]            |
//!
//! [`on_attach`]: MarqueeController::on_attach
//! [`on_config_change`]: MarqueeController::on_config_change
//! [`on_resize`]: MarqueeController::on_resize
//! [`on_frame`]: MarqueeController::on_frame
//! [`on_input`]: MarqueeController::on_input
//! [`on_detach`]: MarqueeController::on_detach

use crate::config::{MarqueeConfig, OBSERVED_ATTRIBUTES};
use crate::driver::AnimationDriver;
use crate::gesture::{GestureArbiter, GestureSession, GestureStep, InputEvent, InputResponse};
use crate::host::{FrameToken, Host};
use crate::offset::OffsetModel;
use crate::replicator::ContentReplicator;
use crate::speed::SpeedPolicy;

/// What the marquee is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    /// Neither animating nor dragged (hover-paused or detached).
    #[default]
    Idle,
    /// Driven by the animation loop.
    Animating,
    /// Held by a gesture.
    Dragging,
}

/// The marquee engine bound to one host.
pub struct MarqueeController<H: Host> {
    host: H,
    config: MarqueeConfig,
    offset: OffsetModel,
    driver: AnimationDriver,
    arbiter: GestureArbiter,
    hover_paused: bool,
    container_width: f64,
    attached: bool,
}

impl<H: Host> MarqueeController<H> {
    /// Creates a detached controller with default configuration.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, MarqueeConfig::default())
    }

    /// Creates a detached controller with the given defaults. Attributes
    /// read on attach override them.
    #[must_use]
    pub fn with_config(host: H, config: MarqueeConfig) -> Self {
        Self {
            host,
            config,
            offset: OffsetModel::new(),
            driver: AnimationDriver::new(),
            arbiter: GestureArbiter::new(config.gesture),
            hover_paused: false,
            container_width: 0.0,
            attached: false,
        }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    /// Returns the current track offset (px).
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset.offset()
    }

    /// Returns the loop distance from the last layout.
    #[must_use]
    pub fn loop_distance(&self) -> Option<f64> {
        self.offset.loop_distance()
    }

    /// Returns the active gesture, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&GestureSession> {
        self.arbiter.session()
    }

    /// Returns the current motion state.
    #[must_use]
    pub fn motion(&self) -> MotionState {
        if self.arbiter.is_dragging() {
            MotionState::Dragging
        } else if self.driver.is_running() {
            MotionState::Animating
        } else {
            MotionState::Idle
        }
    }

    /// Returns true while hovering suppresses animation.
    #[must_use]
    pub fn is_hover_paused(&self) -> bool {
        self.hover_paused
    }

    /// Returns true between `on_attach` and `on_detach`.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Component connected and laid out: read configuration, replicate
    /// content and start animating.
    pub fn on_attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        self.config.read_attributes(&self.host);
        self.arbiter.set_tuning(self.config.gesture);
        self.container_width = self.host.container_width();
        self.layout();
        self.offset.normalize();
        self.write_transform();
        tracing::debug!(
            container_width = self.container_width,
            loop_distance = ?self.offset.loop_distance(),
            "marquee attached"
        );
        self.resume();
    }

    /// An observed attribute changed. Re-reads configuration and restarts
    /// the animation so a new speed applies at once.
    pub fn on_config_change(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new || !OBSERVED_ATTRIBUTES.contains(&name) {
            return;
        }
        self.config.read_attributes(&self.host);
        tracing::debug!(attribute = name, config = ?self.config, "configuration changed");
        if self.attached && !self.hover_paused && !self.arbiter.is_dragging() {
            self.driver.stop(&mut self.host);
            self.driver.start(&mut self.host);
        }
    }

    /// The window resized. Re-lays out the track if the container width
    /// actually changed.
    pub fn on_resize(&mut self) {
        if !self.attached {
            return;
        }
        let width = self.host.container_width();
        if (width - self.container_width).abs() < f64::EPSILON {
            return;
        }
        self.container_width = width;
        self.layout();
        self.offset.renormalize_after_resize();
        self.write_transform();
    }

    /// A frame requested by the driver fired.
    pub fn on_frame(&mut self, frame: FrameToken, now: f64) {
        if !self.attached {
            return;
        }
        let speed = SpeedPolicy::current_speed(&self.config, self.host.viewport_width());
        self.driver
            .tick(&mut self.host, frame, now, speed, &mut self.offset);
    }

    /// Pointer, touch or hover input.
    pub fn on_input(&mut self, event: InputEvent) -> InputResponse {
        if !self.attached {
            return InputResponse::PASS;
        }
        match event {
            InputEvent::Press(sample) => {
                if let Some(session) = self.arbiter.press(&sample, self.offset.offset()) {
                    self.driver.stop(&mut self.host);
                    if let Some(id) = session.pointer_id {
                        self.host.capture(id);
                    }
                    tracing::trace!(source = ?session.source, "drag started");
                }
                InputResponse::PASS
            }
            InputEvent::Move(sample) => match self.arbiter.motion(&sample) {
                GestureStep::Ignored => InputResponse::PASS,
                GestureStep::Pending => InputResponse::SUPPRESS,
                GestureStep::Drag { start_offset, dx } => {
                    self.offset.set_from_drag(start_offset, dx);
                    self.write_transform();
                    InputResponse::SUPPRESS
                }
                GestureStep::Abandon(session) => {
                    self.end_gesture(&session);
                    InputResponse::PASS
                }
            },
            InputEvent::Release(sample) | InputEvent::Cancel(sample) => {
                if let Some(session) = self.arbiter.finish(&sample) {
                    self.end_gesture(&session);
                }
                InputResponse::PASS
            }
            InputEvent::HoverEnter => {
                self.hover_paused = true;
                self.driver.stop(&mut self.host);
                InputResponse::PASS
            }
            InputEvent::HoverLeave => {
                self.hover_paused = false;
                self.resume();
                InputResponse::PASS
            }
        }
    }

    /// Component disconnected. Stops animating and drops any gesture. The
    /// host removes its listeners.
    pub fn on_detach(&mut self) {
        if !self.attached {
            return;
        }
        self.driver.stop(&mut self.host);
        if let Some(session) = self.arbiter.abort() {
            self.release_capture(&session);
        }
        self.hover_paused = false;
        self.attached = false;
        tracing::debug!("marquee detached");
    }

    fn layout(&mut self) {
        if let Some(layout) = ContentReplicator::layout(&mut self.host, self.container_width) {
            self.offset.set_loop_distance(Some(layout.loop_distance));
        }
    }

    fn end_gesture(&mut self, session: &GestureSession) {
        self.release_capture(session);
        tracing::trace!(direction = ?session.direction, "drag ended");
        self.resume();
    }

    fn release_capture(&mut self, session: &GestureSession) {
        if let Some(id) = session.pointer_id {
            // Already released by the platform; nothing to do.
            let _ = self.host.release(id);
        }
    }

    /// Starts the driver unless something holds it paused.
    fn resume(&mut self) {
        if self.attached && !self.hover_paused && !self.arbiter.is_dragging() {
            self.driver.start(&mut self.host);
        }
    }

    fn write_transform(&mut self) {
        let offset = self.offset.offset();
        self.host.set_offset(offset);
    }
}
