//! # Marquee Core
//!
//! Engine behind an infinitely scrolling horizontal marquee:
//! - Content replication for a seamless loop
//! - Frame-driven animation at a viewport-dependent speed
//! - Drag/swipe scrubbing that yields to vertical page scroll
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   MarqueeController<H>                   │
//! ├──────────────────────────────────────────────────────────┤
//! │  ContentReplicator ─► OffsetModel ◄─ AnimationDriver     │
//! │                           ▲               ▲              │
//! │                    GestureArbiter    SpeedPolicy         │
//! ├──────────────────────────────────────────────────────────┤
//! │  Host: frames · clock · geometry · capture · attributes  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The driver and the arbiter never write the offset at the same time:
//! pressing stops the driver, releasing restarts it unless the pointer is
//! hovering.
//!
//! ## Example
//!
//! ```rust,ignore
//! use marquee_core::{InputEvent, MarqueeController};
//!
//! let mut marquee = MarqueeController::new(host);
//! marquee.on_attach();
//! // host calls back with every frame it was asked for
//! marquee.on_frame(token, timestamp_ms);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod gesture;
pub mod host;
pub mod offset;
pub mod replicator;
pub mod speed;
pub mod style;

pub use config::{DirectionTuning, GestureTuning, MarqueeConfig};
pub use controller::{MarqueeController, MotionState};
pub use driver::{AnimationDriver, DriverState};
pub use error::{MarqueeError, MarqueeResult};
pub use gesture::{
    Direction, GestureArbiter, GestureSession, GestureStep, InputEvent, InputResponse,
    InputSource, PointerSample,
};
pub use host::{
    AttributeSource, Clock, FrameScheduler, FrameToken, Host, PointerCapture, TrackSurface,
    Viewport,
};
pub use offset::OffsetModel;
pub use replicator::{ContentReplicator, TrackLayout};
pub use speed::SpeedPolicy;
pub use style::ElementStyle;
