//! Speed policy: one of two speeds depending on viewport width.

use crate::config::MarqueeConfig;

/// Picks the scroll speed for the current viewport.
///
/// Not cached: the driver asks on every tick so a resize across the
/// breakpoint takes effect on the next frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedPolicy;

impl SpeedPolicy {
    /// Returns the speed in pixels per second.
    #[must_use]
    pub fn current_speed(config: &MarqueeConfig, viewport_width: f64) -> f64 {
        if viewport_width <= config.breakpoint {
            config.mobile_speed
        } else {
            config.desktop_speed
        }
    }
}
