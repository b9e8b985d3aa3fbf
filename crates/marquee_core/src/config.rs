//! # Marquee Configuration
//!
//! Speeds and breakpoint come from element attributes and are re-read
//! whenever one of them changes. A value that does not parse keeps whatever
//! was configured before, so a typo in markup never stops the animation.
//!
//! Defaults can also be shipped as TOML:
//!
//! ```toml
//! mobile_speed = 40.0
//! desktop_speed = 60.0
//! breakpoint = 767.0
//!
//! [gesture.touch]
//! threshold = 3.0
//! horizontal_bias = 1.15
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, MarqueeResult};
use crate::host::AttributeSource;

/// Attribute holding the speed used at or below the breakpoint (px/s).
pub const ATTR_MOBILE_SPEED: &str = "data-mobile-speed";
/// Attribute holding the speed used above the breakpoint (px/s).
pub const ATTR_DESKTOP_SPEED: &str = "data-desktop-speed";
/// Attribute holding the breakpoint viewport width (px).
pub const ATTR_BREAKPOINT: &str = "data-breakpoint";

/// Attributes whose changes reconfigure a running marquee.
pub const OBSERVED_ATTRIBUTES: [&str; 3] = [ATTR_MOBILE_SPEED, ATTR_DESKTOP_SPEED, ATTR_BREAKPOINT];

/// Parses the leading number of a string the way browsers parse CSS-ish
/// attribute values: leading whitespace is skipped and trailing garbage such
/// as a `px` unit is ignored.
///
/// Returns `None` when no number prefix exists.
#[must_use]
pub fn parse_number_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A bare "5." is still a number, a bare "." is not.
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Direction-detection constants for one input family.
///
/// Both fields are required when given in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionTuning {
    /// Pixels of movement before a direction is decided.
    pub threshold: f64,
    /// Multiplier applied to horizontal movement when comparing against
    /// vertical movement. Values above 1 favour dragging.
    pub horizontal_bias: f64,
}

impl DirectionTuning {
    /// Creates tuning constants.
    #[must_use]
    pub const fn new(threshold: f64, horizontal_bias: f64) -> Self {
        Self {
            threshold,
            horizontal_bias,
        }
    }

    /// Returns the bias actually used for classification.
    ///
    /// Clamped to at least 1 so that any movement past the threshold is
    /// classified one way or the other.
    #[must_use]
    pub fn bias(&self) -> f64 {
        if self.horizontal_bias.is_finite() {
            self.horizontal_bias.max(1.0)
        } else {
            1.0
        }
    }
}

/// Direction-detection constants for both input families.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Touch input (fingers).
    pub touch: DirectionTuning,
    /// Mouse and pen input.
    pub pointer: DirectionTuning,
}

impl GestureTuning {
    /// Touch: react early and favour horizontal swipes.
    pub const TOUCH: DirectionTuning = DirectionTuning::new(3.0, 1.15);
    /// Mouse/pen: larger dead zone, no bias.
    pub const POINTER: DirectionTuning = DirectionTuning::new(10.0, 1.0);
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            touch: Self::TOUCH,
            pointer: Self::POINTER,
        }
    }
}

/// Runtime configuration of one marquee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Speed at or below the breakpoint, in pixels per second.
    pub mobile_speed: f64,
    /// Speed above the breakpoint, in pixels per second.
    pub desktop_speed: f64,
    /// Viewport width separating mobile from desktop speed.
    pub breakpoint: f64,
    /// Gesture direction detection.
    pub gesture: GestureTuning,
}

impl MarqueeConfig {
    /// Default mobile speed (px/s).
    pub const DEFAULT_MOBILE_SPEED: f64 = 40.0;
    /// Default desktop speed (px/s).
    pub const DEFAULT_DESKTOP_SPEED: f64 = 60.0;
    /// Default breakpoint (px).
    pub const DEFAULT_BREAKPOINT: f64 = 767.0;

    /// Loads defaults from a TOML document. Missing keys take the built-in
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::InvalidConfig`] if the document does not
    /// parse and [`MarqueeError::InvalidNumber`] if a speed is negative or a
    /// value is not finite.
    pub fn from_toml_str(source: &str) -> MarqueeResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| MarqueeError::InvalidConfig(e.to_string()))?;
        check_speed("mobile_speed", config.mobile_speed)?;
        check_speed("desktop_speed", config.desktop_speed)?;
        check_finite("breakpoint", config.breakpoint)?;
        Ok(config)
    }

    /// Re-reads speeds and breakpoint from the host's attributes.
    ///
    /// Absent or unusable attributes keep their current value.
    pub fn read_attributes<S: AttributeSource + ?Sized>(&mut self, source: &S) {
        if let Some(v) = read_attr(source, ATTR_MOBILE_SPEED, parse_speed) {
            self.mobile_speed = v;
        }
        if let Some(v) = read_attr(source, ATTR_DESKTOP_SPEED, parse_speed) {
            self.desktop_speed = v;
        }
        if let Some(v) = read_attr(source, ATTR_BREAKPOINT, parse_breakpoint) {
            self.breakpoint = v;
        }
    }
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            mobile_speed: Self::DEFAULT_MOBILE_SPEED,
            desktop_speed: Self::DEFAULT_DESKTOP_SPEED,
            breakpoint: Self::DEFAULT_BREAKPOINT,
            gesture: GestureTuning::default(),
        }
    }
}

fn read_attr<S, F>(source: &S, attribute: &str, parse: F) -> Option<f64>
where
    S: AttributeSource + ?Sized,
    F: Fn(&str, &str) -> MarqueeResult<f64>,
{
    let raw = source.attribute(attribute)?;
    match parse(attribute, &raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(%err, "keeping previous value");
            None
        }
    }
}

fn invalid(attribute: &str, raw: &str) -> MarqueeError {
    MarqueeError::InvalidNumber {
        attribute: attribute.to_owned(),
        value: raw.to_owned(),
    }
}

/// Parses a speed attribute (finite, non-negative px/s).
///
/// # Errors
///
/// Returns [`MarqueeError::InvalidNumber`] when the value is not a usable
/// speed.
pub fn parse_speed(attribute: &str, raw: &str) -> MarqueeResult<f64> {
    let value = parse_number_prefix(raw).ok_or_else(|| invalid(attribute, raw))?;
    check_speed(attribute, value).map_err(|_| invalid(attribute, raw))
}

/// Parses a breakpoint attribute (any finite width).
///
/// # Errors
///
/// Returns [`MarqueeError::InvalidNumber`] when the value is not finite.
pub fn parse_breakpoint(attribute: &str, raw: &str) -> MarqueeResult<f64> {
    let value = parse_number_prefix(raw).ok_or_else(|| invalid(attribute, raw))?;
    check_finite(attribute, value).map_err(|_| invalid(attribute, raw))
}

fn check_finite(attribute: &str, value: f64) -> MarqueeResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(attribute, &value.to_string()))
    }
}

// Negative speeds would push the offset past zero, which `advance` never
// wraps back.
fn check_speed(attribute: &str, value: f64) -> MarqueeResult<f64> {
    let value = check_finite(attribute, value)?;
    if value < 0.0 {
        return Err(invalid(attribute, &value.to_string()));
    }
    Ok(value)
}
