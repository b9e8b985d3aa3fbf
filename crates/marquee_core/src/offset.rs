//! Offset model.
//!
//! A single horizontal translation plus the loop distance it wraps on.
//! After every normalization pass the offset lies in `(-loop, 0]`, which
//! keeps the visible window inside the duplicated content band whichever
//! way it travelled.

/// Horizontal offset of the track, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OffsetModel {
    /// Current translation (px). Non-positive once normalized.
    offset: f64,
    /// Width of one item plus gap. `None` until the first layout.
    loop_distance: Option<f64>,
}

impl OffsetModel {
    /// Creates a model at offset zero with no loop distance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0.0,
            loop_distance: None,
        }
    }

    /// Creates a model at a given offset and loop distance, without
    /// normalizing.
    #[must_use]
    pub const fn with_offset(offset: f64, loop_distance: f64) -> Self {
        Self {
            offset,
            loop_distance: Some(loop_distance),
        }
    }

    /// Returns the current offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the loop distance, if layout has produced one.
    #[must_use]
    pub const fn loop_distance(&self) -> Option<f64> {
        self.loop_distance
    }

    /// Sets the loop distance from a new layout.
    pub fn set_loop_distance(&mut self, loop_distance: Option<f64>) {
        self.loop_distance = loop_distance;
    }

    /// Moves the offset left by `delta` pixels, wrapping forward each time a
    /// whole loop has been travelled.
    pub fn advance(&mut self, delta: f64) {
        self.offset -= delta;
        let Some(period) = self.period() else {
            return;
        };
        if self.offset <= -period {
            self.offset = wrap_into_band(self.offset, period);
        }
    }

    /// Places the offset at `start + dx` (drag position) and normalizes it
    /// in both directions.
    pub fn set_from_drag(&mut self, start: f64, dx: f64) {
        self.offset = start + dx;
        self.normalize();
    }

    /// Re-bases the offset after the loop distance changed, keeping the
    /// same phase relative to the content.
    pub fn renormalize_after_resize(&mut self) {
        let Some(period) = self.period() else {
            return;
        };
        self.offset %= period;
        self.normalize();
    }

    /// Brings the offset into `(-loop, 0]`. Skipped without a usable loop
    /// distance.
    pub fn normalize(&mut self) {
        if let Some(period) = self.period() {
            self.offset = wrap_into_band(self.offset, period);
        }
    }

    /// Returns true if the offset currently satisfies the band invariant.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        match self.period() {
            Some(period) => self.offset > -period && self.offset <= 0.0,
            None => true,
        }
    }

    /// The loop distance, if usable as a divisor.
    fn period(&self) -> Option<f64> {
        self.loop_distance
            .filter(|d| d.is_finite() && *d > 0.0)
    }
}

/// Maps `value` into `(-period, 0]` by whole periods.
///
/// `rem_euclid` is exact, so this is constant time however many periods
/// away `value` is.
fn wrap_into_band(value: f64, period: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let remainder = value.rem_euclid(period);
    if remainder == 0.0 {
        return 0.0;
    }
    let wrapped = remainder - period;
    // A remainder below half an ulp of `period` rounds onto the excluded
    // edge; the nearest in-band phase is then zero.
    if wrapped <= -period {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_once() {
        let mut model = OffsetModel::with_offset(-50.0, 320.0);
        model.advance(400.0);
        assert!((model.offset() - -130.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_lands_exactly_on_boundary() {
        let mut model = OffsetModel::with_offset(-300.0, 320.0);
        model.advance(20.0);
        assert_eq!(model.offset(), 0.0);
        assert!(model.is_normalized());
    }

    #[test]
    fn test_drag_normalizes_both_directions() {
        let mut model = OffsetModel::with_offset(-100.0, 320.0);
        model.set_from_drag(-100.0, 150.0);
        assert!((model.offset() - -270.0).abs() < 1e-9);

        model.set_from_drag(-100.0, -300.0);
        assert!((model.offset() - -80.0).abs() < 1e-9);

        model.set_from_drag(-100.0, 10_000.0);
        assert!(model.is_normalized());
    }

    #[test]
    fn test_drag_round_trip() {
        let mut model = OffsetModel::with_offset(-42.0, 320.0);
        let before = model.offset();
        model.set_from_drag(before, 275.0);
        let mid = model.offset();
        model.set_from_drag(mid, -275.0);
        assert!((model.offset() - before).abs() < 1e-9);
    }

    #[test]
    fn test_renormalize_keeps_phase() {
        let mut model = OffsetModel::with_offset(-700.0, 320.0);
        model.renormalize_after_resize();
        assert!((model.offset() - -60.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_advance_stays_in_band() {
        for period in [7.5_f64, 320.0, 0.1] {
            let start = -(period / 2.0).min(1.0);
            let mut model = OffsetModel::with_offset(start, period);
            for exponent in 0..=300 {
                model.advance(10f64.powi(exponent));
                assert!(
                    model.is_normalized(),
                    "offset {} escaped band of {period} after 1e{exponent}",
                    model.offset()
                );
            }
            model.advance(9.999_999_999_999_999e30);
            assert!(model.is_normalized());
        }
    }

    #[test]
    fn test_huge_drag_stays_in_band() {
        let mut model = OffsetModel::with_offset(-3.0, 7.5);
        model.set_from_drag(-3.0, 1e200);
        assert!(model.is_normalized());
        model.set_from_drag(-3.0, -1e200);
        assert!(model.is_normalized());
    }

    #[test]
    fn test_tiny_remainder_wraps_to_zero() {
        let mut model = OffsetModel::with_offset(-1e-300, 7.5);
        model.normalize();
        assert!(model.is_normalized());
        assert!(model.offset() <= 0.0);
    }

    #[test]
    fn test_zero_loop_distance_skips_normalization() {
        let mut model = OffsetModel::with_offset(-50.0, 0.0);
        model.advance(400.0);
        assert_eq!(model.offset(), -450.0);
        model.renormalize_after_resize();
        assert_eq!(model.offset(), -450.0);

        let mut model = OffsetModel::new();
        model.set_from_drag(0.0, 35.0);
        assert_eq!(model.offset(), 35.0);
    }
}
