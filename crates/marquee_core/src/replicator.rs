//! Content replicator.
//!
//! Clones the first item until the track is comfortably wider than twice
//! the container, so that shifting by one loop distance is invisible.
//! Replication only ever grows the track. Shrinking the window and growing
//! it back therefore never changes the loop distance mid-animation.

use crate::host::TrackSurface;

/// Result of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    /// Rendered width of one item (px).
    pub item_width: f64,
    /// Gap between items (px).
    pub gap: f64,
    /// `item_width + gap`.
    pub loop_distance: f64,
    /// Items in the track after replication.
    pub item_count: usize,
    /// Clones appended by this pass.
    pub appended: usize,
}

/// Measures and duplicates track content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentReplicator;

impl ContentReplicator {
    /// Upper bound on items in one track.
    pub const MAX_ITEMS: usize = 1024;

    /// Items needed to cover twice `container_width`, plus one spare.
    ///
    /// `item_width` must be positive.
    #[must_use]
    pub fn required_items(container_width: f64, item_width: f64) -> usize {
        let needed = (container_width.max(0.0) * 2.0 / item_width).ceil() + 1.0;
        if needed.is_finite() {
            (needed as usize).min(Self::MAX_ITEMS)
        } else {
            Self::MAX_ITEMS
        }
    }

    /// Measures the track and appends clones of the first item as needed.
    ///
    /// Returns `None` without touching the track when there is nothing to
    /// measure: no items, or a first item with no usable width.
    pub fn layout<S: TrackSurface + ?Sized>(
        surface: &mut S,
        container_width: f64,
    ) -> Option<TrackLayout> {
        let current = surface.item_count();
        if current == 0 {
            return None;
        }

        let item_width = surface.item_width();
        if !item_width.is_finite() || item_width <= 0.0 {
            tracing::debug!(item_width, "first item has no width, skipping layout");
            return None;
        }
        let gap = {
            let g = surface.gap();
            if g.is_finite() { g } else { 0.0 }
        };

        let required = Self::required_items(container_width, item_width);
        let mut appended = 0;
        for _ in current..required {
            surface.append_clone();
            appended += 1;
        }

        let layout = TrackLayout {
            item_width,
            gap,
            loop_distance: item_width + gap,
            item_count: current + appended,
            appended,
        };
        tracing::debug!(
            loop_distance = layout.loop_distance,
            items = layout.item_count,
            appended,
            "track laid out"
        );
        Some(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTrack {
        items: usize,
        width: f64,
        gap: f64,
    }

    impl TrackSurface for FixedTrack {
        fn item_count(&self) -> usize {
            self.items
        }
        fn item_width(&self) -> f64 {
            self.width
        }
        fn gap(&self) -> f64 {
            self.gap
        }
        fn append_clone(&mut self) {
            self.items += 1;
        }
        fn set_offset(&mut self, _offset: f64) {}
    }

    #[test]
    fn test_required_items() {
        assert_eq!(ContentReplicator::required_items(1000.0, 300.0), 8);
        assert_eq!(ContentReplicator::required_items(0.0, 300.0), 1);
        assert_eq!(ContentReplicator::required_items(1e9, 0.001), ContentReplicator::MAX_ITEMS);
    }

    #[test]
    fn test_layout_appends_to_required_count() {
        let mut track = FixedTrack { items: 1, width: 300.0, gap: 20.0 };
        let layout = ContentReplicator::layout(&mut track, 1000.0).unwrap();
        assert_eq!(layout.loop_distance, 320.0);
        assert_eq!(layout.item_count, 8);
        assert_eq!(layout.appended, 7);
        assert_eq!(track.items, 8);
    }

    #[test]
    fn test_layout_never_removes() {
        let mut track = FixedTrack { items: 1, width: 300.0, gap: 20.0 };
        ContentReplicator::layout(&mut track, 1000.0).unwrap();
        let layout = ContentReplicator::layout(&mut track, 200.0).unwrap();
        assert_eq!(layout.appended, 0);
        assert_eq!(track.items, 8);
    }

    #[test]
    fn test_degenerate_tracks_are_noops() {
        let mut empty = FixedTrack { items: 0, width: 300.0, gap: 20.0 };
        assert!(ContentReplicator::layout(&mut empty, 1000.0).is_none());
        assert_eq!(empty.items, 0);

        let mut flat = FixedTrack { items: 1, width: 0.0, gap: 20.0 };
        assert!(ContentReplicator::layout(&mut flat, 1000.0).is_none());
        assert_eq!(flat.items, 1);
    }
}
