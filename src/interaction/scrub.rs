//! Pointer-to-time mapping for the playhead, trim handles and ruler.
//!
//! Pointer positions arrive in viewport pixels; adding the horizontal scroll
//! offset gives content pixels, and `content_x / zoom` gives seconds. Drags
//! snap magnetically to clip edges; ruler clicks never snap.

use crate::core::time::{clamp_range, round_to_millis, Seconds};

/// Snap distance in pixels
pub const DEFAULT_SNAP_THRESHOLD_PX: f64 = 10.0;
/// Initial zoom in pixels per second
pub const DEFAULT_ZOOM: f64 = 50.0;
pub const DEFAULT_MIN_ZOOM: f64 = 10.0;
pub const DEFAULT_MAX_ZOOM: f64 = 200.0;

/// Time resolved from a pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubResult {
    pub time: Seconds,
    /// Whether the time locked onto a clip edge
    pub snapped: bool,
    /// Index into the edge set of the edge snapped to
    pub edge_index: Option<usize>,
}

impl ScrubResult {
    fn free(time: Seconds) -> Self {
        Self {
            time,
            snapped: false,
            edge_index: None,
        }
    }
}

/// Zoom, scroll and snapping state for the timeline view
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubController {
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    scroll_offset: f64,
    snap_threshold_px: f64,
}

impl ScrubController {
    pub fn new(zoom: f64, min_zoom: f64, max_zoom: f64, snap_threshold_px: f64) -> Self {
        let mut controller = Self {
            zoom: DEFAULT_ZOOM,
            min_zoom,
            max_zoom: max_zoom.max(min_zoom),
            scroll_offset: 0.0,
            snap_threshold_px: snap_threshold_px.max(0.0),
        };
        controller.set_zoom(zoom);
        controller
    }

    /// Pixels per second
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set zoom, clamped to the configured range. Returns the applied zoom.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            self.zoom = clamp_range(zoom, self.min_zoom, self.max_zoom);
        }
        self.zoom
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Set the horizontal scroll offset in pixels, never negative
    pub fn set_scroll_offset(&mut self, offset: f64) -> f64 {
        if offset.is_finite() {
            self.scroll_offset = offset.max(0.0);
        }
        self.scroll_offset
    }

    pub fn snap_threshold_px(&self) -> f64 {
        self.snap_threshold_px
    }

    /// Viewport pixel to content pixel
    pub fn content_x(&self, viewport_x: f64) -> f64 {
        viewport_x + self.scroll_offset
    }

    /// Content pixel of a timeline position
    pub fn pixel_x(&self, time: Seconds) -> f64 {
        time * self.zoom
    }

    /// Seconds covered by a pixel distance at the current zoom
    pub fn pixels_to_seconds(&self, pixels: f64) -> Seconds {
        pixels / self.zoom
    }

    /// Unsnapped time at a content pixel, rounded to the millisecond
    pub fn raw_time(&self, content_x: f64) -> Seconds {
        round_to_millis(content_x / self.zoom)
    }

    /// Resolve a content pixel against `edges`.
    ///
    /// The first edge within the snap threshold wins and is returned exactly;
    /// otherwise the raw millisecond-rounded time is returned.
    pub fn snap(&self, content_x: f64, edges: &[Seconds]) -> ScrubResult {
        for (index, &edge) in edges.iter().enumerate() {
            if (self.pixel_x(edge) - content_x).abs() <= self.snap_threshold_px {
                return ScrubResult {
                    time: edge,
                    snapped: true,
                    edge_index: Some(index),
                };
            }
        }
        ScrubResult::free(self.raw_time(content_x))
    }

    /// Time for a playhead or handle drag at `viewport_x`, clamped to the sequence
    pub fn drag_time(&self, viewport_x: f64, edges: &[Seconds], total_duration: Seconds) -> ScrubResult {
        let mut result = self.snap(self.content_x(viewport_x), edges);
        result.time = clamp_range(result.time, 0.0, total_duration.max(0.0));
        result
    }

    /// Time for a ruler click at `viewport_x`. Never snaps.
    pub fn ruler_time(&self, viewport_x: f64, total_duration: Seconds) -> Seconds {
        clamp_range(
            self.raw_time(self.content_x(viewport_x)),
            0.0,
            total_duration.max(0.0),
        )
    }
}

impl Default for ScrubController {
    fn default() -> Self {
        Self::new(
            DEFAULT_ZOOM,
            DEFAULT_MIN_ZOOM,
            DEFAULT_MAX_ZOOM,
            DEFAULT_SNAP_THRESHOLD_PX,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_edge_within_threshold() {
        let scrub = ScrubController::default();
        let result = scrub.snap(255.0, &[0.0, 5.0, 13.0]);
        assert_eq!(result.time, 5.0);
        assert!(result.snapped);
        assert_eq!(result.edge_index, Some(1));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let scrub = ScrubController::default();
        assert!(scrub.snap(260.0, &[5.0]).snapped);
        let outside = scrub.snap(260.5, &[5.0]);
        assert!(!outside.snapped);
        assert_eq!(outside.time, 5.21);
    }

    #[test]
    fn test_first_matching_edge_wins() {
        // Two edges within the threshold of each other
        let scrub = ScrubController::default();
        let result = scrub.snap(251.0, &[4.9, 5.0]);
        assert_eq!(result.time, 4.9);
        assert_eq!(result.edge_index, Some(0));
    }

    #[test]
    fn test_raw_time_rounds_to_millis() {
        let scrub = ScrubController::new(30.0, 10.0, 200.0, 10.0);
        assert_eq!(scrub.raw_time(100.0), 3.333);
    }

    #[test]
    fn test_scroll_offset_applied() {
        let mut scrub = ScrubController::default();
        scrub.set_scroll_offset(500.0);
        assert_eq!(scrub.content_x(10.0), 510.0);
        assert_eq!(scrub.ruler_time(10.0, 100.0), 10.2);
        assert_eq!(scrub.set_scroll_offset(-20.0), 0.0);
    }

    #[test]
    fn test_ruler_click_never_snaps() {
        let scrub = ScrubController::default();
        assert_eq!(scrub.ruler_time(255.0, 13.0), 5.1);
        let drag = scrub.drag_time(255.0, &[0.0, 5.0, 13.0], 13.0);
        assert_eq!(drag.time, 5.0);
    }

    #[test]
    fn test_drag_time_clamped_to_sequence() {
        let scrub = ScrubController::default();
        let result = scrub.drag_time(5_000.0, &[0.0, 13.0], 13.0);
        assert_eq!(result.time, 13.0);
        assert!(!result.snapped);
        assert_eq!(scrub.drag_time(-40.0, &[0.0, 13.0], 13.0).time, 0.0);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut scrub = ScrubController::default();
        assert_eq!(scrub.set_zoom(1.0), 10.0);
        assert_eq!(scrub.set_zoom(1_000.0), 200.0);
        assert_eq!(scrub.set_zoom(f64::NAN), 200.0);
        assert_eq!(scrub.pixels_to_seconds(400.0), 2.0);
    }
}
