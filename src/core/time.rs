//! Time representation for the timeline engine.
//! All timeline positions and durations are seconds (f64) on the shared
//! sequence timeline; frame math is keyed to an integer fps.

/// Seconds on the sequence timeline
pub type Seconds = f64;

/// Time constants for conversions
pub mod constants {
    pub const MILLIS_PER_SECOND: f64 = 1_000.0;
    pub const SECONDS_PER_MINUTE: u64 = 60;
    pub const SECONDS_PER_HOUR: u64 = 3_600;
}

/// Time zero constant
pub const ZERO: Seconds = 0.0;

/// Default playback frame rate
pub const DEFAULT_FPS: u32 = 24;

/// Round to the nearest millisecond.
/// Scrub results go through this so they compare exactly.
#[inline]
pub fn round_to_millis(seconds: Seconds) -> Seconds {
    (seconds * constants::MILLIS_PER_SECOND).round() / constants::MILLIS_PER_SECOND
}

/// Clamp `value` into `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics: when `hi < lo` the lower bound
/// wins, which is what trim math needs when a clip is already over-trimmed.
#[inline]
pub fn clamp_range(value: Seconds, lo: Seconds, hi: Seconds) -> Seconds {
    value.min(hi).max(lo)
}

/// Duration of one frame in seconds. A zero fps is treated as 1.
#[inline]
pub fn frame_duration(fps: u32) -> Seconds {
    1.0 / fps.max(1) as f64
}

/// Tick period of the playback timer in milliseconds (`1000 / fps`)
#[inline]
pub fn tick_period_millis(fps: u32) -> f64 {
    constants::MILLIS_PER_SECOND / fps.max(1) as f64
}

/// Convert time to frame index given a frame rate
#[inline]
pub fn to_frame_index(seconds: Seconds, fps: u32) -> u64 {
    // Nudge before flooring so exact frame boundaries survive f64 error.
    ((seconds.max(0.0) * fps.max(1) as f64) + 1e-9).floor() as u64
}

/// Convert frame index to time given a frame rate
#[inline]
pub fn from_frame_index(frame_index: u64, fps: u32) -> Seconds {
    frame_index as f64 / fps.max(1) as f64
}

/// Format time as HH:MM:SS.mmm
pub fn format_time(seconds: Seconds) -> String {
    let total_millis = (seconds.max(0.0) * constants::MILLIS_PER_SECOND).round() as u64;
    let millis = total_millis % 1000;
    let total_seconds = total_millis / 1000;
    let hours = total_seconds / constants::SECONDS_PER_HOUR;
    let minutes = (total_seconds % constants::SECONDS_PER_HOUR) / constants::SECONDS_PER_MINUTE;
    let secs = total_seconds % constants::SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

/// Format time as SMPTE non-drop timecode `HH:MM:SS:FF`
pub fn format_timecode(seconds: Seconds, fps: u32) -> String {
    let fps = fps.max(1) as u64;
    let total_frames = to_frame_index(seconds, fps as u32);
    let frames = total_frames % fps;
    let total_seconds = total_frames / fps;
    let hours = total_seconds / constants::SECONDS_PER_HOUR;
    let minutes = (total_seconds % constants::SECONDS_PER_HOUR) / constants::SECONDS_PER_MINUTE;
    let secs = total_seconds % constants::SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, secs, frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_millis() {
        assert_eq!(round_to_millis(5.1004), 5.1);
        assert_eq!(round_to_millis(5.0996), 5.1);
        assert_eq!(round_to_millis(0.0004), 0.0);
    }

    #[test]
    fn test_clamp_range_inverted_bounds() {
        // Upper bound below lower bound: lower bound wins, no panic
        assert_eq!(clamp_range(3.0, 0.0, -0.05), 0.0);
        assert_eq!(clamp_range(-1.0, 0.0, 5.0), 0.0);
        assert_eq!(clamp_range(7.0, 0.0, 5.0), 5.0);
        assert_eq!(clamp_range(2.5, 0.0, 5.0), 2.5);
    }

    #[test]
    fn test_frame_duration() {
        assert!((frame_duration(24) - 0.041_666_666).abs() < 1e-6);
        assert_eq!(frame_duration(0), 1.0);
        assert!((tick_period_millis(24) - 41.666_666).abs() < 1e-3);
    }

    #[test]
    fn test_frame_index() {
        assert_eq!(to_frame_index(1.0, 30), 30);
        assert_eq!(from_frame_index(30, 30), 1.0);
        assert_eq!(to_frame_index(0.5 / 30.0, 30), 0);
        assert_eq!(to_frame_index(-2.0, 30), 0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(3661.5), "01:01:01.500");
        assert_eq!(format_time(0.0), "00:00:00.000");
    }

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0.0, 24), "00:00:00:00");
        assert_eq!(format_timecode(1.5, 24), "00:00:01:12");
        assert_eq!(format_timecode(3661.0 + 23.0 / 24.0, 24), "01:01:01:23");
        assert_eq!(format_timecode(2.0, 25), "00:00:02:00");
    }
}
