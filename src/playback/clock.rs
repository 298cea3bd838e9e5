//! Frame-stepped playback clock.
//!
//! While the direction is non-zero, every tick advances `current_time` by
//! one frame in that direction. Reaching either end of the sequence parks
//! the clock on the boundary and stops it; there is no looping.

use crate::core::time::{clamp_range, frame_duration, Seconds, DEFAULT_FPS};
use crate::playback::state::Direction;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Clock is stopped; nothing moved
    Idle,
    /// Advanced to a new time, still playing
    Advanced(Seconds),
    /// Hit the sequence end and stopped there
    ReachedEnd(Seconds),
    /// Hit zero and stopped there
    ReachedStart,
}

impl TickOutcome {
    /// Whether this tick stopped the clock on a boundary
    pub fn stopped_at_boundary(&self) -> bool {
        matches!(self, TickOutcome::ReachedEnd(_) | TickOutcome::ReachedStart)
    }
}

/// Playback clock: current time, direction, and frame rate
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    current_time: Seconds,
    direction: Direction,
    fps: u32,
}

impl PlaybackClock {
    /// Create a stopped clock at zero. A zero fps is bumped to 1.
    pub fn new(fps: u32) -> Self {
        Self {
            current_time: 0.0,
            direction: Direction::Stopped,
            fps: fps.max(1),
        }
    }

    pub fn current_time(&self) -> Seconds {
        self.current_time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Seconds per frame
    pub fn frame_duration(&self) -> Seconds {
        frame_duration(self.fps)
    }

    pub fn is_playing(&self) -> bool {
        self.direction.is_playing()
    }

    /// Set the direction. Returns true if it changed.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction == direction {
            return false;
        }
        log::debug!("playback direction {} -> {}", self.direction, direction);
        self.direction = direction;
        true
    }

    /// Jump to `time`, clamped to `[0, total_duration]`. Direction is unchanged.
    pub fn seek(&mut self, time: Seconds, total_duration: Seconds) -> Seconds {
        let target = if time.is_finite() { time } else { 0.0 };
        self.current_time = clamp_range(target, 0.0, total_duration.max(0.0));
        self.current_time
    }

    /// Move `frames` frames from the current time, ignoring the playback direction.
    pub fn step_frames(&mut self, frames: i32, total_duration: Seconds) -> Seconds {
        let target = self.current_time + f64::from(frames) * self.frame_duration();
        self.seek(target, total_duration)
    }

    /// Advance by one frame in the current direction.
    pub fn tick(&mut self, total_duration: Seconds) -> TickOutcome {
        if self.direction.is_stopped() {
            return TickOutcome::Idle;
        }

        let total = total_duration.max(0.0);
        let next = self.current_time + self.frame_duration() * f64::from(self.direction.sign());

        if next >= total {
            self.current_time = total;
            self.set_direction(Direction::Stopped);
            log::debug!("playback reached end at {:.3}s", total);
            return TickOutcome::ReachedEnd(total);
        }
        if next <= 0.0 {
            self.current_time = 0.0;
            self.set_direction(Direction::Stopped);
            log::debug!("playback reached start");
            return TickOutcome::ReachedStart;
        }

        self.current_time = next;
        log::trace!("tick -> {:.4}s", next);
        TickOutcome::Advanced(next)
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
