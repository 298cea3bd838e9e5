//! Playback direction state machine.
//!
//! `Stopped` is the only idle state; there is no paused-but-primed state.

use std::fmt;

/// Playback direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Playing backwards (-1)
    Reverse,
    /// Idle (0)
    #[default]
    Stopped,
    /// Playing forwards (1)
    Forward,
}

impl Direction {
    /// Signed step multiplier: -1, 0 or 1
    pub fn sign(self) -> i8 {
        match self {
            Direction::Reverse => -1,
            Direction::Stopped => 0,
            Direction::Forward => 1,
        }
    }

    /// Map any integer to a direction by its sign
    pub fn from_sign(sign: i32) -> Self {
        match sign.signum() {
            -1 => Direction::Reverse,
            1 => Direction::Forward,
            _ => Direction::Stopped,
        }
    }

    /// Check if currently playing in either direction
    pub fn is_playing(self) -> bool {
        self != Direction::Stopped
    }

    /// Check if stopped
    pub fn is_stopped(self) -> bool {
        self == Direction::Stopped
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Reverse => "reverse",
            Direction::Stopped => "stopped",
            Direction::Forward => "forward",
        };
        f.write_str(label)
    }
}
