//! Core types for the timeline engine.
//!
//! This module provides the clip data model and time helpers shared by the
//! sequencer, trim, playback and interaction layers. All time values are
//! seconds (f64) on the shared sequence timeline.

pub mod clip;
pub mod time;

// Re-export core data structures for easier access.
pub use clip::{ClipId, ClipStatus, ClipUpdate, TimelineClip, MIN_EFFECTIVE_DURATION};
pub use time::{Seconds, DEFAULT_FPS, ZERO};
