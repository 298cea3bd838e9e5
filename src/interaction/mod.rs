//! Pointer interaction: scrubbing, snapping and drag sessions.

pub mod drag;
pub mod scrub;

pub use drag::{DragEndReason, DragOutcome, DragSession, DragTarget, ListenerLease};
pub use scrub::{ScrubController, ScrubResult};
