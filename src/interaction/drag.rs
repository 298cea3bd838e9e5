//! Pointer drag sessions.
//!
//! A drag holds global pointer listeners for its whole lifetime. The host
//! hands over a release callback when the drag begins; [`ListenerLease`]
//! runs it exactly once, whether the drag ends normally, is cancelled, or
//! the session is dropped during teardown.

use std::fmt;

use crate::core::clip::{ClipId, TimelineClip};
use crate::core::time::Seconds;
use crate::interaction::scrub::ScrubResult;
use crate::timeline::trim::{TrimHandle, TrimLane};

/// Releases the host's global pointer listeners exactly once
pub struct ListenerLease {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerLease {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Lease with nothing to release
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Whether the release callback has not run yet
    pub fn is_held(&self) -> bool {
        self.release.is_some()
    }

    /// Run the release callback if it has not run yet. Returns true if it ran.
    pub fn release(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }
}

impl Drop for ListenerLease {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ListenerLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerLease")
            .field("held", &self.is_held())
            .finish()
    }
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq)]
pub enum DragTarget {
    Playhead,
    Trim {
        clip_id: ClipId,
        lane: TrimLane,
        handle: TrimHandle,
    },
}

/// How a drag session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEndReason {
    /// Pointer released
    Released,
    /// Escape or focus loss; no final update is emitted
    Cancelled,
}

/// An in-progress drag
#[derive(Debug)]
pub struct DragSession {
    target: DragTarget,
    /// Unsnapped time under the pointer when the drag began
    origin_time: Seconds,
    /// Timeline position of the dragged item when the drag began. The
    /// pointer may grab a handle a few pixels off its true position.
    handle_origin: Seconds,
    /// Edges the dragged item may snap to, fixed at press
    snap_edges: Vec<Seconds>,
    /// Clip as it was when a trim drag began; trims are computed against it
    anchor: Option<TimelineClip>,
    last: Option<ScrubResult>,
    lease: ListenerLease,
}

impl DragSession {
    pub fn begin(
        target: DragTarget,
        origin_time: Seconds,
        anchor: Option<TimelineClip>,
        lease: ListenerLease,
    ) -> Self {
        log::debug!("drag begin {:?} at {:.3}s", target, origin_time);
        Self {
            target,
            origin_time,
            handle_origin: origin_time,
            snap_edges: Vec::new(),
            anchor,
            last: None,
            lease,
        }
    }

    /// Drag an item sitting at `handle_origin` rather than under the pointer,
    /// snapping it against `snap_edges`
    pub fn with_handle(mut self, handle_origin: Seconds, snap_edges: Vec<Seconds>) -> Self {
        self.handle_origin = handle_origin;
        self.snap_edges = snap_edges;
        self
    }

    pub fn target(&self) -> &DragTarget {
        &self.target
    }

    pub fn origin_time(&self) -> Seconds {
        self.origin_time
    }

    pub fn handle_origin(&self) -> Seconds {
        self.handle_origin
    }

    pub fn snap_edges(&self) -> &[Seconds] {
        &self.snap_edges
    }

    /// Where the dragged item sits with the pointer at `pointer_time`,
    /// before snapping
    pub fn handle_candidate(&self, pointer_time: Seconds) -> Seconds {
        self.handle_origin + (pointer_time - self.origin_time)
    }

    pub fn anchor(&self) -> Option<&TimelineClip> {
        self.anchor.as_ref()
    }

    /// Most recent pointer resolution, if the pointer has moved
    pub fn last(&self) -> Option<ScrubResult> {
        self.last
    }

    /// Whether the last pointer position snapped to an edge
    pub fn is_snapped(&self) -> bool {
        self.last.map_or(false, |r| r.snapped)
    }

    /// Record where the dragged item resolved to. Returns the seconds it
    /// moved since the drag began.
    pub fn record(&mut self, result: ScrubResult) -> Seconds {
        self.last = Some(result);
        result.time - self.handle_origin
    }

    /// Finish the drag, releasing the listeners
    pub fn end(mut self, reason: DragEndReason) -> DragOutcome {
        self.lease.release();
        log::debug!("drag end {:?} ({:?})", self.target, reason);
        DragOutcome {
            target: self.target.clone(),
            reason,
            last: self.last,
        }
    }
}

/// Summary of a finished drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub target: DragTarget,
    pub reason: DragEndReason,
    pub last: Option<ScrubResult>,
}
