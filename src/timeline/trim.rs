//! Non-destructive trimming from handle drags.
//!
//! All functions are pure and zoom-agnostic: callers convert pointer pixels
//! to seconds (`pixels / zoom`) before calling in. Results are clamped so
//! at least [`MIN_EFFECTIVE_DURATION`] of the lane stays visible.

use crate::core::clip::{ClipUpdate, TimelineClip, MIN_EFFECTIVE_DURATION};
use crate::core::time::{clamp_range, Seconds};
use crate::timeline::av_offset::resolve_audio_bounds;

/// Which edge of a lane is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimHandle {
    /// Left handle, trims the head
    Start,
    /// Right handle, trims the tail
    End,
}

/// Which lane a trim applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimLane {
    Video,
    Audio,
}

/// Head trim after dragging the left handle by `delta` seconds.
///
/// Positive delta moves the handle right, shrinking the lane from the head.
#[inline]
pub fn trim_start_delta(
    trim_start: Seconds,
    trim_end: Seconds,
    duration: Seconds,
    delta: Seconds,
) -> Seconds {
    clamp_range(
        trim_start + delta,
        0.0,
        duration - trim_end - MIN_EFFECTIVE_DURATION,
    )
}

/// Tail trim after dragging the right handle by `delta` seconds.
///
/// Positive delta moves the handle right, which grows the lane and
/// therefore *reduces* the tail trim.
#[inline]
pub fn trim_end_delta(
    trim_start: Seconds,
    trim_end: Seconds,
    duration: Seconds,
    delta: Seconds,
) -> Seconds {
    clamp_range(
        trim_end - delta,
        0.0,
        duration - trim_start - MIN_EFFECTIVE_DURATION,
    )
}

/// New `trim_start` for the video lane
pub fn video_trim_start_delta(clip: &TimelineClip, delta: Seconds) -> Seconds {
    trim_start_delta(clip.trim_start, clip.trim_end, clip.duration, delta)
}

/// New `trim_end` for the video lane
pub fn video_trim_end_delta(clip: &TimelineClip, delta: Seconds) -> Seconds {
    trim_end_delta(clip.trim_start, clip.trim_end, clip.duration, delta)
}

/// New `audio_trim_start`, independent of the video trims
pub fn audio_trim_start_delta(clip: &TimelineClip, delta: Seconds) -> Seconds {
    let audio = resolve_audio_bounds(clip);
    trim_start_delta(audio.trim_start, audio.trim_end, audio.duration, delta)
}

/// New `audio_trim_end`, independent of the video trims
pub fn audio_trim_end_delta(clip: &TimelineClip, delta: Seconds) -> Seconds {
    let audio = resolve_audio_bounds(clip);
    trim_end_delta(audio.trim_start, audio.trim_end, audio.duration, delta)
}

/// Result of a handle drag on one lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimResult {
    pub lane: TrimLane,
    pub trim_start: Seconds,
    pub trim_end: Seconds,
}

impl TrimResult {
    /// Partial update carrying both trims of the affected lane
    pub fn to_update(&self) -> ClipUpdate {
        match self.lane {
            TrimLane::Video => ClipUpdate::video_trim(self.trim_start, self.trim_end),
            TrimLane::Audio => ClipUpdate::audio_trim(self.trim_start, self.trim_end),
        }
    }
}

/// Apply a handle drag of `delta` seconds to `clip`.
///
/// The untouched trim of the lane is carried through resolved, so an audio
/// drag on a clip that still inherits video trims detaches both audio
/// trims at once.
pub fn apply_trim(
    clip: &TimelineClip,
    lane: TrimLane,
    handle: TrimHandle,
    delta: Seconds,
) -> TrimResult {
    let (trim_start, trim_end) = match lane {
        TrimLane::Video => (clip.trim_start, clip.trim_end),
        TrimLane::Audio => {
            let audio = resolve_audio_bounds(clip);
            (audio.trim_start, audio.trim_end)
        }
    };

    let (trim_start, trim_end) = match (lane, handle) {
        (TrimLane::Video, TrimHandle::Start) => (video_trim_start_delta(clip, delta), trim_end),
        (TrimLane::Video, TrimHandle::End) => (trim_start, video_trim_end_delta(clip, delta)),
        (TrimLane::Audio, TrimHandle::Start) => (audio_trim_start_delta(clip, delta), trim_end),
        (TrimLane::Audio, TrimHandle::End) => (trim_start, audio_trim_end_delta(clip, delta)),
    };

    log::trace!(
        "trim {:?}/{:?} on {} by {:.3}s -> [{:.3}, {:.3}]",
        lane,
        handle,
        clip.id,
        delta,
        trim_start,
        trim_end
    );

    TrimResult {
        lane,
        trim_start,
        trim_end,
    }
}
