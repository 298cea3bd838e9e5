//! Clip sequencer: positions of back-to-back clips on the single video lane.
//!
//! Clips are strictly contiguous. A clip starts where the previous one's
//! effective duration ends, and there are no gaps.

use crate::core::clip::{ClipId, TimelineClip};
use crate::core::time::Seconds;

/// Effective (visible) duration of a clip
#[inline]
pub fn effective_duration(clip: &TimelineClip) -> Seconds {
    clip.effective_duration()
}

/// Start time of clip `index`: the sum of effective durations before it.
///
/// An index past the end yields the total duration.
pub fn clip_start_time(clips: &[TimelineClip], index: usize) -> Seconds {
    clips
        .iter()
        .take(index)
        .map(TimelineClip::effective_duration)
        .sum()
}

/// Total duration of the sequence
pub fn total_duration(clips: &[TimelineClip]) -> Seconds {
    clips.iter().map(TimelineClip::effective_duration).sum()
}

/// Ordered clip boundary times `{0, t1, ..., total}`.
///
/// Always contains 0 and the total, even for an empty sequence.
pub fn clip_edges(clips: &[TimelineClip]) -> Vec<Seconds> {
    let mut edges = Vec::with_capacity(clips.len() + 1);
    let mut cursor = 0.0;
    edges.push(cursor);
    for clip in clips {
        cursor += clip.effective_duration();
        edges.push(cursor);
    }
    edges
}

/// The clip under a timeline position, with the offset into its visible part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipHit<'a> {
    pub index: usize,
    pub clip: &'a TimelineClip,
    pub clip_start: Seconds,
    /// Seconds since `clip_start`
    pub offset: Seconds,
}

/// Find the clip active at `time`.
///
/// Clip ranges are half-open `[start, end)`, except that the sequence end
/// belongs to the last clip so the playhead parked at the end still has
/// a frame to show. Zero-length clips are never hit.
pub fn clip_at_time(clips: &[TimelineClip], time: Seconds) -> Option<ClipHit<'_>> {
    if time < 0.0 {
        return None;
    }

    let mut start = 0.0;
    let mut last_visible: Option<ClipHit<'_>> = None;
    for (index, clip) in clips.iter().enumerate() {
        let length = clip.effective_duration();
        let end = start + length;
        if length > 0.0 {
            if time >= start && time < end {
                return Some(ClipHit {
                    index,
                    clip,
                    clip_start: start,
                    offset: time - start,
                });
            }
            last_visible = Some(ClipHit {
                index,
                clip,
                clip_start: start,
                offset: length,
            });
        }
        start = end;
    }

    // Parked exactly at the sequence end
    last_visible.filter(|hit| time <= hit.clip_start + hit.offset)
}

/// An empty stretch of timeline between clips
#[derive(Debug, Clone, PartialEq)]
pub struct Gap {
    pub start: Seconds,
    pub end: Seconds,
    pub after_clip: Option<ClipId>,
}

/// Gap detection.
///
/// The clip model has no way to represent gaps, so this is always empty.
/// It exists so hosts can already code against the shape of the result.
pub fn detect_gaps(_clips: &[TimelineClip]) -> Vec<Gap> {
    Vec::new()
}

/// Positions derived once per render from the host's clip array
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceLayout {
    starts: Vec<Seconds>,
    edges: Vec<Seconds>,
    total: Seconds,
}

impl SequenceLayout {
    /// Build the layout for an ordered clip slice
    pub fn from_clips(clips: &[TimelineClip]) -> Self {
        let edges = clip_edges(clips);
        let total = edges.last().copied().unwrap_or(0.0);
        let starts = edges[..clips.len()].to_vec();
        Self {
            starts,
            edges,
            total,
        }
    }

    /// Start of clip `index`, if it exists
    pub fn start_of(&self, index: usize) -> Option<Seconds> {
        self.starts.get(index).copied()
    }

    /// Clip boundary times, including 0 and the total
    pub fn edges(&self) -> &[Seconds] {
        &self.edges
    }

    pub fn total_duration(&self) -> Seconds {
        self.total
    }

    pub fn clip_count(&self) -> usize {
        self.starts.len()
    }
}
