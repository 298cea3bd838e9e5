//! Audio lane placement relative to the video lane (L-cut / J-cut).
//!
//! The audio lane inherits the video trims until the clip carries its own
//! audio trims. [`resolve_audio_bounds`] is the single place those
//! fallbacks are applied; everything else reads the resolved struct.

use std::fmt;

use crate::core::clip::TimelineClip;
use crate::core::time::Seconds;

/// Tolerance under which an offset or duration difference is treated as zero
const OFFSET_EPSILON: Seconds = 1e-6;

/// Fully resolved audio bounds of a clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioBounds {
    pub duration: Seconds,
    pub trim_start: Seconds,
    pub trim_end: Seconds,
}

impl AudioBounds {
    /// `duration - trim_start - trim_end`, never negative
    pub fn effective_duration(&self) -> Seconds {
        (self.duration - self.trim_start - self.trim_end).max(0.0)
    }
}

/// Resolve the optional audio fields, falling back to the video values.
pub fn resolve_audio_bounds(clip: &TimelineClip) -> AudioBounds {
    AudioBounds {
        duration: clip.audio_duration.unwrap_or(clip.duration),
        trim_start: clip.audio_trim_start.unwrap_or(clip.trim_start),
        trim_end: clip.audio_trim_end.unwrap_or(clip.trim_end),
    }
}

/// Effective duration of the audio lane
pub fn audio_effective_duration(clip: &TimelineClip) -> Seconds {
    resolve_audio_bounds(clip).effective_duration()
}

/// Signed audio offset: `audio_trim_start - trim_start`.
///
/// Positive means the audio lane starts after the video lane.
pub fn audio_offset(clip: &TimelineClip) -> Seconds {
    resolve_audio_bounds(clip).trim_start - clip.trim_start
}

/// How the audio lane relates to the video lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CutKind {
    /// Lanes start together and have the same length
    Aligned,
    /// Audio starts after video (audio lags)
    LCut { offset: Seconds },
    /// Audio starts before video (audio leads)
    JCut { offset: Seconds },
    /// Lanes start together but diverge in length
    DurationMismatch { audio: Seconds, video: Seconds },
}

impl CutKind {
    /// Badge text shown on the clip, if any
    pub fn badge(&self) -> Option<String> {
        match self {
            CutKind::Aligned => None,
            CutKind::LCut { offset } => Some(format!("L +{:.1}s", offset)),
            CutKind::JCut { offset } => Some(format!("J {:.1}s", offset)),
            CutKind::DurationMismatch { .. } => Some("\u{21D4}".to_string()),
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, CutKind::LCut { .. } | CutKind::JCut { .. })
    }
}

impl fmt::Display for CutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.badge() {
            Some(badge) => f.write_str(&badge),
            None => Ok(()),
        }
    }
}

/// Classify a clip's audio/video relationship
pub fn classify_cut(clip: &TimelineClip) -> CutKind {
    let audio = resolve_audio_bounds(clip);
    let offset = audio.trim_start - clip.trim_start;

    if offset > OFFSET_EPSILON {
        return CutKind::LCut { offset };
    }
    if offset < -OFFSET_EPSILON {
        return CutKind::JCut { offset };
    }

    let audio_length = audio.effective_duration();
    let video_length = clip.effective_duration();
    if (audio_length - video_length).abs() > OFFSET_EPSILON {
        CutKind::DurationMismatch {
            audio: audio_length,
            video: video_length,
        }
    } else {
        CutKind::Aligned
    }
}

/// Where the audio lane of a clip sits on the shared timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioLanePlacement {
    pub start: Seconds,
    pub width: Seconds,
    pub offset: Seconds,
}

impl AudioLanePlacement {
    pub fn end(&self) -> Seconds {
        self.start + self.width
    }

    /// Whether the audio lane covers `time` (half-open)
    pub fn covers(&self, time: Seconds) -> bool {
        time >= self.start && time < self.end()
    }
}

/// Place the audio lane of a clip whose video lane starts at `video_start`.
pub fn audio_lane_placement(clip: &TimelineClip, video_start: Seconds) -> AudioLanePlacement {
    let audio = resolve_audio_bounds(clip);
    let offset = audio.trim_start - clip.trim_start;
    AudioLanePlacement {
        start: video_start + offset,
        width: audio.effective_duration(),
        offset,
    }
}
