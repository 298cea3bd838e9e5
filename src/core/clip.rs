//! Clip data structure representing one authored shot on the video lane.
//!
//! Clips are owned by the host and re-supplied on every render. The engine
//! never mutates them; it emits [`ClipUpdate`] requests instead.

use serde::{Deserialize, Serialize};

use crate::core::time::Seconds;

/// Opaque, stable clip identifier
pub type ClipId = String;

/// Minimum effective duration a trim may leave behind (seconds)
pub const MIN_EFFECTIVE_DURATION: Seconds = 0.1;

/// Default audio gain multiplier
pub const DEFAULT_AUDIO_GAIN: f64 = 1.0;

/// Generation status of a clip. Drives visual state only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipStatus {
    #[default]
    Pending,
    Generating,
    Complete,
    Failed,
}

fn default_audio_gain() -> f64 {
    DEFAULT_AUDIO_GAIN
}

fn default_av_linked() -> bool {
    true
}

/// A clip on the single video lane, with an independently trimmable audio lane.
///
/// Key concepts:
/// - **Video trims** (`trim_start`, `trim_end`): seconds cut from the head/tail
/// - **Audio trims** (`audio_trim_start`, `audio_trim_end`): inherit the video
///   trims until set, which is what makes L-cuts and J-cuts possible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineClip {
    pub id: ClipId,
    /// Informational; actual order is slice order
    #[serde(default)]
    pub order_index: usize,
    /// Authored length of the source media in seconds
    pub duration: Seconds,
    #[serde(default)]
    pub trim_start: Seconds,
    #[serde(default)]
    pub trim_end: Seconds,
    #[serde(default)]
    pub status: ClipStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_duration: Option<Seconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_trim_start: Option<Seconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_trim_end: Option<Seconds>,
    #[serde(default = "default_audio_gain")]
    pub audio_gain: f64,
    /// Advisory link flag. Recorded and displayed, never enforced.
    #[serde(default = "default_av_linked")]
    pub av_linked: bool,
}

impl TimelineClip {
    /// Create an untrimmed, complete clip with default audio settings.
    pub fn new(id: impl Into<ClipId>, duration: Seconds) -> Self {
        Self {
            id: id.into(),
            order_index: 0,
            duration,
            trim_start: 0.0,
            trim_end: 0.0,
            status: ClipStatus::Complete,
            audio_url: None,
            audio_duration: None,
            audio_trim_start: None,
            audio_trim_end: None,
            audio_gain: DEFAULT_AUDIO_GAIN,
            av_linked: true,
        }
    }

    /// Builder-style video trims
    pub fn with_trims(mut self, trim_start: Seconds, trim_end: Seconds) -> Self {
        self.trim_start = trim_start;
        self.trim_end = trim_end;
        self
    }

    /// Builder-style detached audio trims
    pub fn with_audio_trims(mut self, audio_trim_start: Seconds, audio_trim_end: Seconds) -> Self {
        self.audio_trim_start = Some(audio_trim_start);
        self.audio_trim_end = Some(audio_trim_end);
        self
    }

    /// Builder-style audio source length
    pub fn with_audio_duration(mut self, audio_duration: Seconds) -> Self {
        self.audio_duration = Some(audio_duration);
        self
    }

    /// Visible length on the timeline: `duration - trim_start - trim_end`.
    ///
    /// Malformed trims are clamped to zero rather than producing a negative
    /// length.
    pub fn effective_duration(&self) -> Seconds {
        let effective = self.duration - self.trim_start - self.trim_end;
        if effective < 0.0 {
            log::warn!(
                "clip {} has negative effective duration ({:.3}s), clamping to 0",
                self.id,
                effective
            );
            return 0.0;
        }
        effective
    }

    /// Check whether the video trims satisfy the data-model invariant
    pub fn has_valid_trims(&self) -> bool {
        self.trim_start >= 0.0
            && self.trim_end >= 0.0
            && self.trim_start + self.trim_end <= self.duration - MIN_EFFECTIVE_DURATION + 1e-9
    }
}

/// Partial update requested by the engine. Only `Some` fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_start: Option<Seconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_end: Option<Seconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_trim_start: Option<Seconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_trim_end: Option<Seconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_gain: Option<f64>,
}

impl ClipUpdate {
    pub fn video_trim(trim_start: Seconds, trim_end: Seconds) -> Self {
        Self {
            trim_start: Some(trim_start),
            trim_end: Some(trim_end),
            ..Self::default()
        }
    }

    pub fn audio_trim(audio_trim_start: Seconds, audio_trim_end: Seconds) -> Self {
        Self {
            audio_trim_start: Some(audio_trim_start),
            audio_trim_end: Some(audio_trim_end),
            ..Self::default()
        }
    }

    pub fn audio_gain(gain: f64) -> Self {
        Self {
            audio_gain: Some(gain),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this update to a clip. Used by hosts and tests that hold the
    /// authoritative clip array.
    pub fn apply_to(&self, clip: &mut TimelineClip) {
        if let Some(v) = self.trim_start {
            clip.trim_start = v;
        }
        if let Some(v) = self.trim_end {
            clip.trim_end = v;
        }
        if let Some(v) = self.audio_trim_start {
            clip.audio_trim_start = Some(v);
        }
        if let Some(v) = self.audio_trim_end {
            clip.audio_trim_end = Some(v);
        }
        if let Some(v) = self.audio_gain {
            clip.audio_gain = v;
        }
    }
}
