//! Best-effort media synchronization.
//! Works out which clip is active at the playhead and where its media
//! element should be seeked. The host owns decoding; this is only the target.

use serde::{Deserialize, Serialize};

use crate::core::clip::{ClipId, TimelineClip};
use crate::core::time::Seconds;
use crate::timeline::av_offset::audio_lane_placement;
use crate::timeline::sequence::clip_at_time;

/// Where the host's media elements should be for a timeline position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSyncTarget {
    pub clip_id: ClipId,
    pub clip_index: usize,
    /// Timeline position this target was computed for
    pub timeline_time: Seconds,
    /// Seek position inside the clip's video source
    pub video_time: Seconds,
    /// Seek position inside the clip's audio source
    pub audio_time: Seconds,
    /// Whether the clip's (possibly offset) audio lane covers this position
    pub audio_active: bool,
    pub audio_gain: f64,
}

/// Compute the media seek target for `time`, if any clip is under it.
///
/// The audio lane is shifted by the clip's audio offset on the timeline,
/// but its source position still moves in lockstep with the video source.
pub fn media_target_at(clips: &[TimelineClip], time: Seconds) -> Option<MediaSyncTarget> {
    let hit = clip_at_time(clips, time)?;
    let clip = hit.clip;
    let video_time = clip.trim_start + hit.offset;

    let lane = audio_lane_placement(clip, hit.clip_start);
    let audio_time = video_time;
    // Parked on the sequence end still counts as inside the last lane
    let parked_at_end = hit.offset >= clip.effective_duration();
    let audio_active =
        lane.covers(time) || (parked_at_end && lane.width > 0.0 && time == lane.end());

    Some(MediaSyncTarget {
        clip_id: clip.id.clone(),
        clip_index: hit.index,
        timeline_time: time,
        video_time,
        audio_time,
        audio_active,
        audio_gain: clip.audio_gain,
    })
}
