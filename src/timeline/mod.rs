pub mod av_offset;
pub mod sequence;
pub mod trim;

pub use av_offset::{
    audio_lane_placement, audio_offset, classify_cut, resolve_audio_bounds, AudioBounds,
    AudioLanePlacement, CutKind,
};
pub use sequence::{
    clip_at_time, clip_edges, clip_start_time, detect_gaps, effective_duration, total_duration,
    ClipHit, Gap, SequenceLayout,
};
pub use trim::{apply_trim, TrimHandle, TrimLane, TrimResult};
