pub mod gain;
pub mod waveform;

pub use gain::clamp_gain;
pub use waveform::{generate_peaks, WaveformShape};
