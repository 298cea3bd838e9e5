//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::waveform::{WaveformShape, DEFAULT_MAX_PEAKS, DEFAULT_MIN_PEAKS, DEFAULT_PIXELS_PER_PEAK};
use crate::core::clip::TimelineClip;
use crate::core::time::DEFAULT_FPS;
use crate::error::{EngineError, Result};
use crate::interaction::scrub::{
    ScrubController, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_SNAP_THRESHOLD_PX, DEFAULT_ZOOM,
};

/// Tunables for the timeline engine. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub fps: u32,
    pub snap_threshold_px: f64,
    /// Initial zoom in pixels per second
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub pixels_per_peak: f32,
    pub min_peaks: usize,
    pub max_peaks: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            snap_threshold_px: DEFAULT_SNAP_THRESHOLD_PX,
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            pixels_per_peak: DEFAULT_PIXELS_PER_PEAK,
            min_peaks: DEFAULT_MIN_PEAKS,
            max_peaks: DEFAULT_MAX_PEAKS,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(EngineError::InvalidConfig("fps must be at least 1".into()));
        }
        if !(self.snap_threshold_px >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "snapThresholdPx must be non-negative, got {}",
                self.snap_threshold_px
            )));
        }
        if !(self.min_zoom > 0.0) || !(self.zoom > 0.0) {
            return Err(EngineError::InvalidConfig("zoom values must be positive".into()));
        }
        if self.min_zoom > self.max_zoom {
            return Err(EngineError::InvalidConfig(format!(
                "minZoom {} exceeds maxZoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.pixels_per_peak > 0.0) {
            return Err(EngineError::InvalidConfig("pixelsPerPeak must be positive".into()));
        }
        if self.min_peaks > self.max_peaks {
            return Err(EngineError::InvalidConfig(format!(
                "minPeaks {} exceeds maxPeaks {}",
                self.min_peaks, self.max_peaks
            )));
        }
        Ok(())
    }

    /// Scrub controller initialised from this config
    pub fn scrub_controller(&self) -> ScrubController {
        ScrubController::new(self.zoom, self.min_zoom, self.max_zoom, self.snap_threshold_px)
    }

    pub fn waveform_shape(&self) -> WaveformShape {
        WaveformShape {
            pixels_per_peak: self.pixels_per_peak,
            min_peaks: self.min_peaks,
            max_peaks: self.max_peaks,
        }
    }
}

/// Load a host clip array from a JSON file
pub fn load_clips(path: impl AsRef<Path>) -> Result<Vec<TimelineClip>> {
    let json = read_to_string(path.as_ref())?;
    let clips: Vec<TimelineClip> = serde_json::from_str(&json)?;
    for clip in clips.iter().filter(|c| !c.has_valid_trims()) {
        log::warn!(
            "clip {} has trims outside its duration ({:.3} + {:.3} of {:.3}s)",
            clip.id,
            clip.trim_start,
            clip.trim_end,
            clip.duration
        );
    }
    Ok(clips)
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}
