//! Synthetic waveform peaks for clips without real peak data.
//!
//! Peaks are a pure function of `(clip_id, peak index, peak count)`: a string
//! hash of the clip id seeds a linear congruential generator, and the noise
//! is shaped by a slow sinusoidal envelope so the result reads as a
//! plausible waveform instead of static. The same id and width always give
//! bit-identical output across renders.

use std::f64::consts::PI;

/// Default horizontal pixels per rendered peak
pub const DEFAULT_PIXELS_PER_PEAK: f32 = 3.0;
/// Fewest peaks generated for any width
pub const DEFAULT_MIN_PEAKS: usize = 20;
/// Most peaks generated for any width
pub const DEFAULT_MAX_PEAKS: usize = 200;

const MIN_AMPLITUDE: f64 = 0.1;
const MAX_AMPLITUDE: f64 = 1.0;

/// Fold a clip id into a 32-bit seed (`seed = seed * 31 + unit`, wrapping).
///
/// Works on UTF-16 code units so ids hash the same as they do in a browser host.
pub fn seed_from_clip_id(clip_id: &str) -> i32 {
    clip_id.encode_utf16().fold(0i32, |seed, unit| {
        seed.wrapping_shl(5)
            .wrapping_sub(seed)
            .wrapping_add(i32::from(unit))
    })
}

/// LCG over the low 31 bits
#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    /// Negative seeds keep their two's-complement bits, which leaves the low
    /// 31 bits of every step equal to the signed recurrence.
    fn new(seed: i32) -> Self {
        Self {
            state: u64::from(seed as u32),
        }
    }

    /// Next value in `[0, 1)` with millesimal resolution
    fn next_unit(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(1_103_515_245)
            .wrapping_add(12_345)
            & 0x7fff_ffff;
        (self.state % 1000) as f64 / 1000.0
    }
}

/// How rendered width maps to a number of peaks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformShape {
    pub pixels_per_peak: f32,
    pub min_peaks: usize,
    pub max_peaks: usize,
}

impl Default for WaveformShape {
    fn default() -> Self {
        Self {
            pixels_per_peak: DEFAULT_PIXELS_PER_PEAK,
            min_peaks: DEFAULT_MIN_PEAKS,
            max_peaks: DEFAULT_MAX_PEAKS,
        }
    }
}

impl WaveformShape {
    /// Peak count for a rendered width, clamped to `[min_peaks, max_peaks]`
    pub fn peak_count(&self, width: f32) -> usize {
        let per_peak = if self.pixels_per_peak > 0.0 {
            self.pixels_per_peak
        } else {
            DEFAULT_PIXELS_PER_PEAK
        };
        let raw = if width.is_finite() && width > 0.0 {
            (width / per_peak).floor() as usize
        } else {
            0
        };
        raw.max(self.min_peaks).min(self.max_peaks.max(self.min_peaks))
    }

    /// Synthetic peaks for `clip_id` rendered at `width` pixels
    pub fn generate(&self, clip_id: &str, width: f32) -> Vec<f32> {
        synthesize(clip_id, self.peak_count(width))
    }

    /// Real peaks when the host supplied any, synthetic ones otherwise
    pub fn peaks_or_synthetic(&self, real: Option<&[f32]>, clip_id: &str, width: f32) -> Vec<f32> {
        match real {
            Some(peaks) if !peaks.is_empty() => peaks
                .iter()
                .map(|p| if p.is_finite() { p.abs().min(1.0) } else { 0.0 })
                .collect(),
            _ => self.generate(clip_id, width),
        }
    }
}

/// Synthetic peaks for `clip_id` at `width` with the default shape
pub fn generate_peaks(clip_id: &str, width: f32) -> Vec<f32> {
    WaveformShape::default().generate(clip_id, width)
}

/// Generate exactly `peak_count` amplitudes in `[0.1, 1.0]`.
pub fn synthesize(clip_id: &str, peak_count: usize) -> Vec<f32> {
    let seed = seed_from_clip_id(clip_id);
    let mut rng = Lcg::new(seed);
    // Per-clip phase shift so neighbouring clips do not share an envelope
    let phase_shift = f64::from(seed.unsigned_abs() % 628) / 100.0;

    let mut peaks = Vec::with_capacity(peak_count);
    let mut previous: Option<f64> = None;
    for i in 0..peak_count {
        let random = rng.next_unit();
        let phase = i as f64 / peak_count as f64;

        let envelope = 0.55
            + 0.3 * (phase * PI * 3.0 + phase_shift).sin()
            + 0.15 * (phase * PI * 11.0 + phase_shift * 0.5).sin();
        let base_amplitude = 0.35 + 0.65 * random;
        let raw = (base_amplitude * envelope).clamp(MIN_AMPLITUDE, MAX_AMPLITUDE);

        // One-pole smoothing against the previous peak
        let amplitude = match previous {
            Some(prev) => (prev * 0.45 + raw * 0.55).clamp(MIN_AMPLITUDE, MAX_AMPLITUDE),
            None => raw,
        };
        previous = Some(amplitude);
        peaks.push(amplitude as f32);
    }
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_matches_string_hash() {
        assert_eq!(seed_from_clip_id(""), 0);
        assert_eq!(seed_from_clip_id("a"), 97);
        // "ab" = 97 * 31 + 98
        assert_eq!(seed_from_clip_id("ab"), 3105);
        // Long ids wrap rather than overflow
        let long = "x".repeat(64);
        let _ = seed_from_clip_id(&long);
    }

    #[test]
    fn test_lcg_follows_signed_seed() {
        let seed = seed_from_clip_id("clip-1");
        assert_eq!(seed, -1_357_703_948);

        // (seed * 1103515245 + 12345) & 0x7fffffff over the signed seed
        let mut rng = Lcg::new(seed);
        assert_eq!(rng.next_unit(), 0.677);
        assert_eq!(rng.state, 70_939_677);

        let mut positive = Lcg::new(seed_from_clip_id("clip-42"));
        assert_eq!(positive.next_unit(), 0.72);
        assert_eq!(positive.state, 1_087_649_720);
    }

    #[test]
    fn test_peaks_deterministic() {
        let first = generate_peaks("clip-42", 300.0);
        let second = generate_peaks("clip-42", 300.0);
        assert_eq!(first.len(), 100);
        assert_eq!(first, second);
        let first_bits: Vec<u32> = first.iter().map(|p| p.to_bits()).collect();
        let second_bits: Vec<u32> = second.iter().map(|p| p.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_different_clips_differ() {
        assert_ne!(generate_peaks("clip-1", 300.0), generate_peaks("clip-2", 300.0));
    }

    #[test]
    fn test_amplitude_range() {
        for id in ["a", "clip-42", "\u{1F3AC}-shot", ""] {
            for amplitude in generate_peaks(id, 900.0) {
                assert!((0.1..=1.0).contains(&amplitude), "{} out of range", amplitude);
            }
        }
    }

    #[test]
    fn test_peak_count_clamped() {
        let shape = WaveformShape::default();
        assert_eq!(shape.peak_count(0.0), 20);
        assert_eq!(shape.peak_count(30.0), 20);
        assert_eq!(shape.peak_count(300.0), 100);
        assert_eq!(shape.peak_count(10_000.0), 200);
        assert_eq!(shape.peak_count(f32::NAN), 20);
    }

    #[test]
    fn test_real_peaks_preferred() {
        let shape = WaveformShape::default();
        let real = [0.2, -0.5, 1.5];
        assert_eq!(
            shape.peaks_or_synthetic(Some(&real[..]), "clip", 300.0),
            vec![0.2, 0.5, 1.0]
        );
        assert_eq!(
            shape.peaks_or_synthetic(Some(&[][..]), "clip", 300.0),
            shape.generate("clip", 300.0)
        );
    }
}
