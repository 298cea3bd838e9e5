//! Per-clip audio gain.

/// Lowest gain multiplier (silence)
pub const MIN_GAIN: f64 = 0.0;
/// Highest gain multiplier (+6 dB)
pub const MAX_GAIN: f64 = 2.0;

/// Clamp a requested gain into `[0, 2]`. Non-finite input resets to unity.
pub fn clamp_gain(gain: f64) -> f64 {
    if !gain.is_finite() {
        log::warn!("non-finite audio gain {}, resetting to 1.0", gain);
        return 1.0;
    }
    gain.clamp(MIN_GAIN, MAX_GAIN)
}

/// Gain expressed in decibels, for display. Silence maps to negative infinity.
pub fn gain_to_db(gain: f64) -> f64 {
    20.0 * clamp_gain(gain).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_gain() {
        assert_eq!(clamp_gain(1.0), 1.0);
        assert_eq!(clamp_gain(-0.5), 0.0);
        assert_eq!(clamp_gain(3.0), 2.0);
        assert_eq!(clamp_gain(f64::NAN), 1.0);
    }

    #[test]
    fn test_gain_to_db() {
        assert_eq!(gain_to_db(1.0), 0.0);
        assert!((gain_to_db(2.0) - 6.0206).abs() < 1e-3);
        assert_eq!(gain_to_db(0.0), f64::NEG_INFINITY);
    }
}
