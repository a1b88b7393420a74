/// Convert a level in decibels to a linear amplitude
pub fn decibels_to_amplitude(db: f32) -> f32 {
    10f32.powf(0.05 * db)
}

/// Convert a linear amplitude to decibels
pub fn amplitude_to_decibels(amplitude: f32) -> f32 {
    20.0 * amplitude.log10()
}

/// RMS level of a buffer
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|x| x * x).sum::<f32>() / samples.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decibel_conversions() {
        assert!((decibels_to_amplitude(0.0) - 1.0).abs() < 1e-6);
        assert!((decibels_to_amplitude(-20.0) - 0.1).abs() < 1e-6);
        assert!((amplitude_to_decibels(0.5) + 6.0206).abs() < 1e-3);
        assert!((amplitude_to_decibels(decibels_to_amplitude(-37.5)) + 37.5).abs() < 1e-3);
    }

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-6);
        assert!((rms(&[3.0, 4.0]) - (12.5f32).sqrt()).abs() < 1e-6);
    }
}
