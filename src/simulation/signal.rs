use std::f32::consts::PI;
use std::f64::consts::TAU;

/// Test signal shapes
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Sine,
    Impulse,
    Noise,
    Sweep,
}

/// Sine tone of `amplitude` at `frequency` Hz
pub fn generate_sine(frequency: f32, amplitude: f32, num_samples: usize, sample_rate: f32) -> Vec<f32> {
    let step = TAU * frequency as f64 / sample_rate as f64;
    (0..num_samples)
        .map(|i| amplitude * (step * i as f64).sin() as f32)
        .collect()
}

/// Unit impulse at sample 0
pub fn generate_impulse(num_samples: usize) -> Vec<f32> {
    let mut samples = vec![0.0; num_samples];
    if let Some(first) = samples.first_mut() {
        *first = 1.0;
    }
    samples
}

/// Exponential sine sweep from `start` to `end` Hz over the whole buffer
pub fn generate_sweep(
    start: f32,
    end: f32,
    amplitude: f32,
    num_samples: usize,
    sample_rate: f32,
) -> Vec<f32> {
    let duration = num_samples as f32 / sample_rate;
    let k = (end / start).ln();
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let phase = 2.0 * PI * start * duration / k * ((t / duration * k).exp() - 1.0);
            amplitude * phase.sin()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_peak() {
        let s = generate_sine(1000.0, 0.5, 480, 48000.0);
        let peak = s.iter().fold(0.0f32, |m, &x| m.max(x.abs()));
        assert!((peak - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_impulse() {
        let s = generate_impulse(4);
        assert_eq!(s, vec![1.0, 0.0, 0.0, 0.0]);
        assert!(generate_impulse(0).is_empty());
    }

    #[test]
    fn test_sweep_starts_at_zero() {
        let s = generate_sweep(20.0, 20000.0, 1.0, 48000, 48000.0);
        assert_eq!(s.len(), 48000);
        assert!(s[0].abs() < 1e-6);
        assert!(s.iter().all(|x| x.abs() <= 1.0));
    }
}
