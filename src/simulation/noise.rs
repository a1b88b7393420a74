use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Gaussian white noise with standard deviation `std_dev`
pub fn generate_white_noise(num_samples: usize, std_dev: f32, seed: Option<u64>) -> Vec<f32> {
    let mut rng = create_rng(seed);
    let normal = Normal::new(0.0, std_dev.max(0.0) as f64).unwrap();
    (0..num_samples)
        .map(|_| normal.sample(&mut rng) as f32)
        .collect()
}

/// Uniform noise in `-amplitude..amplitude`
pub fn generate_uniform_noise(num_samples: usize, amplitude: f32, seed: Option<u64>) -> Vec<f32> {
    let mut rng = create_rng(seed);
    (0..num_samples)
        .map(|_| amplitude * (2.0 * rng.random::<f32>() - 1.0))
        .collect()
}

pub fn signal_power(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|x| x * x).sum::<f32>() / signal.len() as f32
}

/// Add white noise at the given signal-to-noise ratio
pub fn add_white_noise(signal: &mut [f32], snr_db: f32, seed: Option<u64>) {
    let noise_power = signal_power(signal) / 10f32.powf(snr_db / 10.0);
    let noise = generate_white_noise(signal.len(), noise_power.sqrt(), seed);
    for (sample, n) in signal.iter_mut().zip(noise) {
        *sample += n;
    }
}
