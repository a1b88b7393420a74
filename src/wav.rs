use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Interleaved audio with its channel layout
#[derive(Debug, Clone, PartialEq)]
pub struct WavAudio {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl WavAudio {
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Samples of one channel, de-interleaved
    pub fn channel(&self, index: usize) -> Vec<f32> {
        self.samples
            .iter()
            .skip(index)
            .step_by(self.channels.max(1) as usize)
            .copied()
            .collect()
    }

    /// Apply `f` to each channel's samples in place
    pub fn map_channels<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut [f32]),
    {
        let channels = self.channels.max(1) as usize;
        for index in 0..channels {
            let mut data = self.channel(index);
            f(index, &mut data);
            for (frame, sample) in data.into_iter().enumerate() {
                self.samples[frame * channels + index] = sample;
            }
        }
    }
}

/// Read a WAV file of any channel count, scaling integer samples to ±1
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<WavAudio, hound::Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    log::debug!(
        "Read {} samples, {} channels at {} Hz",
        samples.len(),
        spec.channels,
        spec.sample_rate
    );
    Ok(WavAudio::new(samples, spec.channels, spec.sample_rate))
}

/// Write interleaved samples as 32-bit float WAV
pub fn save_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    channels: u16,
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}
