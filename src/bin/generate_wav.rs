use anyhow::{Context, Result};
use clap::Parser;
use multimode::save_wav;
use multimode::simulation::{
    SignalKind, add_white_noise, generate_impulse, generate_sine, generate_sweep,
    generate_white_noise,
};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_wav")]
#[command(about = "Generate test signal WAV files for filter measurements")]
struct Args {
    /// TOML signal configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Signal kind (CLI override)
    #[arg(short, long, value_enum)]
    kind: Option<SignalKind>,

    /// Sine frequencies: comma-separated (e.g., "100,1000") or range (e.g., "100-1000:100")
    #[arg(short, long, default_value = "1000")]
    frequencies: String,

    /// Sweep start and end in Hz
    #[arg(long, num_args = 2, default_values_t = [20.0, 20000.0])]
    sweep: Vec<f32>,

    /// Peak amplitude (standard deviation for noise)
    #[arg(short, long)]
    amplitude: Option<f32>,

    /// Added white noise SNR in dB (CLI override)
    #[arg(long)]
    snr: Option<f32>,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f32,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 48000)]
    sample_rate: u32,

    /// Output filename prefix
    #[arg(long, default_value = "signal")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    kind: Option<SignalKind>,
    amplitude: Option<f32>,
    noise: Option<NoiseSection>,
}

#[derive(Debug, Deserialize)]
struct NoiseSection {
    snr_db: f32,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    kind: String,
    frequency: Option<f32>,
    seed: Option<u64>,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    sample_rate: u32,
    duration: f32,
    snr_db: Option<f32>,
    files: Vec<ManifestEntry>,
}

fn parse_frequencies(s: &str) -> Result<Vec<f32>> {
    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let step: f32 = parts[1].parse().context("Invalid step value")?;
        if step <= 0.0 {
            anyhow::bail!("Step must be positive");
        }
        let range_parts: Vec<&str> = parts[0].split('-').collect();
        if range_parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let start: f32 = range_parts[0].parse().context("Invalid start value")?;
        let end: f32 = range_parts[1].parse().context("Invalid end value")?;

        let mut frequencies = Vec::new();
        let mut f = start;
        while f <= end {
            frequencies.push(f);
            f += step;
        }
        Ok(frequencies)
    } else {
        s.split(',')
            .map(|p| p.trim().parse::<f32>().context("Invalid frequency value"))
            .collect()
    }
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };

    let kind = args.kind.or(toml_config.kind).unwrap_or(SignalKind::Sine);
    let amplitude = args.amplitude.or(toml_config.amplitude).unwrap_or(0.5);
    let snr_db = args
        .snr
        .or(toml_config.noise.as_ref().map(|n| n.snr_db));
    let sample_rate = args.sample_rate as f32;
    let num_samples = (args.duration * sample_rate) as usize;

    // sines produce one file per frequency, everything else a single file
    let frequencies: Vec<Option<f32>> = match kind {
        SignalKind::Sine => parse_frequencies(&args.frequencies)?
            .into_iter()
            .map(Some)
            .collect(),
        _ => vec![None],
    };

    let mut manifest_entries = Vec::new();
    for (index, &frequency) in frequencies.iter().enumerate() {
        let seed = args.seed.map(|s| s + index as u64);
        let mut signal = match kind {
            SignalKind::Sine => generate_sine(
                frequency.unwrap_or(1000.0),
                amplitude,
                num_samples,
                sample_rate,
            ),
            SignalKind::Impulse => generate_impulse(num_samples),
            SignalKind::Noise => generate_white_noise(num_samples, amplitude, seed),
            SignalKind::Sweep => generate_sweep(
                args.sweep[0],
                args.sweep[1],
                amplitude,
                num_samples,
                sample_rate,
            ),
        };
        if let Some(snr) = snr_db {
            add_white_noise(&mut signal, snr, seed.map(|s| s ^ 0x5eed));
        }

        let kind_name = format!("{:?}", kind).to_lowercase();
        let filename = match frequency {
            Some(f) => format!("{}_{}_{:.0}hz.wav", args.prefix, kind_name, f),
            None => format!("{}_{}.wav", args.prefix, kind_name),
        };
        let filepath = args.output_dir.join(&filename);

        save_wav(&filepath, &signal, 1, args.sample_rate).context("Failed to write WAV file")?;
        log::info!("Wrote {}", filepath.display());

        manifest_entries.push(ManifestEntry {
            file: filename,
            kind: kind_name,
            frequency,
            seed,
        });
    }

    if args.manifest {
        let manifest = Manifest {
            sample_rate: args.sample_rate,
            duration: args.duration,
            snr_db,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} files in {}",
        frequencies.len(),
        args.output_dir.display()
    );
    Ok(())
}
