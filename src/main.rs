use anyhow::{Context, Result};
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use multimode::config::{BandwidthMode, FilterConfig, FilterMode, FilterType, Frequency};
use multimode::signal_processing::math::{amplitude_to_decibels, rms};
use multimode::signal_processing::{Filter, MultimodeFilter};
use multimode::{read_wav, save_wav};

/// Block length for level statistics
const LEVEL_BLOCK: usize = 1024;

#[derive(Parser, Debug)]
#[command(name = "multimode")]
#[command(about = "Filter a WAV file through a Butterworth/Chebyshev multimode filter", long_about = None)]
struct Args {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file (32-bit float)
    output: PathBuf,

    /// TOML filter description; command line options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prototype family
    #[arg(short = 't', long, value_enum)]
    filter_type: Option<FilterType>,

    /// Response mode
    #[arg(short, long, value_enum)]
    mode: Option<FilterMode>,

    /// Pole count
    #[arg(short, long)]
    poles: Option<usize>,

    /// Corner or center frequency (e.g. "1000", "1.5khz")
    #[arg(short, long)]
    frequency: Option<Frequency>,

    /// Q (lowpass/highpass) or bandwidth (band modes), 0.0-1.0
    #[arg(short, long)]
    qbw: Option<f32>,

    /// Bandwidth interpretation for band modes
    #[arg(short, long, value_enum)]
    bandwidth_mode: Option<BandwidthMode>,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f32,
    std_dev: f32,
    min: f32,
    max: f32,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f32>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChannelReport {
    channel: usize,
    input_rms_db: f32,
    output_rms_db: f32,
    block_rms_db: Option<StatsSummary>,
}

fn load_config(args: &Args) -> Result<FilterConfig> {
    let mut config = match args.config {
        Some(ref path) => {
            let content = fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        }
        None => FilterConfig::default(),
    };

    if let Some(filter_type) = args.filter_type {
        config.filter_type = filter_type;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(poles) = args.poles {
        config.poles = poles;
    }
    if let Some(frequency) = args.frequency {
        config.frequency = frequency;
    }
    if let Some(qbw) = args.qbw {
        config.qbw = qbw;
    }
    if let Some(bandwidth_mode) = args.bandwidth_mode {
        config.bandwidth_mode = bandwidth_mode;
    }
    Ok(config)
}

fn block_levels(samples: &[f32]) -> Stats<f32> {
    let mut stats = Stats::new();
    for block in samples.chunks(LEVEL_BLOCK) {
        let level = rms(block);
        if level > 0.0 {
            stats.update(amplitude_to_decibels(level));
        }
    }
    stats
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = load_config(&args)?;
    let mut audio = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let params = config.to_params(audio.sample_rate as f32);
    let filter = MultimodeFilter::with_params(params).context("Invalid filter parameters")?;

    log::info!(
        "{:?} {:?}, {} poles at {} ({} sections, gain {:.6})",
        params.filter_type,
        params.mode,
        params.poles,
        config.frequency,
        filter.section_count(),
        filter.output_gain()
    );

    let mut reports = Vec::with_capacity(audio.channels as usize);
    audio.map_channels(|channel, data| {
        let input_rms_db = amplitude_to_decibels(rms(data));
        let mut filter = filter.clone();
        filter.process_buffer(data);
        reports.push(ChannelReport {
            channel,
            input_rms_db,
            output_rms_db: amplitude_to_decibels(rms(data)),
            block_rms_db: StatsSummary::from_stats(&block_levels(data)),
        });
    });

    save_wav(&args.output, &audio.samples, audio.channels, audio.sample_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialize report")?
        );
    } else {
        for report in &reports {
            print!(
                "Channel {}: in {:>7.2} dB, out {:>7.2} dB",
                report.channel, report.input_rms_db, report.output_rms_db
            );
            match report.block_rms_db {
                Some(ref s) => println!(
                    " (blocks: mean {:.2}, std {:.2}, min {:.2}, max {:.2} dB)",
                    s.mean, s.std_dev, s.min, s.max
                ),
                None => println!(" (silent)"),
            }
        }
    }
    log::info!("Wrote {} frames to {}", audio.frames(), args.output.display());
    Ok(())
}
