use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use multimode::config::BankConfig;
use multimode::signal_processing::FilterBank;
use multimode::signal_processing::math::{amplitude_to_decibels, rms};
use multimode::{read_wav, save_wav};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Mix {
    All,
    Odd,
    Even,
    /// Odd mix left, even mix right
    Stereo,
}

#[derive(Parser, Debug)]
#[command(name = "filter_bank")]
#[command(about = "Run a WAV file through a bank of multimode filters", long_about = None)]
struct Args {
    /// Input WAV file (channels are summed to mono)
    input: PathBuf,

    /// Output WAV file (32-bit float)
    output: PathBuf,

    /// TOML bank layout; the fixed 14-band bank when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Band levels, comma-separated 0.0-1.0, overriding the layout
    #[arg(short, long, value_delimiter = ',')]
    levels: Vec<f32>,

    /// Which mix to write
    #[arg(short, long, value_enum, default_value = "all")]
    mix: Mix,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
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

    let audio = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let sample_rate = audio.sample_rate as f32;

    let mut bank = match args.config {
        Some(ref path) => {
            let content = fs::read_to_string(path).context("Failed to read bank file")?;
            let config = BankConfig::from_toml(&content).context("Failed to parse bank file")?;
            FilterBank::from_config(&config, sample_rate)?
        }
        None => FilterBank::fixed(sample_rate)?,
    };
    if args.levels.len() > bank.len() {
        log::warn!(
            "{} levels given for {} bands; extra levels ignored",
            args.levels.len(),
            bank.len()
        );
    }
    for (index, &level) in args.levels.iter().enumerate().take(bank.len()) {
        bank.set_level(index, level)?;
    }
    log::info!("Filter bank: {} bands", bank.len());

    let channels = audio.channels.max(1) as usize;
    let stereo = matches!(args.mix, Mix::Stereo);
    let mut samples = Vec::with_capacity(audio.frames() * if stereo { 2 } else { 1 });
    for frame in audio.samples.chunks_exact(channels) {
        let input = frame.iter().sum::<f32>() / channels as f32;
        let out = bank.process(input);
        match args.mix {
            Mix::All => samples.push(out.all),
            Mix::Odd => samples.push(out.odd),
            Mix::Even => samples.push(out.even),
            Mix::Stereo => {
                samples.push(out.odd);
                samples.push(out.even);
            }
        }
    }

    let out_channels = if stereo { 2 } else { 1 };
    save_wav(&args.output, &samples, out_channels, audio.sample_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "{} frames, output level {:.2} dB",
        samples.len() / out_channels as usize,
        amplitude_to_decibels(rms(&samples))
    );
    Ok(())
}
