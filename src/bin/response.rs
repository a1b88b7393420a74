use anyhow::{Context, Result};
use clap::Parser;

use multimode::config::{BandwidthMode, FilterMode, FilterParams, FilterType, Frequency};
use multimode::output::{OutputFormat, ResponsePoint, create_formatter, log_frequencies};
use multimode::signal_processing::MultimodeFilter;

#[derive(Parser, Debug)]
#[command(name = "response")]
#[command(about = "Print the magnitude response of a multimode filter", long_about = None)]
struct Args {
    /// Prototype family
    #[arg(short = 't', long, value_enum, default_value = "butterworth")]
    filter_type: FilterType,

    /// Response mode
    #[arg(short, long, value_enum, default_value = "lowpass")]
    mode: FilterMode,

    /// Pole count
    #[arg(short, long, default_value_t = 4)]
    poles: usize,

    /// Corner or center frequency (e.g. "1000", "1.5khz")
    #[arg(short, long, default_value = "1khz")]
    frequency: Frequency,

    /// Q (lowpass/highpass) or bandwidth (band modes), 0.0-1.0
    #[arg(short, long, default_value_t = 0.0)]
    qbw: f32,

    /// Bandwidth interpretation for band modes
    #[arg(short, long, value_enum, default_value = "linear")]
    bandwidth_mode: BandwidthMode,

    /// Sample rate in Hz
    #[arg(short, long, default_value_t = 48000.0)]
    sample_rate: f32,

    /// Lowest frequency of the grid
    #[arg(long, default_value = "20")]
    start: Frequency,

    /// Highest frequency of the grid
    #[arg(long, default_value = "20khz")]
    end: Frequency,

    /// Number of log-spaced points
    #[arg(short = 'n', long, default_value_t = 31)]
    points: usize,

    /// Output format: text, csv, json
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    format: OutputFormat,

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

    let params = FilterParams::new(
        args.sample_rate,
        args.filter_type,
        args.poles,
        args.mode,
        args.frequency.as_hz(),
        args.qbw,
        args.bandwidth_mode,
    );
    let filter = MultimodeFilter::with_params(params).context("Invalid filter parameters")?;

    let end = args.end.as_hz().min(0.5 * args.sample_rate);
    if args.start.as_hz() >= end {
        anyhow::bail!("Start frequency must be below {:.1} Hz", end);
    }

    log::info!(
        "{} sections, output gain {:.6}, stable: {}",
        filter.section_count(),
        filter.output_gain(),
        filter.is_stable()
    );

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    for frequency in log_frequencies(args.start.as_hz(), end, args.points) {
        let h = filter.frequency_response(frequency);
        let point = ResponsePoint {
            frequency,
            magnitude_db: 20.0 * h.norm().log10(),
            phase_degrees: h.arg().to_degrees(),
        };
        println!("{}", formatter.format(&point));
    }
    Ok(())
}
