mod csv;
mod json;
mod text;

use serde::Serialize;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One point of a frequency response
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponsePoint {
    pub frequency: f32,
    pub magnitude_db: f64,
    pub phase_degrees: f64,
}

pub trait Formatter: Send {
    fn format(&self, point: &ResponsePoint) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Log-spaced frequencies from `start` to `end` Hz inclusive
pub fn log_frequencies(start: f32, end: f32, points: usize) -> Vec<f32> {
    if points < 2 {
        return vec![start];
    }
    let ratio = (end / start).ln() / (points - 1) as f32;
    (0..points)
        .map(|i| start * (ratio * i as f32).exp())
        .collect()
}
