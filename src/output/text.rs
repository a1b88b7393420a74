use super::{Formatter, ResponsePoint};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, point: &ResponsePoint) -> String {
        if self.verbose {
            format!(
                "{:>9.1} Hz: {:>8.2} dB (phase: {:>7.1}°)",
                point.frequency, point.magnitude_db, point.phase_degrees
            )
        } else {
            format!("{:>9.1} Hz: {:>8.2} dB", point.frequency, point.magnitude_db)
        }
    }
}
