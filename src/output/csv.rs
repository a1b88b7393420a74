use super::{Formatter, ResponsePoint};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, point: &ResponsePoint) -> String {
        format!(
            "{:.2},{:.4},{:.2}",
            point.frequency, point.magnitude_db, point.phase_degrees
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("frequency,magnitude_db,phase_degrees")
    }
}
