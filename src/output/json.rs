use super::{Formatter, ResponsePoint};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, point: &ResponsePoint) -> String {
        // plain data: serialization cannot fail
        serde_json::to_string(point).unwrap_or_default()
    }
}
