mod csv;
mod json;
mod text;

use chrono::Utc;
use serde::Deserialize;

use crate::record::Fix;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

pub trait Formatter: Send {
    fn format(&self, fix: &Fix) -> String;

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

/// Host receive time, attached to JSON and CSV rows.
pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
