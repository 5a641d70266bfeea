use serde::Serialize;

use super::{Formatter, iso8601_timestamp};
use crate::record::{CoordinateFix, Fix};

pub struct JsonFormatter;

#[derive(Serialize)]
struct CoordinateRow {
    hemisphere: Option<char>,
    degree: Option<u8>,
    minute: Option<u8>,
    second: Option<u8>,
    decimal: Option<f64>,
}

impl From<&CoordinateFix> for CoordinateRow {
    fn from(c: &CoordinateFix) -> Self {
        Self {
            hemisphere: c.hemisphere.as_char(),
            degree: c.degree.value(),
            minute: c.minute.value(),
            second: c.second.value(),
            decimal: c.to_degrees(),
        }
    }
}

#[derive(Serialize)]
struct FixRow {
    ts: String,
    utc: Option<String>,
    year: Option<u8>,
    month: Option<u8>,
    day: Option<u8>,
    hour: Option<u8>,
    minute: Option<u8>,
    second: Option<u8>,
    latitude: CoordinateRow,
    longitude: CoordinateRow,
}

impl Formatter for JsonFormatter {
    fn format(&self, fix: &Fix) -> String {
        let t = &fix.time;
        let row = FixRow {
            ts: iso8601_timestamp(),
            utc: t
                .to_datetime()
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            year: t.year.value(),
            month: t.month.value(),
            day: t.day.value(),
            hour: t.hour.value(),
            minute: t.minute.value(),
            second: t.second.value(),
            latitude: (&fix.position.latitude).into(),
            longitude: (&fix.position.longitude).into(),
        };
        serde_json::to_string(&row).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
