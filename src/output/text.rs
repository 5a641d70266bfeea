use super::{Formatter, iso8601_timestamp};
use crate::record::{CoordinateFix, Fix};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

fn coordinate(c: &CoordinateFix, degree_width: usize) -> String {
    let hemisphere = c.hemisphere.as_char().unwrap_or('-');
    format!(
        "{} {:0w$}°{:02}'{:02}\"",
        hemisphere,
        c.degree,
        c.minute,
        c.second,
        w = degree_width
    )
}

fn decimal(c: &CoordinateFix) -> String {
    c.to_degrees()
        .map_or("-".to_string(), |d| format!("{:.5}", d))
}

impl Formatter for TextFormatter {
    fn format(&self, fix: &Fix) -> String {
        let t = &fix.time;
        let p = &fix.position;
        let base = format!(
            "{:02}-{:02}-{:02} {:02}:{:02}:{:02}  {}  {}",
            t.year,
            t.month,
            t.day,
            t.hour,
            t.minute,
            t.second,
            coordinate(&p.latitude, 2),
            coordinate(&p.longitude, 3)
        );

        if self.verbose {
            format!(
                "{} [lat: {}, lon: {}, rx: {}]",
                base,
                decimal(&p.latitude),
                decimal(&p.longitude),
                iso8601_timestamp()
            )
        } else {
            base
        }
    }
}
