use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::INVALID;

/// An 8-bit decoded value, or the `INVALID` sentinel (0xFE).
///
/// A field that was missing on the wire, or could not be parsed, decodes to
/// `INVALID`. No range checking happens beyond that, so a month of 13 is a
/// valid `FixValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixValue(u8);

impl FixValue {
    pub const INVALID: FixValue = FixValue(INVALID);

    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw byte, `0xFE` when invalid
    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != INVALID
    }

    pub fn value(self) -> Option<u8> {
        self.is_valid().then_some(self.0)
    }

    /// Interpret as a character code (hemisphere fields).
    pub fn as_char(self) -> Option<char> {
        self.value().map(char::from)
    }
}

impl Default for FixValue {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<Option<u8>> for FixValue {
    fn from(value: Option<u8>) -> Self {
        value.map_or(Self::INVALID, Self)
    }
}

/// Valid values format like the underlying integer, flags included, so
/// `{:02}` zero-pads. Invalid values print as dashes filling the width.
impl fmt::Display for FixValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => fmt::Display::fmt(&v, f),
            None => f.write_str(&"-".repeat(f.width().unwrap_or(2))),
        }
    }
}

/// UTC date and time carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeFix {
    /// Two-digit year
    pub year: FixValue,
    pub month: FixValue,
    pub day: FixValue,
    pub hour: FixValue,
    pub minute: FixValue,
    pub second: FixValue,
}

impl TimeFix {
    /// Every sub-field invalid.
    pub const INVALID: TimeFix = TimeFix {
        year: FixValue::INVALID,
        month: FixValue::INVALID,
        day: FixValue::INVALID,
        hour: FixValue::INVALID,
        minute: FixValue::INVALID,
        second: FixValue::INVALID,
    };

    pub fn is_complete(&self) -> bool {
        [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ]
        .iter()
        .all(|v| v.is_valid())
    }

    /// Calendar timestamp, with the two-digit year taken as 20yy.
    ///
    /// Returns `None` if any part is invalid or the values do not form a
    /// real date and time.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            2000 + self.year.value()? as i32,
            self.month.value()? as u32,
            self.day.value()? as u32,
        )?;
        date.and_hms_opt(
            self.hour.value()? as u32,
            self.minute.value()? as u32,
            self.second.value()? as u32,
        )
    }
}

/// One coordinate: hemisphere character plus degree/minute/second.
///
/// `second` is derived from the transmitted thousandths of a minute and is
/// truncated, not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateFix {
    pub hemisphere: FixValue,
    pub degree: FixValue,
    pub minute: FixValue,
    pub second: FixValue,
}

impl CoordinateFix {
    pub const INVALID: CoordinateFix = CoordinateFix {
        hemisphere: FixValue::INVALID,
        degree: FixValue::INVALID,
        minute: FixValue::INVALID,
        second: FixValue::INVALID,
    };

    pub fn is_complete(&self) -> bool {
        self.hemisphere.is_valid()
            && self.degree.is_valid()
            && self.minute.is_valid()
            && self.second.is_valid()
    }

    /// Signed decimal degrees, negative for the southern and western
    /// hemispheres. `None` if any part is invalid or the hemisphere is not
    /// one of `N`, `S`, `E`, `W`.
    pub fn to_degrees(&self) -> Option<f64> {
        let sign = match self.hemisphere.as_char()? {
            'N' | 'E' => 1.0,
            'S' | 'W' => -1.0,
            _ => return None,
        };
        let degrees = self.degree.value()? as f64
            + self.minute.value()? as f64 / 60.0
            + self.second.value()? as f64 / 3600.0;
        Some(sign * degrees)
    }
}

/// Latitude and longitude of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpsFix {
    pub latitude: CoordinateFix,
    pub longitude: CoordinateFix,
}

impl GpsFix {
    pub const INVALID: GpsFix = GpsFix {
        latitude: CoordinateFix::INVALID,
        longitude: CoordinateFix::INVALID,
    };
}

/// Everything decoded from one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fix {
    pub time: TimeFix,
    pub position: GpsFix,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coord(hemisphere: u8, degree: u8, minute: u8, second: u8) -> CoordinateFix {
        CoordinateFix {
            hemisphere: FixValue::new(hemisphere),
            degree: FixValue::new(degree),
            minute: FixValue::new(minute),
            second: FixValue::new(second),
        }
    }

    #[test]
    fn test_default_is_invalid() {
        assert_eq!(Fix::default().time, TimeFix::INVALID);
        assert_eq!(Fix::default().position, GpsFix::INVALID);
        assert_eq!(FixValue::default().raw(), 0xFE);
    }

    #[test]
    fn test_fix_value_display() {
        assert_eq!(format!("{}", FixValue::new(7)), "7");
        assert_eq!(format!("{:02}", FixValue::new(7)), "07");
        assert_eq!(format!("{:2}", FixValue::new(7)), " 7");
        assert_eq!(format!("{:03}", FixValue::new(11)), "011");
        assert_eq!(format!("{:03}", FixValue::INVALID), "---");
        assert_eq!(format!("{}", FixValue::INVALID), "--");
    }

    #[test]
    fn test_to_datetime() {
        let time = TimeFix {
            year: FixValue::new(0),
            month: FixValue::new(6),
            day: FixValue::new(7),
            hour: FixValue::new(20),
            minute: FixValue::new(46),
            second: FixValue::new(55),
        };
        let dt = time.to_datetime().unwrap();
        assert_eq!(dt.to_string(), "2000-06-07 20:46:55");

        let mut bad = time;
        bad.month = FixValue::new(13);
        assert!(bad.to_datetime().is_none());

        let mut missing = time;
        missing.second = FixValue::INVALID;
        assert!(!missing.is_complete());
        assert!(missing.to_datetime().is_none());
    }

    #[test]
    fn test_to_degrees() {
        assert_relative_eq!(
            coord(b'N', 60, 12, 14).to_degrees().unwrap(),
            60.0 + 12.0 / 60.0 + 14.0 / 3600.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            coord(b'W', 11, 7, 33).to_degrees().unwrap(),
            -(11.0 + 7.0 / 60.0 + 33.0 / 3600.0),
            epsilon = 1e-9
        );
        assert!(coord(b'X', 1, 2, 3).to_degrees().is_none());
        assert!(CoordinateFix::INVALID.to_degrees().is_none());
    }
}
