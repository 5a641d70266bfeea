use rand::RngExt;
use rand_chacha::ChaCha8Rng;

use crate::constants::{MARKER, SENTINEL};
use crate::record::decoder::fraction_to_arcseconds;
use crate::record::field_table::{Axis, FieldKind, layout_len, lookup};
use crate::record::{CoordinateFix, Fix, FixValue, GpsFix, TimeFix};

/// Reserved tail of the reference record (status, error, altitude, velocities).
pub const SAMPLE_RESERVED: &[u8] = b"S015+00130E0021N0018U0000";

/// Position components as transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticCoordinate {
    pub hemisphere: u8,
    pub degree: u16,
    pub minute: u8,
    /// Thousandths of a minute (0-999)
    pub thousandths: u16,
}

/// A record described by its transmitted components.
///
/// Encodes to wire bytes and predicts what the decoder should produce,
/// including the effect of fields listed in `missing`, which are filled
/// with the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticRecord {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub latitude: SyntheticCoordinate,
    pub longitude: SyntheticCoordinate,
    pub missing: Vec<FieldKind>,
    /// Bytes written from the position-status offset onward
    pub reserved: Vec<u8>,
}

impl SyntheticRecord {
    /// `@000607204655N6012249E01107556S015+00130E0021N0018U0000`
    pub fn sample() -> Self {
        Self {
            year: 0,
            month: 6,
            day: 7,
            hour: 20,
            minute: 46,
            second: 55,
            latitude: SyntheticCoordinate {
                hemisphere: b'N',
                degree: 60,
                minute: 12,
                thousandths: 249,
            },
            longitude: SyntheticCoordinate {
                hemisphere: b'E',
                degree: 11,
                minute: 7,
                thousandths: 556,
            },
            missing: Vec::new(),
            reserved: SAMPLE_RESERVED.to_vec(),
        }
    }

    pub fn random(rng: &mut ChaCha8Rng) -> Self {
        Self {
            year: rng.random_range(0..100),
            month: rng.random_range(1..=12),
            day: rng.random_range(1..=28),
            hour: rng.random_range(0..24),
            minute: rng.random_range(0..60),
            second: rng.random_range(0..60),
            latitude: SyntheticCoordinate {
                hemisphere: if rng.random_bool(0.5) { b'N' } else { b'S' },
                degree: rng.random_range(0..90),
                minute: rng.random_range(0..60),
                thousandths: rng.random_range(0..1000),
            },
            longitude: SyntheticCoordinate {
                hemisphere: if rng.random_bool(0.5) { b'E' } else { b'W' },
                degree: rng.random_range(0..=180),
                minute: rng.random_range(0..60),
                thousandths: rng.random_range(0..1000),
            },
            missing: Vec::new(),
            reserved: SAMPLE_RESERVED.to_vec(),
        }
    }

    pub fn with_missing(mut self, kind: FieldKind) -> Self {
        self.missing.push(kind);
        self
    }

    /// Wire bytes, marker first, covering the full layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![b'0'; layout_len()];
        buf[0] = MARKER;

        write_digits(&mut buf, FieldKind::Year, self.year as u32);
        write_digits(&mut buf, FieldKind::Month, self.month as u32);
        write_digits(&mut buf, FieldKind::Day, self.day as u32);
        write_digits(&mut buf, FieldKind::Hour, self.hour as u32);
        write_digits(&mut buf, FieldKind::Minute, self.minute as u32);
        write_digits(&mut buf, FieldKind::Second, self.second as u32);
        write_coordinate(&mut buf, Axis::Latitude, &self.latitude);
        write_coordinate(&mut buf, Axis::Longitude, &self.longitude);

        let start = lookup(FieldKind::PositionStatus).offset;
        let n = self.reserved.len().min(buf.len() - start);
        buf[start..start + n].copy_from_slice(&self.reserved[..n]);

        for &kind in &self.missing {
            let spec = lookup(kind);
            buf[spec.offset..spec.end()].fill(SENTINEL);
        }
        buf
    }

    /// The fix a decoder should produce for `encode()`.
    pub fn expected_fix(&self) -> Fix {
        let time_value = |kind, v: u8| {
            if self.is_missing(kind) {
                FixValue::INVALID
            } else {
                FixValue::new(v % 100)
            }
        };

        Fix {
            time: TimeFix {
                year: time_value(FieldKind::Year, self.year),
                month: time_value(FieldKind::Month, self.month),
                day: time_value(FieldKind::Day, self.day),
                hour: time_value(FieldKind::Hour, self.hour),
                minute: time_value(FieldKind::Minute, self.minute),
                second: time_value(FieldKind::Second, self.second),
            },
            position: GpsFix {
                latitude: self.expected_coordinate(Axis::Latitude),
                longitude: self.expected_coordinate(Axis::Longitude),
            },
        }
    }

    fn expected_coordinate(&self, axis: Axis) -> CoordinateFix {
        let c = match axis {
            Axis::Latitude => &self.latitude,
            Axis::Longitude => &self.longitude,
        };

        let hemisphere = if self.is_missing(FieldKind::Hemisphere(axis)) {
            FixValue::INVALID
        } else {
            FixValue::new(c.hemisphere)
        };

        // The sentinel test looks at the first byte of the whole position
        // field, which is also the first degree digit.
        if self.is_missing(FieldKind::Position(axis))
            || self.is_missing(FieldKind::PositionDegree(axis))
        {
            return CoordinateFix {
                hemisphere,
                ..CoordinateFix::INVALID
            };
        }

        let degree_modulus = 10u32.pow(axis.degree_digits() as u32);
        let minute = if self.is_missing(FieldKind::PositionMinute(axis)) {
            FixValue::INVALID
        } else {
            FixValue::new(c.minute % 100)
        };
        let second = if self.is_missing(FieldKind::PositionFraction(axis)) {
            FixValue::INVALID
        } else {
            FixValue::new(fraction_to_arcseconds(c.thousandths as u32 % 1000) as u8)
        };

        CoordinateFix {
            hemisphere,
            degree: u8::try_from(c.degree as u32 % degree_modulus)
                .ok()
                .into(),
            minute,
            second,
        }
    }

    fn is_missing(&self, kind: FieldKind) -> bool {
        self.missing.contains(&kind)
    }
}

fn write_digits(buf: &mut [u8], kind: FieldKind, value: u32) {
    let spec = lookup(kind);
    let text = format!("{:0width$}", value, width = spec.length);
    let digits = &text.as_bytes()[text.len() - spec.length..];
    buf[spec.offset..spec.end()].copy_from_slice(digits);
}

fn write_coordinate(buf: &mut [u8], axis: Axis, c: &SyntheticCoordinate) {
    buf[lookup(FieldKind::Hemisphere(axis)).offset] = c.hemisphere;
    write_digits(buf, FieldKind::PositionDegree(axis), c.degree as u32);
    write_digits(buf, FieldKind::PositionMinute(axis), c.minute as u32);
    write_digits(buf, FieldKind::PositionFraction(axis), c.thousandths as u32);
}
