use crate::constants::{ARCSEC_SCALE_DEN, ARCSEC_SCALE_NUM};
use crate::error::{AtGpsError, Result};
use crate::record::extractor::{FieldExtractor, FieldText};
use crate::record::field_table::{Axis, FieldKind, FieldSpec, lookup, min_decodable_len};
use crate::record::fix::{CoordinateFix, Fix, FixValue, GpsFix, TimeFix};

/// Decodes complete records into a [`Fix`].
///
/// Each sub-field degrades to `INVALID` on its own: a missing or garbled
/// field never affects its siblings. Only a record too short for the
/// decoded fields is rejected, and it is rejected before any field is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordDecoder {
    extractor: FieldExtractor,
}

impl RecordDecoder {
    pub fn new(sentinel: u8) -> Self {
        Self {
            extractor: FieldExtractor::new(sentinel),
        }
    }

    /// Decode one record, marker included at index 0.
    pub fn decode(&self, record: &[u8]) -> Result<Fix> {
        let needed = min_decodable_len();
        if record.len() < needed {
            return Err(AtGpsError::MalformedRecord {
                needed,
                available: record.len(),
            });
        }

        Ok(Fix {
            time: self.decode_time(record)?,
            position: GpsFix {
                latitude: self.decode_coordinate(record, Axis::Latitude)?,
                longitude: self.decode_coordinate(record, Axis::Longitude)?,
            },
        })
    }

    fn decode_time(&self, record: &[u8]) -> Result<TimeFix> {
        Ok(TimeFix {
            year: self.decimal_field(record, FieldKind::Year)?,
            month: self.decimal_field(record, FieldKind::Month)?,
            day: self.decimal_field(record, FieldKind::Day)?,
            hour: self.decimal_field(record, FieldKind::Hour)?,
            minute: self.decimal_field(record, FieldKind::Minute)?,
            second: self.decimal_field(record, FieldKind::Second)?,
        })
    }

    fn decimal_field(&self, record: &[u8], kind: FieldKind) -> Result<FixValue> {
        let text = self.extractor.extract(record, lookup(kind))?;
        Ok(text.bytes().and_then(parse_u8).into())
    }

    fn decode_coordinate(&self, record: &[u8], axis: Axis) -> Result<CoordinateFix> {
        let hemisphere = match self
            .extractor
            .extract(record, lookup(FieldKind::Hemisphere(axis)))?
        {
            FieldText::Missing => FixValue::INVALID,
            FieldText::Present(bytes) => FixValue::new(bytes[0]),
        };

        let whole = lookup(FieldKind::Position(axis));
        let position = match self.extractor.extract(record, whole)? {
            FieldText::Missing => {
                return Ok(CoordinateFix {
                    hemisphere,
                    ..CoordinateFix::INVALID
                });
            }
            FieldText::Present(bytes) => bytes,
        };

        let degree = sub_field(position, whole, FieldKind::PositionDegree(axis));
        let minute = sub_field(position, whole, FieldKind::PositionMinute(axis));
        let fraction = sub_field(position, whole, FieldKind::PositionFraction(axis));

        Ok(CoordinateFix {
            hemisphere,
            degree: parse_u8(degree).into(),
            minute: parse_u8(minute).into(),
            second: parse_decimal(fraction)
                .and_then(|thousandths| u8::try_from(fraction_to_arcseconds(thousandths)).ok())
                .into(),
        })
    }
}

/// Slice a position sub-range out of the already extracted position field.
fn sub_field(position: &[u8], whole: FieldSpec, kind: FieldKind) -> &[u8] {
    let spec = lookup(kind);
    let start = spec.offset - whole.offset;
    &position[start..start + spec.length]
}

/// Thousandths of a minute to arcseconds, truncating.
///
/// `999` gives 59, never 60.
pub fn fraction_to_arcseconds(thousandths: u32) -> u32 {
    thousandths * ARCSEC_SCALE_NUM / ARCSEC_SCALE_DEN
}

/// Parse an all-digit ASCII field. Any other byte makes the field unreadable.
pub fn parse_decimal(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0u32, |acc, &b| {
        let digit = (b as char).to_digit(10)?;
        acc.checked_mul(10)?.checked_add(digit)
    })
}

fn parse_u8(digits: &[u8]) -> Option<u8> {
    parse_decimal(digits).and_then(|v| u8::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"@000607204655N6012249E01107556S015+00130E0021N0018U0000";

    fn with_field(kind: FieldKind, text: &[u8]) -> Vec<u8> {
        let spec = lookup(kind);
        let mut record = SAMPLE.to_vec();
        record[spec.offset..spec.offset + text.len()].copy_from_slice(text);
        record
    }

    #[test]
    fn test_sample_record() {
        let fix = RecordDecoder::default().decode(SAMPLE).unwrap();

        let t = fix.time;
        assert_eq!(
            [t.year, t.month, t.day, t.hour, t.minute, t.second].map(FixValue::raw),
            [0, 6, 7, 20, 46, 55]
        );

        let lat = fix.position.latitude;
        assert_eq!(lat.hemisphere.as_char(), Some('N'));
        assert_eq!(lat.degree.value(), Some(60));
        assert_eq!(lat.minute.value(), Some(12));
        assert_eq!(lat.second.value(), Some(14));

        let lon = fix.position.longitude;
        assert_eq!(lon.hemisphere.as_char(), Some('E'));
        assert_eq!(lon.degree.value(), Some(11));
        assert_eq!(lon.minute.value(), Some(7));
        assert_eq!(lon.second.value(), Some(33));
    }

    #[test]
    fn test_missing_time_fields_are_independent() {
        let record = with_field(FieldKind::Year, b"__");
        let fix = RecordDecoder::default().decode(&record).unwrap();
        assert_eq!(fix.time.year, FixValue::INVALID);
        assert_eq!(fix.time.month.value(), Some(6));

        let record = with_field(FieldKind::Minute, b"__");
        let fix = RecordDecoder::default().decode(&record).unwrap();
        assert_eq!(fix.time.minute, FixValue::INVALID);
        assert_eq!(fix.time.hour.value(), Some(20));
        assert_eq!(fix.time.second.value(), Some(55));
    }

    #[test]
    fn test_missing_position_invalidates_all_parts() {
        let record = with_field(FieldKind::Position(Axis::Longitude), b"________");
        let fix = RecordDecoder::default().decode(&record).unwrap();
        let lon = fix.position.longitude;
        assert_eq!(lon.hemisphere.as_char(), Some('E'));
        assert_eq!(lon.degree, FixValue::INVALID);
        assert_eq!(lon.minute, FixValue::INVALID);
        assert_eq!(lon.second, FixValue::INVALID);
        assert!(fix.position.latitude.is_complete());
    }

    #[test]
    fn test_missing_hemisphere() {
        let record = with_field(FieldKind::Hemisphere(Axis::Latitude), b"_");
        let fix = RecordDecoder::default().decode(&record).unwrap();
        assert_eq!(fix.position.latitude.hemisphere, FixValue::INVALID);
        assert_eq!(fix.position.latitude.degree.value(), Some(60));
    }

    #[test]
    fn test_garbled_digits_invalidate_sub_field_only() {
        let record = with_field(FieldKind::PositionMinute(Axis::Latitude), b"1x");
        let fix = RecordDecoder::default().decode(&record).unwrap();
        assert_eq!(fix.position.latitude.minute, FixValue::INVALID);
        assert_eq!(fix.position.latitude.degree.value(), Some(60));
        assert_eq!(fix.position.latitude.second.value(), Some(14));
    }

    #[test]
    fn test_three_digit_degree_overflow_is_invalid() {
        let record = with_field(FieldKind::PositionDegree(Axis::Longitude), b"300");
        let fix = RecordDecoder::default().decode(&record).unwrap();
        assert_eq!(fix.position.longitude.degree, FixValue::INVALID);
    }

    #[test]
    fn test_short_record_rejected() {
        let err = RecordDecoder::default().decode(&SAMPLE[..29]).unwrap_err();
        assert!(matches!(
            err,
            AtGpsError::MalformedRecord {
                needed: 30,
                available: 29
            }
        ));
        assert!(RecordDecoder::default().decode(&SAMPLE[..30]).is_ok());
    }

    #[test]
    fn test_decode_is_idempotent() {
        let decoder = RecordDecoder::default();
        assert_eq!(decoder.decode(SAMPLE).unwrap(), decoder.decode(SAMPLE).unwrap());
    }

    #[test]
    fn test_fraction_truncates() {
        assert_eq!(fraction_to_arcseconds(999), 59);
        assert_eq!(fraction_to_arcseconds(249), 14);
        assert_eq!(fraction_to_arcseconds(556), 33);
        assert_eq!(fraction_to_arcseconds(0), 0);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(b"011"), Some(11));
        assert_eq!(parse_decimal(b"1_"), None);
        assert_eq!(parse_decimal(b""), None);
        assert_eq!(parse_u8(b"256"), None);
    }
}
