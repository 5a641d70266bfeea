use crate::error::{AtGpsError, Result};
use crate::record::extractor::{FieldExtractor, FieldText};
use crate::record::field_table::{FieldKind, lookup};

/// Fixed-capacity record buffer with a write cursor.
///
/// Holds the marker at index 0 followed by the payload of one record. The
/// cursor never exceeds the capacity; `push` reports overflow instead of
/// truncating. Capacity is at least one byte so the marker always fits.
#[derive(Debug, Clone)]
pub struct RawRecord {
    buffer: Box<[u8]>,
    cursor: usize,
}

impl RawRecord {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity.max(1)].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Append one byte at the cursor.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        let capacity = self.buffer.len();
        let slot = self
            .buffer
            .get_mut(self.cursor)
            .ok_or(AtGpsError::RecordOverflow { capacity })?;
        *slot = byte;
        self.cursor += 1;
        Ok(())
    }

    /// Reset so the buffer holds only `marker`.
    pub fn restart(&mut self, marker: u8) {
        self.buffer[0] = marker;
        self.cursor = 1;
    }

    pub fn clear(&mut self) {
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.cursor]
    }
}

/// Borrowed view of one complete record, marker included.
///
/// Carries the extractor of the framing it was cut with, so field access
/// applies the same sentinel the decoder does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    bytes: &'a [u8],
    extractor: FieldExtractor,
}

impl<'a> Record<'a> {
    /// View with the default `_` sentinel.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_extractor(bytes, FieldExtractor::default())
    }

    pub fn with_extractor(bytes: &'a [u8], extractor: FieldExtractor) -> Self {
        Self { bytes, extractor }
    }

    pub fn sentinel(&self) -> u8 {
        self.extractor.sentinel()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Bytes after the marker.
    pub fn payload(&self) -> &'a [u8] {
        self.bytes.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw access to any field in the layout, reserved ones included.
    pub fn field(&self, kind: FieldKind) -> Result<FieldText<'a>> {
        self.extractor.extract(self.bytes, lookup(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut raw = RawRecord::with_capacity(3);
        raw.restart(b'@');
        raw.push(b'1').unwrap();
        raw.push(b'2').unwrap();
        assert_eq!(raw.as_bytes(), b"@12");

        let err = raw.push(b'3').unwrap_err();
        assert!(matches!(err, AtGpsError::RecordOverflow { capacity: 3 }));
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_zero_capacity_still_holds_marker() {
        let mut raw = RawRecord::with_capacity(0);
        assert_eq!(raw.capacity(), 1);
        raw.restart(b'@');
        assert_eq!(raw.as_bytes(), b"@");
        assert!(matches!(
            raw.push(b'1'),
            Err(AtGpsError::RecordOverflow { capacity: 1 })
        ));
    }

    #[test]
    fn test_restart_overwrites_in_place() {
        let mut raw = RawRecord::with_capacity(8);
        raw.restart(b'@');
        raw.push(b'9').unwrap();
        raw.restart(b'@');
        assert_eq!(raw.as_bytes(), b"@");
    }

    #[test]
    fn test_record_payload() {
        let record = Record::new(b"@0006");
        assert_eq!(record.payload(), b"0006");
        assert_eq!(Record::new(b"").payload(), b"");
    }

    #[test]
    fn test_reserved_field_access() {
        let record = Record::new(b"@000607204655N6012249E01107556S015+00130E0021N0018U0000");
        assert_eq!(
            record.field(FieldKind::AltitudeMeters).unwrap(),
            FieldText::Present(b"00130")
        );
        assert_eq!(
            record.field(FieldKind::VerticalVelocity).unwrap(),
            FieldText::Present(b"0000")
        );
    }

    #[test]
    fn test_field_uses_configured_sentinel() {
        let bytes = b"@??0607204655N6012249E01107556";
        let record = Record::with_extractor(bytes, FieldExtractor::new(b'?'));
        assert_eq!(record.sentinel(), b'?');
        assert!(record.field(FieldKind::Year).unwrap().is_missing());
        assert_eq!(
            record.field(FieldKind::Month).unwrap(),
            FieldText::Present(b"06")
        );

        // The default view does not treat '?' as missing.
        assert!(!Record::new(bytes).field(FieldKind::Year).unwrap().is_missing());
    }
}
