use crate::constants::SENTINEL;
use crate::error::{AtGpsError, Result};
use crate::record::field_table::FieldSpec;

/// A field sliced out of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldText<'a> {
    /// The sentinel sits at the field's first byte.
    Missing,
    /// Exactly `length` bytes, borrowed from the record.
    Present(&'a [u8]),
}

impl<'a> FieldText<'a> {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldText::Missing)
    }

    pub fn bytes(&self) -> Option<&'a [u8]> {
        match *self {
            FieldText::Missing => None,
            FieldText::Present(bytes) => Some(bytes),
        }
    }
}

/// Slices fields out of a record and applies the missing-data sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldExtractor {
    sentinel: u8,
}

impl FieldExtractor {
    pub fn new(sentinel: u8) -> Self {
        Self { sentinel }
    }

    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    /// Extract `spec` from `record` (marker at index 0).
    ///
    /// A record too short to hold the whole field is malformed; the field is
    /// never truncated.
    pub fn extract<'a>(&self, record: &'a [u8], spec: FieldSpec) -> Result<FieldText<'a>> {
        let bytes = record
            .get(spec.offset..spec.end())
            .ok_or(AtGpsError::MalformedRecord {
                needed: spec.end(),
                available: record.len(),
            })?;

        if bytes.first() == Some(&self.sentinel) {
            Ok(FieldText::Missing)
        } else {
            Ok(FieldText::Present(bytes))
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(SENTINEL)
    }
}
