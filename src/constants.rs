//! Wire-format constants for `@` position records
//!
//! These define the framing bytes and sentinel values shared by the
//! accumulator, the extractor and the decoder.

/// Record-start marker. Ends the previous record and begins the next.
pub const MARKER: u8 = b'@';

/// Character placed at the start of a field whose value is unavailable.
pub const SENTINEL: u8 = b'_';

/// Bytes at or below this value are never stored and never delimit a record.
pub const CONTROL_THRESHOLD: u8 = 0x21;

/// Decoded value meaning "not decodable / missing".
pub const INVALID: u8 = 0xFE;

/// Length of a complete record, marker included, covering every field of the
/// layout (reserved ones too).
pub const FULL_RECORD_LEN: usize = 55;

/// Default accumulator capacity.
pub const DEFAULT_MAX_RECORD_LEN: usize = 128;

/// Fractional minutes are transmitted in thousandths. Arcseconds are
/// `thousandths * ARCSEC_SCALE_NUM / ARCSEC_SCALE_DEN`, truncated.
pub const ARCSEC_SCALE_NUM: u32 = 6;
pub const ARCSEC_SCALE_DEN: u32 = 100;
