//! Static layout of an `@` position record.
//!
//! Offsets count from the marker at index 0, so the first payload byte is at
//! offset 1. Every field the decoder reads, and the reserved fields it does
//! not, is described here; nothing else in the crate hardcodes an offset.

/// Which coordinate a position-related field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Number of degree digits at the start of the position field.
    ///
    /// Latitude carries 2 (`DDMMmmm`), longitude 3 (`DDDMMmmm`).
    pub const fn degree_digits(self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }
}

/// Semantic type of a fixed-offset field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Hemisphere(Axis),
    /// Whole position field (`DDMMmmm` / `DDDMMmmm`)
    Position(Axis),
    PositionDegree(Axis),
    PositionMinute(Axis),
    /// Thousandths of a minute
    PositionFraction(Axis),
    // Reserved: present on the wire, not decoded.
    PositionStatus,
    HorizontalError,
    AltitudeSign,
    AltitudeMeters,
    EastWestVelocityDir,
    /// Tenths of m/s
    EastWestVelocity,
    NorthSouthVelocityDir,
    /// Tenths of m/s
    NorthSouthVelocity,
    VerticalVelocityDir,
    /// Hundredths of m/s
    VerticalVelocity,
}

/// Immutable descriptor of one field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub offset: usize,
    pub length: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(offset: usize, length: usize, kind: FieldKind) -> Self {
        Self {
            offset,
            length,
            kind,
        }
    }

    /// One past the last byte of the field.
    pub const fn end(&self) -> usize {
        self.offset + self.length
    }
}

const LAT_POSITION_OFFSET: usize = 14;
const LON_POSITION_OFFSET: usize = 22;
const MINUTE_DIGITS: usize = 2;
const FRACTION_DIGITS: usize = 3;

/// Look up the layout of a field. Total over `FieldKind`.
pub const fn lookup(kind: FieldKind) -> FieldSpec {
    match kind {
        FieldKind::Year => FieldSpec::new(1, 2, kind),
        FieldKind::Month => FieldSpec::new(3, 2, kind),
        FieldKind::Day => FieldSpec::new(5, 2, kind),
        FieldKind::Hour => FieldSpec::new(7, 2, kind),
        FieldKind::Minute => FieldSpec::new(9, 2, kind),
        FieldKind::Second => FieldSpec::new(11, 2, kind),
        FieldKind::Hemisphere(Axis::Latitude) => FieldSpec::new(13, 1, kind),
        FieldKind::Hemisphere(Axis::Longitude) => FieldSpec::new(21, 1, kind),
        FieldKind::Position(axis) => FieldSpec::new(
            position_offset(axis),
            axis.degree_digits() + MINUTE_DIGITS + FRACTION_DIGITS,
            kind,
        ),
        FieldKind::PositionDegree(axis) => {
            FieldSpec::new(position_offset(axis), axis.degree_digits(), kind)
        }
        FieldKind::PositionMinute(axis) => FieldSpec::new(
            position_offset(axis) + axis.degree_digits(),
            MINUTE_DIGITS,
            kind,
        ),
        FieldKind::PositionFraction(axis) => FieldSpec::new(
            position_offset(axis) + axis.degree_digits() + MINUTE_DIGITS,
            FRACTION_DIGITS,
            kind,
        ),
        FieldKind::PositionStatus => FieldSpec::new(30, 1, kind),
        FieldKind::HorizontalError => FieldSpec::new(31, 3, kind),
        FieldKind::AltitudeSign => FieldSpec::new(34, 1, kind),
        FieldKind::AltitudeMeters => FieldSpec::new(35, 5, kind),
        FieldKind::EastWestVelocityDir => FieldSpec::new(40, 1, kind),
        FieldKind::EastWestVelocity => FieldSpec::new(41, 4, kind),
        FieldKind::NorthSouthVelocityDir => FieldSpec::new(45, 1, kind),
        FieldKind::NorthSouthVelocity => FieldSpec::new(46, 4, kind),
        FieldKind::VerticalVelocityDir => FieldSpec::new(50, 1, kind),
        FieldKind::VerticalVelocity => FieldSpec::new(51, 4, kind),
    }
}

const fn position_offset(axis: Axis) -> usize {
    match axis {
        Axis::Latitude => LAT_POSITION_OFFSET,
        Axis::Longitude => LON_POSITION_OFFSET,
    }
}

/// Top-level fields in wire order. Position sub-ranges are not listed.
pub const FIELD_TABLE: [FieldSpec; 20] = [
    lookup(FieldKind::Year),
    lookup(FieldKind::Month),
    lookup(FieldKind::Day),
    lookup(FieldKind::Hour),
    lookup(FieldKind::Minute),
    lookup(FieldKind::Second),
    lookup(FieldKind::Hemisphere(Axis::Latitude)),
    lookup(FieldKind::Position(Axis::Latitude)),
    lookup(FieldKind::Hemisphere(Axis::Longitude)),
    lookup(FieldKind::Position(Axis::Longitude)),
    lookup(FieldKind::PositionStatus),
    lookup(FieldKind::HorizontalError),
    lookup(FieldKind::AltitudeSign),
    lookup(FieldKind::AltitudeMeters),
    lookup(FieldKind::EastWestVelocityDir),
    lookup(FieldKind::EastWestVelocity),
    lookup(FieldKind::NorthSouthVelocityDir),
    lookup(FieldKind::NorthSouthVelocity),
    lookup(FieldKind::VerticalVelocityDir),
    lookup(FieldKind::VerticalVelocity),
];

/// Fields read by the decoder.
pub const DECODED_FIELDS: [FieldKind; 10] = [
    FieldKind::Year,
    FieldKind::Month,
    FieldKind::Day,
    FieldKind::Hour,
    FieldKind::Minute,
    FieldKind::Second,
    FieldKind::Hemisphere(Axis::Latitude),
    FieldKind::Position(Axis::Latitude),
    FieldKind::Hemisphere(Axis::Longitude),
    FieldKind::Position(Axis::Longitude),
];

/// Shortest record (marker included) the decoder can read.
pub const fn min_decodable_len() -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < DECODED_FIELDS.len() {
        let end = lookup(DECODED_FIELDS[i]).end();
        if end > max {
            max = end;
        }
        i += 1;
    }
    max
}

/// Length covered by the full layout, reserved fields included.
pub const fn layout_len() -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < FIELD_TABLE.len() {
        let end = FIELD_TABLE[i].end();
        if end > max {
            max = end;
        }
        i += 1;
    }
    max
}
