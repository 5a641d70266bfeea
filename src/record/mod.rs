pub mod accumulator;
pub mod decoder;
pub mod extractor;
pub mod field_table;
pub mod fix;
mod raw;

pub use accumulator::{AccumulatorState, RecordAccumulator};
pub use decoder::RecordDecoder;
pub use extractor::{FieldExtractor, FieldText};
pub use field_table::{Axis, FIELD_TABLE, FieldKind, FieldSpec, lookup};
pub use fix::{CoordinateFix, Fix, FixValue, GpsFix, TimeFix};
pub use raw::{RawRecord, Record};
