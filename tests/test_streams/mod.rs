#![allow(dead_code)]

use atgps::config::FramingConfig;
use atgps::processing::FixProcessor;
use atgps::record::{Fix, RecordAccumulator};

pub const SAMPLE: &[u8] = b"@000607204655N6012249E01107556S015+00130E0021N0018U0000";

pub fn processor() -> FixProcessor {
    FixProcessor::new(&FramingConfig::default()).expect("default framing is valid")
}

/// Feed `bytes` and collect the raw records the accumulator emits.
pub fn records_of(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut acc = RecordAccumulator::new(&FramingConfig::default()).unwrap();
    let mut records = Vec::new();
    for &b in bytes {
        if let Some(record) = acc.feed(b).unwrap() {
            records.push(record.as_bytes().to_vec());
        }
    }
    records
}

/// Decode a complete stream, flushing at the end.
pub fn decode_stream(bytes: &[u8]) -> (Vec<Fix>, FixProcessor) {
    let mut p = processor();
    let mut fixes = p.process_bytes(bytes);
    fixes.extend(p.finish());
    (fixes, p)
}
