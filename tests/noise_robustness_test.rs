mod test_streams;

use atgps::record::{Axis, FieldKind, FixValue};
use atgps::simulation::{
    StreamNoiseConfig, SyntheticRecord, generate_random_stream, generate_stream,
};
use test_streams::decode_stream;

#[test]
fn test_clean_random_stream() {
    let stream = generate_random_stream(200, &StreamNoiseConfig::default().with_seed(1));
    let (fixes, p) = decode_stream(&stream.bytes);
    assert_eq!(fixes, stream.expected_fixes());
    assert_eq!(p.stats().malformed, 0);
}

#[test]
fn test_control_noise_is_transparent() {
    let config = StreamNoiseConfig::default()
        .with_seed(2)
        .with_leading_garbage(17)
        .with_control(6.0, 4);
    let stream = generate_random_stream(200, &config);
    let (fixes, p) = decode_stream(&stream.bytes);

    assert_eq!(fixes, stream.expected_fixes());
    assert_eq!(p.accumulator().discarded(), 17);
}

#[test]
fn test_missing_fields_degrade_independently() {
    let config = StreamNoiseConfig::default()
        .with_seed(3)
        .with_control(10.0, 2)
        .with_missing(0.3);
    let stream = generate_random_stream(300, &config);
    let (fixes, _) = decode_stream(&stream.bytes);

    assert_eq!(fixes, stream.expected_fixes());
    let any_invalid = fixes
        .iter()
        .any(|f| f.time.hour == FixValue::INVALID || !f.position.latitude.is_complete());
    assert!(any_invalid, "noise should have removed some fields");
}

#[test]
fn test_truncated_records_are_skipped() {
    let config = StreamNoiseConfig::default()
        .with_seed(4)
        .with_control(12.0, 3)
        .with_missing(0.1)
        .with_truncation(0.25);
    let stream = generate_random_stream(400, &config);
    let (fixes, p) = decode_stream(&stream.bytes);

    assert!(stream.truncated_count() > 0);
    assert_eq!(fixes, stream.expected_fixes());
    assert_eq!(p.stats().malformed as usize, stream.truncated_count());
    assert_eq!(p.stats().records as usize, stream.records.len());
}

#[test]
fn test_latest_fix_tracks_last_good_record() {
    let records = vec![
        SyntheticRecord::sample(),
        SyntheticRecord::sample().with_missing(FieldKind::Position(Axis::Longitude)),
    ];
    let stream = generate_stream(&records, &StreamNoiseConfig::default().with_seed(5));
    let (_, p) = decode_stream(&stream.bytes);

    let latest = p.latest_fix().unwrap();
    assert_eq!(latest.position.longitude.degree, FixValue::INVALID);
    assert_eq!(latest.position.longitude.hemisphere.as_char(), Some('E'));
}
