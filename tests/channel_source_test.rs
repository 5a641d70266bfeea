mod test_streams;

use std::thread;

use atgps::config::AtGpsConfig;
use atgps::processing::FixProcessor;
use atgps::record::{GpsFix, TimeFix};
use atgps::source::{ReceivedChunk, TransportStatus, channel};
use test_streams::SAMPLE;

#[test]
fn test_producer_thread_feeds_single_processor() {
    let config = AtGpsConfig::default();
    let (tx, mut source) = channel(config.input.channel_capacity);

    let producer = thread::spawn(move || {
        for (i, piece) in SAMPLE.repeat(10).chunks(7).enumerate() {
            let status = TransportStatus {
                overrun: i == 3,
                ..TransportStatus::CLEAN
            };
            tx.send(ReceivedChunk::with_status(piece.to_vec(), status))
                .unwrap();
        }
    });

    let mut processor = FixProcessor::new(&config.framing).unwrap();
    let mut count = 0;
    processor
        .run(&mut source, &mut |time: &TimeFix, position: &GpsFix| {
            assert_eq!(time.minute.value(), Some(46));
            assert_eq!(position.latitude.degree.value(), Some(60));
            count += 1;
        })
        .unwrap();
    producer.join().unwrap();

    assert_eq!(count, 10);
    assert_eq!(processor.stats().transport_errors, 1);
    assert_eq!(processor.stats().decoded, 10);
}
