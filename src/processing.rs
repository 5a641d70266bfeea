use crate::config::FramingConfig;
use crate::error::{AtGpsError, Result};
use crate::record::{Fix, GpsFix, Record, RecordAccumulator, RecordDecoder, TimeFix};
use crate::source::{ByteSource, ReceivedChunk};

/// Receives every successfully decoded record.
pub trait FixSink {
    fn on_record_decoded(&mut self, time: &TimeFix, position: &GpsFix);
}

impl<F: FnMut(&TimeFix, &GpsFix)> FixSink for F {
    fn on_record_decoded(&mut self, time: &TimeFix, position: &GpsFix) {
        (*self)(time, position)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    pub bytes: u64,
    /// Records closed by a marker or by end of input
    pub records: u64,
    pub decoded: u64,
    pub malformed: u64,
    pub overflows: u64,
    /// Chunks that arrived with a transport error flag
    pub transport_errors: u64,
}

/// Single owner of the accumulate/decode pipeline.
///
/// Bytes go in strictly in arrival order. A malformed record leaves the
/// latest fix untouched; a decoded one replaces it wholesale.
pub struct FixProcessor {
    accumulator: RecordAccumulator,
    decoder: RecordDecoder,
    latest: Option<Fix>,
    stats: ProcessorStats,
}

impl FixProcessor {
    pub fn new(config: &FramingConfig) -> Result<Self> {
        Ok(Self {
            accumulator: RecordAccumulator::new(config)?,
            decoder: RecordDecoder::new(config.sentinel.get()),
            latest: None,
            stats: ProcessorStats::default(),
        })
    }

    /// Feed one byte; returns the fix if this byte completed a good record.
    pub fn process_byte(&mut self, byte: u8) -> Option<Fix> {
        self.stats.bytes += 1;
        match self.accumulator.feed(byte) {
            Ok(Some(record)) => Self::handle_record(
                &self.decoder,
                record,
                &mut self.latest,
                &mut self.stats,
            ),
            Ok(None) => None,
            Err(e) => {
                self.stats.overflows += 1;
                log::warn!("Dropping record: {}", e);
                None
            }
        }
    }

    pub fn process_bytes(&mut self, bytes: &[u8]) -> Vec<Fix> {
        bytes.iter().filter_map(|&b| self.process_byte(b)).collect()
    }

    /// Like `process_bytes`, noting any transport errors on the chunk.
    pub fn process_chunk(&mut self, chunk: &ReceivedChunk) -> Vec<Fix> {
        if !chunk.status.is_clean() {
            self.stats.transport_errors += 1;
            log::warn!(
                "Transport error on {}-byte chunk: {}",
                chunk.bytes.len(),
                chunk.status
            );
        }
        self.process_bytes(&chunk.bytes)
    }

    /// End of input: decode whatever record is still pending.
    pub fn finish(&mut self) -> Option<Fix> {
        let record = self.accumulator.flush()?;
        Self::handle_record(&self.decoder, record, &mut self.latest, &mut self.stats)
    }

    /// Drain `source` into `sink` until the source is exhausted.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> anyhow::Result<()>
    where
        S: ByteSource + ?Sized,
        K: FixSink + ?Sized,
    {
        while let Some(chunk) = source.next_chunk()? {
            for fix in self.process_chunk(&chunk) {
                sink.on_record_decoded(&fix.time, &fix.position);
            }
        }
        if let Some(fix) = self.finish() {
            sink.on_record_decoded(&fix.time, &fix.position);
        }
        Ok(())
    }

    fn handle_record(
        decoder: &RecordDecoder,
        record: Record<'_>,
        latest: &mut Option<Fix>,
        stats: &mut ProcessorStats,
    ) -> Option<Fix> {
        stats.records += 1;
        match decoder.decode(record.as_bytes()) {
            Ok(fix) => {
                log::debug!("Decoded {}-byte record: {:?}", record.len(), fix);
                stats.decoded += 1;
                *latest = Some(fix);
                Some(fix)
            }
            Err(e @ AtGpsError::MalformedRecord { .. }) => {
                stats.malformed += 1;
                log::warn!("Skipping record: {}", e);
                None
            }
            Err(e) => {
                log::error!("Unexpected decode failure: {}", e);
                None
            }
        }
    }

    /// Most recent successfully decoded fix.
    pub fn latest_fix(&self) -> Option<&Fix> {
        self.latest.as_ref()
    }

    pub fn stats(&self) -> &ProcessorStats {
        &self.stats
    }

    pub fn accumulator(&self) -> &RecordAccumulator {
        &self.accumulator
    }
}
