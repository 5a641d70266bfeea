use crate::config::FramingConfig;
use crate::error::Result;
use crate::record::extractor::FieldExtractor;
use crate::record::raw::{RawRecord, Record};

/// Accumulator framing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    /// No marker seen since start-up or the last overflow
    AwaitingStart,
    /// Buffer holds a marker and the payload received so far
    Accumulating,
}

/// Turns a byte stream into marker-delimited records.
///
/// Bytes at or below the control threshold are dropped without affecting
/// framing. A marker closes the record in progress (if any) and starts the
/// next one. The closed record is swapped into a second buffer so it can be
/// handed out by reference while accumulation restarts in place.
pub struct RecordAccumulator {
    current: RawRecord,
    completed: RawRecord,
    state: AccumulatorState,
    marker: u8,
    control_threshold: u8,
    extractor: FieldExtractor,
    discarded: usize,
}

impl RecordAccumulator {
    pub fn new(config: &FramingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            current: RawRecord::with_capacity(config.max_record_len),
            completed: RawRecord::with_capacity(config.max_record_len),
            state: AccumulatorState::AwaitingStart,
            marker: config.marker.get(),
            control_threshold: config.control_threshold.get(),
            extractor: FieldExtractor::new(config.sentinel.get()),
            discarded: 0,
        })
    }

    /// Consume one byte.
    ///
    /// Returns the record closed by this byte, if it was a marker following
    /// a non-empty buffer. Overflowing the buffer discards the partial record
    /// and returns to `AwaitingStart`.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Record<'_>>> {
        if byte == self.marker {
            return Ok(self.start_record());
        }

        if byte <= self.control_threshold {
            return Ok(None);
        }

        match self.state {
            AccumulatorState::AwaitingStart => {
                self.discarded += 1;
                Ok(None)
            }
            AccumulatorState::Accumulating => {
                if let Err(err) = self.current.push(byte) {
                    self.discarded += self.current.len() + 1;
                    self.reset();
                    return Err(err);
                }
                Ok(None)
            }
        }
    }

    fn start_record(&mut self) -> Option<Record<'_>> {
        let emitted = !self.current.is_empty();
        if emitted {
            std::mem::swap(&mut self.current, &mut self.completed);
        }
        self.current.restart(self.marker);
        self.state = AccumulatorState::Accumulating;

        emitted.then(|| Record::with_extractor(self.completed.as_bytes(), self.extractor))
    }

    /// Emit the record in progress at end of input.
    ///
    /// A buffer holding only the marker is dropped rather than emitted.
    pub fn flush(&mut self) -> Option<Record<'_>> {
        if self.current.len() <= 1 {
            self.reset();
            return None;
        }
        std::mem::swap(&mut self.current, &mut self.completed);
        self.reset();
        Some(Record::with_extractor(
            self.completed.as_bytes(),
            self.extractor,
        ))
    }

    /// Drop any partial record and wait for the next marker.
    pub fn reset(&mut self) {
        self.current.clear();
        self.state = AccumulatorState::AwaitingStart;
    }

    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// Bytes of the record in progress, marker included.
    pub fn pending(&self) -> &[u8] {
        self.current.as_bytes()
    }

    pub fn capacity(&self) -> usize {
        self.current.capacity()
    }

    /// Appendable bytes thrown away so far, either before the first marker
    /// or as part of an overflowed record.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

impl std::fmt::Debug for RecordAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordAccumulator")
            .field("state", &self.state)
            .field("pending", &self.current.len())
            .field("capacity", &self.current.capacity())
            .finish()
    }
}
