//! Byte sources feeding the decoder.
//!
//! A source yields chunks of raw bytes in arrival order, each tagged with
//! the transport status seen while receiving it. The decoder logs flagged
//! chunks but keeps framing exactly as if they were clean.

pub mod channel;
pub mod reader;

use std::fmt;

pub use channel::{ChannelSource, channel};
pub use reader::ReaderSource;

/// Out-of-band receive errors reported by the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStatus {
    /// No stop bit detected
    pub framing_error: bool,
    /// A byte arrived before the previous one was read
    pub overrun: bool,
    /// The receive queue filled and bytes were dropped
    pub buffer_overflow: bool,
}

impl TransportStatus {
    pub const CLEAN: TransportStatus = TransportStatus {
        framing_error: false,
        overrun: false,
        buffer_overflow: false,
    };

    pub fn is_clean(&self) -> bool {
        !(self.framing_error || self.overrun || self.buffer_overflow)
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<&str> = [
            (self.framing_error, "framing error"),
            (self.overrun, "overrun"),
            (self.buffer_overflow, "buffer overflow"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();

        if flags.is_empty() {
            f.write_str("clean")
        } else {
            f.write_str(&flags.join(", "))
        }
    }
}

/// Bytes received together, with their transport status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedChunk {
    pub bytes: Vec<u8>,
    pub status: TransportStatus,
}

impl ReceivedChunk {
    pub fn clean(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            status: TransportStatus::CLEAN,
        }
    }

    pub fn with_status(bytes: Vec<u8>, status: TransportStatus) -> Self {
        Self { bytes, status }
    }
}

pub trait ByteSource: Send {
    /// Next chunk in arrival order, `None` once the source is exhausted.
    fn next_chunk(&mut self) -> anyhow::Result<Option<ReceivedChunk>>;
}
