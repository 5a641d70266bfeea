use crossbeam_channel::{Receiver, Sender, bounded};

use super::{ByteSource, ReceivedChunk};

/// Create a bounded channel whose receiving end is a [`ByteSource`].
///
/// Any number of producers may hold a clone of the sender; the single
/// `ChannelSource` serializes their chunks into one stream for one
/// processor.
pub fn channel(capacity: usize) -> (Sender<ReceivedChunk>, ChannelSource) {
    let (tx, rx) = bounded(capacity);
    (tx, ChannelSource { rx })
}

pub struct ChannelSource {
    rx: Receiver<ReceivedChunk>,
}

impl ByteSource for ChannelSource {
    /// Blocks until a chunk arrives. Ends when every sender is dropped.
    fn next_chunk(&mut self) -> anyhow::Result<Option<ReceivedChunk>> {
        match self.rx.recv() {
            Ok(chunk) => Ok(Some(chunk)),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TransportStatus;

    #[test]
    fn test_channel_source_drains_then_ends() {
        let (tx, mut source) = channel(4);
        tx.send(ReceivedChunk::clean(b"@00".to_vec())).unwrap();
        tx.send(ReceivedChunk::with_status(
            b"06".to_vec(),
            TransportStatus {
                overrun: true,
                ..TransportStatus::CLEAN
            },
        ))
        .unwrap();
        drop(tx);

        assert_eq!(source.next_chunk().unwrap().unwrap().bytes, b"@00");
        let second = source.next_chunk().unwrap().unwrap();
        assert!(second.status.overrun);
        assert!(source.next_chunk().unwrap().is_none());
    }
}
