use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use anyhow::Context;

use super::{ByteSource, ReceivedChunk};

/// Reads chunks from any `Read` implementation: files, stdin, or a serial
/// device node. Readers carry no transport status, so every chunk is clean.
pub struct ReaderSource<R> {
    reader: R,
    chunk_size: usize,
}

impl<R: Read + Send> ReaderSource<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl ReaderSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, chunk_size: usize) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Self::new(BufReader::new(file), chunk_size))
    }
}

impl ReaderSource<io::Stdin> {
    pub fn stdin(chunk_size: usize) -> Self {
        Self::new(io::stdin(), chunk_size)
    }
}

impl<R: Read + Send> ByteSource for ReaderSource<R> {
    fn next_chunk(&mut self) -> anyhow::Result<Option<ReceivedChunk>> {
        let mut buf = vec![0; self.chunk_size];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(n) => {
                    buf.truncate(n);
                    return Ok(Some(ReceivedChunk::clean(buf)));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("Failed to read input"),
            }
        }
    }
}
