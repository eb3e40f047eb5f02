//! Ingestion surface shared by the engine variants

use std::io::{ErrorKind, Read};

use crate::{Digest128, Error, Result};

/// Read granularity when draining a byte source.
const READER_CHUNK: usize = 8 * 1024;

/// Streaming 128-bit hasher fed incrementally from byte-shaped sources.
///
/// Implementations guarantee chunk independence: feeding the same byte
/// sequence through any mix of the adapter methods, in any granularity,
/// yields the same digest. Digest accessors never mutate state and may be
/// interleaved with further ingestion.
pub trait StreamHasher {
    /// Absorb a slice of bytes.
    fn update(&mut self, data: &[u8]);

    /// Produce the 128-bit digest of everything absorbed so far.
    fn finish128(&self) -> Digest128;

    /// Total number of bytes absorbed so far.
    fn bytes_ingested(&self) -> u64;

    /// Absorb a single byte.
    fn update_byte(&mut self, byte: u8) {
        self.update(&[byte]);
    }

    /// Absorb `len` bytes of `data` starting at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if the range exceeds the buffer,
    /// including on offset+len overflow. Nothing is ingested on failure.
    fn update_range(&mut self, data: &[u8], offset: usize, len: usize) -> Result<()> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= data.len())
            .ok_or(Error::OutOfRange {
                offset,
                len,
                buf_len: data.len(),
            })?;
        self.update(&data[offset..end]);
        Ok(())
    }

    /// Drain a byte source to end-of-input, absorbing every chunk read.
    ///
    /// Returns the number of bytes ingested. A read failure is propagated
    /// as-is; no digest should be taken from a partially-consumed source.
    fn update_reader<R: Read>(&mut self, mut source: R) -> Result<u64>
    where
        Self: Sized,
    {
        let mut buf = [0u8; READER_CHUNK];
        let mut ingested = 0u64;
        loop {
            match source.read(&mut buf) {
                Ok(0) => return Ok(ingested),
                Ok(n) => {
                    self.update(&buf[..n]);
                    ingested += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Absorb text as its UTF-16 code units, each emitted as two bytes,
    /// low half first.
    ///
    /// Equivalent to feeding the explicit little-endian byte expansion of
    /// the code units through [`update`](Self::update); callers comparing
    /// against byte-oriented input must use the same expansion.
    fn update_utf16(&mut self, text: &str) {
        for unit in text.encode_utf16() {
            self.update(&unit.to_le_bytes());
        }
    }

    /// The first 8 digest bytes as a little-endian u64.
    fn finish64(&self) -> u64 {
        let digest = self.finish128();
        u64::from_le_bytes(digest[..8].try_into().unwrap())
    }
}
