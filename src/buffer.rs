//! Partial-block staging buffer shared by both engine variants

/// Block size consumed by the per-block mixers, in bytes.
pub(crate) const BLOCK_SIZE: usize = 16;

/// Fixed-capacity staging buffer carrying the 0-15 leftover bytes between
/// ingestion calls. Owned by each engine instance; never shared.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockBuffer {
    bytes: [u8; BLOCK_SIZE],
    len: usize,
}

impl BlockBuffer {
    pub(crate) fn new() -> Self {
        Self {
            bytes: [0; BLOCK_SIZE],
            len: 0,
        }
    }

    /// Top up the buffer from `data`. Returns the completed block, if this
    /// call filled the buffer to a whole block, together with the unconsumed
    /// remainder of `data`. A completed block leaves the buffer empty.
    pub(crate) fn fill<'a>(&mut self, data: &'a [u8]) -> (Option<[u8; BLOCK_SIZE]>, &'a [u8]) {
        if self.len == 0 {
            return (None, data);
        }

        let take = (BLOCK_SIZE - self.len).min(data.len());
        self.bytes[self.len..self.len + take].copy_from_slice(&data[..take]);
        self.len += take;

        if self.len == BLOCK_SIZE {
            self.len = 0;
            (Some(self.bytes), &data[take..])
        } else {
            (None, &data[take..])
        }
    }

    /// Stash a sub-block remainder. Callers only hand this at most 15 bytes
    /// while the buffer is empty.
    pub(crate) fn stash(&mut self, data: &[u8]) {
        debug_assert!(self.len + data.len() < BLOCK_SIZE);
        self.bytes[self.len..self.len + data.len()].copy_from_slice(data);
        self.len += data.len();
    }

    /// The buffered tail bytes, 0-15 of them.
    pub(crate) fn tail(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}
