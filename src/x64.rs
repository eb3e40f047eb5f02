//! MurmurHash3 x64-128 streaming engine

use crate::buffer::BlockBuffer;
use crate::{Digest128, StreamHasher};

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

/// Streaming MurmurHash3 x64-128 hasher.
///
/// Two u64 accumulator lanes fed 16-byte blocks; leftover bytes are carried
/// in an owned staging buffer until the next call or finalization. Lanes
/// only ever reflect whole consumed blocks, so a digest can be taken at any
/// point without disturbing further ingestion.
#[derive(Debug, Clone)]
pub struct Murmur3x64 {
    h1: u64,
    h2: u64,
    total_len: u64,
    tail: BlockBuffer,
}

impl Murmur3x64 {
    /// Create an engine with the default seed of 0.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create an engine with an explicit seed mixed into both lanes.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            h1: seed,
            h2: seed,
            total_len: 0,
            tail: BlockBuffer::new(),
        }
    }

    /// Fold one 16-byte block into the lanes. Wrapping arithmetic
    /// throughout; overflow is part of the algorithm.
    fn mix_block(&mut self, block: &[u8; 16]) {
        let mut k1 = u64::from_le_bytes(block[..8].try_into().unwrap());
        let mut k2 = u64::from_le_bytes(block[8..].try_into().unwrap());

        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        self.h1 ^= k1;

        self.h1 = self.h1.rotate_left(27);
        self.h1 = self.h1.wrapping_add(self.h2);
        self.h1 = self.h1.wrapping_mul(5).wrapping_add(0x52dc_e729);

        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        self.h2 ^= k2;

        self.h2 = self.h2.rotate_left(31);
        self.h2 = self.h2.wrapping_add(self.h1);
        self.h2 = self.h2.wrapping_mul(5).wrapping_add(0x3849_5ab5);
    }

    /// Digest as two u64 lane words, h1 first.
    pub fn finish128_words(&self) -> (u64, u64) {
        let mut h1 = self.h1;
        let mut h2 = self.h2;
        let tail = self.tail.tail();

        // Tail: partial words built from the 0-15 leftover bytes, mixed with
        // the same constants as the body but without the lane cross-feed.
        if tail.len() > 8 {
            let mut k2: u64 = 0;
            for (i, &b) in tail[8..].iter().enumerate() {
                k2 ^= u64::from(b) << (i * 8);
            }
            k2 = k2.wrapping_mul(C2);
            k2 = k2.rotate_left(33);
            k2 = k2.wrapping_mul(C1);
            h2 ^= k2;
        }
        if !tail.is_empty() {
            let mut k1: u64 = 0;
            for (i, &b) in tail[..tail.len().min(8)].iter().enumerate() {
                k1 ^= u64::from(b) << (i * 8);
            }
            k1 = k1.wrapping_mul(C1);
            k1 = k1.rotate_left(31);
            k1 = k1.wrapping_mul(C2);
            h1 ^= k1;
        }

        h1 ^= self.total_len;
        h2 ^= self.total_len;

        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);

        h1 = fmix64(h1);
        h2 = fmix64(h2);

        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);

        (h1, h2)
    }
}

impl StreamHasher for Murmur3x64 {
    fn update(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.total_len += data.len() as u64;

        let (completed, data) = self.tail.fill(data);
        if let Some(block) = completed {
            self.mix_block(&block);
        }

        let mut blocks = data.chunks_exact(16);
        for block in blocks.by_ref() {
            self.mix_block(block.try_into().unwrap());
        }
        self.tail.stash(blocks.remainder());
    }

    fn finish128(&self) -> Digest128 {
        let (h1, h2) = self.finish128_words();
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&h1.to_le_bytes());
        out[8..].copy_from_slice(&h2.to_le_bytes());
        out
    }

    fn bytes_ingested(&self) -> u64 {
        self.total_len
    }
}

impl Default for Murmur3x64 {
    fn default() -> Self {
        Self::new()
    }
}
