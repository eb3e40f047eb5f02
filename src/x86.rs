//! MurmurHash3 x86-128 streaming engine
//!
//! Compatibility variant: produces canonical MurmurHash3 x86_128 digests,
//! for matching fingerprint corpora built with 32-bit engines (whose 64-bit
//! digests are the first 8 digest bytes read little-endian). Prefer
//! [`Murmur3x64`] for new fingerprints on 64-bit hosts.
//!
//! [`Murmur3x64`]: crate::Murmur3x64

use crate::buffer::BlockBuffer;
use crate::{Digest128, StreamHasher};

const C1: u32 = 0x239b_961b;
const C2: u32 = 0xab0e_9789;
const C3: u32 = 0x38b3_4ae5;
const C4: u32 = 0xa1e3_8b93;

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Partial word from up to 4 tail bytes, low byte first.
#[inline]
fn tail_word(bytes: &[u8]) -> u32 {
    let mut k = 0u32;
    for (i, &b) in bytes.iter().enumerate() {
        k ^= u32::from(b) << (i * 8);
    }
    k
}

/// Streaming MurmurHash3 x86-128 hasher.
///
/// Four u32 accumulator lanes over the same 16-byte block cadence as the
/// x64 engine; the staging buffer and digest-purity rules are identical.
#[derive(Debug, Clone)]
pub struct Murmur3x86 {
    h: [u32; 4],
    total_len: u64,
    tail: BlockBuffer,
}

impl Murmur3x86 {
    /// Create an engine with the default seed of 0.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create an engine with an explicit seed mixed into all four lanes.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            h: [seed; 4],
            total_len: 0,
            tail: BlockBuffer::new(),
        }
    }

    fn mix_block(&mut self, block: &[u8; 16]) {
        let mut k1 = u32::from_le_bytes(block[..4].try_into().unwrap());
        let mut k2 = u32::from_le_bytes(block[4..8].try_into().unwrap());
        let mut k3 = u32::from_le_bytes(block[8..12].try_into().unwrap());
        let mut k4 = u32::from_le_bytes(block[12..].try_into().unwrap());
        let [mut h1, mut h2, mut h3, mut h4] = self.h;

        k1 = k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
        h1 ^= k1;
        h1 = h1.rotate_left(19).wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x561c_cd1b);

        k2 = k2.wrapping_mul(C2).rotate_left(16).wrapping_mul(C3);
        h2 ^= k2;
        h2 = h2.rotate_left(17).wrapping_add(h3);
        h2 = h2.wrapping_mul(5).wrapping_add(0x0bca_a747);

        k3 = k3.wrapping_mul(C3).rotate_left(17).wrapping_mul(C4);
        h3 ^= k3;
        h3 = h3.rotate_left(15).wrapping_add(h4);
        h3 = h3.wrapping_mul(5).wrapping_add(0x96cd_1c35);

        k4 = k4.wrapping_mul(C4).rotate_left(18).wrapping_mul(C1);
        h4 ^= k4;
        h4 = h4.rotate_left(13).wrapping_add(h1);
        h4 = h4.wrapping_mul(5).wrapping_add(0x32ac_3b17);

        self.h = [h1, h2, h3, h4];
    }

    /// Digest as four u32 lane words, h1 first.
    pub fn finish128_words(&self) -> [u32; 4] {
        let [mut h1, mut h2, mut h3, mut h4] = self.h;
        let tail = self.tail.tail();

        if tail.len() > 12 {
            let k4 = tail_word(&tail[12..])
                .wrapping_mul(C4)
                .rotate_left(18)
                .wrapping_mul(C1);
            h4 ^= k4;
        }
        if tail.len() > 8 {
            let k3 = tail_word(&tail[8..tail.len().min(12)])
                .wrapping_mul(C3)
                .rotate_left(17)
                .wrapping_mul(C4);
            h3 ^= k3;
        }
        if tail.len() > 4 {
            let k2 = tail_word(&tail[4..tail.len().min(8)])
                .wrapping_mul(C2)
                .rotate_left(16)
                .wrapping_mul(C3);
            h2 ^= k2;
        }
        if !tail.is_empty() {
            let k1 = tail_word(&tail[..tail.len().min(4)])
                .wrapping_mul(C1)
                .rotate_left(15)
                .wrapping_mul(C2);
            h1 ^= k1;
        }

        // The reference folds the byte count in as a 32-bit word.
        let len = self.total_len as u32;
        h1 ^= len;
        h2 ^= len;
        h3 ^= len;
        h4 ^= len;

        h1 = h1
            .wrapping_add(h2)
            .wrapping_add(h3)
            .wrapping_add(h4);
        h2 = h2.wrapping_add(h1);
        h3 = h3.wrapping_add(h1);
        h4 = h4.wrapping_add(h1);

        h1 = fmix32(h1);
        h2 = fmix32(h2);
        h3 = fmix32(h3);
        h4 = fmix32(h4);

        h1 = h1
            .wrapping_add(h2)
            .wrapping_add(h3)
            .wrapping_add(h4);
        h2 = h2.wrapping_add(h1);
        h3 = h3.wrapping_add(h1);
        h4 = h4.wrapping_add(h1);

        [h1, h2, h3, h4]
    }
}

impl StreamHasher for Murmur3x86 {
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
        let words = self.finish128_words();
        let mut out = [0u8; 16];
        for (slot, word) in out.chunks_exact_mut(4).zip(words) {
            slot.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    fn bytes_ingested(&self) -> u64 {
        self.total_len
    }
}

impl Default for Murmur3x86 {
    fn default() -> Self {
        Self::new()
    }
}
