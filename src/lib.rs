//! murmur3-stream: streaming MurmurHash3 128-bit fingerprints
//!
//! Non-cryptographic content fingerprinting from data that arrives in
//! arbitrarily many pieces. The digest is bit-identical regardless of how
//! the input is partitioned across calls: one `update` over a whole buffer,
//! thousands of single-byte calls, or a mix of slice/reader/text ingestion
//! all produce the same result for the same byte content.
//!
//! # Features
//! - Single-shot and incremental hashing
//! - Two 128-bit variants: x64 (two u64 lanes) and x86 (four u32 lanes)
//! - Reader and file hashing with progress callbacks
//! - Parallel multi-buffer hashing
//!
//! # Example
//!
//! ```
//! use murmur3_stream::{hash128, Murmur3x64, StreamHasher};
//!
//! let mut hasher = Murmur3x64::new();
//! hasher.update(b"split ");
//! hasher.update(b"input");
//! assert_eq!(hasher.finish128(), hash128(b"split input"));
//! ```

#![warn(missing_docs)]

use rayon::prelude::*;

mod buffer;
mod file;
mod hasher;
mod x64;
mod x86;

pub use file::{
    hash_file, hash_file_with_buffer, hash_file_with_progress, hash_reader,
    hash_reader_with_progress, hash_reader_with_seed,
};
pub use hasher::StreamHasher;
pub use x64::Murmur3x64;
pub use x86::Murmur3x86;

/// Error type for hashing operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested range falls outside the source buffer
    #[error("range out of bounds: offset {offset} + len {len} exceeds buffer of {buf_len} bytes")]
    OutOfRange {
        /// Start of the requested range
        offset: usize,
        /// Length of the requested range
        len: usize,
        /// Length of the buffer the range was taken from
        buf_len: usize,
    },

    /// I/O error while draining a byte source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, Error>;

/// 128-bit digest: lane words serialized little-endian, lowest lane first
pub type Digest128 = [u8; 16];

/// Hash a buffer with the x64-128 variant and seed 0
pub fn hash128(data: &[u8]) -> Digest128 {
    hash128_with_seed(data, 0)
}

/// Hash a buffer with the x64-128 variant and an explicit seed
pub fn hash128_with_seed(data: &[u8], seed: u64) -> Digest128 {
    let mut hasher = Murmur3x64::with_seed(seed);
    hasher.update(data);
    hasher.finish128()
}

/// 64-bit digest of a buffer (x64-128 variant, seed 0)
pub fn hash64(data: &[u8]) -> u64 {
    hash64_with_seed(data, 0)
}

/// 64-bit digest of a buffer (x64-128 variant, explicit seed)
pub fn hash64_with_seed(data: &[u8], seed: u64) -> u64 {
    let mut hasher = Murmur3x64::with_seed(seed);
    hasher.update(data);
    hasher.finish64()
}

/// Hash a buffer with the x86-128 compatibility variant and seed 0
pub fn hash128_x86(data: &[u8]) -> Digest128 {
    hash128_x86_with_seed(data, 0)
}

/// Hash a buffer with the x86-128 compatibility variant and an explicit seed
pub fn hash128_x86_with_seed(data: &[u8], seed: u32) -> Digest128 {
    let mut hasher = Murmur3x86::with_seed(seed);
    hasher.update(data);
    hasher.finish128()
}

/// Hash multiple independent buffers in parallel (x64-128 variant)
pub fn hash_chunks_parallel(chunks: &[&[u8]], seed: u64) -> Vec<Digest128> {
    chunks
        .par_iter()
        .map(|chunk| hash128_with_seed(chunk, seed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash() {
        let hash1 = hash128(b"hello");
        let hash2 = hash128(b"hello");
        let hash3 = hash128(b"world");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_hash64_is_first_word() {
        let digest = hash128(b"some content");
        let word = u64::from_le_bytes(digest[..8].try_into().unwrap());
        assert_eq!(hash64(b"some content"), word);
    }

    #[test]
    fn test_seed_changes_digest() {
        let a = hash128_with_seed(b"same bytes", 1);
        let b = hash128_with_seed(b"same bytes", 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
        let chunks: Vec<&[u8]> = data.chunks(4096).collect();

        let parallel = hash_chunks_parallel(&chunks, 7);
        let sequential: Vec<_> = chunks.iter().map(|c| hash128_with_seed(c, 7)).collect();

        assert_eq!(parallel, sequential);
    }
}
