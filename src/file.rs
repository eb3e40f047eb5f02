//! File and reader fingerprinting helpers

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::{Digest128, Murmur3x64, Result, StreamHasher};

/// Default read buffer size for file hashing (64KB)
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Hash all bytes from a reader until end-of-input (x64-128 variant, seed 0)
pub fn hash_reader<R: Read>(reader: R) -> Result<Digest128> {
    hash_reader_with_seed(reader, 0)
}

/// Hash all bytes from a reader with an explicit seed
pub fn hash_reader_with_seed<R: Read>(reader: R, seed: u64) -> Result<Digest128> {
    let mut hasher = Murmur3x64::with_seed(seed);
    hasher.update_reader(reader)?;
    Ok(hasher.finish128())
}

/// Hash a file's contents (x64-128 variant, seed 0)
pub fn hash_file<P: AsRef<Path>>(path: P) -> Result<Digest128> {
    hash_file_with_buffer(path, DEFAULT_BUFFER_SIZE)
}

/// Hash a file's contents with a custom read buffer size
pub fn hash_file_with_buffer<P: AsRef<Path>>(path: P, buffer_size: usize) -> Result<Digest128> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut hasher = Murmur3x64::new();
    let ingested = hasher.update_reader(BufReader::with_capacity(buffer_size, file))?;

    debug!(path = %path.display(), bytes = ingested, "hashed file");
    Ok(hasher.finish128())
}

/// Hash all bytes from a reader, reporting the running byte count to a
/// callback after each chunk read.
pub fn hash_reader_with_progress<R, F>(mut reader: R, mut progress: F) -> Result<Digest128>
where
    R: Read,
    F: FnMut(u64),
{
    let mut hasher = Murmur3x64::new();
    let mut buf = vec![0u8; DEFAULT_BUFFER_SIZE];
    let mut ingested = 0u64;

    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buf[..n]);
                ingested += n as u64;
                progress(ingested);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(hasher.finish128())
}

/// Hash a file's contents, reporting the running byte count to a callback
/// after each chunk read.
pub fn hash_file_with_progress<P, F>(path: P, mut progress: F) -> Result<Digest128>
where
    P: AsRef<Path>,
    F: FnMut(u64),
{
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut ingested = 0u64;
    let digest = hash_reader_with_progress(file, |n| {
        ingested = n;
        progress(n);
    })?;

    debug!(path = %path.display(), bytes = ingested, "hashed file");
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash128;
    use std::io::Write;

    fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_hash_file_matches_in_memory() {
        let data: Vec<u8> = (0..200_000).map(|i| (i % 253) as u8).collect();
        let file = write_temp(&data);

        assert_eq!(hash_file(file.path()).unwrap(), hash128(&data));
    }

    #[test]
    fn test_hash_file_buffer_size_is_irrelevant() {
        let data: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
        let file = write_temp(&data);

        let small = hash_file_with_buffer(file.path(), 7).unwrap();
        let large = hash_file_with_buffer(file.path(), 1 << 20).unwrap();
        assert_eq!(small, large);
        assert_eq!(small, hash128(&data));
    }

    #[test]
    fn test_hash_empty_file() {
        let file = write_temp(b"");
        assert_eq!(hash_file(file.path()).unwrap(), hash128(b""));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(hash_file("/definitely/not/here").is_err());
    }

    #[test]
    fn test_progress_reaches_total() {
        let data = vec![0x5Au8; 150_000];
        let file = write_temp(&data);

        let mut last = 0u64;
        let digest = hash_file_with_progress(file.path(), |n| last = n).unwrap();

        assert_eq!(last, data.len() as u64);
        assert_eq!(digest, hash128(&data));
    }

    #[test]
    fn test_hash_reader_with_progress() {
        let data: Vec<u8> = (0..200_000).map(|i| (i % 249) as u8).collect();

        let mut reports = Vec::new();
        let digest =
            hash_reader_with_progress(&data[..], |n| reports.push(n)).unwrap();

        assert_eq!(digest, hash128(&data));
        assert_eq!(reports.last().copied(), Some(data.len() as u64));
        // Running counts are cumulative and strictly increasing.
        assert!(reports.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_hash_reader_seeded() {
        let data = b"seeded reader content";
        let digest = hash_reader_with_seed(&data[..], 99).unwrap();
        assert_eq!(digest, crate::hash128_with_seed(data, 99));
    }
}
