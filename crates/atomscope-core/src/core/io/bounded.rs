use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// The result of a size-capped read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedRead {
    pub bytes: Vec<u8>,
    /// Whether the file held more bytes than were returned.
    pub truncated: bool,
    /// The file length reported by the filesystem at open time.
    pub file_len: u64,
}

/// Reads at most `max_bytes` bytes from the start of `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_bounded(path: &Path, max_bytes: usize) -> io::Result<BoundedRead> {
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();

    let capacity = usize::try_from(file_len).unwrap_or(max_bytes).min(max_bytes);
    let mut bytes = Vec::with_capacity(capacity);
    // One extra byte tells a file of exactly `max_bytes` apart from a longer one.
    file.take((max_bytes as u64).saturating_add(1)).read_to_end(&mut bytes)?;

    let truncated = bytes.len() > max_bytes;
    bytes.truncate(max_bytes);

    Ok(BoundedRead {
        bytes,
        truncated,
        file_len,
    })
}

/// Reads the whole file, or at most `limit` bytes when a limit is given.
pub fn read_with_limit(path: &Path, limit: Option<usize>) -> io::Result<BoundedRead> {
    match limit {
        Some(max_bytes) => read_bounded(path, max_bytes),
        None => {
            let bytes = std::fs::read(path)?;
            Ok(BoundedRead {
                file_len: bytes.len() as u64,
                bytes,
                truncated: false,
            })
        }
    }
}
