//! Byte-for-byte file comparison
//!
//! Compares file contents only; timestamps, permissions and other metadata
//! never influence the result.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default read buffer used when comparing files
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Check whether two files hold identical bytes
///
/// # Errors
/// Returns the underlying I/O error if either file cannot be opened or read
pub fn files_identical(left: &Path, right: &Path) -> io::Result<bool> {
    files_identical_chunked(left, right, DEFAULT_CHUNK_SIZE)
}

/// Check whether two files hold identical bytes, reading `chunk_size` bytes
/// from each side at a time
///
/// # Errors
/// Returns the underlying I/O error if either file cannot be opened or read
pub fn files_identical_chunked(left: &Path, right: &Path, chunk_size: usize) -> io::Result<bool> {
    let mut left_file = File::open(left)?;
    let mut right_file = File::open(right)?;

    if left_file.metadata()?.len() != right_file.metadata()?.len() {
        return Ok(false);
    }

    let chunk_size = chunk_size.max(1);
    let mut left_buf = vec![0u8; chunk_size];
    let mut right_buf = vec![0u8; chunk_size];

    loop {
        let left_len = fill(&mut left_file, &mut left_buf)?;
        let right_len = fill(&mut right_file, &mut right_buf)?;

        if left_len != right_len || left_buf[..left_len] != right_buf[..right_len] {
            return Ok(false);
        }
        if left_len == 0 {
            return Ok(true);
        }
    }
}

/// Read until `buf` is full or EOF; returns the number of bytes read
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
