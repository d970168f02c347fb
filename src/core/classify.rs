//! Text/binary classification from a file's leading bytes.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::trace;

/// Number of leading bytes inspected per file.
pub const SAMPLE_SIZE: usize = 1024;

/// True when the first [`SAMPLE_SIZE`] bytes of `path` look like text.
///
/// Unopenable or unreadable files are reported as binary so callers skip them.
pub fn is_text(path: &Path) -> bool {
    let sample = match read_sample(path) {
        Ok(s) => s,
        Err(err) => {
            trace!(path = %path.display(), error = %err, "sample read failed");
            return false;
        }
    };
    is_text_bytes(&sample)
}

/// Byte heuristic behind [`is_text`].
///
/// NUL and every C0 control code except 9..=13 (tab, LF, VT, FF, CR) mark
/// the sample as binary. Bytes >= 32 pass unchecked; no UTF-8 validation.
pub fn is_text_bytes(sample: &[u8]) -> bool {
    !sample.iter().any(|&b| b < 9 || (b > 13 && b < 32))
}

/// Read up to `SAMPLE_SIZE` bytes, tolerating short reads.
fn read_sample(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(SAMPLE_SIZE);
    file.take(SAMPLE_SIZE as u64).read_to_end(&mut buf)?;
    Ok(buf)
}
