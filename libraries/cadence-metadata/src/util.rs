/// Shared stream and numeric helpers
use crate::error::{MetadataError, Result};
use std::io::{self, Read};

/// Round to the nearest integer with ties away from zero.
///
/// Values closer to zero than 0.5 always round to 0.
pub(crate) fn round(value: f64) -> i64 {
    if value.abs() < 0.5 {
        return 0;
    }
    (value + 0.5f64.copysign(value)) as i64
}

/// Read until `buf` is full or the stream ends, returning the byte count.
///
/// A plain `read` may return short even mid-stream; callers that treat a
/// partial fill as end-of-data need the loop.
pub(crate) fn read_fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
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

/// Read exactly `buf.len()` bytes for a fixed-size structure.
///
/// A short read becomes `TruncatedRead` naming the structure.
pub(crate) fn read_struct<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    what: &'static str,
) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            MetadataError::TruncatedRead {
                what,
                needed: buf.len(),
            }
        } else {
            MetadataError::Io(e)
        }
    })
}
