//! FLAC metadata extraction.
//!
//! Locates the `"fLaC"` stream marker, reads STREAMINFO for duration,
//! walks the metadata block chain for a Vorbis comment, and derives the
//! bitrate from total file size over duration.

mod blocks;
mod vorbis;

pub use blocks::{BlockHeader, StreamInfo, VORBIS_COMMENT};

use crate::error::{MetadataError, Result};
use crate::util::{read_fill, round};
use cadence_core::AudioMetadata;
use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

const STREAM_MARKER: [u8; 4] = *b"fLaC";

/// How far into the file the marker is searched for when it is not at
/// offset 0 (some files carry leading tags or junk).
const MARKER_SEARCH_WINDOW: usize = 100_000;

/// Parse title, artist, genre, bitrate and duration from a FLAC stream.
///
/// A missing Vorbis comment block leaves the text fields empty; a missing
/// marker, truncated STREAMINFO, or zero duration fails the parse.
pub fn parse_metadata<R: Read + Seek>(reader: &mut R) -> Result<AudioMetadata> {
    find_marker(reader)?;

    let stream_info_header = BlockHeader::read(reader)?;
    let info = StreamInfo::read(reader)?;

    let duration_secs =
        round(info.total_samples as f64 / f64::from(info.sample_rate_hz)) as u64;
    if duration_secs == 0 {
        return Err(MetadataError::MalformedField("FLAC duration is zero"));
    }

    let mut metadata = AudioMetadata::new();
    metadata.duration_secs = duration_secs as u32;

    if !stream_info_header.is_last {
        if let Some(payload) = find_vorbis_comment(reader) {
            vorbis::apply_comments(&payload, &mut metadata);
        }
    }

    metadata.bitrate_kbps = compute_bitrate(reader, duration_secs)?;

    Ok(metadata)
}

/// Position the stream just past the `"fLaC"` marker.
///
/// The fast path checks offset 0; otherwise the first 100 000 bytes are
/// scanned for a marker start.
fn find_marker<R: Read + Seek>(reader: &mut R) -> Result<()> {
    reader.seek(SeekFrom::Start(0))?;
    let mut head = [0u8; 4];
    if read_fill(reader, &mut head)? == 4 && head == STREAM_MARKER {
        return Ok(());
    }

    reader.seek(SeekFrom::Start(0))?;
    let mut window = vec![0u8; MARKER_SEARCH_WINDOW + STREAM_MARKER.len() - 1];
    let filled = read_fill(reader, &mut window)?;

    let searchable = filled.min(MARKER_SEARCH_WINDOW + STREAM_MARKER.len() - 1);
    if let Some(offset) = window[..searchable]
        .windows(4)
        .take(MARKER_SEARCH_WINDOW)
        .position(|w| w == STREAM_MARKER)
    {
        reader.seek(SeekFrom::Start(offset as u64 + 4))?;
        return Ok(());
    }

    Err(MetadataError::FormatNotRecognized("flac: stream marker not found"))
}

/// Walk block headers until a Vorbis comment block is found, returning
/// its payload. Stops at the last-block flag; absence is not an error.
fn find_vorbis_comment<R: Read + Seek>(reader: &mut R) -> Option<Vec<u8>> {
    loop {
        let header = match BlockHeader::read(reader) {
            Ok(header) => header,
            Err(e) => {
                debug!(error = %e, "stopped scanning FLAC metadata blocks");
                return None;
            }
        };

        if header.block_type == VORBIS_COMMENT {
            let mut payload = vec![0u8; header.length as usize];
            if let Err(e) = reader.read_exact(&mut payload) {
                debug!(error = %e, "vorbis comment block shorter than declared");
                return None;
            }
            return Some(payload);
        }

        if header.is_last {
            return None;
        }
        if let Err(e) = reader.seek(SeekFrom::Current(i64::from(header.length))) {
            debug!(error = %e, "could not skip FLAC metadata block");
            return None;
        }
    }
}

/// Approximate the transport bitrate in kbit/s from total byte size over
/// duration. The divisor 128 stands in for bytes-to-kbit conversion
/// (x8 / 1000, rounded to a power of two).
fn compute_bitrate<R: Seek>(reader: &mut R, duration_secs: u64) -> Result<u32> {
    let file_size = reader.seek(SeekFrom::End(0))?;
    Ok((file_size / 128 / duration_secs) as u32)
}
