//! MP3 metadata extraction.
//!
//! Orchestrates the three independent readers: the ID3v1 trailer, the
//! ID3v2 tag chain, and the MPEG frame sweep. Tag readers degrade to
//! empty fields; only a stream with no identifiable audio frames fails.

mod consts;
pub mod frame;
mod id3v1;
mod id3v2;

pub use frame::{ChannelMode, Emphasis, FrameError, FrameHeader, Layer, MpegVersion};
pub use id3v2::{synchsafe_u32, TagHeader};

use crate::error::Result;
use cadence_core::AudioMetadata;
use std::io::{Read, Seek};

/// Parse title, artist, genre, average bitrate and duration from an MP3
/// stream.
///
/// ID3v2 values overwrite ID3v1 values for the same field. A file with no
/// tags at all still succeeds as long as audio frames are found; its
/// genre comes back as `"Other"`.
pub fn parse_metadata<R: Read + Seek>(reader: &mut R) -> Result<AudioMetadata> {
    let mut metadata = AudioMetadata::new();

    if let Some(tag) = id3v1::read_tag(reader) {
        metadata.title = tag.title;
        metadata.artist = tag.artist;
        metadata.genre = tag.genre;
    }

    let (fields, id3v2_len) = id3v2::read_tags(reader);
    if let Some(title) = fields.title {
        metadata.title = title;
    }
    if let Some(artist) = fields.artist {
        metadata.artist = artist;
    }
    if let Some(genre) = fields.genre {
        metadata.genre = genre;
    }

    let sweep = frame::scan_frames(reader, id3v2_len)?;
    metadata.duration_secs = sweep.duration_secs;
    metadata.bitrate_kbps = sweep.bitrate_kbps;

    normalize_genre(&mut metadata.genre);

    Ok(metadata)
}

/// Replace a literal `"(N)"` genre with the ID3v1 table name it indexes.
/// An empty genre, or a parenthetical that resolves to no table entry,
/// becomes `"Other"`.
fn normalize_genre(genre: &mut String) {
    if genre.is_empty() {
        *genre = "Other".to_string();
        return;
    }
    if let Some(inner) = genre.strip_prefix('(').and_then(|g| g.strip_suffix(')')) {
        let name = inner
            .parse::<usize>()
            .ok()
            .and_then(consts::genre_name)
            .unwrap_or("Other");
        *genre = name.to_string();
    }
}
