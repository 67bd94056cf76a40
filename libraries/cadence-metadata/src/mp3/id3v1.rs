//! ID3v1 trailer tag: the fixed 128 bytes at the end of the file.
//!
//! Layout reference: <http://id3.org/ID3v1>

use super::consts;
use crate::text::{decode_windows1251, trim_trailing_padding};
use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

const TAG_SIZE: usize = 128;

/// A parsed ID3v1.0/1.1 tag. Only title/artist/genre surface into the
/// metadata record; the rest is kept because the trailer carries it anyway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Id3v1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Release year, `None` unless all four bytes are ASCII digits
    pub year: Option<u16>,
    pub comment: String,
    /// Track number, present only in the v1.1 layout
    pub track: Option<u8>,
    pub genre: String,
}

/// Read the trailer tag, if any. Absence (short file, missing `"TAG"`
/// marker, unreadable stream) is not an error.
pub(crate) fn read_tag<R: Read + Seek>(reader: &mut R) -> Option<Id3v1Tag> {
    if reader.seek(SeekFrom::End(-(TAG_SIZE as i64))).is_err() {
        debug!("file shorter than an ID3v1 trailer");
        return None;
    }

    let mut data = [0u8; TAG_SIZE];
    if let Err(e) = reader.read_exact(&mut data) {
        debug!(error = %e, "could not read ID3v1 trailer");
        return None;
    }
    if &data[..3] != b"TAG" {
        debug!("no ID3v1 trailer marker");
        return None;
    }

    let year = parse_year(&data[93..97]);
    let genre = consts::genre_name(data[127] as usize).unwrap_or("Other");

    // Byte 125 zero with byte 126 nonzero marks the v1.1 layout: the
    // comment loses its last two bytes to a NUL plus track number.
    let (comment, track) = if data[125] == 0 && data[126] != 0 {
        (&data[97..125], Some(data[126]))
    } else {
        (&data[97..127], None)
    };

    Some(Id3v1Tag {
        title: decode_field(&data[3..33]),
        artist: decode_field(&data[33..63]),
        album: decode_field(&data[63..93]),
        year,
        comment: decode_field(comment),
        track,
        genre: genre.to_string(),
    })
}

fn decode_field(bytes: &[u8]) -> String {
    decode_windows1251(trim_trailing_padding(bytes))
}

fn parse_year(bytes: &[u8]) -> Option<u16> {
    if bytes.iter().all(u8::is_ascii_digit) {
        std::str::from_utf8(bytes).ok()?.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn build_tag(genre: u8) -> [u8; TAG_SIZE] {
        let mut data = [0u8; TAG_SIZE];
        data[..3].copy_from_slice(b"TAG");
        data[3..3 + 9].copy_from_slice(b"Test Song");
        data[33..33 + 11].copy_from_slice(b"Test Artist");
        data[63..63 + 10].copy_from_slice(b"Test Album");
        data[93..97].copy_from_slice(b"1999");
        data[97..97 + 7].copy_from_slice(b"comment");
        data[127] = genre;
        data
    }

    #[test]
    fn parses_v1_0_layout() {
        let mut data = build_tag(17);
        // nonzero byte 125 keeps the full 30-byte comment
        data[124] = b'!';
        data[125] = b'!';
        let tag = read_tag(&mut Cursor::new(data)).unwrap();
        assert_eq!(tag.title, "Test Song");
        assert_eq!(tag.artist, "Test Artist");
        assert_eq!(tag.album, "Test Album");
        assert_eq!(tag.year, Some(1999));
        assert_eq!(tag.genre, "Rock");
        assert_eq!(tag.track, None);
    }

    #[test]
    fn parses_v1_1_track_number() {
        let mut data = build_tag(0);
        data[126] = 7;
        let tag = read_tag(&mut Cursor::new(data)).unwrap();
        assert_eq!(tag.track, Some(7));
        assert_eq!(tag.comment, "comment");
        assert_eq!(tag.genre, "Blues");
    }

    #[test]
    fn out_of_range_genre_is_other() {
        let data = build_tag(200);
        let tag = read_tag(&mut Cursor::new(data)).unwrap();
        assert_eq!(tag.genre, "Other");
    }

    #[test]
    fn non_digit_year_is_unknown() {
        let mut data = build_tag(0);
        data[93..97].copy_from_slice(b"19xx");
        let tag = read_tag(&mut Cursor::new(data)).unwrap();
        assert_eq!(tag.year, None);
    }

    #[test]
    fn decodes_windows1251_fields() {
        let mut data = build_tag(0);
        data[3..33].fill(0);
        // "Кино" in Windows-1251
        data[3..7].copy_from_slice(&[0xCA, 0xE8, 0xED, 0xEE]);
        let tag = read_tag(&mut Cursor::new(data)).unwrap();
        assert_eq!(tag.title, "Кино");
    }

    #[test]
    fn missing_marker_is_absent() {
        let data = [0u8; TAG_SIZE];
        assert_eq!(read_tag(&mut Cursor::new(data)), None);
    }

    #[test]
    fn short_file_is_absent() {
        let data = [0u8; 64];
        assert_eq!(read_tag(&mut Cursor::new(data)), None);
    }
}
