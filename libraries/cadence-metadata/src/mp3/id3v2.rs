//! ID3v2 tag reader covering the 2.2, 2.3 and 2.4 frame layouts.
//!
//! Tags may be concatenated; each one is consumed fully before the next
//! is sought within a window bounded by the previous tag's declared size.
//! The total number of bytes consumed is reported back so the MPEG frame
//! sweep can start right after the tag data.

use crate::text::decode_text_frame;
use crate::util::read_fill;
use std::io::{self, Read, Seek, SeekFrom};
use tracing::{debug, warn};

const TAG_HEADER_SIZE: usize = 10;
const FRAME_V22_HEADER_SIZE: usize = 6;
const FRAME_V23_V24_HEADER_SIZE: usize = 10;

/// Parsed 10-byte tag header.
///
/// ```text
/// ID3v2/file identifier      "ID3"
/// ID3v2 version              $04 00
/// ID3v2 flags                %abcd0000
/// ID3v2 size             4 * %0xxxxxxx
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    /// Major version (2, 3 or 4 are usable)
    pub version: u8,
    /// Revision byte
    pub revision: u8,
    /// Unsynchronisation flag
    pub unsynchronisation: bool,
    /// Extended header follows the tag header
    pub extended_header: bool,
    /// Experimental indicator
    pub experimental: bool,
    /// Footer present
    pub footer: bool,
    /// Total tag size (synchsafe), excluding this header
    pub size: u32,
}

impl TagHeader {
    fn parse(data: &[u8; TAG_HEADER_SIZE]) -> Self {
        Self {
            version: data[3],
            revision: data[4],
            unsynchronisation: data[5] & 0x80 != 0,
            extended_header: data[5] & 0x40 != 0,
            experimental: data[5] & 0x20 != 0,
            footer: data[5] & 0x10 != 0,
            size: synchsafe_u32(&[data[6], data[7], data[8], data[9]]),
        }
    }
}

/// Title/artist/genre gathered from text frames across all tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TagFields {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
}

/// Decode a 4-byte synchsafe integer: the top bit of every byte is
/// ignored, so the value is `b0*2^21 + b1*2^14 + b2*2^7 + b3`.
pub fn synchsafe_u32(data: &[u8; 4]) -> u32 {
    (u32::from(data[0]) & 0x7F) << 21
        | (u32::from(data[1]) & 0x7F) << 14
        | (u32::from(data[2]) & 0x7F) << 7
        | (u32::from(data[3]) & 0x7F)
}

fn u32_be(data: &[u8]) -> u32 {
    u32::from(data[0]) << 24 | u32::from(data[1]) << 16 | u32::from(data[2]) << 8 | u32::from(data[3])
}

fn u24_be(data: &[u8]) -> u32 {
    u32::from(data[0]) << 16 | u32::from(data[1]) << 8 | u32::from(data[2])
}

/// Frame identifiers are uppercase letters and digits only; anything else
/// marks the padding at the end of the tag.
fn is_frame_id(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|&c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Read every ID3v2 tag from the start of the stream.
///
/// Returns the gathered text fields plus the total byte length of the
/// consumed tag data. Stream errors end the scan early with whatever was
/// gathered; a missing tag is simply zero consumed bytes.
pub(crate) fn read_tags<R: Read + Seek>(reader: &mut R) -> (TagFields, u64) {
    let mut fields = TagFields::default();
    let mut consumed = 0u64;
    if let Err(e) = scan_tags(reader, &mut fields, &mut consumed) {
        debug!(error = %e, "stopped reading ID3v2 tags early");
    }
    (fields, consumed)
}

fn scan_tags<R: Read + Seek>(
    reader: &mut R,
    fields: &mut TagFields,
    consumed: &mut u64,
) -> io::Result<()> {
    reader.seek(SeekFrom::Start(0))?;

    let mut header_buf = [0u8; TAG_HEADER_SIZE];
    loop {
        if read_fill(reader, &mut header_buf)? != TAG_HEADER_SIZE || &header_buf[..3] != b"ID3" {
            return Ok(());
        }
        let header = TagHeader::parse(&header_buf);

        if header.extended_header {
            skip_extended_header(reader)?;
        }

        match header.version {
            2 => scan_v22_frames(reader, fields)?,
            3 | 4 => scan_v23_v24_frames(reader, fields, header.version)?,
            version => {
                // Unrecognized major version: drop this tag instance and
                // stop, without counting its declared size as consumed.
                warn!(version, "unrecognized ID3v2 major version");
                return Ok(());
            }
        }

        *consumed += (TAG_HEADER_SIZE as u64) + u64::from(header.size);
        reader.seek(SeekFrom::Start(*consumed))?;

        // Tags are sometimes concatenated with padding in between; look
        // for another marker within the previous tag's own size.
        match find_next_tag(reader, header.size)? {
            Some(offset) => {
                *consumed += offset;
                reader.seek(SeekFrom::Start(*consumed))?;
            }
            None => return Ok(()),
        }
    }
}

/// Extended header: its own synchsafe size, then two flag bytes. Nothing
/// in it matters here, so it is skipped wholesale.
fn skip_extended_header<R: Read + Seek>(reader: &mut R) -> io::Result<()> {
    let mut data = [0u8; 4];
    reader.read_exact(&mut data)?;
    let size = synchsafe_u32(&data);
    reader.seek(SeekFrom::Current(i64::from(size) + 2))?;
    Ok(())
}

/// Search up to `window` bytes ahead for the next `"ID3"` marker.
fn find_next_tag<R: Read>(reader: &mut R, window: u32) -> io::Result<Option<u64>> {
    let mut data = vec![0u8; window as usize];
    let filled = read_fill(reader, &mut data)?;
    if filled < 3 {
        return Ok(None);
    }
    Ok(data[..filled]
        .windows(3)
        .position(|w| w == b"ID3")
        .map(|i| i as u64))
}

/// v2.2 frames: 3-character identifier, 24-bit plain size, no flags.
fn scan_v22_frames<R: Read + Seek>(reader: &mut R, fields: &mut TagFields) -> io::Result<()> {
    let mut header_buf = [0u8; FRAME_V22_HEADER_SIZE];
    loop {
        if read_fill(reader, &mut header_buf)? != FRAME_V22_HEADER_SIZE
            || !is_frame_id(&header_buf[..3])
        {
            return Ok(());
        }
        let size = u24_be(&header_buf[3..6]);
        match &header_buf[..3] {
            b"TT2" => read_text_into(reader, size, &mut fields.title)?,
            b"TP1" => read_text_into(reader, size, &mut fields.artist)?,
            b"TCO" => read_text_into(reader, size, &mut fields.genre)?,
            _ => {
                reader.seek(SeekFrom::Current(i64::from(size)))?;
            }
        }
    }
}

/// v2.3/v2.4 frames: 4-character identifier, 32-bit size (plain for v3,
/// synchsafe for v4), two flag bytes nothing here needs.
fn scan_v23_v24_frames<R: Read + Seek>(
    reader: &mut R,
    fields: &mut TagFields,
    version: u8,
) -> io::Result<()> {
    let mut header_buf = [0u8; FRAME_V23_V24_HEADER_SIZE];
    loop {
        if read_fill(reader, &mut header_buf)? != FRAME_V23_V24_HEADER_SIZE
            || !is_frame_id(&header_buf[..4])
        {
            return Ok(());
        }
        let size_bytes = [header_buf[4], header_buf[5], header_buf[6], header_buf[7]];
        let size = if version == 4 {
            synchsafe_u32(&size_bytes)
        } else {
            u32_be(&size_bytes)
        };
        match &header_buf[..4] {
            b"TIT2" => read_text_into(reader, size, &mut fields.title)?,
            b"TPE1" => read_text_into(reader, size, &mut fields.artist)?,
            b"TCON" => read_text_into(reader, size, &mut fields.genre)?,
            _ => {
                reader.seek(SeekFrom::Current(i64::from(size)))?;
            }
        }
    }
}

/// Decode a text frame payload; an empty decode keeps any earlier value.
fn read_text_into<R: Read>(
    reader: &mut R,
    size: u32,
    destination: &mut Option<String>,
) -> io::Result<()> {
    let mut payload = vec![0u8; size as usize];
    let filled = read_fill(reader, &mut payload)?;
    if filled < payload.len() {
        warn!(
            declared = payload.len(),
            read = filled,
            "text frame shorter than declared"
        );
    }
    if let Some(text) = decode_text_frame(&payload[..filled]) {
        *destination = Some(text);
    }
    Ok(())
}
