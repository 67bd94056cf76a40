//! FLAC metadata block headers and the STREAMINFO block.

use crate::error::{MetadataError, Result};
use crate::util::read_struct;
use std::io::Read;

/// Block type code for a Vorbis comment block.
pub const VORBIS_COMMENT: u8 = 4;

const BLOCK_HEADER_SIZE: usize = 4;
const STREAM_INFO_SIZE: usize = 34;

/// One metadata block header: last-block flag, 7-bit type, 24-bit length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Set on the final metadata block before the audio frames
    pub is_last: bool,
    /// Block type code (0 = STREAMINFO, 4 = VORBIS_COMMENT, ...)
    pub block_type: u8,
    /// Length in bytes of the block body
    pub length: u32,
}

impl BlockHeader {
    /// Read and parse the next 4-byte block header.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut data = [0u8; BLOCK_HEADER_SIZE];
        read_struct(reader, &mut data, "FLAC block header")?;
        Ok(Self {
            is_last: data[0] & 0x80 != 0,
            block_type: data[0] & 0x7F,
            length: u32::from(data[1]) << 16 | u32::from(data[2]) << 8 | u32::from(data[3]),
        })
    }
}

/// The two STREAMINFO fields the engine needs, pulled from fixed bit
/// offsets within the 34-byte block body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    /// Sample rate in Hz (20-bit field)
    pub sample_rate_hz: u32,
    /// Total samples in the stream (36-bit field)
    pub total_samples: u64,
}

impl StreamInfo {
    /// Read and parse the mandatory first metadata block body.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut data = [0u8; STREAM_INFO_SIZE];
        read_struct(reader, &mut data, "FLAC STREAMINFO")?;

        // Bytes 10..13 pack the 20-bit sample rate in their top bits;
        // the low nibble of byte 13 is the top of the 36-bit sample count.
        let sample_rate_hz =
            (u32::from(data[10]) << 16 | u32::from(data[11]) << 8 | u32::from(data[12])) >> 4;
        let total_samples = u64::from(data[13] & 0x0F) << 32
            | u64::from(data[14]) << 24
            | u64::from(data[15]) << 16
            | u64::from(data[16]) << 8
            | u64::from(data[17]);

        if sample_rate_hz == 0 {
            return Err(MetadataError::MalformedField("FLAC sample rate is zero"));
        }

        Ok(Self {
            sample_rate_hz,
            total_samples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn block_header_fields() {
        let header = BlockHeader::read(&mut Cursor::new([0x84, 0x00, 0x01, 0x02])).unwrap();
        assert!(header.is_last);
        assert_eq!(header.block_type, VORBIS_COMMENT);
        assert_eq!(header.length, 258);

        let header = BlockHeader::read(&mut Cursor::new([0x00, 0x00, 0x00, 0x22])).unwrap();
        assert!(!header.is_last);
        assert_eq!(header.block_type, 0);
        assert_eq!(header.length, 34);
    }

    #[test]
    fn block_header_truncated() {
        let err = BlockHeader::read(&mut Cursor::new([0x00, 0x00])).unwrap_err();
        assert!(matches!(err, MetadataError::TruncatedRead { .. }));
    }

    #[test]
    fn stream_info_bit_extraction() {
        let mut body = [0u8; STREAM_INFO_SIZE];
        // 44100 Hz in the top 20 bits of bytes 10..13
        body[10] = 0x0A;
        body[11] = 0xC4;
        body[12] = 0x40;
        // 441000 samples in the low nibble of byte 13 plus bytes 14..18
        body[14] = 0x00;
        body[15] = 0x06;
        body[16] = 0xBA;
        body[17] = 0xA8;

        let info = StreamInfo::read(&mut Cursor::new(body)).unwrap();
        assert_eq!(info.sample_rate_hz, 44_100);
        assert_eq!(info.total_samples, 441_000);
    }

    #[test]
    fn stream_info_uses_high_nibble_of_sample_count() {
        let mut body = [0u8; STREAM_INFO_SIZE];
        body[10] = 0x0A;
        body[11] = 0xC4;
        body[12] = 0x4F; // low nibble belongs to neither field
        body[13] = 0x01;
        let info = StreamInfo::read(&mut Cursor::new(body)).unwrap();
        assert_eq!(info.sample_rate_hz, 44_100);
        assert_eq!(info.total_samples, 1 << 32);
    }

    #[test]
    fn zero_sample_rate_is_malformed() {
        let body = [0u8; STREAM_INFO_SIZE];
        let err = StreamInfo::read(&mut Cursor::new(body)).unwrap_err();
        assert!(matches!(err, MetadataError::MalformedField(_)));
    }

    #[test]
    fn stream_info_truncated() {
        let err = StreamInfo::read(&mut Cursor::new([0u8; 10])).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::TruncatedRead {
                what: "FLAC STREAMINFO",
                ..
            }
        ));
    }
}
