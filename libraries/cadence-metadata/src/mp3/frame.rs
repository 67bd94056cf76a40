//! MPEG audio frame header codec and the whole-file frame sweep.
//!
//! A frame header is 4 bytes; everything else (size, duration, samples)
//! derives from table lookups keyed by version and layer. The sweep walks
//! the frame stream header-to-header to accumulate duration and average
//! bitrate without touching the audio payload.

use super::consts;
use crate::error::{MetadataError, Result};
use crate::util::{read_fill, round};
use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// How far past the ID3v2 data the first frame sync is searched for.
/// Bounded so leading junk cannot stall the parse.
const SYNC_SEARCH_WINDOW: usize = 10_000;

/// Header parse failures. Any of these on a mid-stream header means the
/// frame sweep has run past the last real frame.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// First 11 bits are not all ones
    #[error("missing frame sync bits")]
    InvalidSync,
    /// Bitrate index is reserved (0xF) or resolves to no bitrate
    #[error("reserved or zero bitrate index")]
    InvalidBitrate,
    /// Sample rate index is reserved (0x3)
    #[error("reserved sample rate index")]
    InvalidSampleRate,
}

/// MPEG version, from the 2-bit field in byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    /// MPEG 2.5 (unofficial low-rate extension)
    Mpeg25,
    /// Reserved bit pattern
    Reserved,
    /// MPEG 2
    Mpeg2,
    /// MPEG 1
    Mpeg1,
}

impl MpegVersion {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Mpeg25,
            1 => Self::Reserved,
            2 => Self::Mpeg2,
            _ => Self::Mpeg1,
        }
    }
}

/// MPEG layer, from the 2-bit field in byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Reserved bit pattern
    Reserved,
    /// Layer III
    Layer3,
    /// Layer II
    Layer2,
    /// Layer I
    Layer1,
}

impl Layer {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            1 => Self::Layer3,
            2 => Self::Layer2,
            3 => Self::Layer1,
            _ => Self::Reserved,
        }
    }
}

/// Channel mode, from the 2-bit field in byte 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Stereo
    Stereo,
    /// Joint stereo
    JointStereo,
    /// Two independent mono channels
    DualChannel,
    /// Mono
    SingleChannel,
}

impl ChannelMode {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Stereo,
            1 => Self::JointStereo,
            2 => Self::DualChannel,
            _ => Self::SingleChannel,
        }
    }
}

/// De-emphasis setting, from the 2-bit field in byte 3. Rarely used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// No emphasis
    None,
    /// 50/15 microseconds
    Fifty15,
    /// Reserved bit pattern
    Reserved,
    /// CCIT J.17
    CcitJ17,
}

impl Emphasis {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::None,
            1 => Self::Fifty15,
            2 => Self::Reserved,
            _ => Self::CcitJ17,
        }
    }
}

/// One decoded MPEG audio frame header.
///
/// Constructed per frame, consumed to advance the stream cursor and
/// accumulate duration/bitrate, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    /// MPEG version
    pub version: MpegVersion,
    /// MPEG layer
    pub layer: Layer,
    /// True when a 16-bit CRC follows the header
    pub protection: bool,
    /// Bitrate in bits per second
    pub bitrate_bps: u32,
    /// Sample rate in Hz
    pub sample_rate_hz: u32,
    /// Padding slot present
    pub padding: bool,
    /// Application-private bit
    pub private: bool,
    /// Channel mode
    pub channel_mode: ChannelMode,
    /// Copyright bit
    pub copyright: bool,
    /// Original-media bit
    pub original: bool,
    /// De-emphasis setting
    pub emphasis: Emphasis,
    /// Samples carried by this frame
    pub samples: u32,
    /// Whole frame size in bytes, header included
    pub size: u32,
    /// Playback time of this frame
    pub duration: Duration,
}

impl FrameHeader {
    /// Parse a 4-byte frame header.
    ///
    /// Validation order: sync bits, then bitrate index, then sample-rate
    /// index. Reserved version/layer combinations surface as
    /// `InvalidBitrate` because their table rows hold no usable bitrate.
    pub fn parse(data: &[u8; 4]) -> std::result::Result<Self, FrameError> {
        if data[0] != 0xFF || data[1] & 0xE0 != 0xE0 {
            return Err(FrameError::InvalidSync);
        }

        let version = MpegVersion::from_bits(data[1] >> 3);
        let layer = Layer::from_bits(data[1] >> 1);
        let protection = data[1] & 0x01 != 0x01;

        let bitrate_index = (data[2] >> 4) & 0x0F;
        if bitrate_index == 0x0F {
            return Err(FrameError::InvalidBitrate);
        }
        let bitrate_bps = consts::bitrate_kbps(version, layer, bitrate_index as usize) * 1000;
        if bitrate_bps == 0 {
            return Err(FrameError::InvalidBitrate);
        }

        let sample_rate_index = (data[2] >> 2) & 0x03;
        if sample_rate_index == 0x03 {
            return Err(FrameError::InvalidSampleRate);
        }
        let sample_rate_hz = consts::sample_rate_hz(version, sample_rate_index as usize);

        let padding = (data[2] >> 1) & 0x01 == 0x01;
        let private = data[2] & 0x01 == 0x01;
        let channel_mode = ChannelMode::from_bits(data[3] >> 6);
        let copyright = (data[3] >> 3) & 0x01 == 0x01;
        let original = (data[3] >> 2) & 0x01 == 0x01;
        let emphasis = Emphasis::from_bits(data[3]);

        let samples = consts::samples_per_frame(version, layer);
        let mut size =
            (f64::from(samples) / 8.0 * f64::from(bitrate_bps) / f64::from(sample_rate_hz)) as u32;
        if padding {
            size += consts::slot_size(layer);
        }
        let duration = Duration::from_secs_f64(f64::from(samples) / f64::from(sample_rate_hz));

        Ok(Self {
            version,
            layer,
            protection,
            bitrate_bps,
            sample_rate_hz,
            padding,
            private,
            channel_mode,
            copyright,
            original,
            emphasis,
            samples,
            size,
            duration,
        })
    }
}

/// Result of sweeping the whole frame stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSweep {
    /// Rounded total playback time in seconds
    pub duration_secs: u32,
    /// Average bitrate in kbit/s, truncated
    pub bitrate_kbps: u32,
}

/// Walk every audio frame after `start` (the end of any ID3v2 data) and
/// accumulate total duration and average bitrate.
///
/// A VBR marker frame (Xing/Info/VBRI) carries no audio, so its stated
/// bitrate and duration are excluded from the totals. The sweep ends at
/// the first header that fails to parse; trailing garbage after the last
/// real frame is common and not an error.
pub(crate) fn scan_frames<R: Read + Seek>(reader: &mut R, start: u64) -> Result<FrameSweep> {
    reader.seek(SeekFrom::Start(start))?;
    let offset = find_first_sync(reader)?
        .ok_or(MetadataError::FormatNotRecognized("mp3: no frame sync found"))?;
    reader.seek(SeekFrom::Start(start + offset))?;

    let mut header_buf = [0u8; 4];
    if read_fill(reader, &mut header_buf)? != 4 {
        return Err(MetadataError::FormatNotRecognized("mp3: no frame sync found"));
    }
    let first = FrameHeader::parse(&header_buf)
        .map_err(|_| MetadataError::FormatNotRecognized("mp3: first frame header invalid"))?;

    let mut total = Duration::ZERO;
    let mut kbps_sum: u64 = 0;
    let mut frames: u64 = 0;

    // The first frame's payload reveals whether the stream is VBR.
    let mut payload = vec![0u8; first.size.saturating_sub(4) as usize];
    let filled = read_fill(reader, &mut payload)?;
    if !is_vbr(&payload[..filled]) {
        total += first.duration;
        kbps_sum += u64::from(first.bitrate_bps / 1000);
        frames += 1;
    }

    loop {
        match read_fill(reader, &mut header_buf) {
            Ok(4) => {}
            Ok(_) => break,
            Err(e) => {
                debug!(error = %e, "frame sweep stopped by read error");
                break;
            }
        }
        let Ok(header) = FrameHeader::parse(&header_buf) else {
            break;
        };
        total += header.duration;
        kbps_sum += u64::from(header.bitrate_bps / 1000);
        frames += 1;
        if let Err(e) = reader.seek(SeekFrom::Current(i64::from(header.size) - 4)) {
            debug!(error = %e, "frame sweep stopped by seek error");
            break;
        }
    }

    if frames == 0 {
        return Err(MetadataError::FormatNotRecognized("mp3: no audio frames"));
    }

    Ok(FrameSweep {
        duration_secs: round(total.as_secs_f64()) as u32,
        bitrate_kbps: (kbps_sum / frames) as u32,
    })
}

/// Scan a bounded window from the current position for the 11-bit sync
/// pattern. Returns the offset of the first candidate, or `None`.
fn find_first_sync<R: Read>(reader: &mut R) -> Result<Option<u64>> {
    let mut window = vec![0u8; SYNC_SEARCH_WINDOW];
    let filled = read_fill(reader, &mut window)?;
    if filled < 4 {
        return Ok(None);
    }
    Ok(window[..filled]
        .windows(2)
        .position(|pair| pair[0] == 0xFF && pair[1] & 0xE0 == 0xE0)
        .map(|i| i as u64))
}

/// A first-frame payload containing any of these markers identifies a
/// variable-bitrate stream; the frame itself is metadata, not audio.
fn is_vbr(payload: &[u8]) -> bool {
    if payload.len() < 4 {
        return false;
    }
    [b"Xing".as_slice(), b"Info".as_slice(), b"VBRI".as_slice()]
        .iter()
        .any(|marker| payload.windows(4).any(|w| w == *marker))
}
