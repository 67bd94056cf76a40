//! Cadence Metadata
//!
//! Audio metadata extraction for Cadence.
//!
//! This crate recovers title, artist, genre, average bitrate and duration
//! from MP3 and FLAC byte streams without decoding any audio samples:
//! - ID3v1 trailer tags and ID3v2.2/2.3/2.4 tags (MP3)
//! - MPEG audio frame sweep for duration and average bitrate (MP3)
//! - STREAMINFO and Vorbis comment blocks (FLAC)
//!
//! Parsing is tolerant: corrupt or absent tags degrade to empty fields,
//! and only a stream with no recognizable audio structure at all is
//! rejected.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_metadata::AudioMetadataReader;
//! use std::path::Path;
//! # fn example() -> cadence_metadata::Result<()> {
//! // Dispatches on the file extension (.mp3 / .flac)
//! let reader = AudioMetadataReader::new();
//! let metadata = reader.read(Path::new("/music/song.mp3"))?;
//! println!("{} kbit/s, {} s", metadata.bitrate_kbps, metadata.duration_secs);
//!
//! // Or parse any seekable stream directly
//! let mut stream = std::io::Cursor::new(std::fs::read("/music/song.flac")?);
//! let metadata = cadence_metadata::flac::parse_metadata(&mut stream)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod reader;
mod text;
mod util;

pub mod flac;
pub mod mp3;

pub use cadence_core::AudioMetadata;
pub use error::{MetadataError, Result};
pub use reader::AudioMetadataReader;
