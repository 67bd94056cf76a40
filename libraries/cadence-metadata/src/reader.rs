/// Path-based metadata reader dispatching on the file extension
use crate::error::{MetadataError, Result};
use crate::{flac, mp3};
use cadence_core::AudioMetadata;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Metadata reader for audio files on disk.
///
/// The upload service knows only the original filename; this reader maps
/// `.mp3` / `.flac` (case-insensitive) to the matching engine entry
/// point. Streams already in memory can call
/// [`mp3::parse_metadata`] / [`flac::parse_metadata`] directly.
pub struct AudioMetadataReader;

impl AudioMetadataReader {
    /// Create a new metadata reader
    pub fn new() -> Self {
        Self
    }

    /// Extract metadata from the file at `path`.
    pub fn read(&self, path: &Path) -> Result<AudioMetadata> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| MetadataError::UnsupportedFormat(path.display().to_string()))?;

        // Dispatch before touching the filesystem; an unknown extension
        // is rejected whether or not the file exists.
        let parse: fn(&mut BufReader<File>) -> Result<AudioMetadata> = match extension.as_str() {
            "mp3" => mp3::parse_metadata,
            "flac" => flac::parse_metadata,
            _ => return Err(MetadataError::UnsupportedFormat(extension)),
        };

        let mut reader = BufReader::new(File::open(path)?);
        parse(&mut reader)
    }
}

impl Default for AudioMetadataReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_file_returns_io_error() {
        let reader = AudioMetadataReader::new();
        let result = reader.read(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(MetadataError::Io(_))));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let reader = AudioMetadataReader::new();
        let err = reader.read(Path::new("/tmp/whatever.ogg")).unwrap_err();
        assert!(matches!(err, MetadataError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let reader = AudioMetadataReader::new();
        let err = reader.read(Path::new("/tmp/noext")).unwrap_err();
        assert!(matches!(err, MetadataError::UnsupportedFormat(_)));
    }
}
