/// Audio metadata types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat metadata record recovered from an audio stream.
///
/// Every field defaults to empty/zero when unknown. The MP3 engine
/// normalizes `genre` to `"Other"` when no tag resolves it; `bitrate_kbps`
/// and `duration_secs` are always computed on a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioMetadata {
    /// Song title, empty when unknown
    pub title: String,

    /// Performing artist, empty when unknown
    pub artist: String,

    /// Genre name, empty when unknown
    pub genre: String,

    /// Average bitrate in kbit/s
    pub bitrate_kbps: u32,

    /// Duration in whole seconds
    pub duration_secs: u32,
}

impl AudioMetadata {
    /// Create an empty metadata record
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for AudioMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' by '{}' [{}] {} kbit/s {}:{:02}",
            self.title,
            self.artist,
            self.genre,
            self.bitrate_kbps,
            self.duration_secs / 60,
            self.duration_secs % 60
        )
    }
}
