/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The stream carries no recognizable structure for the claimed format
    #[error("Format not recognized: {0}")]
    FormatNotRecognized(&'static str),

    /// File extension the reader does not dispatch on
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Fewer bytes available than a fixed-size structure requires
    #[error("Truncated read: {what} needs {needed} bytes")]
    TruncatedRead {
        /// Structure that could not be filled
        what: &'static str,
        /// Bytes the structure requires
        needed: usize,
    },

    /// A decoded field falls outside its valid encoding range
    #[error("Malformed field: {0}")]
    MalformedField(&'static str),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<MetadataError> for cadence_core::CadenceError {
    fn from(err: MetadataError) -> Self {
        cadence_core::CadenceError::metadata(err.to_string())
    }
}
