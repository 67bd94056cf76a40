//! Cadence Core
//!
//! Platform-agnostic domain types and error handling for Cadence.
//!
//! This crate provides the foundational building blocks shared by the
//! metadata engine and the surrounding upload service:
//! - **Domain Types**: `AudioMetadata`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::AudioMetadata;
//!
//! let mut metadata = AudioMetadata::new();
//! metadata.title = "My Favorite Song".to_string();
//! metadata.duration_secs = 213;
//!
//! assert_eq!(format!("{metadata}"), "'My Favorite Song' by '' [] 0 kbit/s 3:33");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use types::AudioMetadata;
