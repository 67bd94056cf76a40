//! Domain types shared across Cadence crates

mod metadata;

pub use metadata::AudioMetadata;
