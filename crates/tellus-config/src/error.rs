//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing a planet file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the planet file from disk.
    #[error("failed to read planet file: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the planet file to disk.
    #[error("failed to write planet file: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse planet file: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize the planet to RON.
    #[error("failed to serialize planet file: {0}")]
    SerializeError(#[source] ron::Error),
}
