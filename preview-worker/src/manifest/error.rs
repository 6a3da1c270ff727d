//! Manifest error types.

use thiserror::Error;

/// Errors that can occur while loading a usage-example manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse manifest '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// An example entry failed validation.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },
}
