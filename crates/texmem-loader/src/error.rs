//! Error types for texture loading.

use thiserror::Error;

/// Errors from loading a texture when both the DDS path and the generic
/// image fallback have failed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The fallback image decoder rejected the byte stream.
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
