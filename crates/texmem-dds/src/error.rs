//! Error types for DDS decoding.

use thiserror::Error;

use crate::format::FormatDiagnostic;

/// Errors that can occur when decoding a DDS container.
///
/// Every variant is recoverable at the caller: the byte stream can still be
/// handed to a generic image decoder.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Common library error (truncated reads).
    #[error("{0}")]
    Common(#[from] texmem_common::Error),

    /// The file does not start with the DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// The declared header size is not 124.
    #[error("invalid DDS header size: expected 124, got {0}")]
    InvalidHeaderSize(u32),

    /// The header parsed but identifies no supported texel format.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(FormatDiagnostic),

    /// The computed payload length exceeds the bytes present.
    #[error("insufficient payload: needed {needed} bytes, {available} available")]
    InsufficientPayload { needed: usize, available: usize },

    /// Compressed dimensions not divisible by 4 and too few bytes to pad.
    #[error("compressed dimensions {width}x{height} not divisible by 4 and cannot be padded")]
    UnalignedDimensions { width: u32, height: u32 },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
