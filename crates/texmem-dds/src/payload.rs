//! Texture payload sizing and validation.

use crate::error::DecodeError;
use crate::format::TexelFormat;
use crate::header::DdsHeader;

/// Byte offset of pixel data for a plain header.
pub const DATA_OFFSET: usize = 128;

/// Byte offset of pixel data when a DX10 extension header is present.
pub const DATA_OFFSET_DX10: usize = 148;

/// Where the pixel data lives and how it is shaped.
///
/// Dimensions may differ from the header's when a compressed file needed
/// padding to block alignment; `padded` records that, and the mip count is
/// clamped to 1 in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadDescriptor {
    /// Effective width in pixels.
    pub width: u32,
    /// Effective height in pixels.
    pub height: u32,
    /// Effective mip level count.
    pub mip_count: u32,
    /// Byte offset of pixel data from the start of the file.
    pub data_offset: usize,
    /// Computed payload length in bytes.
    pub payload_len: usize,
    /// Dimensions were rounded up to block alignment.
    pub padded: bool,
}

/// Size in bytes of a single mip level.
///
/// Block-compressed levels are measured in whole 4x4 blocks; dimensions are
/// floored at 1 before block rounding.
pub fn mip_level_size(width: u32, height: u32, format: TexelFormat) -> usize {
    let w = width.max(1) as usize;
    let h = height.max(1) as usize;
    // Saturating products: absurd declared dimensions must fail size
    // validation, not overflow.
    if format.is_block_compressed() {
        let blocks_x = (w + 3) / 4;
        let blocks_y = (h + 3) / 4;
        blocks_x
            .saturating_mul(blocks_y)
            .saturating_mul(format.block_bytes() as usize)
    } else {
        w.saturating_mul(h)
            .saturating_mul(format.bytes_per_pixel() as usize)
    }
}

/// Total size in bytes of a full mip chain, halving dimensions per level.
///
/// A u32 dimension can halve at most 32 times before pinning at 1x1, so the
/// walk is clamped there regardless of what the header declares.
pub fn mip_chain_size(width: u32, height: u32, mip_count: u32, format: TexelFormat) -> usize {
    (0..mip_count.min(32))
        .map(|level| {
            let w = (width >> level.min(31)).max(1);
            let h = (height >> level.min(31)).max(1);
            mip_level_size(w, h, format)
        })
        .fold(0usize, usize::saturating_add)
}

/// Compute and validate the payload layout for a parsed header.
///
/// `available` is the total length of the file buffer. Compressed files with
/// dimensions not divisible by 4 are padded up to block alignment and their
/// mip chain clamped to the base level when enough bytes remain; otherwise
/// they are rejected so the caller can fall back to a generic decode.
pub fn describe(
    header: &DdsHeader,
    format: TexelFormat,
    dx10_present: bool,
    available: usize,
) -> Result<PayloadDescriptor, DecodeError> {
    let data_offset = if dx10_present {
        DATA_OFFSET_DX10
    } else {
        DATA_OFFSET
    };
    let remaining = available.saturating_sub(data_offset);

    let width = header.width;
    let height = header.height;
    let mip_count = header.mip_levels();

    if format.is_block_compressed() && (width % 4 != 0 || height % 4 != 0) {
        let padded_w = width.saturating_add(3) & !3;
        let padded_h = height.saturating_add(3) & !3;
        let base_len = mip_level_size(padded_w, padded_h, format);
        if base_len <= remaining {
            // The declared mip chain no longer matches the padded base
            // level, so only the base survives.
            return Ok(PayloadDescriptor {
                width: padded_w,
                height: padded_h,
                mip_count: 1,
                data_offset,
                payload_len: base_len,
                padded: true,
            });
        }
        return Err(DecodeError::UnalignedDimensions { width, height });
    }

    let needed = mip_chain_size(width, height, mip_count, format);
    if needed > remaining {
        return Err(DecodeError::InsufficientPayload {
            needed,
            available: remaining,
        });
    }

    Ok(PayloadDescriptor {
        width,
        height,
        mip_count,
        data_offset,
        payload_len: needed,
        padded: false,
    })
}
