//! Texture memory footprint estimation.

use texmem_dds::TexelFormat;

/// Estimate the resident memory footprint of a texture in bytes.
///
/// Uncompressed formats with a mip chain are scaled by a flat 4/3, standing
/// in for the geometric series of halving levels. The true sum is smaller
/// for chains under about four levels; downstream thresholds were tuned
/// against the flat factor, so it is kept as-is. Block-compressed formats
/// cost half a byte per pixel (8-byte blocks) or one byte per pixel
/// (16-byte blocks) and get no mip scaling.
///
/// # Panics
///
/// `format` must not be [`TexelFormat::Unsupported`]: by the time a texture
/// is estimated its format has already been resolved, so an unsupported
/// format here is an upstream resolver bug, not input data to recover from.
pub fn estimate_size(format: TexelFormat, width: u32, height: u32, mip_count: u32) -> u64 {
    assert!(
        format != TexelFormat::Unsupported,
        "estimate_size called with an unresolved format"
    );

    let pixels = width as u64 * height as u64;
    if format.is_block_compressed() {
        return pixels * format.block_bytes() as u64 / 16;
    }

    let base = pixels * format.bytes_per_pixel() as u64;
    if mip_count > 1 {
        base * 4 / 3
    } else {
        base
    }
}
