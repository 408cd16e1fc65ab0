//! DDS-first texture loading with generic image fallback.

use std::path::Path;

use texmem_dds::TexelFormat;

use crate::error::Result;
use crate::provider::{dds_companion, FileProvider};

/// Which path produced a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureOrigin {
    /// Decoded from a `.dds` companion file.
    Dds,
    /// Decoded by the generic image codec from the original asset.
    Fallback,
}

/// A texture loaded into memory, pixel data owned.
#[derive(Debug, Clone)]
pub struct LoadedTexture {
    /// File stem of the asset.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Texel format of `data`.
    pub format: TexelFormat,
    /// Mip level count, including the base.
    pub mip_count: u32,
    /// Red and blue must be swapped on upload.
    pub swap_rb: bool,
    /// Owned pixel bytes.
    pub data: Vec<u8>,
    /// Which decode path produced this texture.
    pub origin: TextureOrigin,
}

impl LoadedTexture {
    /// Whether the texture carries mip levels beyond the base.
    pub fn has_mip_chain(&self) -> bool {
        self.mip_count > 1
    }
}

/// Load the texture for an asset path.
///
/// When a `.dds` companion exists it is decoded first; any decode failure
/// is logged and the original byte stream goes through the generic image
/// codec instead, as an RGBA32 base level. Only when that also fails does
/// the call error.
pub fn load<P: FileProvider>(provider: &P, path: &Path) -> Result<LoadedTexture> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let companion = dds_companion(path);
    if provider.exists(&companion) {
        let bytes = provider.read(&companion)?;
        match texmem_dds::decode(&bytes) {
            Ok(image) => {
                return Ok(LoadedTexture {
                    name,
                    width: image.width,
                    height: image.height,
                    format: image.format,
                    mip_count: image.mip_count,
                    swap_rb: image.swap_rb,
                    data: image.data.to_vec(),
                    origin: TextureOrigin::Dds,
                });
            }
            Err(err) => {
                log::warn!(
                    "couldn't decode '{}' as DDS ({}), loading '{}' instead",
                    companion.display(),
                    err,
                    path.display()
                );
            }
        }
    }

    let bytes = provider.read(path)?;
    let rgba = image::load_from_memory(&bytes)?.to_rgba8();
    Ok(LoadedTexture {
        name,
        width: rgba.width(),
        height: rgba.height(),
        format: TexelFormat::Rgba32,
        mip_count: 1,
        swap_rb: false,
        data: rgba.into_raw(),
        origin: TextureOrigin::Fallback,
    })
}
