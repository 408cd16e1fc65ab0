//! DDS header structures.
//!
//! Field order in these structs is the wire order of the container; the
//! decoder reads them with zerocopy directly off the file bytes.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// DDS file header (the 124-byte block following the 4-byte magic).
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (must be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels, including the base.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected value of the `size` field.
    pub const SIZE: u32 = 124;

    /// `flags` bit indicating the mipmap count field is valid.
    pub const FLAG_MIPMAP_COUNT: u32 = 0x0002_0000;

    /// Check if the pixel format defers to a DX10 extension header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.four_cc == FourCC::DX10
    }

    /// Check if the file declares a mip chain beyond the base level.
    pub fn has_mip_chain(&self) -> bool {
        let count = self.mipmap_count;
        (self.flags & Self::FLAG_MIPMAP_COUNT) != 0 && count > 1
    }

    /// Declared mip level count, floored at 1.
    ///
    /// Files without the mipmap flag often leave the count at 0; they still
    /// carry a base level.
    pub fn mip_levels(&self) -> u32 {
        let count = self.mipmap_count;
        count.max(1)
    }
}

/// DDS pixel format block embedded in the header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code identifying a compressed format.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed formats).
    pub rgb_bit_count: u32,
    /// Red channel bit mask.
    pub r_bit_mask: u32,
    /// Green channel bit mask.
    pub g_bit_mask: u32,
    /// Blue channel bit mask.
    pub b_bit_mask: u32,
    /// Alpha channel bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Alpha channel data is present alongside color channels.
    pub const FLAG_ALPHA_PIXELS: u32 = 0x0000_0001;
    /// Alpha-only data.
    pub const FLAG_ALPHA: u32 = 0x0000_0002;
    /// The `four_cc` field identifies the format.
    pub const FLAG_FOURCC: u32 = 0x0000_0004;
    /// Uncompressed RGB data described by the channel masks.
    pub const FLAG_RGB: u32 = 0x0000_0040;
    /// Luminance-only data.
    pub const FLAG_LUMINANCE: u32 = 0x0002_0000;
    /// Normal map hint.
    pub const FLAG_NORMAL: u32 = 0x8000_0000;

    /// Check a flag bit.
    #[inline]
    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags & flag) != 0
    }
}

/// Four-character code identifying a compressed data variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression (BC1).
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression (BC2).
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression (BC3).
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extension header follows the primary header.
    pub const DX10: Self = Self(*b"DX10");
    /// No compression.
    pub const NONE: Self = Self([0; 4]);
}

/// DX10 extension header, present iff the FourCC is "DX10".
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDx10 {
    /// DXGI format enum.
    pub dxgi_format: u32,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

impl DdsHeaderDx10 {
    /// BC1 UNORM.
    pub const DXGI_BC1_UNORM: u32 = 71;
    /// BC2 UNORM.
    pub const DXGI_BC2_UNORM: u32 = 74;
    /// BC3 UNORM.
    pub const DXGI_BC3_UNORM: u32 = 77;
    /// BC4 UNORM.
    pub const DXGI_BC4_UNORM: u32 = 80;
    /// BC5 UNORM.
    pub const DXGI_BC5_UNORM: u32 = 83;
    /// BC6H UF16.
    pub const DXGI_BC6H_UF16: u32 = 95;
    /// BC7 UNORM.
    pub const DXGI_BC7_UNORM: u32 = 98;
    /// BC7 UNORM sRGB.
    pub const DXGI_BC7_UNORM_SRGB: u32 = 99;
}
