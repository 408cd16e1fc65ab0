//! Pixel format resolution.
//!
//! Maps the raw FourCC / DXGI / channel-mask identification schemes of the
//! container onto the closed set of texel formats the pipeline supports.
//! Resolution is pure; no state is kept anywhere in this module.

use std::fmt;

use crate::header::{DdsHeaderDx10, DdsPixelFormat, FourCC};

/// The closed set of texel formats the pipeline can upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexelFormat {
    /// BC1 (DXT1), 8-byte blocks.
    Bc1,
    /// BC2 (DXT3), 16-byte blocks.
    Bc2,
    /// BC3 (DXT5), 16-byte blocks.
    Bc3,
    /// BC4, 8-byte blocks.
    Bc4,
    /// BC5, 16-byte blocks.
    Bc5,
    /// BC6H unsigned float, 16-byte blocks.
    Bc6h,
    /// BC7, 16-byte blocks.
    Bc7,
    /// BC7 sRGB, 16-byte blocks.
    Bc7Srgb,
    /// 32-bit RGBA, 4 bytes per pixel.
    Rgba32,
    /// 24-bit RGB, 3 bytes per pixel.
    Rgb24,
    /// 16-bit 5-6-5 RGB.
    Rgb565,
    /// 16-bit 4-4-4-4 with alpha in the high nibble.
    Argb4444,
    /// 16-bit 4-4-4-4 with alpha in the low nibble.
    Rgba4444,
    /// 8-bit alpha or luminance only.
    Alpha8,
    /// No mapping; payload extraction must not proceed.
    Unsupported,
}

impl TexelFormat {
    /// Whether texels are encoded in fixed-size 4x4 blocks.
    pub fn is_block_compressed(&self) -> bool {
        matches!(
            self,
            Self::Bc1
                | Self::Bc2
                | Self::Bc3
                | Self::Bc4
                | Self::Bc5
                | Self::Bc6h
                | Self::Bc7
                | Self::Bc7Srgb
        )
    }

    /// Bytes per pixel for uncompressed formats; 0 for block-compressed
    /// formats and `Unsupported`.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            Self::Rgba32 => 4,
            Self::Rgb24 => 3,
            Self::Rgb565 | Self::Argb4444 | Self::Rgba4444 => 2,
            Self::Alpha8 => 1,
            _ => 0,
        }
    }

    /// Bytes per 4x4 block for compressed formats; 0 otherwise.
    pub fn block_bytes(&self) -> u32 {
        match self {
            Self::Bc1 | Self::Bc4 => 8,
            Self::Bc2 | Self::Bc3 | Self::Bc5 | Self::Bc6h | Self::Bc7 | Self::Bc7Srgb => 16,
            _ => 0,
        }
    }
}

impl fmt::Display for TexelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bc1 => "BC1",
            Self::Bc2 => "BC2",
            Self::Bc3 => "BC3",
            Self::Bc4 => "BC4",
            Self::Bc5 => "BC5",
            Self::Bc6h => "BC6H",
            Self::Bc7 => "BC7",
            Self::Bc7Srgb => "BC7 (sRGB)",
            Self::Rgba32 => "RGBA32",
            Self::Rgb24 => "RGB24",
            Self::Rgb565 => "RGB565",
            Self::Argb4444 => "ARGB4444",
            Self::Rgba4444 => "RGBA4444",
            Self::Alpha8 => "Alpha8",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// A successful format resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// The resolved texel format.
    pub format: TexelFormat,
    /// The channel masks were in BGR order; red and blue must be swapped
    /// before the pixels are treated as RGB.
    pub swap_rb: bool,
}

impl Resolved {
    fn plain(format: TexelFormat) -> Self {
        Self {
            format,
            swap_rb: false,
        }
    }
}

/// The raw header fields that failed to resolve, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatDiagnostic {
    /// An unmapped DXGI format enum value.
    Dxgi(u32),
    /// An unmapped FourCC code.
    FourCc([u8; 4]),
    /// Uncompressed flags/masks with no known interpretation.
    PixelMasks {
        flags: u32,
        bit_count: u32,
        r: u32,
        g: u32,
        b: u32,
        a: u32,
    },
}

impl fmt::Display for FormatDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dxgi(value) => write!(f, "unmapped DXGI format {}", value),
            Self::FourCc(code) => write!(f, "unmapped FourCC {:?}", code.escape_ascii().to_string()),
            Self::PixelMasks {
                flags,
                bit_count,
                r,
                g,
                b,
                a,
            } => write!(
                f,
                "unmatched pixel masks: flags={:#x} bits={} r={:#x} g={:#x} b={:#x} a={:#x}",
                flags, bit_count, r, g, b, a
            ),
        }
    }
}

/// Resolve the pixel format identity of a parsed header.
///
/// FourCC identification takes precedence over the RGB channel-mask
/// interpretation even when a malformed file sets both flag bits.
pub fn resolve(
    pf: &DdsPixelFormat,
    dx10: Option<&DdsHeaderDx10>,
) -> Result<Resolved, FormatDiagnostic> {
    if let Some(ext) = dx10 {
        return resolve_dxgi(ext.dxgi_format);
    }

    if pf.has_flag(DdsPixelFormat::FLAG_FOURCC) {
        return resolve_four_cc(pf.four_cc);
    }

    resolve_uncompressed(pf)
}

fn resolve_dxgi(dxgi_format: u32) -> Result<Resolved, FormatDiagnostic> {
    let format = match dxgi_format {
        DdsHeaderDx10::DXGI_BC1_UNORM => TexelFormat::Bc1,
        DdsHeaderDx10::DXGI_BC2_UNORM => TexelFormat::Bc2,
        DdsHeaderDx10::DXGI_BC3_UNORM => TexelFormat::Bc3,
        DdsHeaderDx10::DXGI_BC4_UNORM => TexelFormat::Bc4,
        DdsHeaderDx10::DXGI_BC5_UNORM => TexelFormat::Bc5,
        DdsHeaderDx10::DXGI_BC6H_UF16 => TexelFormat::Bc6h,
        DdsHeaderDx10::DXGI_BC7_UNORM => TexelFormat::Bc7,
        DdsHeaderDx10::DXGI_BC7_UNORM_SRGB => TexelFormat::Bc7Srgb,
        other => return Err(FormatDiagnostic::Dxgi(other)),
    };
    Ok(Resolved::plain(format))
}

fn resolve_four_cc(four_cc: FourCC) -> Result<Resolved, FormatDiagnostic> {
    let format = match four_cc {
        FourCC::DXT1 => TexelFormat::Bc1,
        FourCC::DXT3 => TexelFormat::Bc2,
        FourCC::DXT5 => TexelFormat::Bc3,
        FourCC(other) => return Err(FormatDiagnostic::FourCc(other)),
    };
    Ok(Resolved::plain(format))
}

fn resolve_uncompressed(pf: &DdsPixelFormat) -> Result<Resolved, FormatDiagnostic> {
    let (r, g, b, a) = (pf.r_bit_mask, pf.g_bit_mask, pf.b_bit_mask, pf.a_bit_mask);

    if pf.has_flag(DdsPixelFormat::FLAG_RGB) {
        // Canonical byte-per-channel triplets, in either channel order.
        if (r, g, b) == (0x0000_00FF, 0x0000_FF00, 0x00FF_0000)
            || (r, g, b) == (0x00FF_0000, 0x0000_FF00, 0x0000_00FF)
        {
            let swap_rb = r == 0x00FF_0000;
            let format = if a != 0 {
                TexelFormat::Rgba32
            } else {
                TexelFormat::Rgb24
            };
            return Ok(Resolved { format, swap_rb });
        }

        if (r, g, b) == (0xF800, 0x07E0, 0x001F) && a == 0 {
            return Ok(Resolved::plain(TexelFormat::Rgb565));
        }

        // 4-4-4-4 layouts differ only in which nibble carries alpha.
        if (r, g, b, a) == (0x0F00, 0x00F0, 0x000F, 0xF000) {
            return Ok(Resolved::plain(TexelFormat::Argb4444));
        }
        if (r, g, b, a) == (0xF000, 0x0F00, 0x00F0, 0x000F) {
            return Ok(Resolved::plain(TexelFormat::Rgba4444));
        }
    } else {
        let alpha = pf.has_flag(DdsPixelFormat::FLAG_ALPHA)
            || pf.has_flag(DdsPixelFormat::FLAG_ALPHA_PIXELS);
        let luminance = pf.has_flag(DdsPixelFormat::FLAG_LUMINANCE);
        if alpha != luminance {
            return Ok(Resolved::plain(TexelFormat::Alpha8));
        }
    }

    Err(FormatDiagnostic::PixelMasks {
        flags: pf.flags,
        bit_count: pf.rgb_bit_count,
        r,
        g,
        b,
        a,
    })
}

#[cfg(test)]
mod tests {
    use zerocopy::FromZeros;

    use super::*;

    fn pixel_format(flags: u32, four_cc: FourCC, masks: (u32, u32, u32, u32)) -> DdsPixelFormat {
        let mut pf = DdsPixelFormat::new_zeroed();
        pf.size = 32;
        pf.flags = flags;
        pf.four_cc = four_cc;
        pf.r_bit_mask = masks.0;
        pf.g_bit_mask = masks.1;
        pf.b_bit_mask = masks.2;
        pf.a_bit_mask = masks.3;
        pf
    }

    fn dx10(dxgi_format: u32) -> DdsHeaderDx10 {
        let mut ext = DdsHeaderDx10::new_zeroed();
        ext.dxgi_format = dxgi_format;
        ext
    }

    #[test]
    fn test_four_cc_mappings() {
        let cases = [
            (FourCC::DXT1, TexelFormat::Bc1),
            (FourCC::DXT3, TexelFormat::Bc2),
            (FourCC::DXT5, TexelFormat::Bc3),
        ];
        for (code, expected) in cases {
            let pf = pixel_format(DdsPixelFormat::FLAG_FOURCC, code, (0, 0, 0, 0));
            assert_eq!(resolve(&pf, None).unwrap().format, expected);
        }
    }

    #[test]
    fn test_unknown_four_cc_reports_code() {
        let pf = pixel_format(
            DdsPixelFormat::FLAG_FOURCC,
            FourCC(*b"ATI2"),
            (0, 0, 0, 0),
        );
        assert_eq!(
            resolve(&pf, None),
            Err(FormatDiagnostic::FourCc(*b"ATI2"))
        );
    }

    #[test]
    fn test_dxgi_mappings() {
        let cases = [
            (DdsHeaderDx10::DXGI_BC1_UNORM, TexelFormat::Bc1),
            (DdsHeaderDx10::DXGI_BC2_UNORM, TexelFormat::Bc2),
            (DdsHeaderDx10::DXGI_BC3_UNORM, TexelFormat::Bc3),
            (DdsHeaderDx10::DXGI_BC4_UNORM, TexelFormat::Bc4),
            (DdsHeaderDx10::DXGI_BC5_UNORM, TexelFormat::Bc5),
            (DdsHeaderDx10::DXGI_BC6H_UF16, TexelFormat::Bc6h),
            (DdsHeaderDx10::DXGI_BC7_UNORM, TexelFormat::Bc7),
            (DdsHeaderDx10::DXGI_BC7_UNORM_SRGB, TexelFormat::Bc7Srgb),
        ];
        let pf = pixel_format(DdsPixelFormat::FLAG_FOURCC, FourCC::DX10, (0, 0, 0, 0));
        for (value, expected) in cases {
            let ext = dx10(value);
            assert_eq!(resolve(&pf, Some(&ext)).unwrap().format, expected);
        }
    }

    #[test]
    fn test_unmapped_dxgi_reports_value() {
        let pf = pixel_format(DdsPixelFormat::FLAG_FOURCC, FourCC::DX10, (0, 0, 0, 0));
        let ext = dx10(9999);
        assert_eq!(resolve(&pf, Some(&ext)), Err(FormatDiagnostic::Dxgi(9999)));
    }

    #[test]
    fn test_rgb_triplet_with_and_without_alpha() {
        let masks = (0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0);
        let pf = pixel_format(DdsPixelFormat::FLAG_RGB, FourCC::NONE, masks);
        let resolved = resolve(&pf, None).unwrap();
        assert_eq!(resolved.format, TexelFormat::Rgb24);
        assert!(!resolved.swap_rb);

        let masks = (0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000);
        let pf = pixel_format(
            DdsPixelFormat::FLAG_RGB | DdsPixelFormat::FLAG_ALPHA_PIXELS,
            FourCC::NONE,
            masks,
        );
        assert_eq!(resolve(&pf, None).unwrap().format, TexelFormat::Rgba32);
    }

    #[test]
    fn test_bgr_triplet_sets_swap() {
        let masks = (0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000);
        let pf = pixel_format(DdsPixelFormat::FLAG_RGB, FourCC::NONE, masks);
        let resolved = resolve(&pf, None).unwrap();
        assert_eq!(resolved.format, TexelFormat::Rgba32);
        assert!(resolved.swap_rb);
    }

    #[test]
    fn test_rgb565() {
        let pf = pixel_format(
            DdsPixelFormat::FLAG_RGB,
            FourCC::NONE,
            (0xF800, 0x07E0, 0x001F, 0),
        );
        assert_eq!(resolve(&pf, None).unwrap().format, TexelFormat::Rgb565);
    }

    #[test]
    fn test_4444_alpha_nibble_distinguishes() {
        let pf = pixel_format(
            DdsPixelFormat::FLAG_RGB | DdsPixelFormat::FLAG_ALPHA_PIXELS,
            FourCC::NONE,
            (0x0F00, 0x00F0, 0x000F, 0xF000),
        );
        assert_eq!(resolve(&pf, None).unwrap().format, TexelFormat::Argb4444);

        let pf = pixel_format(
            DdsPixelFormat::FLAG_RGB | DdsPixelFormat::FLAG_ALPHA_PIXELS,
            FourCC::NONE,
            (0xF000, 0x0F00, 0x00F0, 0x000F),
        );
        assert_eq!(resolve(&pf, None).unwrap().format, TexelFormat::Rgba4444);
    }

    #[test]
    fn test_alpha_xor_luminance() {
        let pf = pixel_format(DdsPixelFormat::FLAG_ALPHA, FourCC::NONE, (0, 0, 0, 0xFF));
        assert_eq!(resolve(&pf, None).unwrap().format, TexelFormat::Alpha8);

        let pf = pixel_format(DdsPixelFormat::FLAG_LUMINANCE, FourCC::NONE, (0xFF, 0, 0, 0));
        assert_eq!(resolve(&pf, None).unwrap().format, TexelFormat::Alpha8);

        // Both set: ambiguous, not Alpha8.
        let pf = pixel_format(
            DdsPixelFormat::FLAG_ALPHA | DdsPixelFormat::FLAG_LUMINANCE,
            FourCC::NONE,
            (0, 0, 0, 0),
        );
        assert!(resolve(&pf, None).is_err());
    }

    #[test]
    fn test_four_cc_flag_wins_over_rgb_flag() {
        // Malformed file with both bits set resolves by FourCC alone.
        let pf = pixel_format(
            DdsPixelFormat::FLAG_FOURCC | DdsPixelFormat::FLAG_RGB,
            FourCC::DXT5,
            (0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0),
        );
        assert_eq!(resolve(&pf, None).unwrap().format, TexelFormat::Bc3);
    }

    #[test]
    fn test_unmatched_masks_report_fields() {
        let pf = pixel_format(DdsPixelFormat::FLAG_RGB, FourCC::NONE, (0x7C00, 0x03E0, 0x001F, 0));
        match resolve(&pf, None) {
            Err(FormatDiagnostic::PixelMasks { r, .. }) => assert_eq!(r, 0x7C00),
            other => panic!("expected PixelMasks diagnostic, got {:?}", other),
        }
    }
}
