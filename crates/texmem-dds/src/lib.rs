//! DDS texture container parsing.
//!
//! A DDS file is a 4-byte magic, a fixed 124-byte header, an optional
//! 20-byte DX10 extension header, and raw texel data. This crate parses that
//! layout into a normalized [`TextureImage`] ready for upload:
//!
//! - [`header`] - the fixed-layout header structs
//! - [`format`] - resolution of FourCC / DXGI / channel-mask identities onto
//!   the supported [`TexelFormat`] set
//! - [`payload`] - payload sizing, mip chains and block alignment
//!
//! # Example
//!
//! ```no_run
//! use texmem_dds::decode;
//!
//! let bytes = std::fs::read("texture.dds")?;
//! let image = decode(&bytes)?;
//! println!("{}x{} {}", image.width, image.height, image.format);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decoding is zero-copy: [`TextureImage::data`] borrows from the input
//! buffer, so the buffer must outlive the image or the range must be copied
//! out first.

pub mod format;
pub mod header;
pub mod payload;

mod error;

use texmem_common::BinaryReader;

pub use error::{DecodeError, Result};
pub use format::{FormatDiagnostic, Resolved, TexelFormat};
pub use header::{DdsHeader, DdsHeaderDx10, DdsPixelFormat, FourCC};
pub use payload::{PayloadDescriptor, DATA_OFFSET, DATA_OFFSET_DX10};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// A decoded texture: normalized description plus a borrowed payload range.
#[derive(Debug, Clone, Copy)]
pub struct TextureImage<'a> {
    /// Effective width in pixels (padded to block alignment if `padded`).
    pub width: u32,
    /// Effective height in pixels.
    pub height: u32,
    /// Resolved texel format; never `Unsupported`.
    pub format: TexelFormat,
    /// Effective mip level count, including the base.
    pub mip_count: u32,
    /// Channel masks were BGR-ordered; swap red and blue on upload.
    pub swap_rb: bool,
    /// Dimensions were rounded up to 4x4 block alignment and the declared
    /// mip chain discarded.
    pub padded: bool,
    /// Raw texel bytes, borrowed from the input buffer.
    pub data: &'a [u8],
}

impl TextureImage<'_> {
    /// Whether the image still carries mip levels beyond the base.
    pub fn has_mip_chain(&self) -> bool {
        self.mip_count > 1
    }
}

/// Decode a DDS byte stream into a [`TextureImage`].
///
/// All errors are recoverable at the caller; the usual response is to hand
/// the original byte stream to a generic image decoder instead.
pub fn decode(bytes: &[u8]) -> Result<TextureImage<'_>> {
    let mut reader = BinaryReader::new(bytes);

    let magic: [u8; 4] = reader.read_bytes(4)?.try_into().unwrap();
    if &magic != DDS_MAGIC {
        return Err(DecodeError::InvalidMagic(magic));
    }

    let header: DdsHeader = reader.read_struct()?;
    let declared_size = header.size;
    if declared_size != DdsHeader::SIZE {
        return Err(DecodeError::InvalidHeaderSize(declared_size));
    }

    let dx10: Option<DdsHeaderDx10> = if header.is_dx10() {
        Some(reader.read_struct()?)
    } else {
        None
    };

    let resolved = format::resolve(&header.pixel_format, dx10.as_ref())
        .map_err(DecodeError::UnsupportedFormat)?;

    let desc = payload::describe(&header, resolved.format, dx10.is_some(), bytes.len())?;
    // The cursor sits exactly at the payload offset after the header reads.
    debug_assert_eq!(reader.position(), desc.data_offset);
    let data = reader.read_bytes(desc.payload_len)?;

    Ok(TextureImage {
        width: desc.width,
        height: desc.height,
        format: resolved.format,
        mip_count: desc.mip_count,
        swap_rb: resolved.swap_rb,
        padded: desc.padded,
        data,
    })
}

#[cfg(test)]
mod tests {
    use zerocopy::{FromZeros, IntoBytes};

    use super::*;

    struct Sample {
        header: DdsHeader,
        dx10: Option<DdsHeaderDx10>,
        payload_len: usize,
    }

    impl Sample {
        fn four_cc(width: u32, height: u32, mipmap_count: u32, code: FourCC) -> Self {
            let mut header = DdsHeader::new_zeroed();
            header.size = DdsHeader::SIZE;
            header.width = width;
            header.height = height;
            header.mipmap_count = mipmap_count;
            if mipmap_count > 1 {
                header.flags = DdsHeader::FLAG_MIPMAP_COUNT;
            }
            header.pixel_format.size = 32;
            header.pixel_format.flags = DdsPixelFormat::FLAG_FOURCC;
            header.pixel_format.four_cc = code;
            Self {
                header,
                dx10: None,
                payload_len: 0,
            }
        }

        fn dx10(width: u32, height: u32, dxgi_format: u32) -> Self {
            let mut sample = Self::four_cc(width, height, 1, FourCC::DX10);
            let mut ext = DdsHeaderDx10::new_zeroed();
            ext.dxgi_format = dxgi_format;
            sample.dx10 = Some(ext);
            sample
        }

        fn rgb24(width: u32, height: u32) -> Self {
            let mut header = DdsHeader::new_zeroed();
            header.size = DdsHeader::SIZE;
            header.width = width;
            header.height = height;
            header.mipmap_count = 1;
            header.pixel_format.size = 32;
            header.pixel_format.flags = DdsPixelFormat::FLAG_RGB;
            header.pixel_format.rgb_bit_count = 24;
            header.pixel_format.r_bit_mask = 0x0000_00FF;
            header.pixel_format.g_bit_mask = 0x0000_FF00;
            header.pixel_format.b_bit_mask = 0x00FF_0000;
            Self {
                header,
                dx10: None,
                payload_len: 0,
            }
        }

        fn payload(mut self, len: usize) -> Self {
            self.payload_len = len;
            self
        }

        fn build(&self) -> Vec<u8> {
            let mut bytes = Vec::new();
            bytes.extend_from_slice(DDS_MAGIC);
            bytes.extend_from_slice(self.header.as_bytes());
            if let Some(ext) = &self.dx10 {
                bytes.extend_from_slice(ext.as_bytes());
            }
            bytes.resize(bytes.len() + self.payload_len, 0);
            bytes
        }
    }

    #[test]
    fn test_decode_dxt5() {
        let bytes = Sample::four_cc(64, 64, 1, FourCC::DXT5).payload(4096).build();
        let image = decode(&bytes).unwrap();
        assert_eq!(image.format, TexelFormat::Bc3);
        assert_eq!((image.width, image.height), (64, 64));
        assert_eq!(image.data.len(), 4096);
        assert!(!image.padded);
        assert!(!image.has_mip_chain());
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut bytes = Sample::four_cc(64, 64, 1, FourCC::DXT1).payload(2048).build();
        bytes[3] = b'X';
        match decode(&bytes) {
            Err(DecodeError::InvalidMagic(magic)) => assert_eq!(&magic, b"DDSX"),
            other => panic!("expected InvalidMagic, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_bad_header_size() {
        let mut sample = Sample::four_cc(64, 64, 1, FourCC::DXT1).payload(2048);
        sample.header.size = 123;
        match decode(&sample.build()) {
            Err(DecodeError::InvalidHeaderSize(size)) => assert_eq!(size, 123),
            other => panic!("expected InvalidHeaderSize, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_dx10_bc7() {
        let bytes = Sample::dx10(32, 32, DdsHeaderDx10::DXGI_BC7_UNORM)
            .payload(1024)
            .build();
        let image = decode(&bytes).unwrap();
        assert_eq!(image.format, TexelFormat::Bc7);
        // Payload begins after the extension header.
        assert_eq!(bytes.len(), DATA_OFFSET_DX10 + 1024);
        assert_eq!(image.data.len(), 1024);
    }

    #[test]
    fn test_decode_dx10_unmapped_enum() {
        let bytes = Sample::dx10(32, 32, 9999).payload(1024).build();
        match decode(&bytes) {
            Err(DecodeError::UnsupportedFormat(FormatDiagnostic::Dxgi(value))) => {
                assert_eq!(value, 9999)
            }
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rgb24_scenario() {
        let bytes = Sample::rgb24(64, 64).payload(12288).build();
        let image = decode(&bytes).unwrap();
        assert_eq!(image.format, TexelFormat::Rgb24);
        assert_eq!(image.data.len(), 12288);
        assert!(!image.swap_rb);
        // Payload offset is the plain-header 128.
        assert_eq!(bytes.len(), DATA_OFFSET + 12288);
    }

    #[test]
    fn test_decode_mip_chain() {
        // 8x8 BC1 with 4 levels: 32 + 8 + 8 + 8 bytes.
        let bytes = Sample::four_cc(8, 8, 4, FourCC::DXT1).payload(56).build();
        let image = decode(&bytes).unwrap();
        assert_eq!(image.mip_count, 4);
        assert!(image.has_mip_chain());
        assert_eq!(image.data.len(), 56);
    }

    #[test]
    fn test_decode_insufficient_payload() {
        let bytes = Sample::four_cc(64, 64, 1, FourCC::DXT5).payload(100).build();
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::InsufficientPayload { .. })
        ));
    }

    #[test]
    fn test_decode_unaligned_bc1_padding() {
        // 130x130 pads to 132x132 and drops the declared chain.
        let base_len = 33 * 33 * 8;
        let bytes = Sample::four_cc(130, 130, 8, FourCC::DXT1)
            .payload(base_len)
            .build();
        let image = decode(&bytes).unwrap();
        assert_eq!((image.width, image.height), (132, 132));
        assert_eq!(image.mip_count, 1);
        assert!(image.padded);

        let short = Sample::four_cc(130, 130, 8, FourCC::DXT1).payload(64).build();
        assert!(matches!(
            decode(&short),
            Err(DecodeError::UnalignedDimensions { .. })
        ));
    }

    #[test]
    fn test_decode_truncated_header() {
        let bytes = Sample::four_cc(64, 64, 1, FourCC::DXT1).build();
        let truncated = &bytes[..60];
        assert!(matches!(decode(truncated), Err(DecodeError::Common(_))));
    }
}
