//! texmem - DDS texture ingestion and texture-set memory profiling.
//!
//! This crate provides a unified interface to the texmem library ecosystem.
//!
//! # Crates
//!
//! - [`texmem_common`] - Common utilities (binary reading, shared errors)
//! - [`texmem_dds`] - DDS container parsing into normalized pixel buffers
//! - [`texmem_loader`] - DDS-first texture loading with image fallback
//! - [`texmem_scan`] - Memory estimation and incremental set scanning
//!
//! # Example
//!
//! ```no_run
//! use texmem::prelude::*;
//!
//! // Decode a DDS file
//! let bytes = std::fs::read("texture.dds")?;
//! let image = decode(&bytes)?;
//!
//! // Estimate its resident footprint without re-reading pixels
//! let footprint = estimate_size(image.format, image.width, image.height, image.mip_count);
//! println!("{}", format_bytes(footprint));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use texmem_common as common;
pub use texmem_dds as dds;
pub use texmem_loader as loader;
pub use texmem_scan as scan;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use texmem_common::BinaryReader;
    pub use texmem_dds::{decode, DecodeError, TexelFormat, TextureImage};
    pub use texmem_loader::{load, DiskProvider, FileProvider, LoadedTexture};
    pub use texmem_scan::{
        estimate_size, format_bytes, ScanEngine, ScanPhase, ScanUnit, StatsStore, TextureRecord,
        Totals, UnitSource,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
