//! Texture loading for texmem.
//!
//! Hosts keep conventional image assets (PNG and friends) and optionally
//! ship a pre-compressed `.dds` sibling next to each one. This crate wires
//! that convention together:
//!
//! - [`FileProvider`] - read-only access to file contents by virtual path,
//!   memory-mapped where possible
//! - [`dds_companion`] - the `.dds` sibling path for an asset
//! - [`load`] - DDS-first loading with a generic image fallback
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use texmem_loader::{load, DiskProvider};
//!
//! let texture = load(&DiskProvider, Path::new("Textures/pawn.png"))?;
//! println!("{}: {}x{}", texture.name, texture.width, texture.height);
//! # Ok::<(), texmem_loader::LoadError>(())
//! ```

mod error;
mod load;
mod provider;

pub use error::{LoadError, Result};
pub use load::{load, LoadedTexture, TextureOrigin};
pub use provider::{dds_companion, DiskProvider, FileBytes, FileProvider};
