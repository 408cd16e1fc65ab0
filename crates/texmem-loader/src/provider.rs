//! File content access.

use std::fs::File;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

/// File contents, memory-mapped when possible.
#[derive(Debug)]
pub enum FileBytes {
    /// Memory-mapped file data.
    Mapped(Mmap),
    /// Fully-buffered file data.
    Owned(Vec<u8>),
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(map) => map,
            Self::Owned(bytes) => bytes,
        }
    }
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// Read-only access to file contents by virtual path.
///
/// The host decides what a path means; this crate never writes back.
pub trait FileProvider {
    /// Whether a file exists at the path.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full contents of the file at the path.
    fn read(&self, path: &Path) -> io::Result<FileBytes>;
}

/// Provider backed by the local filesystem.
#[derive(Debug, Default)]
pub struct DiskProvider;

impl FileProvider for DiskProvider {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> io::Result<FileBytes> {
        let file = File::open(path)?;
        match unsafe { Mmap::map(&file) } {
            Ok(map) => Ok(FileBytes::Mapped(map)),
            Err(_) => Ok(FileBytes::Owned(std::fs::read(path)?)),
        }
    }
}

/// Derive the `.dds` companion path for an asset by extension substitution.
pub fn dds_companion(path: &Path) -> PathBuf {
    path.with_extension("dds")
}
