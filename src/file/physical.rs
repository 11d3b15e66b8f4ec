//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::physical::Physical`] backend that implements the
//! [`crate::file::Backend`] trait for files on disk. Mapping the file instead of reading it
//! means a detection pass only ever touches the handful of pages holding the headers, the
//! section table and the start of `.text`, no matter how large the image is.
//!
//! Access failures (missing file, permissions) surface as [`crate::Error::FileError`] with the
//! original [`std::io::ErrorKind`]; a file that opens but cannot be mapped surfaces as
//! [`crate::Error::Error`]. Zero-length files map to an empty backend.

use super::Backend;
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for efficient access to files on disk.
///
/// The mapping is read-only and lives exactly as long as the backend; dropping the
/// [`Physical`] unmaps the file and closes the handle.
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the file on disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        Self::from_std_file(file)
    }

    /// Creates a new physical file backend from an opened [`std::fs::File`].
    ///
    /// # Arguments
    /// * `file` - An opened file handle
    ///
    /// # Errors
    /// Returns [`crate::Error::Error`] if memory mapping fails.
    #[allow(clippy::needless_pass_by_value)]
    pub fn from_std_file(file: fs::File) -> Result<Physical> {
        // The mapping stays valid after `file` is dropped; memmap2 keeps its own reference.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|error| Error(error.to_string()))?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(out_of_bounds_error!());
        };

        if offset_end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
