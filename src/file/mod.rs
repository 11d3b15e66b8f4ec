//! Image sources and the byte-level reading layer.
//!
//! This module abstracts over where the bytes of a candidate image come from and provides the
//! bounds-checked cursor the header walker runs on.
//!
//! # Key Components
//!
//! ## Core Types
//! - [`crate::file::File`] - An opened image source, owned for the duration of one detection
//! - [`crate::file::Backend`] - Trait for different data sources (disk files, memory buffers)
//!
//! ## Reading Infrastructure
//! - [`crate::file::parser::Parser`] - Cursor with seek/skip/read and truncation signalling
//! - [`crate::file::io`] - Little-endian primitive decoding
//!
//! ## Backend Implementations
//! - `Physical` - Memory-mapped file backend for disk access
//! - `Memory` - In-memory buffer backend, also used for drained streams
//!
//! # Examples
//!
//! ```rust,no_run
//! use clrprobe::File;
//!
//! let file = File::from_path("Library.dll")?;
//! println!("{} bytes, assembly: {}", file.len(), file.is_assembly());
//! # Ok::<(), clrprobe::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! [`File`] and every [`Backend`] are `Send + Sync`. A [`crate::file::parser::Parser`] borrows
//! the data immutably, so any number of passes may run over the same file concurrently.

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::{
    io::{Read, Seek},
    path::Path,
};

use crate::{detect::Detection, Error::Empty, Result};
use memory::Memory;
use parser::Parser;
use physical::Physical;

/// Backend trait for file data sources.
///
/// This trait abstracts over the source of image data, allowing for both in-memory and on-disk
/// representations. All implementations must be thread-safe.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// # Arguments
    ///
    /// * `offset` - The starting offset within the data.
    /// * `len` - The length of the slice in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the requested range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the source holds no bytes at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An opened image source.
///
/// A `File` owns its backend; dropping it releases the mapping or buffer and the underlying
/// handle. Detection never mutates the data, so a `File` can be probed any number of times
/// with identical results.
///
/// # Examples
///
/// ```rust,no_run
/// use clrprobe::{File, Detection};
///
/// let file = File::from_path("Library.dll")?;
/// match file.detect() {
///     Detection::Assembly(image) => println!("CLR header at {:#x}", image.clr_header_offset),
///     Detection::NotAssembly(reason) => println!("not an assembly: {}", reason),
/// }
/// # Ok::<(), clrprobe::Error>(())
/// ```
pub struct File {
    data: Box<dyn Backend>,
}

impl File {
    /// Opens and memory-maps the file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - The file system location of the candidate image.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Empty`] for an empty path, [`crate::Error::FileError`] if the file
    /// cannot be opened and [`crate::Error::Error`] if it cannot be mapped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<File> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Empty);
        }

        let input = Physical::new(path)?;
        Ok(Self::load(input))
    }

    /// Memory-maps an already opened file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Error`] if the file cannot be mapped.
    pub fn from_std_file(file: std::fs::File) -> Result<File> {
        let input = Physical::from_std_file(file)?;
        Ok(Self::load(input))
    }

    /// Wraps a buffer that is already in memory.
    ///
    /// # Arguments
    ///
    /// * `data` - The bytes of the candidate image.
    #[must_use]
    pub fn from_mem(data: Vec<u8>) -> File {
        Self::load(Memory::new(data))
    }

    /// Drains a readable, seekable stream into memory.
    ///
    /// The stream is rewound first: every offset in a PE image is absolute from the start of
    /// the image, regardless of where the caller left the stream position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if seeking or reading the stream fails.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<File> {
        reader.rewind()?;

        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        Ok(Self::from_mem(data))
    }

    fn load<T: Backend + 'static>(data: T) -> File {
        File {
            data: Box::new(data),
        }
    }

    /// Returns the total size of the image source in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the image source is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the complete image data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Returns a bounds-checked slice of the image data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the image.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.data.data_slice(offset, len)
    }

    /// Creates a fresh cursor positioned at the start of the image.
    #[must_use]
    pub fn parser(&self) -> Parser<'_> {
        Parser::new(self.data())
    }

    /// Runs the header walk over this image.
    #[must_use]
    pub fn detect(&self) -> Detection {
        crate::detect::detect(self.data())
    }

    /// Returns `true` if this image is a CLR assembly.
    #[must_use]
    pub fn is_assembly(&self) -> bool {
        self.detect().is_assembly()
    }
}
