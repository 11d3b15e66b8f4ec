//! In-memory backend for images that are already loaded.
//!
//! This module provides the [`crate::file::memory::Memory`] backend that implements the
//! [`crate::file::Backend`] trait over an owned byte buffer. It serves [`crate::File::from_mem`]
//! and [`crate::File::from_reader`], which drains a stream into a buffer before the walk so
//! every PE offset is resolved against the start of the image.
//!
//! Out-of-range slices surface as [`crate::Error::OutOfBounds`]; an empty buffer is a valid
//! backend of length zero.

use super::Backend;
use crate::Result;

/// A backend owning the complete image bytes.
#[derive(Debug)]
pub struct Memory {
    /// Image bytes
    data: Vec<u8>,
}

impl Memory {
    /// Takes ownership of `data` as the image contents.
    ///
    /// # Arguments
    /// * `data` - The bytes of the image, starting at the DOS header
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
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
        self.data.as_slice()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
