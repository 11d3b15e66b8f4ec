//! Cursor-based byte reader used by the header walker.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a bounds-checked cursor over a
//! byte slice. It offers exactly the operations the PE header walk needs: absolute seeks,
//! relative skips, fixed-width byte reads and little-endian integer reads.
//!
//! # Key Components
//!
//! ## Navigation Methods
//! - [`crate::file::parser::Parser::seek`] - Move to an absolute position
//! - [`crate::file::parser::Parser::advance_by`] - Move forward by a number of bytes
//! - [`crate::file::parser::Parser::pos`] - Get the current position
//!
//! ## Data Access Methods
//! - [`crate::file::parser::Parser::read_le`] - Read `u8`/`u16`/`u32`/`u64` little-endian
//! - [`crate::file::parser::Parser::read_bytes`] - Borrow the next `n` bytes
//! - [`crate::file::parser::Parser::read_array`] - Copy the next `N` bytes into an array
//!
//! # Truncation
//!
//! Every operation that would move the cursor past the end of the data, or whose position
//! arithmetic would overflow, fails with [`crate::Error::OutOfBounds`] and leaves the cursor
//! where it was. The header walker relies on this to treat short files as "not an assembly"
//! instead of faulting.
//!
//! # Usage Examples
//!
//! ```rust
//! use clrprobe::Parser;
//!
//! let data = [0x4D, 0x5A, 0x90, 0x00, 0x80, 0x00, 0x00, 0x00];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_bytes(2)?, b"MZ");
//! parser.seek(4)?;
//! assert_eq!(parser.read_le::<u32>()?, 0x80);
//! # Ok::<(), clrprobe::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, PeIO},
    Result,
};

/// A cursor over a borrowed byte buffer.
///
/// `Parser` never copies or mutates the underlying data; it only tracks a position into it.
/// It is meant to live for a single pass over one image and is cheap to construct.
///
/// # Examples
///
/// ```rust,no_run
/// use clrprobe::Parser;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut parser = Parser::new(&data);
///
/// let first = parser.read_le::<u32>()?;
/// assert_eq!(first, 0x04030201);
///
/// parser.seek(6)?;
/// let last_bytes = parser.read_le::<u16>()?;
/// assert_eq!(last_bytes, 0x0807);
/// # Ok::<(), clrprobe::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Move the current position to the specified index.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is at or beyond the data length.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use clrprobe::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// parser.seek(2)?;
    /// assert_eq!(parser.pos(), 2);
    /// assert!(parser.seek(4).is_err());
    /// assert_eq!(parser.pos(), 2);
    /// # Ok::<(), clrprobe::Error>(())
    /// ```
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// Advancing to exactly the end of the data is allowed; any further read will fail.
    ///
    /// # Arguments
    /// * `step` - Amount of bytes to advance
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        let Some(target) = self.position.checked_add(step) else {
            return Err(out_of_bounds_error!());
        };

        if target > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = target;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Read a type `T` from the current position in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use clrprobe::Parser;
    /// let data = [0x0B, 0x01];
    /// let mut parser = Parser::new(&data);
    ///
    /// let magic: u16 = parser.read_le()?;
    /// assert_eq!(magic, 0x010B);
    /// assert_eq!(parser.pos(), 2);
    /// # Ok::<(), clrprobe::Error>(())
    /// ```
    pub fn read_le<T: PeIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Borrow the next `len` bytes and advance the position past them.
    ///
    /// # Arguments
    /// * `len` - Number of bytes to read
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let Some(end) = self.position.checked_add(len) else {
            return Err(out_of_bounds_error!());
        };

        if end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Copy the next `N` bytes into a fixed-size array and advance the position past them.
    ///
    /// Used for signatures and names that are compared byte-for-byte rather than interpreted
    /// as integers.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `N` bytes remain.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use clrprobe::Parser;
    /// let data = *b".text\0\0\0";
    /// let mut parser = Parser::new(&data);
    ///
    /// let name: [u8; 8] = parser.read_array()?;
    /// assert_eq!(&name, b".text\0\0\0");
    /// # Ok::<(), clrprobe::Error>(())
    /// ```
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0_u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }
}
