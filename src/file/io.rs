//! Bounds-checked little-endian reading primitives for PE header fields.
//!
//! Every multi-byte field of the MS-DOS stub, the PE/COFF header, the optional header and the
//! section table is stored little-endian. This module provides the safe conversion layer the
//! [`crate::file::parser::Parser`] cursor is built on.
//!
//! # Key Components
//!
//! - [`crate::file::io::PeIO`] - Trait describing primitives readable from a fixed-size byte array
//! - [`crate::file::io::read_le_at`] - Read a value at an offset and advance the offset
//!
//! # Error Handling
//!
//! [`crate::file::io::read_le_at`] returns [`crate::Error::OutOfBounds`] if the buffer holds
//! fewer bytes than the requested type, including when `offset + size_of::<T>()` would overflow
//! `usize`. The offset is left untouched on failure.
//!
//! # Examples
//!
//! ```rust
//! use clrprobe::file::io::read_le_at;
//!
//! // e_lfanew of a typical linker stub
//! let data = [0x80, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let pe_offset: u32 = read_le_at(&data, &mut offset)?;
//! assert_eq!(pe_offset, 0x80);
//! assert_eq!(offset, 4);
//! # Ok::<(), clrprobe::Error>(())
//! ```

use crate::Result;

/// Trait for primitives that can be decoded from their little-endian byte representation.
///
/// Each implementation names the fixed-size array it is decoded from through the `Bytes`
/// associated type (e.g. `[u8; 4]` for `u32`), which lets [`read_le_at`] convert a slice of
/// exactly `size_of::<T>()` bytes without any unsafe code.
pub trait PeIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_pe_io {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl PeIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_pe_io! {
    u8 => 1,
    u16 => 2,
    u32 => 4,
    u64 => 8,
}

/// Safely reads a value of type `T` in little-endian byte order at a specific offset.
///
/// The offset is advanced by `size_of::<T>()` on success and left unchanged on failure.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (will be advanced after reading)
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes, or if the end of the
/// read is not representable as a `usize`.
///
/// # Examples
///
/// ```rust
/// use clrprobe::file::io::read_le_at;
///
/// // NumberOfSections followed by TimeDateStamp
/// let data = [0x03, 0x00, 0x78, 0x56, 0x34, 0x12];
/// let mut offset = 0;
///
/// let sections: u16 = read_le_at(&data, &mut offset)?;
/// let stamp: u32 = read_le_at(&data, &mut offset)?;
/// assert_eq!(sections, 3);
/// assert_eq!(stamp, 0x1234_5678);
/// assert_eq!(offset, 6);
/// # Ok::<(), clrprobe::Error>(())
/// ```
pub fn read_le_at<T: PeIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(out_of_bounds_error!());
    };

    if end > data.len() {
        return Err(out_of_bounds_error!());
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(out_of_bounds_error!());
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}
