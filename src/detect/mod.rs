//! CLR assembly detection by walking raw PE headers.
//!
//! Deciding whether a file is a .NET assembly by handing it to a runtime loader is slow and
//! turns every non-assembly into an exception. This module answers the same question from the
//! bytes alone, with a single pass that touches a few hundred bytes of the image:
//!
//! 1. `MZ` at offset 0, then `e_lfanew` at `0x3C`
//! 2. `PE\0\0` at `e_lfanew`, followed by the COFF header (machine, section count,
//!    optional header size)
//! 3. The optional header magic selects the PE32 or PE32+ layout; data directory 14 (COM
//!    descriptor) must be non-zero
//! 4. The section table is searched for `.text`, whose `PointerToRawData` is followed
//! 5. On non-AMD64 images the 8-byte loader stub is skipped, and the next 8 bytes must be the
//!    CLR 2.5 runtime header preamble
//!
//! Any failed check, and any read that runs off the end of the image, yields a negative
//! verdict. Only failing to obtain the bytes in the first place is an error.
//!
//! # Limitations
//!
//! - A 64-bit assembly is reported as an assembly even to a 32-bit caller that could not load
//!   it.
//! - Assemblies built for CLR 1.0/1.1 carry a different runtime header version and are not
//!   detected.
//!
//! # Examples
//!
//! ```rust,no_run
//! use clrprobe::{detect_path, is_assembly, Detection};
//!
//! if is_assembly("Library.dll")? {
//!     println!("managed");
//! }
//!
//! if let Detection::NotAssembly(reason) = detect_path("native.exe")? {
//!     println!("rejected: {}", reason.description());
//! }
//! # Ok::<(), clrprobe::Error>(())
//! ```

pub mod signatures;
mod types;

use std::{
    io::{Read, Seek},
    path::Path,
};

use log::{debug, trace};

pub use types::{ClrImage, Detection, ImageFormat, Rejection};

use crate::{file::parser::Parser, File, Result};
use signatures::{
    CLR_DIRECTORY_INDEX, CLR_HEADER_PREAMBLE, COFF_CHARACTERISTICS_SIZE, COFF_SYMBOL_FIELDS_SIZE,
    DATA_DIRECTORY_ENTRY_SIZE, DOS_SIGNATURE, LOADER_STUB_SIZE, MACHINE_AMD64, PE_POINTER_OFFSET,
    PE_SIGNATURE, SECTION_ENTRY_TAIL, SECTION_NAME_TO_RAW_POINTER, TEXT_SECTION_NAME,
};

/// Walks the headers of an in-memory image.
///
/// Infallible: bytes that are already in hand cannot produce an access fault, and every
/// structural problem, truncation included, is a [`Detection::NotAssembly`].
///
/// # Examples
///
/// ```rust
/// use clrprobe::{detect, Detection, Rejection};
///
/// assert_eq!(detect(b"hello world"), Detection::NotAssembly(Rejection::DosSignature));
/// assert_eq!(detect(b"MZ"), Detection::NotAssembly(Rejection::Truncated));
/// ```
#[must_use]
pub fn detect(data: &[u8]) -> Detection {
    let mut parser = Parser::new(data);
    match walk(&mut parser) {
        Ok(detection) => detection,
        Err(error) => {
            trace!("walk stopped at offset {:#x}: {}", parser.pos(), error);
            Detection::NotAssembly(Rejection::Truncated)
        }
    }
}

/// Returns `true` if `data` is a CLR assembly image.
#[must_use]
pub fn is_assembly_bytes(data: &[u8]) -> bool {
    detect(data).is_assembly()
}

/// Opens the file at `path` and walks its headers.
///
/// The file is memory-mapped for the duration of the call and released before returning.
///
/// # Errors
///
/// Returns [`crate::Error::Empty`] for an empty path and [`crate::Error::FileError`] or
/// [`crate::Error::Error`] if the file cannot be opened or mapped. Malformed content is never
/// an error.
pub fn detect_path(path: impl AsRef<Path>) -> Result<Detection> {
    let path = path.as_ref();
    let detection = File::from_path(path)?.detect();

    match detection {
        Detection::Assembly(image) => debug!(
            "{}: {} assembly, CLR header at {:#x}",
            path.display(),
            image.format,
            image.clr_header_offset
        ),
        Detection::NotAssembly(rejection) => {
            debug!("{}: not an assembly ({})", path.display(), rejection);
        }
    }

    Ok(detection)
}

/// Returns whether the file at `path` contains a CLR assembly.
///
/// # Errors
///
/// Same as [`detect_path`]: only access faults are errors.
///
/// # Examples
///
/// ```rust,no_run
/// use clrprobe::{is_assembly, Error};
///
/// match is_assembly("/does/not/exist.dll") {
///     Err(Error::FileError(error)) => assert_eq!(error.kind(), std::io::ErrorKind::NotFound),
///     _ => unreachable!(),
/// }
/// ```
pub fn is_assembly(path: impl AsRef<Path>) -> Result<bool> {
    Ok(detect_path(path)?.is_assembly())
}

/// Walks the headers of a readable, seekable stream.
///
/// The stream is rewound and drained; offsets are interpreted from its start.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] if the stream cannot be rewound or read.
pub fn detect_reader<R: Read + Seek>(reader: R) -> Result<Detection> {
    Ok(File::from_reader(reader)?.detect())
}

/// Returns whether a readable, seekable stream contains a CLR assembly.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] if the stream cannot be rewound or read.
pub fn is_assembly_reader<R: Read + Seek>(reader: R) -> Result<bool> {
    Ok(detect_reader(reader)?.is_assembly())
}

fn walk(parser: &mut Parser) -> Result<Detection> {
    // MS-DOS stub
    if parser.read_array::<2>()? != DOS_SIGNATURE {
        return Ok(Detection::NotAssembly(Rejection::DosSignature));
    }

    parser.seek(PE_POINTER_OFFSET)?;
    let pe_offset = to_offset(parser.read_le::<u32>()?)?;

    // PE signature and COFF header
    parser.seek(pe_offset)?;
    if parser.read_array::<4>()? != PE_SIGNATURE {
        return Ok(Detection::NotAssembly(Rejection::PeSignature));
    }

    let machine = parser.read_array::<2>()?;
    let number_of_sections = parser.read_le::<u16>()?;
    parser.advance_by(COFF_SYMBOL_FIELDS_SIZE)?;
    let optional_header_size = parser.read_le::<u16>()?;
    parser.advance_by(COFF_CHARACTERISTICS_SIZE)?;

    trace!(
        "PE header at {:#x}: machine {:#06x}, {} sections, optional header {} bytes",
        pe_offset,
        u16::from_le_bytes(machine),
        number_of_sections,
        optional_header_size
    );

    // Optional header, data directory 14
    let optional_header_start = parser.pos();
    let format = ImageFormat::from_magic(parser.read_array()?);
    parser.advance_by(
        format.data_directory_base() + CLR_DIRECTORY_INDEX * DATA_DIRECTORY_ENTRY_SIZE,
    )?;
    if parser.read_le::<u64>()? == 0 {
        return Ok(Detection::NotAssembly(Rejection::ClrDirectory));
    }

    // Section table
    let Some(section_table) = optional_header_start.checked_add(usize::from(optional_header_size))
    else {
        return Err(out_of_bounds_error!());
    };
    parser.seek(section_table)?;

    let Some(text_offset) = find_text_section(parser, number_of_sections)? else {
        return Ok(Detection::NotAssembly(Rejection::TextSection));
    };

    // CLR runtime header
    parser.seek(text_offset)?;
    if machine != MACHINE_AMD64 {
        parser.advance_by(LOADER_STUB_SIZE)?;
    }

    let clr_header_offset = parser.pos();
    if parser.read_array::<8>()? != CLR_HEADER_PREAMBLE {
        return Ok(Detection::NotAssembly(Rejection::ClrHeader));
    }

    Ok(Detection::Assembly(ClrImage {
        format,
        machine: u16::from_le_bytes(machine),
        text_offset,
        clr_header_offset,
    }))
}

/// Scans up to `count` section table entries starting at the cursor and returns the
/// `PointerToRawData` of the first `.text` section.
fn find_text_section(parser: &mut Parser, count: u16) -> Result<Option<usize>> {
    for _ in 0..count {
        if parser.read_array::<8>()? == TEXT_SECTION_NAME {
            parser.advance_by(SECTION_NAME_TO_RAW_POINTER)?;
            return Ok(Some(to_offset(parser.read_le::<u32>()?)?));
        }

        parser.advance_by(SECTION_ENTRY_TAIL)?;
    }

    Ok(None)
}

fn to_offset(value: u32) -> Result<usize> {
    usize::try_from(value).map_err(|_| out_of_bounds_error!())
}
