// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # clrprobe
//!
//! Decide whether a file is a CLR (.NET) assembly by reading its PE headers, without a runtime,
//! without a loader and without exceptions on malformed input.
//!
//! `clrprobe` walks the MS-DOS stub, the PE/COFF header, the optional header, the data
//! directories and the section table, and compares the first bytes of the CLR runtime header
//! against the fixed 2.5 preamble. A probe reads a few hundred bytes of a memory-mapped file,
//! so scanning large directory trees is cheap.
//!
//! ## Features
//!
//! - **Loader-free** - pure byte inspection, works for any target architecture on any host
//! - **Total on content** - truncated, corrupt or non-PE input is a `false` verdict, never an error
//! - **Honest about access** - missing files and permission problems are always reported as errors
//! - **Explainable** - [`Detection`] tells which structural check rejected an image
//! - **Batch scans** - parallel probing of directory trees via [`scan`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clrprobe::is_assembly;
//!
//! if is_assembly("MyLibrary.dll")? {
//!     println!("MyLibrary.dll is a .NET assembly");
//! }
//! # Ok::<(), clrprobe::Error>(())
//! ```
//!
//! ### Explaining a verdict
//!
//! ```rust,no_run
//! use clrprobe::{detect_path, Detection};
//!
//! match detect_path("kernel32.dll")? {
//!     Detection::Assembly(image) => {
//!         println!("{} image, CLR header at {:#x}", image.format, image.clr_header_offset);
//!     }
//!     Detection::NotAssembly(reason) => println!("not an assembly: {}", reason.description()),
//! }
//! # Ok::<(), clrprobe::Error>(())
//! ```
//!
//! ### In-memory data and streams
//!
//! ```rust
//! use clrprobe::{is_assembly_bytes, is_assembly_reader};
//! use std::io::Cursor;
//!
//! assert!(!is_assembly_bytes(b"not a PE image"));
//! assert!(!is_assembly_reader(Cursor::new(Vec::<u8>::new()))?);
//! # Ok::<(), clrprobe::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Only failures to obtain the bytes are errors ([`Error::Empty`], [`Error::FileError`],
//! [`Error::Error`]). Everything about the bytes themselves, including running off the end of
//! a truncated file, is part of the verdict.
//!
//! ## Limitations
//!
//! - 64-bit assemblies are reported regardless of the bitness of the calling process.
//! - Assemblies targeting CLR 1.0/1.1 are not detected.
//! - Only the header signature is validated; metadata tables are not parsed.
#[macro_use]
pub(crate) mod error;

/// Image sources and the bounds-checked byte reader.
pub mod file;

/// Header walk and detection results.
pub mod detect;

/// Candidate enumeration and parallel batch detection.
pub mod scan;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust,no_run
/// use clrprobe::prelude::*;
///
/// let verdict = is_assembly("MyLibrary.dll")?;
/// # Ok::<(), clrprobe::Error>(())
/// ```
pub mod prelude;

/// `clrprobe` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. Used consistently throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `clrprobe` Error type
///
/// The main error type for all operations in this crate. Access faults are errors; malformed
/// image content never is.
pub use error::Error;

/// Detection entry points and result types.
///
/// # Example
///
/// ```rust
/// use clrprobe::{detect, Rejection};
///
/// assert_eq!(detect(b"MZ").rejection(), Some(Rejection::Truncated));
/// ```
pub use detect::{
    detect, detect_path, detect_reader, is_assembly, is_assembly_bytes, is_assembly_reader,
    ClrImage, Detection, ImageFormat, Rejection,
};

/// Provides access to image sources and the low-level byte reader.
///
/// # Example
///
/// ```rust
/// use clrprobe::Parser;
///
/// let data = [0x4D, 0x5A];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_le::<u16>()?, 0x5A4D);
/// # Ok::<(), clrprobe::Error>(())
/// ```
pub use file::{parser::Parser, Backend, File};
