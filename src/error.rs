use thiserror::Error;

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Errors fall into two tiers. Access faults ([`Error::Empty`], [`Error::FileError`],
/// [`Error::Error`]) mean the image source itself could not be obtained and are always handed
/// back to the caller. [`Error::OutOfBounds`] is the truncation signal of the byte reader; the
/// header walker consumes it and turns it into a negative verdict, so callers of the detection
/// entry points never observe it.
///
/// # Examples
///
/// ```rust,no_run
/// use clrprobe::{is_assembly, Error};
///
/// match is_assembly("Library.dll") {
///     Ok(true) => println!("CLR assembly"),
///     Ok(false) => println!("not a CLR assembly"),
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An out of bound access was attempted while reading the image.
    ///
    /// Raised by the byte reader when a seek, skip or read would move past the end of the
    /// source, or when the position arithmetic itself would overflow. The fields record the
    /// source location that detected the condition.
    #[error("Out of Bound read would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Provided input was empty.
    ///
    /// Returned when an empty path is handed to one of the path based entry points. This is a
    /// caller contract violation and never a negative verdict.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or reading the image source,
    /// such as a missing file or insufficient permissions. The original [`std::io::ErrorKind`]
    /// is preserved.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for failures that don't fit into other categories, e.g. a file that could be
    /// opened but not memory-mapped.
    #[error("{0}")]
    Error(String),
}
