//! # clrprobe Prelude
//!
//! The types and functions needed for everyday detection, for glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all clrprobe operations
pub use crate::Error;

/// The result type used throughout clrprobe
pub use crate::Result;

// ================================================================================================
// Detection
// ================================================================================================

/// Verdict entry points for paths, streams and in-memory data
pub use crate::{
    detect, detect_path, detect_reader, is_assembly, is_assembly_bytes, is_assembly_reader,
};

/// Detection results
pub use crate::{ClrImage, Detection, ImageFormat, Rejection};

/// Image sources and the byte reader
pub use crate::{File, Parser};

// ================================================================================================
// Batch Scans
// ================================================================================================

/// Candidate sources and parallel scans
pub use crate::scan::{assemblies, scan, CandidateSource, Directory, ScanEntry};
