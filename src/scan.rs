//! Batch detection over candidate files.
//!
//! Where candidate files come from is a capability of the caller, expressed through the
//! [`CandidateSource`] trait. [`Directory`] is the stock implementation: it walks a directory
//! tree and keeps every file with an `.exe` or `.dll` extension (case-insensitive).
//!
//! [`scan`] runs the header walk over all candidates in parallel and reports every file, while
//! [`assemblies`] keeps only the paths that are CLR assemblies.
//!
//! # Examples
//!
//! ```rust,no_run
//! use clrprobe::scan::{assemblies, scan, Directory};
//!
//! let source = Directory::new("/opt/app/bin");
//! for entry in scan(&source)? {
//!     match &entry.result {
//!         Ok(detection) => println!("{}: {}", entry.path.display(), detection.is_assembly()),
//!         Err(error) => println!("{}: {}", entry.path.display(), error),
//!     }
//! }
//!
//! let managed = assemblies(&Directory::new("/opt/app/bin").recursive(false))?;
//! println!("{} assemblies", managed.len());
//! # Ok::<(), clrprobe::Error>(())
//! ```

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use rayon::prelude::*;

use crate::{detect::detect_path, Detection, Error, Result};

/// File extensions considered by [`Directory`], compared case-insensitively.
pub const EXECUTABLE_EXTENSIONS: [&str; 2] = ["exe", "dll"];

/// A provider of candidate files to probe.
pub trait CandidateSource {
    /// Lists the files to probe.
    ///
    /// # Errors
    ///
    /// Returns an access fault if the candidates cannot be enumerated.
    fn candidates(&self) -> Result<Vec<PathBuf>>;
}

impl CandidateSource for [PathBuf] {
    fn candidates(&self) -> Result<Vec<PathBuf>> {
        Ok(self.to_vec())
    }
}

impl CandidateSource for Vec<PathBuf> {
    fn candidates(&self) -> Result<Vec<PathBuf>> {
        Ok(self.clone())
    }
}

/// Returns `true` if `path` ends in `.exe` or `.dll`, in any letter case.
#[must_use]
pub fn has_executable_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| {
            EXECUTABLE_EXTENSIONS
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        })
}

/// Executable files below a root directory.
#[derive(Debug, Clone)]
pub struct Directory {
    root: PathBuf,
    recursive: bool,
}

impl Directory {
    /// Creates a recursive source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Directory {
            root: root.into(),
            recursive: true,
        }
    }

    /// Whether subdirectories are descended into.
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collect(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            // Symlinks are not followed into directories, so cycles cannot recurse forever
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                if self.recursive {
                    self.collect(&path, files)?;
                }
            } else if has_executable_extension(&path) && is_regular_file(&path, file_type) {
                files.push(path);
            }
        }

        Ok(())
    }
}

/// Pipes, sockets and devices are never candidates: opening a FIFO blocks until a writer
/// appears. A symlink counts if its target is a regular file; a dangling one is kept so its
/// access fault is reported for that entry.
fn is_regular_file(path: &Path, file_type: fs::FileType) -> bool {
    if file_type.is_symlink() {
        return fs::metadata(path).map_or(true, |metadata| metadata.is_file());
    }

    file_type.is_file()
}

impl CandidateSource for Directory {
    fn candidates(&self) -> Result<Vec<PathBuf>> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::Empty);
        }

        let mut files = Vec::new();
        self.collect(&self.root, &mut files)?;
        files.sort();

        debug!(
            "{}: {} candidate files",
            self.root.display(),
            files.len()
        );
        Ok(files)
    }
}

/// The outcome of probing one candidate.
#[derive(Debug)]
pub struct ScanEntry {
    /// The probed file
    pub path: PathBuf,
    /// The detection, or the access fault that prevented it
    pub result: Result<Detection>,
}

impl ScanEntry {
    /// Returns `true` if the file was read and is a CLR assembly.
    #[must_use]
    pub fn is_assembly(&self) -> bool {
        matches!(&self.result, Ok(detection) if detection.is_assembly())
    }
}

/// Probes every candidate of `source`, in parallel.
///
/// Entries come back in candidate order. A file that cannot be opened is reported in its own
/// entry and does not stop the scan.
///
/// # Errors
///
/// Returns the enumeration fault if `source` cannot list its candidates.
pub fn scan<S: CandidateSource + ?Sized>(source: &S) -> Result<Vec<ScanEntry>> {
    let candidates = source.candidates()?;

    Ok(candidates
        .into_par_iter()
        .map(|path| {
            let result = detect_path(&path);
            ScanEntry { path, result }
        })
        .collect())
}

/// Returns the candidates of `source` that are CLR assemblies.
///
/// # Errors
///
/// Returns the enumeration fault, or the first access fault hit while probing a candidate.
/// Access faults are never folded into a negative verdict.
pub fn assemblies<S: CandidateSource + ?Sized>(source: &S) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in scan(source)? {
        if entry.result?.is_assembly() {
            found.push(entry.path);
        }
    }

    Ok(found)
}
