//! Results of a header walk.

use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::detect::signatures::{
    MACHINE_AMD64, PE32PLUS_DATA_DIRECTORY_BASE, PE32_DATA_DIRECTORY_BASE, PE32_MAGIC,
};

/// Optional header flavour, selected by the optional header magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter, Serialize)]
pub enum ImageFormat {
    /// 32-bit optional header, magic `0x010B`
    #[strum(serialize = "PE32")]
    #[serde(rename = "PE32")]
    Pe32,
    /// 64-bit optional header; any magic other than `0x010B`
    #[strum(serialize = "PE32+")]
    #[serde(rename = "PE32+")]
    Pe32Plus,
}

impl ImageFormat {
    /// Classifies the raw optional header magic.
    ///
    /// Only the PE32 magic is recognised explicitly; everything else, including ROM images and
    /// garbage, is walked with the PE32+ layout.
    #[must_use]
    pub fn from_magic(magic: [u8; 2]) -> Self {
        if magic == PE32_MAGIC {
            ImageFormat::Pe32
        } else {
            ImageFormat::Pe32Plus
        }
    }

    /// Distance from the end of the magic field to the first data directory entry.
    #[must_use]
    pub fn data_directory_base(self) -> usize {
        match self {
            ImageFormat::Pe32 => PE32_DATA_DIRECTORY_BASE,
            ImageFormat::Pe32Plus => PE32PLUS_DATA_DIRECTORY_BASE,
        }
    }
}

/// The structural check that decided a negative verdict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Rejection {
    /// The image does not start with `MZ`
    DosSignature,
    /// No `PE\0\0` at the offset stored in `e_lfanew`
    PeSignature,
    /// The COM descriptor data directory entry is zero
    ClrDirectory,
    /// No section named `.text` in the section table
    TextSection,
    /// The bytes at the CLR header location are not the 2.5 runtime header
    ClrHeader,
    /// A read ran past the end of the image, or an offset was not addressable
    Truncated,
}

impl Rejection {
    /// Human readable explanation.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Rejection::DosSignature => "missing MZ signature",
            Rejection::PeSignature => "missing PE signature",
            Rejection::ClrDirectory => "no CLR runtime header directory",
            Rejection::TextSection => "no .text section",
            Rejection::ClrHeader => "CLR header signature mismatch",
            Rejection::Truncated => "image truncated",
        }
    }
}

/// Where the walk found the CLR header of an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClrImage {
    /// Optional header flavour
    pub format: ImageFormat,
    /// COFF machine type, e.g. `0x014C` (i386) or `0x8664` (AMD64)
    pub machine: u16,
    /// File offset of the `.text` section's raw data
    pub text_offset: usize,
    /// File offset of the CLR runtime header
    pub clr_header_offset: usize,
}

impl ClrImage {
    /// Returns `true` for AMD64 images, which carry no loader stub in front of the CLR header.
    #[must_use]
    pub fn is_amd64(&self) -> bool {
        self.machine == u16::from_le_bytes(MACHINE_AMD64)
    }
}

/// Outcome of one header walk.
///
/// Collapses to the boolean verdict through [`Detection::is_assembly`]; the payload only
/// explains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Every structural check passed and the CLR header matched
    Assembly(ClrImage),
    /// The walk stopped at the given check
    NotAssembly(Rejection),
}

impl Detection {
    /// The verdict: `true` iff the image is a CLR assembly.
    #[must_use]
    pub fn is_assembly(&self) -> bool {
        matches!(self, Detection::Assembly(_))
    }

    /// Location details of a positive verdict.
    #[must_use]
    pub fn image(&self) -> Option<&ClrImage> {
        match self {
            Detection::Assembly(image) => Some(image),
            Detection::NotAssembly(_) => None,
        }
    }

    /// Reason of a negative verdict.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Detection::Assembly(_) => None,
            Detection::NotAssembly(rejection) => Some(*rejection),
        }
    }
}

impl From<Detection> for bool {
    fn from(detection: Detection) -> bool {
        detection.is_assembly()
    }
}
