use std::path::Path;

use clrprobe::{Detection, ImageFormat, Rejection};
use serde::Serialize;

/// Every probed file was an assembly.
pub const EXIT_ASSEMBLY: u8 = 0;
/// At least one probed file was readable but not an assembly.
pub const EXIT_NOT_ASSEMBLY: u8 = 1;
/// At least one file could not be read.
pub const EXIT_ACCESS_FAULT: u8 = 2;

/// Serializable verdict for a single file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub assembly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clr_header_offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(path: &Path, result: &clrprobe::Result<Detection>) -> Self {
        let mut report = FileReport {
            file: path.display().to_string(),
            assembly: false,
            format: None,
            machine: None,
            clr_header_offset: None,
            rejection: None,
            error: None,
        };

        match result {
            Ok(Detection::Assembly(image)) => {
                report.assembly = true;
                report.format = Some(image.format);
                report.machine = Some(machine_name(image.machine).to_string());
                report.clr_header_offset = Some(image.clr_header_offset);
            }
            Ok(Detection::NotAssembly(reason)) => report.rejection = Some(*reason),
            Err(error) => report.error = Some(error.to_string()),
        }

        report
    }

    pub fn is_fault(&self) -> bool {
        self.error.is_some()
    }

    /// Short human-readable verdict, e.g. `assembly (PE32+, AMD64)`.
    pub fn verdict(&self) -> String {
        if let Some(error) = &self.error {
            return format!("error: {error}");
        }
        if let Some(reason) = self.rejection {
            return format!("not an assembly ({})", reason.description());
        }
        match (&self.format, &self.machine) {
            (Some(format), Some(machine)) => format!("assembly ({format}, {machine})"),
            _ => "assembly".to_string(),
        }
    }
}

/// Name of a COFF machine type, for display only.
pub fn machine_name(machine: u16) -> &'static str {
    match machine {
        0x014C => "i386",
        0x8664 => "AMD64",
        0xAA64 => "ARM64",
        0x01C4 => "ARMNT",
        0x0200 => "IA64",
        _ => "unknown",
    }
}

/// Exit status for a set of reports: faults dominate, then any non-assembly.
pub fn exit_status(reports: &[FileReport]) -> u8 {
    if reports.iter().any(FileReport::is_fault) {
        EXIT_ACCESS_FAULT
    } else if reports.iter().all(|r| r.assembly) {
        EXIT_ASSEMBLY
    } else {
        EXIT_NOT_ASSEMBLY
    }
}
