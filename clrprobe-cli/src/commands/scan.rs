use std::{path::Path, process::ExitCode};

use anyhow::Context;
use clrprobe::scan::{scan, Directory};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{FileReport, EXIT_ACCESS_FAULT, EXIT_ASSEMBLY},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct ScanInfo {
    root: String,
    recursive: bool,
    results: Vec<FileReport>,
    total_files: usize,
    assembly_count: usize,
    error_count: usize,
}

pub fn run(
    path: &Path,
    recursive: bool,
    all: bool,
    opts: &GlobalOptions,
) -> anyhow::Result<ExitCode> {
    let source = Directory::new(path).recursive(recursive);
    let entries =
        scan(&source).with_context(|| format!("failed to read directory: {}", path.display()))?;

    let reports: Vec<FileReport> = entries
        .iter()
        .map(|entry| FileReport::new(&entry.path, &entry.result))
        .collect();

    let total_files = reports.len();
    let assembly_count = reports.iter().filter(|r| r.assembly).count();
    let error_count = reports.iter().filter(|r| r.is_fault()).count();

    // Faults are always listed, rejections only with --all
    let results = reports
        .into_iter()
        .filter(|r| all || r.assembly || r.is_fault())
        .collect();

    let info = ScanInfo {
        root: path.display().to_string(),
        recursive,
        results,
        total_files,
        assembly_count,
        error_count,
    };

    print_output(&info, opts, display_scan)?;

    Ok(ExitCode::from(if info.error_count > 0 {
        EXIT_ACCESS_FAULT
    } else {
        EXIT_ASSEMBLY
    }))
}

fn display_scan(info: &ScanInfo) {
    if !info.results.is_empty() {
        print_table(&info.results);
        println!();
    }

    println!(
        "Scanned {} files, {} CLR assemblies, {} unreadable",
        info.total_files, info.assembly_count, info.error_count
    );
}

fn print_table(reports: &[FileReport]) {
    let mut tw = TabWriter::new(&[
        ("File", Align::Left),
        ("Verdict", Align::Left),
        ("CLR Header", Align::Right),
    ]);
    for report in reports {
        tw.row(vec![
            report.file.clone(),
            report.verdict(),
            report
                .clr_header_offset
                .map_or_else(String::new, |offset| format!("{offset:#x}")),
        ]);
    }
    tw.print();
}
