use std::{path::PathBuf, process::ExitCode};

use crate::{
    app::GlobalOptions,
    commands::common::{exit_status, FileReport},
    output::print_output,
};

pub fn run(paths: &[PathBuf], opts: &GlobalOptions) -> anyhow::Result<ExitCode> {
    let reports: Vec<FileReport> = paths
        .iter()
        .map(|path| FileReport::new(path, &clrprobe::detect_path(path)))
        .collect();

    print_output(&reports, opts, |reports| {
        for report in reports {
            println!("{}: {}", report.file, report.verdict());
        }
    })?;

    Ok(ExitCode::from(exit_status(&reports)))
}
