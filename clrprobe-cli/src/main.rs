mod app;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<ExitCode> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .expect("failed to set Ctrl+C handler");

    let cli = Cli::parse();

    // Show clrprobe info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("clrprobe", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Check { paths } => commands::check::run(paths, &cli.global),
        Command::Scan {
            path,
            no_recursive,
            all,
        } => commands::scan::run(path, !*no_recursive, *all, &cli.global),
    }
}
