//! End-to-end verdicts for files on disk, streams and in-memory images.
//!
//! Every image is synthesized; the cases cover the shapes a directory of build output
//! actually contains: managed x86 and x64 libraries, native executables, text files that
//! happen to be named `.dll`, and files cut short by an interrupted copy.

#[path = "../src/test/image.rs"]
mod image;
#[path = "../src/test/temp.rs"]
mod temp;

use std::{fs, io::Cursor};

use clrprobe::prelude::*;
use image::{ImageBuilder, MACHINE_AMD64, MACHINE_I386};
use temp::TempImage;

#[test]
fn managed_libraries() {
    let x86 = TempImage::new("Managed.x86.dll", &ImageBuilder::dll_x86().build());
    let x64 = TempImage::new("Managed.x64.dll", &ImageBuilder::dll_x64().build());

    assert!(is_assembly(x86.path()).unwrap());
    assert!(is_assembly(x64.path()).unwrap());

    let image = *detect_path(x86.path()).unwrap().image().unwrap();
    assert_eq!(image.format, ImageFormat::Pe32);
    assert_eq!(image.machine, MACHINE_I386);
    assert_eq!(
        image.clr_header_offset,
        ImageBuilder::dll_x86().clr_header_offset().unwrap()
    );

    let image = *detect_path(x64.path()).unwrap().image().unwrap();
    assert_eq!(image.format, ImageFormat::Pe32Plus);
    assert_eq!(image.machine, MACHINE_AMD64);
    assert!(image.is_amd64());
    assert_eq!(image.clr_header_offset, image.text_offset);
}

#[test]
fn native_and_foreign_files() {
    let native = TempImage::new("kernel.dll", &ImageBuilder::native_x86().build());
    let text = TempImage::new("notes.dll", b"This is not a PE image at all.\r\n");
    let empty = TempImage::new("empty.dll", b"");
    let short = TempImage::new("short.dll", &ImageBuilder::dll_x86().build()[..63]);

    assert_eq!(
        detect_path(native.path()).unwrap(),
        Detection::NotAssembly(Rejection::ClrDirectory)
    );
    assert_eq!(
        detect_path(text.path()).unwrap(),
        Detection::NotAssembly(Rejection::DosSignature)
    );
    assert_eq!(
        detect_path(empty.path()).unwrap(),
        Detection::NotAssembly(Rejection::Truncated)
    );
    assert_eq!(
        detect_path(short.path()).unwrap(),
        Detection::NotAssembly(Rejection::Truncated)
    );

    for file in [&native, &text, &empty, &short] {
        assert!(!is_assembly(file.path()).unwrap());
    }
}

#[test]
fn missing_text_section() {
    let image = ImageBuilder::dll_x86().sections(&["CODE", ".rsrc"]).build();
    let file = TempImage::new("nocode.dll", &image);

    assert_eq!(
        detect_path(file.path()).unwrap().rejection(),
        Some(Rejection::TextSection)
    );
}

#[test]
fn every_truncation_is_a_verdict() {
    let full = ImageBuilder::dll_x86().build();
    let header_end = ImageBuilder::dll_x86().clr_header_offset().unwrap() + 8;

    for len in 0..header_end {
        assert_eq!(
            detect(&full[..len]),
            Detection::NotAssembly(Rejection::Truncated),
            "prefix of {len} bytes"
        );
    }
    assert!(detect(&full[..header_end]).is_assembly());
}

#[test]
fn verdict_is_stable() {
    let file = TempImage::new("stable.dll", &ImageBuilder::dll_x64().build());

    let first = detect_path(file.path()).unwrap();
    for _ in 0..4 {
        assert_eq!(detect_path(file.path()).unwrap(), first);
    }
}

#[test]
fn sources_agree() {
    let data = ImageBuilder::dll_x86().build();
    let file = TempImage::new("sources.dll", &data);

    let from_path = detect_path(file.path()).unwrap();
    let from_bytes = detect(&data);
    let from_reader = detect_reader(Cursor::new(data.clone())).unwrap();
    let from_handle = detect_reader(fs::File::open(file.path()).unwrap()).unwrap();
    let from_file = File::from_path(file.path()).unwrap().detect();

    assert_eq!(from_path, from_bytes);
    assert_eq!(from_path, from_reader);
    assert_eq!(from_path, from_handle);
    assert_eq!(from_path, from_file);
}

#[test]
fn access_faults_are_errors() {
    match is_assembly("/nonexistent/clrprobe/Missing.dll") {
        Err(Error::FileError(error)) => assert_eq!(error.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected FileError, got {other:?}"),
    }

    assert!(matches!(is_assembly(""), Err(Error::Empty)));
}
