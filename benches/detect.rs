//! Benchmarks for the header walk.
//!
//! Measures the verdict for in-memory images of the common shapes:
//! - PE32 and PE32+ assemblies
//! - Native images rejected at the COM descriptor directory
//! - Non-PE data rejected at the first signature
//! - An assembly whose `.text` entry is the last of many sections

extern crate clrprobe;

#[path = "../src/test/image.rs"]
mod image;

use clrprobe::detect;
use criterion::{criterion_group, criterion_main, Criterion};
use image::ImageBuilder;
use std::hint::black_box;

fn bench_detect_pe32_assembly(c: &mut Criterion) {
    let data = ImageBuilder::dll_x86().build();

    c.bench_function("detect_pe32_assembly", |b| {
        b.iter(|| black_box(detect(black_box(&data))));
    });
}

fn bench_detect_pe32plus_assembly(c: &mut Criterion) {
    let data = ImageBuilder::dll_x64().build();

    c.bench_function("detect_pe32plus_assembly", |b| {
        b.iter(|| black_box(detect(black_box(&data))));
    });
}

fn bench_detect_native(c: &mut Criterion) {
    let data = ImageBuilder::native_x86().build();

    c.bench_function("detect_native", |b| {
        b.iter(|| black_box(detect(black_box(&data))));
    });
}

fn bench_detect_not_pe(c: &mut Criterion) {
    let data = vec![0x20_u8; 4096];

    c.bench_function("detect_not_pe", |b| {
        b.iter(|| black_box(detect(black_box(&data))));
    });
}

/// Worst case for the section scan: `.text` is the last of 16 entries.
fn bench_detect_text_last(c: &mut Criterion) {
    let mut names = vec![".data"; 15];
    names.push(".text");
    let data = ImageBuilder::dll_x86().sections(&names).build();

    c.bench_function("detect_text_last_of_16", |b| {
        b.iter(|| black_box(detect(black_box(&data))));
    });
}

criterion_group!(
    benches,
    bench_detect_pe32_assembly,
    bench_detect_pe32plus_assembly,
    bench_detect_native,
    bench_detect_not_pe,
    bench_detect_text_last
);
criterion_main!(benches);
