//! Benchmarks for the decode, resample and encode stages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imgxform_core::validation::{OutputFormat, TargetWidth};
use imgxform_image::{decode, encode, resample};
use std::io::Cursor;

fn source_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

fn bench_resample(c: &mut Criterion) {
    let grid = decode(&source_png(2048, 1536), Some("image/png")).unwrap();

    for width in [300, 800] {
        let target = TargetWidth::try_from(width).unwrap();
        c.bench_function(&format!("lanczos3_2048_to_{width}"), |b| {
            b.iter(|| resample(black_box(grid.clone()), target))
        });
    }
}

fn bench_encode(c: &mut Criterion) {
    let grid = decode(&source_png(800, 600), Some("image/png")).unwrap();

    c.bench_function("encode_jpeg_800", |b| {
        b.iter(|| encode(black_box(&grid), OutputFormat::Jpeg))
    });

    c.bench_function("encode_webp_800", |b| {
        b.iter(|| encode(black_box(&grid), OutputFormat::Webp))
    });
}

criterion_group!(benches, bench_resample, bench_encode);
criterion_main!(benches);
