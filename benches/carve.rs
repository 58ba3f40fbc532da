// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use seamshrink::{calculate_energy, find_horizontal, find_vertical, SeamCarver};

fn picture(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 13 + y * 7) % 256) as u8,
            ((x * y) % 256) as u8,
            ((x ^ y) % 256) as u8,
        ])
    })
}

fn energy(c: &mut Criterion) {
    let image = picture(320, 240);
    c.bench_function("energy 320x240", |b| {
        b.iter(|| calculate_energy(black_box(&image)))
    });
}

fn tables(c: &mut Criterion) {
    let energy = calculate_energy(&picture(320, 240));
    c.bench_function("vertical tables 320x240", |b| {
        b.iter(|| find_vertical(black_box(&energy)))
    });
    c.bench_function("horizontal tables 320x240", |b| {
        b.iter(|| find_horizontal(black_box(&energy)))
    });
}

fn shrink(c: &mut Criterion) {
    let image = picture(120, 90);
    c.bench_function("shrink 120x90 to 100x80", |b| {
        b.iter(|| {
            let mut carver = SeamCarver::new(image.clone()).unwrap();
            carver.shrink(100, 80).unwrap();
            carver.into_image()
        })
    });
}

criterion_group!(benches, energy, tables, shrink);
criterion_main!(benches);
