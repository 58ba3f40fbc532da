// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is its edge strength: for each of the three
//! color channels, the absolute responses of the horizontal and
//! vertical Sobel operators are added together, and the three channel
//! sums are added again.  Borders are reflected (reflect-101, the same
//! rule most image libraries default to for Sobel), so every pixel,
//! including the corners of a one-pixel-wide strip, gets a finite,
//! non-negative value.

use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, GrayImage, Luma, Pixel};
use itertools::{iproduct, Itertools, MinMaxResult};
use num_traits::ToPrimitive;

/// Per-pixel importance, same shape as the image it came from.
pub type EnergyGrid = TwoDimensionalMap<f64>;

// One pixel, as three channels of plain floating point.  Whatever the
// subpixel depth of the source, the energy pass only ever sees these.
type Channels = [f64; 3];

type Kernel3 = [[f64; 3]; 3];

const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

// Reflect-101 border indexing: -1 maps to 1, len maps to len - 2.  A
// dimension of length one has nothing to reflect against, so every
// offset collapses onto the only index there is.
fn reflect101(i: i64, len: u32) -> u32 {
    if len <= 1 {
        return 0;
    }
    let period = 2 * i64::from(len) - 2;
    let r = i.rem_euclid(period);
    if r < i64::from(len) {
        r as u32
    } else {
        (period - r) as u32
    }
}

fn channel_planes<I, P>(image: &I) -> TwoDimensionalMap<Channels>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel,
{
    let (width, height) = image.dimensions();
    let mut planes = TwoDimensionalMap::new(width, height);
    for (cell, (y, x)) in planes
        .as_mut_slice()
        .iter_mut()
        .zip(iproduct!(0..height, 0..width))
    {
        let c = image.get_pixel(x, y).to_rgb().0;
        *cell = [
            c[0].to_f64().unwrap_or(0.0),
            c[1].to_f64().unwrap_or(0.0),
            c[2].to_f64().unwrap_or(0.0),
        ];
    }
    planes
}

fn energy_row(planes: &TwoDimensionalMap<Channels>, y: u32, out: &mut [f64]) {
    let (width, height) = planes.dimensions();
    let rows = [
        planes.row(reflect101(i64::from(y) - 1, height)),
        planes.row(y),
        planes.row(reflect101(i64::from(y) + 1, height)),
    ];

    for (x, cell) in out.iter_mut().enumerate() {
        let x = x as i64;
        let cols = [
            reflect101(x - 1, width) as usize,
            x as usize,
            reflect101(x + 1, width) as usize,
        ];

        let mut energy = 0.0;
        for channel in 0..3 {
            let (mut gx, mut gy) = (0.0, 0.0);
            for (ky, row) in rows.iter().enumerate() {
                for (kx, col) in cols.iter().enumerate() {
                    let v = row[*col][channel];
                    gx += SOBEL_X[ky][kx] * v;
                    gy += SOBEL_Y[ky][kx] * v;
                }
            }
            energy += gx.abs() + gy.abs();
        }
        *cell = energy;
    }
}

fn fill_energy_sequential(planes: &TwoDimensionalMap<Channels>, energy: &mut EnergyGrid) {
    let width = planes.width() as usize;
    if width == 0 {
        return;
    }
    for (y, row) in energy.as_mut_slice().chunks_mut(width).enumerate() {
        energy_row(planes, y as u32, row);
    }
}

#[cfg(not(feature = "threaded"))]
fn fill_energy(planes: &TwoDimensionalMap<Channels>, energy: &mut EnergyGrid) {
    fill_energy_sequential(planes, energy)
}

// Each row of the energy map only reads its own row and the two
// around it in the (shared, read-only) channel planes, so the output
// can be cut into horizontal bands with chunks_mut and each band
// handed to its own thread without anything unsafe.
#[cfg(feature = "threaded")]
fn fill_energy(planes: &TwoDimensionalMap<Channels>, energy: &mut EnergyGrid) {
    let (width, height) = (planes.width() as usize, planes.height() as usize);
    let bands = num_cpus::get().min(height);
    if width == 0 || bands <= 1 {
        return fill_energy_sequential(planes, energy);
    }

    let band_rows = (height + bands - 1) / bands;
    let result = crossbeam::thread::scope(|s| {
        for (band, chunk) in energy
            .as_mut_slice()
            .chunks_mut(band_rows * width)
            .enumerate()
        {
            s.spawn(move |_| {
                for (offset, row) in chunk.chunks_mut(width).enumerate() {
                    energy_row(planes, (band * band_rows + offset) as u32, row);
                }
            });
        }
    });
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

/// Compute the energy of every pixel in an image.  This is generic on
/// the image type; any pixel that can be viewed as RGB works, at any
/// subpixel depth.  Pure: the image is only read.
pub fn calculate_energy<I, P>(image: &I) -> EnergyGrid
where
    I: GenericImageView<Pixel = P>,
    P: Pixel,
{
    let planes = channel_planes(image);
    let (width, height) = planes.dimensions();
    let mut energy = EnergyGrid::new(width, height);
    fill_energy(&planes, &mut energy);
    energy
}

/// Render an energy map as a greyscale image, stretched so that the
/// lowest energy is black and the highest is white.  A map with no
/// contrast at all comes out black.
pub fn energy_to_image(energy: &EnergyGrid) -> GrayImage {
    let (low, high) = match energy.as_slice().iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(e) => (e, e),
        MinMaxResult::MinMax(low, high) => (low, high),
    };
    let span = high - low;

    GrayImage::from_fn(energy.width(), energy.height(), |x, y| {
        let level = if span > 0.0 {
            ((energy[(x, y)] - low) / span * 255.0).round()
        } else {
            0.0
        };
        Luma([level as u8])
    })
}
