// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Paint a seam over a copy of an image, for showing the user which
//! pixels the next carve would take.

use image::{GenericImageView, ImageBuffer, Pixel, Primitive};

// The band of `thickness` pixels centred (left-biased) on `at`, clipped
// to `0..len`.
fn band(at: u32, thickness: u32, len: u32) -> std::ops::Range<u32> {
    let start = at.saturating_sub(thickness / 2);
    let end = start.saturating_add(thickness).min(len);
    start..end
}

/// An owned copy of any image view.
pub(crate) fn copy_of<I, P, S>(image: &I) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| image.get_pixel(x, y))
}

/// Copy the image and paint `color` along a vertical seam (one column
/// coordinate per row), `thickness` pixels wide.
pub fn paint_vertical_seam<I, P, S>(
    image: &I,
    seam: &[u32],
    color: P,
    thickness: u32,
) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut out = copy_of(image);
    let (width, height) = out.dimensions();
    for (y, x) in seam.iter().enumerate().take(height as usize) {
        for bx in band(*x, thickness, width) {
            out.put_pixel(bx, y as u32, color);
        }
    }
    out
}

/// Copy the image and paint `color` along a horizontal seam (one row
/// coordinate per column), `thickness` pixels tall.
pub fn paint_horizontal_seam<I, P, S>(
    image: &I,
    seam: &[u32],
    color: P,
    thickness: u32,
) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut out = copy_of(image);
    let (width, height) = out.dimensions();
    for (x, y) in seam.iter().enumerate().take(width as usize) {
        for by in band(*y, thickness, height) {
            out.put_pixel(x as u32, by, color);
        }
    }
    out
}
