// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cut a seam out of an image.
//!
//! Removal never touches the source image: the result is a new buffer
//! one column narrower (vertical seam) or one row shorter (horizontal
//! seam), with every pixel past the seam shifted over by one.

use crate::error::{Error, Result};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};

fn check_seam(seam: &[u32], length: u32, bound: u32, what: &str) -> Result<()> {
    if seam.len() != length as usize {
        return Err(Error::invalid_argument(format!(
            "{} seam has {} entries, image needs {}",
            what,
            seam.len(),
            length
        )));
    }
    if let Some(bad) = seam.iter().find(|c| **c >= bound) {
        return Err(Error::invalid_argument(format!(
            "{} seam coordinate {} is outside 0..{}",
            what, bad, bound
        )));
    }
    Ok(())
}

/// Remove one pixel from every row, at the column the seam gives for
/// that row.  Fails if the image is already a single pixel wide.
pub fn remove_vertical_seam<I, P, S>(image: &I, seam: &[u32]) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width <= 1 {
        return Err(Error::invalid_operation(
            "cannot remove a vertical seam from an image 1 pixel wide",
        ));
    }
    check_seam(seam, height, width, "vertical")?;

    Ok(ImageBuffer::from_fn(width - 1, height, |x, y| {
        let cut = seam[y as usize];
        image.get_pixel(if x < cut { x } else { x + 1 }, y)
    }))
}

/// Remove one pixel from every column, at the row the seam gives for
/// that column.  Fails if the image is already a single pixel tall.
pub fn remove_horizontal_seam<I, P, S>(image: &I, seam: &[u32]) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if height <= 1 {
        return Err(Error::invalid_operation(
            "cannot remove a horizontal seam from an image 1 pixel tall",
        ));
    }
    check_seam(seam, width, height, "horizontal")?;

    Ok(ImageBuffer::from_fn(width, height - 1, |x, y| {
        let cut = seam[x as usize];
        image.get_pixel(x, if y < cut { y } else { y + 1 })
    }))
}
