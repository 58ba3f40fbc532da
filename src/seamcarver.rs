// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main carver
//!
//! The carver owns the image being carved together with everything
//! derived from it: the energy map and the cost and step tables for
//! both seam directions.  Those are always consistent with the image.
//! Every carve builds a brand new image, and the carver rebuilds all of
//! the derived tables from it, from scratch, before installing the new
//! snapshot.  A carve that fails leaves the old snapshot in place.

use crate::energy::{calculate_energy, EnergyGrid};
use crate::error::{Error, Result};
use crate::overlay::{copy_of, paint_horizontal_seam, paint_vertical_seam};
use crate::schedule::ShrinkSchedule;
use crate::seamfinder::{find_horizontal, find_vertical, Axis, Seam, SeamFinder, SeamTables};
use crate::seamremover::{remove_horizontal_seam, remove_vertical_seam};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};
use log::{debug, info};

/// A struct for holding the image to be carved, and its seam tables.
#[derive(Debug, Clone)]
pub struct SeamCarver<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    image: ImageBuffer<P, Vec<S>>,
    energy: EnergyGrid,
    vertical: SeamTables,
    horizontal: SeamTables,
}

impl<P, S> SeamCarver<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Take ownership of an image and compute its seam tables.  Fails if
    /// the image has no pixels.
    pub fn new(image: ImageBuffer<P, Vec<S>>) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::invalid_argument(format!(
                "cannot carve an empty {}x{} image",
                width, height
            )));
        }
        Ok(Self::ready(image))
    }

    /// Copy any image view into a carver.
    pub fn from_view<I>(image: &I) -> Result<Self>
    where
        I: GenericImageView<Pixel = P>,
    {
        Self::new(copy_of(image))
    }

    fn ready(image: ImageBuffer<P, Vec<S>>) -> Self {
        let energy = calculate_energy(&image);
        let vertical = find_vertical(&energy);
        let horizontal = find_horizontal(&energy);
        SeamCarver {
            image,
            energy,
            vertical,
            horizontal,
        }
    }

    /// The image as it currently stands.
    pub fn image(&self) -> &ImageBuffer<P, Vec<S>> {
        &self.image
    }

    /// Give up the carver and keep the image.
    pub fn into_image(self) -> ImageBuffer<P, Vec<S>> {
        self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The energy map of the current image.
    pub fn energy(&self) -> &EnergyGrid {
        &self.energy
    }

    /// The cost and step tables for one axis of the current image.
    pub fn tables(&self, axis: Axis) -> &SeamTables {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    /// The cheapest top-to-bottom seam of the current image, one column
    /// per row.
    pub fn trace_min_vertical(&self) -> Seam {
        self.vertical.trace()
    }

    /// The cheapest left-to-right seam of the current image, one row
    /// per column.
    pub fn trace_min_horizontal(&self) -> Seam {
        self.horizontal.trace()
    }

    /// Remove the cheapest seam running along `axis`.
    pub fn pop(&mut self, axis: Axis) -> Result<&ImageBuffer<P, Vec<S>>> {
        let carved = match axis {
            Axis::Vertical => remove_vertical_seam(&self.image, &self.trace_min_vertical())?,
            Axis::Horizontal => {
                remove_horizontal_seam(&self.image, &self.trace_min_horizontal())?
            }
        };
        *self = Self::ready(carved);
        debug!(
            "carved {:?} seam, image now {}x{}",
            axis,
            self.image.width(),
            self.image.height()
        );
        Ok(&self.image)
    }

    /// Remove the cheapest vertical seam, making the image one pixel
    /// narrower.
    pub fn pop_vertical(&mut self) -> Result<&ImageBuffer<P, Vec<S>>> {
        self.pop(Axis::Vertical)
    }

    /// Remove the cheapest horizontal seam, making the image one pixel
    /// shorter.
    pub fn pop_horizontal(&mut self) -> Result<&ImageBuffer<P, Vec<S>>> {
        self.pop(Axis::Horizontal)
    }

    /// Check a target size against the current image and return the
    /// order in which seams would be removed to reach it.
    pub fn plan(&self, target_width: u32, target_height: u32) -> Result<ShrinkSchedule> {
        let (width, height) = self.image.dimensions();
        if target_width == 0 || target_height == 0 {
            return Err(Error::invalid_argument(format!(
                "target size {}x{} has a zero dimension",
                target_width, target_height
            )));
        }
        if target_width > width || target_height > height {
            return Err(Error::invalid_argument(format!(
                "cannot grow a {}x{} image to {}x{}: only shrinking is supported",
                width, height, target_width, target_height
            )));
        }
        Ok(ShrinkSchedule::new(
            width - target_width,
            height - target_height,
        ))
    }

    // This is absurdly inefficient, as the entire energy map and both
    // seam tables are recalculated after every single seam.  Each
    // carve sees the image exactly as it is after the one before it.

    /// Carve seams until the image is `target_width` by
    /// `target_height`, interleaving vertical and horizontal seams in
    /// proportion to how many of each are needed.  Targets larger than
    /// the image, or zero, are rejected before anything is carved.
    pub fn shrink(
        &mut self,
        target_width: u32,
        target_height: u32,
    ) -> Result<&ImageBuffer<P, Vec<S>>> {
        self.shrink_with(target_width, target_height, |_, _| {})
    }

    /// `shrink`, calling `progress` after every carve with the axis just
    /// carved and the image as it now stands.
    pub fn shrink_with<F>(
        &mut self,
        target_width: u32,
        target_height: u32,
        mut progress: F,
    ) -> Result<&ImageBuffer<P, Vec<S>>>
    where
        F: FnMut(Axis, &ImageBuffer<P, Vec<S>>),
    {
        let schedule = self.plan(target_width, target_height)?;
        if schedule.len() > 0 {
            let (width, height) = self.image.dimensions();
            info!(
                "shrinking {}x{} to {}x{} ({} seams)",
                width,
                height,
                target_width,
                target_height,
                schedule.len()
            );
        }
        for axis in schedule {
            progress(axis, self.pop(axis)?);
        }
        Ok(&self.image)
    }

    /// A copy of the current image with its cheapest vertical seam
    /// painted on it.
    pub fn show_vertical(&self, color: P, thickness: u32) -> ImageBuffer<P, Vec<S>> {
        paint_vertical_seam(&self.image, &self.trace_min_vertical(), color, thickness)
    }

    /// A copy of the current image with its cheapest horizontal seam
    /// painted on it.
    pub fn show_horizontal(&self, color: P, thickness: u32) -> ImageBuffer<P, Vec<S>> {
        paint_horizontal_seam(&self.image, &self.trace_min_horizontal(), color, thickness)
    }
}

impl<P, S> SeamFinder for SeamCarver<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    fn find_horizontal_seam(&self) -> Seam {
        self.trace_min_horizontal()
    }

    fn find_vertical_seam(&self) -> Seam {
        self.trace_min_vertical()
    }
}

/// Given an image and a desired new width and height, repeatedly carve
/// seams out of a copy of the image.
pub fn seamcarve<I, P, S>(image: &I, width: u32, height: u32) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut carver = SeamCarver::from_view(image)?;
    carver.shrink(width, height)?;
    Ok(carver.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seamfinder::Axis::{Horizontal as H, Vertical as V};
    use image::{Rgb, RgbImage};

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn busy(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 37 + y * 11) % 256) as u8,
                ((x * x + 3 * y) % 256) as u8,
                ((x * y * 7) % 256) as u8,
            ])
        })
    }

    #[test]
    fn empty_images_are_rejected() {
        assert!(matches!(
            SeamCarver::new(RgbImage::new(0, 5)),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            SeamCarver::new(RgbImage::new(5, 0)),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn tables_match_the_image_on_construction() {
        let carver = SeamCarver::new(busy(6, 5)).unwrap();
        assert_eq!(carver.dimensions(), (6, 5));
        assert_eq!(carver.energy(), &calculate_energy(&busy(6, 5)));
        assert_eq!(carver.tables(V), &find_vertical(carver.energy()));
        assert_eq!(carver.tables(H), &find_horizontal(carver.energy()));
        assert_eq!(carver.trace_min_vertical().len(), 5);
        assert_eq!(carver.trace_min_horizontal().len(), 6);
    }

    #[test]
    fn tracing_does_not_mutate() {
        let carver = SeamCarver::new(busy(6, 5)).unwrap();
        let first = carver.trace_min_vertical();
        assert_eq!(carver.trace_min_vertical(), first);
        assert_eq!(carver.image(), &busy(6, 5));
    }

    #[test]
    fn pop_removes_the_traced_seam_and_recomputes() {
        let source = busy(8, 6);
        let mut carver = SeamCarver::new(source.clone()).unwrap();

        let seam = carver.trace_min_vertical();
        let expected = remove_vertical_seam(&source, &seam).unwrap();
        assert_eq!(carver.pop_vertical().unwrap(), &expected);
        assert_eq!(carver.dimensions(), (7, 6));

        let seam = carver.trace_min_horizontal();
        let expected = remove_horizontal_seam(&expected, &seam).unwrap();
        assert_eq!(carver.pop_horizontal().unwrap(), &expected);
        assert_eq!(carver.dimensions(), (7, 5));

        // Everything derived is rebuilt from the carved pixels, not
        // patched.
        let fresh = SeamCarver::new(expected).unwrap();
        assert_eq!(carver.energy(), fresh.energy());
        assert_eq!(carver.tables(V), fresh.tables(V));
        assert_eq!(carver.tables(H), fresh.tables(H));
    }

    #[test]
    fn pop_at_one_pixel_fails_and_changes_nothing() {
        let mut carver = SeamCarver::new(busy(1, 4)).unwrap();
        let before = carver.clone();
        assert!(matches!(
            carver.pop_vertical(),
            Err(Error::InvalidOperation { .. })
        ));
        assert_eq!(carver.image(), before.image());
        assert_eq!(carver.energy(), before.energy());

        let mut carver = SeamCarver::new(busy(4, 1)).unwrap();
        assert!(matches!(
            carver.pop_horizontal(),
            Err(Error::InvalidOperation { .. })
        ));
        assert_eq!(carver.dimensions(), (4, 1));
    }

    #[test]
    fn shrink_reaches_every_valid_target() {
        let source = busy(5, 4);
        for target_width in 1..=5 {
            for target_height in 1..=4 {
                let mut carver = SeamCarver::new(source.clone()).unwrap();
                let out = carver.shrink(target_width, target_height).unwrap();
                assert_eq!(out.dimensions(), (target_width, target_height));
            }
        }
    }

    #[test]
    fn shrink_to_current_size_is_a_no_op() {
        let mut carver = SeamCarver::new(busy(6, 5)).unwrap();
        assert_eq!(carver.shrink(6, 5).unwrap(), &busy(6, 5));
    }

    #[test]
    fn shrink_rejects_bad_targets_without_carving() {
        let mut carver = SeamCarver::new(busy(6, 5)).unwrap();
        for (w, h) in [(7, 5), (6, 6), (0, 5), (6, 0), (0, 0)].iter() {
            assert!(matches!(
                carver.shrink(*w, *h),
                Err(Error::InvalidArgument { .. })
            ));
            assert_eq!(carver.image(), &busy(6, 5));
        }
    }

    #[test]
    fn uniform_ten_by_ten_to_eight_by_eight_alternates() {
        let flat = RgbImage::from_pixel(10, 10, Rgb([40, 80, 120]));
        let mut carver = SeamCarver::new(flat).unwrap();
        assert_eq!(carver.plan(8, 8).unwrap().collect::<Vec<_>>(), vec![V, H, V, H]);

        let mut carved = Vec::new();
        let out = carver
            .shrink_with(8, 8, |axis, image| carved.push((axis, image.dimensions())))
            .unwrap();
        assert_eq!(
            carved,
            vec![(V, (9, 10)), (H, (9, 9)), (V, (8, 9)), (H, (8, 8))]
        );
        assert_eq!(out.dimensions(), (8, 8));
        assert!(out.pixels().all(|p| *p == Rgb([40, 80, 120])));
    }

    #[test]
    fn low_energy_pixels_go_first() {
        let mut image = RgbImage::from_pixel(9, 9, BLACK);
        image.put_pixel(4, 4, WHITE);
        let out = seamcarve(&image, 7, 7).unwrap();
        assert_eq!(out.dimensions(), (7, 7));
        assert_eq!(out.pixels().filter(|p| **p == WHITE).count(), 1);
    }

    #[test]
    fn show_paints_the_next_seam() {
        let carver = SeamCarver::new(busy(6, 5)).unwrap();
        let seam = carver.trace_min_vertical();
        let shown = carver.show_vertical(RED, 1);
        for (y, x) in seam.iter().enumerate() {
            assert_eq!(shown.get_pixel(*x, y as u32), &RED);
        }

        let seam = carver.trace_min_horizontal();
        let shown = carver.show_horizontal(RED, 1);
        for (x, y) in seam.iter().enumerate() {
            assert_eq!(shown.get_pixel(x as u32, *y), &RED);
        }
        assert_eq!(carver.image(), &busy(6, 5));
    }

    #[test]
    fn carver_is_a_seam_finder() {
        fn both<F: SeamFinder>(finder: &F) -> (Seam, Seam) {
            (finder.find_vertical_seam(), finder.find_horizontal_seam())
        }
        let carver = SeamCarver::new(busy(6, 5)).unwrap();
        assert_eq!(
            both(&carver),
            (carver.trace_min_vertical(), carver.trace_min_horizontal())
        );
    }
}
