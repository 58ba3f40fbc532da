// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image shrinking.
//!
//! [`SeamCarver`] takes an image and removes its least important
//! vertical and horizontal seams, one at a time, until it reaches the
//! requested size.  The pieces it is built from (energy, seam search,
//! seam removal, seam overlays) are exported for callers who want to
//! drive them by hand.

pub mod error;
pub use error::{Error, Result};

pub mod twodmap;
pub use twodmap::TwoDimensionalMap;

pub mod energy;
pub use energy::{calculate_energy, energy_to_image, EnergyGrid};

pub mod seamfinder;
pub use seamfinder::{find, find_horizontal, find_vertical, Axis, Seam, SeamFinder, SeamTables};

pub mod seamremover;
pub use seamremover::{remove_horizontal_seam, remove_vertical_seam};

pub mod overlay;
pub use overlay::{paint_horizontal_seam, paint_vertical_seam};

pub mod schedule;
pub use schedule::ShrinkSchedule;

pub mod seamcarver;
pub use seamcarver::{seamcarve, SeamCarver};
