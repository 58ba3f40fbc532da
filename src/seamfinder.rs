// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy map.
//!
//! Both directions use the same dynamic program.  For a vertical seam,
//! every cell of the cost table holds the cheapest total energy of any
//! 8-connected path from the top row down to it, and the step table
//! records which of the (up to) three cells above it that path came
//! through, as a column offset of -1, 0 or +1.  The horizontal seam is
//! the same thing run left to right, with row offsets.
//!
//! Predecessors that fall off the edge of the map are simply not
//! candidates.  Ties go to the straight step first, then -1, then +1:
//! a diagonal is only taken when it is strictly cheaper than everything
//! considered before it.

use crate::energy::EnergyGrid;
use crate::twodmap::TwoDimensionalMap;

/// One coordinate per row (vertical seam) or per column (horizontal
/// seam): the column, or row, the seam passes through there.
pub type Seam = Vec<u32>;

/// Which way a seam runs.  Removing a vertical seam makes the image one
/// pixel narrower; removing a horizontal one makes it one pixel shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// sources.
pub trait SeamFinder {
    /// Once a SeamFinder has an image (or whatever it needs to make a
    /// rational decision), request a horizontal seam.
    fn find_horizontal_seam(&self) -> Seam;

    /// Request a vertical seam.
    fn find_vertical_seam(&self) -> Seam;
}

/// The cumulative cost table and the back-step table for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SeamTables {
    axis: Axis,
    cost: TwoDimensionalMap<f64>,
    steps: TwoDimensionalMap<i8>,
}

// Pick the cheapest of up to three predecessors.  `straight` is always
// present; `before` and `after` are the -1 and +1 neighbours when they
// exist.
#[inline]
fn cheapest(straight: f64, before: Option<f64>, after: Option<f64>) -> (f64, i8) {
    let mut best = (straight, 0);
    if let Some(cost) = before {
        if cost < best.0 {
            best = (cost, -1);
        }
    }
    if let Some(cost) = after {
        if cost < best.0 {
            best = (cost, 1);
        }
    }
    best
}

/// Fill the cost and step tables for top-to-bottom seams.
pub fn find_vertical(energy: &EnergyGrid) -> SeamTables {
    let (width, height) = energy.dimensions();
    let mut cost = energy.clone();
    let mut steps = TwoDimensionalMap::new(width, height);

    for y in 1..height {
        for x in 0..width {
            let (parent, step) = cheapest(
                cost[(x, y - 1)],
                if x > 0 { Some(cost[(x - 1, y - 1)]) } else { None },
                if x + 1 < width { Some(cost[(x + 1, y - 1)]) } else { None },
            );
            cost[(x, y)] += parent;
            steps[(x, y)] = step;
        }
    }

    SeamTables {
        axis: Axis::Vertical,
        cost,
        steps,
    }
}

/// Fill the cost and step tables for left-to-right seams.
pub fn find_horizontal(energy: &EnergyGrid) -> SeamTables {
    let (width, height) = energy.dimensions();
    let mut cost = energy.clone();
    let mut steps = TwoDimensionalMap::new(width, height);

    for x in 1..width {
        for y in 0..height {
            let (parent, step) = cheapest(
                cost[(x - 1, y)],
                if y > 0 { Some(cost[(x - 1, y - 1)]) } else { None },
                if y + 1 < height { Some(cost[(x - 1, y + 1)]) } else { None },
            );
            cost[(x, y)] += parent;
            steps[(x, y)] = step;
        }
    }

    SeamTables {
        axis: Axis::Horizontal,
        cost,
        steps,
    }
}

/// Fill the tables for whichever axis is asked for.
pub fn find(energy: &EnergyGrid, axis: Axis) -> SeamTables {
    match axis {
        Axis::Vertical => find_vertical(energy),
        Axis::Horizontal => find_horizontal(energy),
    }
}

impl SeamTables {
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Cumulative cost of the cheapest path into each cell.
    pub fn cost(&self) -> &TwoDimensionalMap<f64> {
        &self.cost
    }

    /// Offset to the predecessor of each cell on its cheapest path.
    pub fn steps(&self) -> &TwoDimensionalMap<i8> {
        &self.steps
    }

    // Cells along the far edge (bottom row or right column), with
    // their coordinate along that edge.
    fn terminal_edge(&self) -> Vec<(u32, f64)> {
        let (width, height) = self.cost.dimensions();
        match self.axis {
            Axis::Vertical if height > 0 => (0..width)
                .map(|x| (x, self.cost[(x, height - 1)]))
                .collect(),
            Axis::Horizontal if width > 0 => (0..height)
                .map(|y| (y, self.cost[(width - 1, y)]))
                .collect(),
            _ => Vec::new(),
        }
    }

    // min_by keeps the first of equal elements, so ties on the far edge
    // go to the lowest coordinate.
    fn terminal_minimum(&self) -> Option<(u32, f64)> {
        self.terminal_edge()
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Total energy of the cheapest seam.  Zero for an empty table.
    pub fn min_cost(&self) -> f64 {
        self.terminal_minimum().map_or(0.0, |(_, cost)| cost)
    }

    /// Walk back from the cheapest cell on the far edge to the starting
    /// edge, following the recorded steps.  Returns the seam in
    /// start-to-end order; empty for an empty table.
    pub fn trace(&self) -> Seam {
        let (width, height) = self.cost.dimensions();
        let mut at = match self.terminal_minimum() {
            Some((at, _)) => at,
            None => return Seam::new(),
        };

        let length = match self.axis {
            Axis::Vertical => height,
            Axis::Horizontal => width,
        };
        let mut seam = vec![0; length as usize];
        for i in (0..length).rev() {
            seam[i as usize] = at;
            let step = match self.axis {
                Axis::Vertical => self.steps[(at, i)],
                Axis::Horizontal => self.steps[(i, at)],
            };
            at = (i64::from(at) + i64::from(step)) as u32;
        }
        seam
    }
}
